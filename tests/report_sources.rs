use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use fastqc_report::{
    FastqcReport, MemberPolicy, ReportError, ReportOptions, SourceKind, SummaryRow, MODULE_END,
};

const REPORT: &str = "##FastQC\t0.12.1
>>Basic Statistics\tpass
#Measure\tValue
Filename\tsample1.fastq
File type\tConventional base calls
Encoding\tSanger / Illumina 1.9
Total Sequences\t1000
Sequence length\t150
%GC\t47
>>END_MODULE
>>Per base sequence quality\twarn
#Base\tMean\tMedian
1\t32.5\t33.0
2\t31.9\t33.0
>>END_MODULE
>>Sequence Duplication Levels\tpass
#Total Deduplicated Percentage\t96.4
#Duplication Level\tPercentage of deduplicated
1\t98.2
>>END_MODULE
";

fn write_zip(path: &Path, members: &[(&str, &str)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    zip.add_directory("sample1_fastqc/", SimpleFileOptions::default()).unwrap();
    for (name, body) in members {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn plain_zip_and_gzip_give_identical_views() {
    let dir = tempfile::tempdir().unwrap();

    let plain = dir.path().join("fastqc_data.txt");
    std::fs::write(&plain, REPORT).unwrap();

    let archive = dir.path().join("sample1_fastqc.zip");
    write_zip(
        &archive,
        &[
            ("sample1_fastqc/fastqc_report.html", "<html></html>"),
            ("sample1_fastqc/fastqc_data.txt", REPORT),
        ],
    );

    let gzipped = dir.path().join("fastqc_data.txt.gz");
    let mut enc = GzEncoder::new(File::create(&gzipped).unwrap(), Compression::default());
    enc.write_all(REPORT.as_bytes()).unwrap();
    enc.finish().unwrap();

    let from_plain = FastqcReport::open(&plain).unwrap();
    let from_zip = FastqcReport::open(&archive).unwrap();
    let from_gzip = FastqcReport::open(&gzipped).unwrap();

    assert_eq!(from_plain.source_kind(), &SourceKind::Plain);
    assert_eq!(from_gzip.source_kind(), &SourceKind::Gzip);
    assert!(matches!(from_zip.source_kind(), SourceKind::Archive { member } if member == "sample1_fastqc/fastqc_data.txt"));
    assert_eq!(from_zip.source(), archive.as_path());

    for other in [&from_zip, &from_gzip] {
        assert_eq!(from_plain.summary(), other.summary());
        for name in from_plain.module_names() {
            assert_eq!(from_plain.clean_data(name).unwrap(), other.clean_data(name).unwrap());
        }
        assert_eq!(from_plain.basic_stats(), other.basic_stats());
    }
}

#[test]
fn module_views_on_a_full_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fastqc_data.txt");
    std::fs::write(&path, REPORT.replace('\n', "\r\n")).unwrap();

    let report = FastqcReport::open(&path).unwrap();
    assert_eq!(report.fastqc_version(), Some("0.12.1"));
    assert_eq!(report.summary()[0], SummaryRow::header());
    assert_eq!(report.summary().len(), 4);

    for name in report.module_names() {
        let raw = report.raw_data(name).unwrap();
        assert!(raw[0].starts_with(">>") && raw[0].contains(name));
        assert_eq!(raw[raw.len() - 1], MODULE_END);
        assert_eq!(report.clean_data(name).unwrap().len(), raw.len() - 2);
    }

    let dup = report.clean_data("Sequence Duplication Levels").unwrap();
    assert_eq!(dup[0], vec!["Total Deduplicated Percentage", "96.4"]);
    // only the first row is normalised
    assert_eq!(dup[1][0], "#Duplication Level");

    assert_eq!(report.basic_stats().len(), 6);
    assert_eq!(report.basic_stat("Encoding"), Some("Sanger / Illumina 1.9"));
    assert_eq!(report.basic_stat("%GC"), Some("47"));
}

#[test]
fn archive_without_report_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty_fastqc.zip");
    write_zip(&path, &[("sample1_fastqc/summary.txt", "PASS\tBasic Statistics\tsample1.fastq\n")]);

    let err = FastqcReport::open(&path).unwrap_err();
    assert!(err.is_load_error());
    assert!(matches!(err, ReportError::ReportNotFound { .. }));
    assert!(err.to_string().contains("empty_fastqc.zip"));
}

#[test]
fn ambiguous_archive_respects_member_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merged.zip");
    let second = REPORT.replace("sample1.fastq", "sample2.fastq");
    write_zip(
        &path,
        &[
            ("sample1_fastqc/fastqc_data.txt", REPORT),
            ("sample2_fastqc/fastqc_data.txt", second.as_str()),
        ],
    );

    let err = FastqcReport::open(&path).unwrap_err();
    assert!(matches!(err, ReportError::AmbiguousReport { ref members, .. } if members.len() == 2));

    let options = ReportOptions::default().with_member_policy(MemberPolicy::LastMatch);
    let report = FastqcReport::open_with(&path, options).unwrap();
    assert_eq!(report.basic_stat("Filename"), Some("sample2.fastq"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope_fastqc.zip");
    match FastqcReport::open(&path) {
        Err(ReportError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn report_is_shareable_across_threads() {
    let report = FastqcReport::from_lines(
        REPORT.lines().map(str::to_string).collect(),
        ReportOptions::default(),
    )
    .unwrap();
    std::thread::scope(|s| {
        for name in report.module_names() {
            let report = &report;
            s.spawn(move || {
                assert!(report.clean_data(name).is_ok());
            });
        }
    });
}
