//src/loader.rs

use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use zip::ZipArchive;

use crate::error::{ReportError, Result};
use crate::options::{MemberPolicy, NewlineMode, TextEncoding, TextOptions, REPORT_MEMBER};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Where the report text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A plain `fastqc_data.txt`.
    Plain,
    /// A gzip-compressed text file.
    Gzip,
    /// A member of a FastQC zip archive.
    Archive { member: String },
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Plain => f.write_str("plain text"),
            SourceKind::Gzip => f.write_str("gzip"),
            SourceKind::Archive { member } => write!(f, "zip member {member}"),
        }
    }
}

/// Lines of a report, fully read and decoded, plus their origin.
#[derive(Debug, Clone)]
pub struct LoadedText {
    pub lines: Vec<String>,
    pub kind: SourceKind,
}

/// Reads `path` into memory and returns its lines.
///
/// A zip archive is searched for the single member whose name contains
/// `fastqc_data.txt`; anything else is read as text, inflating it first if it
/// carries the gzip magic. Line terminators are removed and blank lines kept.
/// The file handle is closed before this returns.
pub fn load_lines<P: AsRef<Path>>(
    path: P,
    text: &TextOptions,
    policy: MemberPolicy,
) -> Result<LoadedText> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| io_error(path, source))?;

    let (bytes, kind) = match read_archive_member(&bytes, path, policy)? {
        Some((buf, member)) => (buf, SourceKind::Archive { member }),
        None if bytes.starts_with(&GZIP_MAGIC) => {
            let mut buf = Vec::new();
            MultiGzDecoder::new(bytes.as_slice())
                .read_to_end(&mut buf)
                .map_err(|source| io_error(path, source))?;
            (buf, SourceKind::Gzip)
        }
        None => (bytes, SourceKind::Plain),
    };

    let decoded = decode(bytes, text.encoding, path)?;
    let lines = split_lines(&decoded, text.newlines);
    Ok(LoadedText { lines, kind })
}

/// Returns the report member's bytes and name, or `None` when `bytes` is not
/// a zip archive at all.
fn read_archive_member(
    bytes: &[u8],
    path: &Path,
    policy: MemberPolicy,
) -> Result<Option<(Vec<u8>, String)>> {
    let mut archive = match ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => archive,
        Err(_) => return Ok(None),
    };
    let (index, member) = select_member(&mut archive, path, policy)?;
    let mut buf = Vec::new();
    archive
        .by_index(index)
        .map_err(|source| ReportError::Archive {
            path: path.to_path_buf(),
            source,
        })?
        .read_to_end(&mut buf)
        .map_err(|source| io_error(path, source))?;
    Ok(Some((buf, member)))
}

/// Picks the archive entry holding the report. Directory entries never match.
fn select_member<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &Path,
    policy: MemberPolicy,
) -> Result<(usize, String)> {
    let mut matches: Vec<(usize, String)> = Vec::new();
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|source| ReportError::Archive {
                path: path.to_path_buf(),
                source,
            })?;
        if !entry.is_dir() && entry.name().contains(REPORT_MEMBER) {
            matches.push((index, entry.name().to_string()));
        }
    }
    log::debug!(
        "{}: {} of {} archive entries match '{}'",
        path.display(),
        matches.len(),
        archive.len(),
        REPORT_MEMBER
    );

    match (matches.len(), policy) {
        (0, _) => Err(ReportError::ReportNotFound {
            path: path.to_path_buf(),
            pattern: REPORT_MEMBER.to_string(),
        }),
        (1, _) => Ok(matches.remove(0)),
        (_, MemberPolicy::Unique) => Err(ReportError::AmbiguousReport {
            path: path.to_path_buf(),
            members: matches.into_iter().map(|(_, name)| name).collect(),
        }),
        (n, MemberPolicy::LastMatch) => {
            let last = matches.remove(n - 1);
            log::warn!(
                "{}: {} members match '{}', using the last one ({})",
                path.display(),
                n,
                REPORT_MEMBER,
                last.1
            );
            Ok(last)
        }
    }
}

fn decode(bytes: Vec<u8>, encoding: TextEncoding, path: &Path) -> Result<String> {
    match encoding {
        TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| ReportError::Decode {
            path: path.to_path_buf(),
            encoding,
            offset: e.utf8_error().valid_up_to(),
        }),
        TextEncoding::Utf8Lossy => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Splits decoded text into lines without their terminators. A final
/// terminator does not produce a trailing empty line.
pub fn split_lines(text: &str, mode: NewlineMode) -> Vec<String> {
    match mode {
        NewlineMode::Unix => text.split_terminator('\n').map(str::to_string).collect(),
        NewlineMode::Universal => {
            let mut lines = Vec::new();
            let mut rest = text;
            while !rest.is_empty() {
                match rest.find(|c: char| c == '\n' || c == '\r') {
                    Some(i) => {
                        lines.push(rest[..i].to_string());
                        let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                        rest = &rest[i + skip..];
                    }
                    None => {
                        lines.push(rest.to_string());
                        break;
                    }
                }
            }
            lines
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: PathBuf::from(path),
        source,
    }
}
