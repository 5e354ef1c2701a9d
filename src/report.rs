//src/report.rs

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ahash::AHashMap;

use crate::error::{ReportError, Result};
use crate::loader::{load_lines, SourceKind};
use crate::options::{LookupMode, ReportOptions, BASIC_STATISTICS, MODULE_END, MODULE_START};
use crate::types::{CleanRows, Module, SummaryRow};

/// A loaded FastQC report.
///
/// The lines are read once in [`FastqcReport::open`]; the module summary and
/// the "Basic Statistics" map are derived right away, everything else is
/// computed per call from the immutable lines. Nothing is mutated after
/// construction, so a report can be shared across threads.
#[derive(Debug, Clone)]
pub struct FastqcReport {
    source: PathBuf,
    kind: SourceKind,
    options: ReportOptions,
    lines: Vec<String>,
    /// (name, status) per module in file order, without the header row.
    summary: Vec<SummaryRow>,
    basic_stats: AHashMap<String, String>,
}

impl FastqcReport {
    /// Opens a `fastqc_data.txt` (plain or gzipped) or a FastQC zip archive
    /// with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, ReportOptions::default())
    }

    pub fn open_with<P: AsRef<Path>>(path: P, options: ReportOptions) -> Result<Self> {
        let path = path.as_ref();
        let loaded = load_lines(path, &options.text, options.member_policy)?;
        let report = Self::build(path.to_path_buf(), loaded.kind, loaded.lines, options)?;

        log::info!(
            "Loaded report {} ({}) with {} lines, {} modules",
            report.source.display(),
            report.kind,
            report.lines.len(),
            report.summary.len()
        );
        Ok(report)
    }

    /// Builds a report from lines that are already in memory.
    pub fn from_lines(lines: Vec<String>, options: ReportOptions) -> Result<Self> {
        Self::build(PathBuf::new(), SourceKind::Plain, lines, options)
    }

    fn build(
        source: PathBuf,
        kind: SourceKind,
        lines: Vec<String>,
        options: ReportOptions,
    ) -> Result<Self> {
        let summary = lines
            .iter()
            .filter(|line| is_module_start(line))
            .map(|line| parse_module_line(line).map(|(name, status)| SummaryRow::new(name, status)))
            .collect::<Result<Vec<_>>>()?;

        let mut report = Self {
            source,
            kind,
            options,
            lines,
            summary,
            basic_stats: AHashMap::new(),
        };
        report.basic_stats = report.collect_basic_stats()?;
        Ok(report)
    }

    /// Module names and statuses in file order, headed by
    /// `("Module Name", "Status")`.
    pub fn summary(&self) -> Vec<SummaryRow> {
        std::iter::once(SummaryRow::header())
            .chain(self.summary.iter().cloned())
            .collect()
    }

    /// Module names in file order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.summary.iter().map(|row| row.name.as_str())
    }

    /// Status token of the module named exactly `name`.
    pub fn status(&self, name: &str) -> Option<&str> {
        self.summary
            .iter()
            .find(|row| row.name == name)
            .map(|row| row.status.as_str())
    }

    /// Every module with its line positions.
    pub fn modules(&self) -> Vec<Module> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_module_start(line))
            .filter_map(|(start, line)| {
                let (name, status) = parse_module_line(line).ok()?;
                Some(Module {
                    name: name.to_string(),
                    status: status.to_string(),
                    start_line: start,
                    end_line: self.find_end(start),
                })
            })
            .collect()
    }

    pub fn module(&self, name: &str) -> Option<Module> {
        self.modules().into_iter().find(|m| m.name == name)
    }

    /// Statistic name -> value from the "Basic Statistics" module.
    pub fn basic_stats(&self) -> &AHashMap<String, String> {
        &self.basic_stats
    }

    pub fn basic_stat(&self, key: &str) -> Option<&str> {
        self.basic_stats.get(key).map(String::as_str)
    }

    /// Lines of `module` from its start marker through `>>END_MODULE`.
    ///
    /// With [`LookupMode::Substring`] the start is the first line containing
    /// `module` anywhere in its text.
    pub fn raw_data(&self, module: &str) -> Result<&[String]> {
        let start = self.find_start(module)?;
        let end = self
            .find_end(start)
            .ok_or_else(|| ReportError::malformed(module, format!("no {MODULE_END} line after the start")))?;
        log::debug!("module '{module}' spans lines {start}..={end}");
        Ok(&self.lines[start..=end])
    }

    /// Tab-split rows between the markers of `module`, empty fields dropped
    /// and the leading `#` of the column header removed.
    pub fn clean_data(&self, module: &str) -> Result<CleanRows<'_>> {
        let raw = self.raw_data(module)?;
        if raw.len() < 3 {
            return Err(ReportError::malformed(module, "no lines between the module markers"));
        }

        let mut rows: CleanRows<'_> = raw[1..raw.len() - 1]
            .iter()
            .map(|line| line.split('\t').filter(|field| !field.is_empty()).collect())
            .collect();

        match rows[0].first_mut() {
            Some(cell) => *cell = strip_residue(*cell),
            None => return Err(ReportError::malformed(module, "header row has no fields")),
        }
        Ok(rows)
    }

    /// Version from a leading `##FastQC<TAB>version` line.
    pub fn fastqc_version(&self) -> Option<&str> {
        self.lines
            .first()
            .and_then(|line| line.strip_prefix("##FastQC"))
            .map(str::trim)
            .filter(|version| !version.is_empty())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Path the report was opened from; empty for [`FastqcReport::from_lines`].
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn source_kind(&self) -> &SourceKind {
        &self.kind
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Writes every loaded line, newline-terminated.
    pub fn write_content<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Prints every loaded line to stdout.
    pub fn print_content(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }

    fn find_start(&self, module: &str) -> Result<usize> {
        let found = match self.options.lookup {
            LookupMode::Substring => self.lines.iter().position(|line| line.contains(module)),
            LookupMode::Exact => self.lines.iter().position(|line| {
                is_module_start(line)
                    && matches!(parse_module_line(line), Ok((name, _)) if name == module)
            }),
        };
        found.ok_or_else(|| ReportError::ModuleNotFound {
            module: module.to_string(),
        })
    }

    fn find_end(&self, start: usize) -> Option<usize> {
        self.lines[start..]
            .iter()
            .position(|line| line == MODULE_END)
            .map(|offset| start + offset)
    }

    fn collect_basic_stats(&self) -> Result<AHashMap<String, String>> {
        // Duplicate names keep the last value.
        self.clean_data(BASIC_STATISTICS)?
            .iter()
            .skip(1)
            .map(|row| match row.as_slice() {
                [name, value, ..] => Ok((name.to_string(), value.to_string())),
                _ => Err(ReportError::malformed(
                    BASIC_STATISTICS,
                    "statistic row needs a name and a value",
                )),
            })
            .collect()
    }
}

fn is_module_start(line: &str) -> bool {
    line.contains(MODULE_START) && !line.contains(MODULE_END)
}

/// Splits `>>Name\tstatus` into name and status.
fn parse_module_line(line: &str) -> Result<(&str, &str)> {
    let mut fields = line.split('\t');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(head), Some(status), None) => Ok((strip_marker(head), status)),
        _ => Err(ReportError::malformed(
            strip_marker(line.split('\t').next().unwrap_or_default()),
            "module start line must have exactly a name and a status",
        )),
    }
}

/// Drops the two marker characters in front of the module name.
fn strip_marker(field: &str) -> &str {
    match field.char_indices().nth(MODULE_START.len()) {
        Some((at, _)) => &field[at..],
        None => "",
    }
}

/// Drops a leading non-alphanumeric char, e.g. `#Measure` -> `Measure`.
fn strip_residue(field: &str) -> &str {
    let mut chars = field.chars();
    match chars.next() {
        Some(c) if !c.is_alphanumeric() => chars.as_str(),
        _ => field,
    }
}
