//src/types.rs

/// One row of the module summary table: a module name and the status token
/// FastQC gave it, passed through verbatim ("pass", "warn", "fail", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub name: String,
    pub status: String,
}

impl SummaryRow {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }

    /// The synthetic `("Module Name", "Status")` row heading every summary.
    pub fn header() -> Self {
        Self::new("Module Name", "Status")
    }
}

/// A module section located in the loaded lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub status: String,
    /// Index of the `>>Name\tstatus` line.
    pub start_line: usize,
    /// Index of the closing `>>END_MODULE` line, `None` if the report is cut short.
    pub end_line: Option<usize>,
}

impl Module {
    /// Number of lines between the markers.
    pub fn interior_len(&self) -> Option<usize> {
        self.end_line
            .map(|end| end.saturating_sub(self.start_line).saturating_sub(1))
    }
}

/// A cleaned module table: rows of non-empty tab-separated fields,
/// borrowed from the loaded report.
pub type CleanRows<'a> = Vec<Vec<&'a str>>;
