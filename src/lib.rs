// src/lib.rs
//! Parser for FastQC reports.
//!
//! A report (`fastqc_data.txt`, optionally gzipped or inside the zip archive
//! FastQC writes) is a sequence of modules:
//!
//! ```text
//! >>Basic Statistics	pass
//! #Measure	Value
//! Filename	sample1.fastq
//! >>END_MODULE
//! ```
//!
//! [`FastqcReport`] loads it once and answers summary, raw and cleaned table
//! queries per module.
pub mod error;
pub mod loader;
pub mod options;
pub mod report;
pub mod types;

pub use error::{ReportError, Result};
pub use loader::{load_lines, SourceKind};
pub use options::{
    LookupMode, MemberPolicy, NewlineMode, ReportOptions, TextEncoding, TextOptions,
    BASIC_STATISTICS, MODULE_END, MODULE_START, REPORT_MEMBER,
};
pub use report::FastqcReport;
pub use types::{CleanRows, Module, SummaryRow};
