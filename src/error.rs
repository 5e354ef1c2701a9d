//src/error.rs

use std::path::PathBuf;
use thiserror::Error;

use crate::options::TextEncoding;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Everything that can go wrong while loading or querying a FastQC report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: no archive member matching '{pattern}'", path.display())]
    ReportNotFound { path: PathBuf, pattern: String },

    #[error("{}: several archive members match the report name: {}", path.display(), members.join(", "))]
    AmbiguousReport { path: PathBuf, members: Vec<String> },

    #[error("{}: cannot read archive member: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("{}: invalid {encoding} text at byte {offset}", path.display())]
    Decode {
        path: PathBuf,
        encoding: TextEncoding,
        offset: usize,
    },

    #[error("module '{module}' not found in report")]
    ModuleNotFound { module: String },

    #[error("module '{module}' is malformed: {reason}")]
    MalformedModule { module: String, reason: String },
}

impl ReportError {
    /// True for failures raised while resolving and reading the input,
    /// i.e. before any module could be looked at.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ReportError::Io { .. }
                | ReportError::ReportNotFound { .. }
                | ReportError::AmbiguousReport { .. }
                | ReportError::Archive { .. }
                | ReportError::Decode { .. }
        )
    }

    pub(crate) fn malformed(module: &str, reason: impl Into<String>) -> Self {
        ReportError::MalformedModule {
            module: module.to_string(),
            reason: reason.into(),
        }
    }
}
