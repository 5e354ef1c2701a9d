//src/options.rs

use std::fmt;

/// Marker opening every module, e.g. `>>Basic Statistics\tpass`.
pub const MODULE_START: &str = ">>";

/// Line closing every module.
pub const MODULE_END: &str = ">>END_MODULE";

/// Name fragment identifying the report inside a FastQC zip archive.
pub const REPORT_MEMBER: &str = "fastqc_data.txt";

/// The one module FastQC always emits.
pub const BASIC_STATISTICS: &str = "Basic Statistics";

/// How the raw bytes of the report are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Strict UTF-8; invalid bytes fail the load.
    #[default]
    Utf8,
    /// UTF-8 with invalid sequences replaced by U+FFFD.
    Utf8Lossy,
    /// ISO-8859-1, every byte maps to the code point of the same value.
    Latin1,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf8Lossy => "UTF-8 (lossy)",
            TextEncoding::Latin1 => "Latin-1",
        };
        f.write_str(name)
    }
}

/// Which byte sequences terminate a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlineMode {
    /// `\n`, `\r\n` and a lone `\r` all end a line.
    #[default]
    Universal,
    /// Only `\n` ends a line; a `\r` stays part of the line text.
    Unix,
}

/// Text decoding options applied to a plain file or to the archive member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextOptions {
    pub encoding: TextEncoding,
    pub newlines: NewlineMode,
}

impl TextOptions {
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_newlines(mut self, newlines: NewlineMode) -> Self {
        self.newlines = newlines;
        self
    }
}

/// What to do when more than one archive member matches [`REPORT_MEMBER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberPolicy {
    /// Fail with `AmbiguousReport`.
    #[default]
    Unique,
    /// Take the last match in archive order.
    LastMatch,
}

/// How a module name passed to `raw_data`/`clean_data` finds its start line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMode {
    /// First line containing the name anywhere. A name that also occurs
    /// inside an earlier line (a data row, another module's header) matches
    /// that line instead, so pass names exactly as `summary()` reports them.
    #[default]
    Substring,
    /// First module start line whose name equals the given name.
    Exact,
}

/// Options for [`crate::FastqcReport::open_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportOptions {
    pub text: TextOptions,
    pub member_policy: MemberPolicy,
    pub lookup: LookupMode,
}

impl ReportOptions {
    pub fn with_text(mut self, text: TextOptions) -> Self {
        self.text = text;
        self
    }

    pub fn with_member_policy(mut self, policy: MemberPolicy) -> Self {
        self.member_policy = policy;
        self
    }

    pub fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }
}
