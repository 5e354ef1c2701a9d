use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use fastqc_report::{
    FastqcReport, LookupMode, MemberPolicy, NewlineMode, ReportOptions, TextEncoding,
    TextOptions,
};

/// Inspect a FastQC report (fastqc_data.txt, .txt.gz or the FastQC zip).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Report file or FastQC zip archive.
    path: PathBuf,

    /// Text encoding of the report.
    #[arg(long, value_enum, default_value_t = Encoding::Utf8)]
    encoding: Encoding,

    /// Split lines on \n only instead of \n, \r\n and \r.
    #[arg(long)]
    unix_newlines: bool,

    /// Match module names exactly instead of by substring.
    #[arg(long)]
    exact: bool,

    /// Accept archives with several report members, using the last one.
    #[arg(long)]
    last_match: bool,

    /// Log progress at info level.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Module names and their status.
    Summary,
    /// Module names only.
    Modules,
    /// The Basic Statistics key/value pairs.
    Stats,
    /// Raw lines of a module, markers included.
    Raw { module: String },
    /// Cleaned, tab-separated table of a module.
    Clean { module: String },
    /// Every line of the report.
    Content,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Encoding {
    Utf8,
    Utf8Lossy,
    Latin1,
}

impl From<Encoding> for TextEncoding {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Utf8 => TextEncoding::Utf8,
            Encoding::Utf8Lossy => TextEncoding::Utf8Lossy,
            Encoding::Latin1 => TextEncoding::Latin1,
        }
    }
}

impl Cli {
    fn report_options(&self) -> ReportOptions {
        let newlines = if self.unix_newlines {
            NewlineMode::Unix
        } else {
            NewlineMode::Universal
        };
        ReportOptions::default()
            .with_text(
                TextOptions::default()
                    .with_encoding(self.encoding.into())
                    .with_newlines(newlines),
            )
            .with_lookup(if self.exact {
                LookupMode::Exact
            } else {
                LookupMode::Substring
            })
            .with_member_policy(if self.last_match {
                MemberPolicy::LastMatch
            } else {
                MemberPolicy::Unique
            })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")?,
    );
    spinner.set_message(format!("Loading {}...", cli.path.display()));

    let report = FastqcReport::open_with(&cli.path, cli.report_options());
    spinner.finish_and_clear();
    let report = report?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Summary => {
            for row in report.summary() {
                writeln!(out, "{}\t{}", row.name, row.status)?;
            }
        }
        Command::Modules => {
            for name in report.module_names() {
                writeln!(out, "{name}")?;
            }
        }
        Command::Stats => {
            // file order rather than map order
            for row in report.clean_data(fastqc_report::BASIC_STATISTICS)?.iter().skip(1) {
                if let Some(value) = row.first().and_then(|key| report.basic_stat(key)) {
                    writeln!(out, "{}\t{}", row[0], value)?;
                }
            }
        }
        Command::Raw { module } => {
            for line in report.raw_data(module)? {
                writeln!(out, "{line}")?;
            }
        }
        Command::Clean { module } => {
            for row in report.clean_data(module)? {
                writeln!(out, "{}", row.join("\t"))?;
            }
        }
        Command::Content => report.write_content(&mut out)?,
    }
    Ok(())
}
