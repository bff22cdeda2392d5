//! CLI argument definitions for the contract importer.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "contracts",
    version,
    about = "Import contract spreadsheets and report their lifecycle",
    long_about = "Import a spreadsheet of service and license contracts.\n\n\
                  Each row becomes a contract with an end date, days remaining and\n\
                  elapsed months; contracts are classified as expired, due soon,\n\
                  active or other."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the module path of each log event.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Log an event with timings when each span (such as an import) closes.
    #[arg(long = "log-spans", global = true)]
    pub log_spans: bool,
}

impl Cli {
    /// Logging configuration for these flags.
    ///
    /// `--log-level` beats `-v`/`-q`, and either one disables `RUST_LOG`.
    /// With `--color auto`, ANSI is used only for an interactive stderr.
    pub fn log_config(&self, stderr_is_terminal: bool) -> LogConfig {
        let level_filter = match self.log_level {
            Some(LogLevelArg::Error) => LevelFilter::ERROR,
            Some(LogLevelArg::Warn) => LevelFilter::WARN,
            Some(LogLevelArg::Info) => LevelFilter::INFO,
            Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
            Some(LogLevelArg::Trace) => LevelFilter::TRACE,
            None => self.verbosity.tracing_level_filter(),
        };
        let format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && stderr_is_terminal,
        };
        LogConfig::default()
            .with_level_filter(level_filter)
            .with_env_filter(!(self.verbosity.is_present() || self.log_level.is_some()))
            .with_format(format)
            .with_log_file(self.log_file.clone())
            .with_ansi(with_ansi)
            .with_timestamps(self.log_timestamps)
            .with_target(self.log_target)
            .with_spans(self.log_spans)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a workbook and print the contract table.
    Import(ImportArgs),

    /// Write the sample workbook.
    Sample(SampleArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Workbook to import (xlsx, xlsm, xlsb, xls or ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Date to compute days remaining against (default: today).
    #[arg(long = "reference-date", value_name = "YYYY-MM-DD")]
    pub reference_date: Option<NaiveDate>,

    /// Contracts ending within this many days are due soon.
    #[arg(long = "due-soon-days", value_name = "DAYS", default_value_t = 30)]
    pub due_soon_days: i64,

    /// Also print the raw columns from the fifth column onward.
    #[arg(long = "raw")]
    pub raw: bool,

    /// Print contracts grouped by the month they end.
    #[arg(long = "calendar")]
    pub calendar: bool,

    /// Print the import as JSON instead of tables.
    #[arg(long = "json", conflicts_with_all = ["raw", "calendar"])]
    pub json: bool,
}

#[derive(Parser)]
pub struct SampleArgs {
    /// Destination path for the generated workbook.
    #[arg(value_name = "OUT", default_value = "contracts-sample.xlsx")]
    pub output: PathBuf,

    /// Replace an existing file.
    #[arg(long = "force")]
    pub force: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
