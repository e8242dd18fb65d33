//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sanitize",
    version,
    about = "Sanitize JSON records with declarative per-attribute transforms",
    long_about = "Sanitize JSON records with declarative per-attribute transforms.\n\n\
                  A model declaration lists each attribute's ordered transform chain\n\
                  (strip, squish, case, gsub, remove, nullify, round, truncate)."
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

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include record values in trace logs. Values are redacted otherwise.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sanitize every record in a JSON array.
    Apply(ApplyArgs),

    /// Validate a declaration and show each attribute's transform chain.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Model declaration (JSON).
    #[arg(long = "config", value_name = "DECLARATION")]
    pub config: PathBuf,

    /// Records to sanitize: a JSON array of objects.
    #[arg(long = "input", value_name = "RECORDS")]
    pub input: PathBuf,

    /// Write sanitized records here instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print a per-record summary table.
    #[arg(long = "summary")]
    pub summary: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Model declaration (JSON).
    #[arg(long = "config", value_name = "DECLARATION")]
    pub config: PathBuf,
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
