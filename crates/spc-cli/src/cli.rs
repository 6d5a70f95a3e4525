//! CLI argument definitions for the SPC tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use spc_cli::commands::{ExportFormat, PatchRequest, SynthRequest};

#[derive(Parser)]
#[command(
    name = "spc",
    version,
    about = "Inspect, export and patch Galactic SPC spectra",
    long_about = "Inspect, export and patch Galactic SPC spectroscopy files.\n\n\
                  Patching replaces only the Y samples; every other byte of the\n\
                  original file, including unit and format metadata, is preserved."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Prefix pretty and compact log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the decoded header and a summary of the spectrum.
    Inspect(InspectArgs),

    /// Export X/Y values as CSV or JSON.
    Export(ExportArgs),

    /// Replace the Y samples of an existing file, preserving all other bytes.
    Patch(PatchArgs),

    /// Build a new SPC file from a column of samples.
    Synth(SynthArgs),
}

#[derive(Args)]
pub struct ReadArgs {
    /// Path to the SPC file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Fail instead of substituting a placeholder axis for implausible headers.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    #[command(flatten)]
    pub read: ReadArgs,
}

#[derive(Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub read: ReadArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,

    /// Output path (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PatchArgs {
    #[command(flatten)]
    pub read: ReadArgs,

    /// Output path for the patched file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// CSV or one-per-line file with the replacement Y samples.
    #[arg(long = "values", value_name = "PATH", conflicts_with = "threshold")]
    pub values: Option<PathBuf>,

    /// Clip existing samples below this value instead of loading new ones.
    #[arg(long = "threshold", value_name = "Y", allow_hyphen_values = true)]
    pub threshold: Option<f32>,

    /// Only accept an exact match at the standard payload offsets.
    #[arg(long = "no-correlation-scan")]
    pub no_correlation_scan: bool,
}

#[derive(Parser)]
pub struct SynthArgs {
    /// CSV with a `y` column, or `x,y` pairs.
    #[arg(value_name = "VALUES")]
    pub values: PathBuf,

    /// Output path for the new file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// First X value (ignored when the input has an X column).
    #[arg(long = "first", default_value_t = 400.0, allow_hyphen_values = true)]
    pub first: f64,

    /// Last X value (ignored when the input has an X column).
    #[arg(long = "last", default_value_t = 4000.0, allow_hyphen_values = true)]
    pub last: f64,

    /// Experiment type code (0-13).
    #[arg(long = "experiment", default_value_t = 0)]
    pub experiment: u8,

    /// Raw flag byte; the even-spacing bit is always set.
    #[arg(long = "flags", default_value_t = 0)]
    pub flags: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
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

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Csv => Self::Csv,
            ExportFormatArg::Json => Self::Json,
        }
    }
}

impl From<PatchArgs> for PatchRequest {
    fn from(args: PatchArgs) -> Self {
        Self {
            input: args.read.input,
            strict: args.read.strict,
            output: args.output,
            values: args.values,
            threshold: args.threshold,
            correlation_scan: !args.no_correlation_scan,
        }
    }
}

impl From<SynthArgs> for SynthRequest {
    fn from(args: SynthArgs) -> Self {
        Self {
            values: args.values,
            output: args.output,
            first: args.first,
            last: args.last,
            experiment: args.experiment,
            flags: args.flags,
        }
    }
}
