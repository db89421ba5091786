//! CLI argument definitions for the sconv demo.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sconv",
    version,
    about = "Rule-driven struct-to-struct mapping demo",
    long_about = "Map a sample user DTO into its domain model.\n\n\
                  Applies rename, ignore and computed-field rules, recurses into\n\
                  nested structs, vectors, arrays and maps, and reports every\n\
                  field it could not map."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Map the sample user and print the result as JSON.
    Demo(DemoArgs),

    /// List the registered rule sets.
    Rules,
}

#[derive(Parser)]
pub struct DemoArgs {
    /// Extra value injected into rule functions by type (repeatable).
    ///
    /// Integers become i64, decimals f64, true/false bool, anything else a
    /// string. Defaults to: hello 3.14 world.
    #[arg(long = "arg", value_name = "VALUE")]
    pub args: Vec<String>,

    /// Do not log mapping warnings (they are still summarised).
    #[arg(long = "no-warnings")]
    pub no_warnings: bool,

    /// Print the mapped value as single-line JSON.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Append to target collections instead of rebuilding them.
    #[arg(long = "append")]
    pub append: bool,
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
