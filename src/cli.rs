// CLI-specific types and structures
// This module contains the command-line interface definitions and parsing logic

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use loglab::ParserKind;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `[timestamp] LEVEL: message`, or `-` for lines that did not match
    #[default]
    Default,
    /// One JSON object per line, or `null` for lines that did not match
    Jsonl,
}

#[derive(Parser, Debug)]
#[command(name = "loglab")]
#[command(version)]
#[command(about = "Parse [timestamp] LEVEL: message logs and estimate pi, serially or in parallel")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read configuration from FILE instead of the default locations
    #[arg(long = "config-file", value_name = "FILE", global = true, help_heading = "Configuration Options")]
    pub config_file: Option<String>,

    /// Ignore configuration files
    #[arg(long = "ignore-config", global = true, help_heading = "Configuration Options")]
    pub ignore_config: bool,

    /// Show the active configuration and search locations, then exit
    #[arg(long = "show-config", help_heading = "Configuration Options")]
    pub show_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse log lines from files (or stdin) into records
    #[command(args_override_self = true)]
    Parse(ParseArgs),
    /// Count matching lines in a file without printing records
    #[command(args_override_self = true)]
    Scan(ScanArgs),
    /// Estimate pi by Monte Carlo sampling of the unit square
    #[command(args_override_self = true)]
    Pi(PiArgs),
    /// Validate a `key = value` configuration file
    CheckConfig(CheckConfigArgs),
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Input files; reads stdin when none are given
    pub files: Vec<PathBuf>,

    /// Parser implementation
    #[arg(long = "parser", value_enum, default_value = "regex")]
    pub parser: ParserKind,

    #[arg(short = 'F', long = "output-format", value_enum, default_value = "default")]
    pub output_format: OutputFormat,

    /// Drop lines that did not match instead of printing a placeholder
    #[arg(long = "matched-only")]
    pub matched_only: bool,

    /// Print line counts to stderr when done
    #[arg(long = "stats")]
    pub stats: bool,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    pub file: PathBuf,

    #[arg(long = "parser", value_enum, default_value = "regex")]
    pub parser: ParserKind,
}

#[derive(Args, Debug)]
pub struct PiArgs {
    /// Number of samples to draw
    #[arg(
        short = 'n',
        long = "samples",
        default_value = "1000000",
        allow_negative_numbers = true,
        value_parser = parse_samples
    )]
    pub samples: u64,

    /// Worker threads (0 = one per CPU)
    #[arg(short = 'w', long = "workers", default_value_t = 0)]
    pub workers: usize,

    /// Sample on the calling thread only
    #[arg(long = "serial")]
    pub serial: bool,

    /// Seed for a reproducible estimate
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct CheckConfigArgs {
    pub file: PathBuf,
}

fn parse_samples(value: &str) -> Result<u64, String> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", value))?;
    loglab::estimator::sample_count(parsed).map_err(|e| e.to_string())
}
