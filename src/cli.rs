// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::ExecutionMode;

/// Command-line arguments for `osh`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "osh",
    version,
    about = "A small shell that runs pipelines, conditionals and redirections.",
    long_about = None
)]
pub struct CliArgs {
    /// Batch mode: read lines until end of input, without a prompt.
    #[arg(short = 't', long = "batch")]
    pub batch: bool,

    /// Path to a config file (TOML).
    ///
    /// Default: `osh.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// How pipe-connected stages are scheduled. Overrides the config file.
    #[arg(long, value_enum, value_name = "MODE")]
    pub execution_mode: Option<ExecutionMode>,

    /// Maximum number of lines read in interactive mode. Overrides the
    /// config file.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_commands: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `OSH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
