// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod parser;
pub mod shell;
pub mod types;

use std::io::Write;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, load_or_default};
use crate::exec::{PipelineExecutor, ProcessBackend};
use crate::shell::{SessionEnd, Shell};
use crate::types::SessionMode;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the process-backed pipeline executor
/// - the line-reading session on stdin/stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = effective_config(&args)?;
    let mode = session_mode(&args, &cfg);

    info!(
        execution_mode = ?cfg.shell.execution_mode,
        ?mode,
        "osh session starting"
    );

    let executor = PipelineExecutor::new(ProcessBackend::new(), cfg.shell.execution_mode);
    let mut shell = Shell::new(executor, cfg.shell.prompt.clone());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let end = shell.run_session(stdin, mode, &mut stdout).await?;
    debug!(?end, "session finished");

    // `exit` in batch mode leaves immediately; every other ending closes the
    // prompt line.
    if !(mode == SessionMode::Batch && end == SessionEnd::ExitKeyword) {
        writeln!(stdout)?;
    }

    Ok(())
}

/// Load the config file (if any) and apply CLI overrides on top.
pub fn effective_config(args: &CliArgs) -> Result<ConfigFile> {
    let mut cfg = load_or_default(args.config.as_deref())?;

    if let Some(mode) = args.execution_mode {
        cfg.shell.execution_mode = mode;
    }
    if let Some(limit) = args.max_commands {
        cfg.shell.interactive_limit = usize::try_from(limit)?;
    }

    Ok(cfg)
}

fn session_mode(args: &CliArgs, cfg: &ConfigFile) -> SessionMode {
    if args.batch {
        SessionMode::Batch
    } else {
        SessionMode::Interactive {
            limit: cfg.shell.interactive_limit,
        }
    }
}
