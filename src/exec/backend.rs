// src/exec/backend.rs

//! Pluggable process backend.
//!
//! The executor talks to a `StageBackend` instead of calling
//! `tokio::process::Command` directly. Production code uses
//! [`ProcessBackend`]; tests swap in a scripted fake that records which
//! programs were launched without creating any process.

use std::future::Future;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tracing::debug;

use crate::command::{CommandDescriptor, StageOutcome};

/// Standard streams handed to a stage at spawn time.
///
/// Owning the `Stdio` values means every pipe end and redirection file that
/// was not passed on is closed as soon as the `StageIo` is dropped.
#[derive(Debug)]
pub struct StageIo {
    pub stdin: Stdio,
    pub stdout: Stdio,
}

/// Future resolving to a stage's final outcome.
pub type WaitFuture<'a> = Pin<Box<dyn Future<Output = io::Result<StageOutcome>> + Send + 'a>>;

/// A stage whose process has been created.
pub trait RunningStage: Send {
    /// Wait for the process to terminate and reap it.
    fn wait(&mut self) -> WaitFuture<'_>;
}

/// Trait abstracting how a stage's process is created.
pub trait StageBackend: Send {
    /// Create a process for `stage` wired to `io`.
    ///
    /// The returned `io::Error` is classified by the executor: resource
    /// exhaustion aborts the whole line, anything else (missing program,
    /// permission denied, bad executable format) only fails this stage.
    fn spawn_stage(
        &mut self,
        stage: &CommandDescriptor,
        io: StageIo,
    ) -> io::Result<Box<dyn RunningStage>>;
}

/// Backend that creates real OS processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessBackend;

impl ProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl StageBackend for ProcessBackend {
    fn spawn_stage(
        &mut self,
        stage: &CommandDescriptor,
        io: StageIo,
    ) -> io::Result<Box<dyn RunningStage>> {
        // `cmd` owns the parent's copies of the stage's stdio; dropping it at
        // the end of this function closes them so pipe readers see EOF.
        let mut cmd = Command::new(stage.program());
        cmd.args(stage.arguments())
            .stdin(io.stdin)
            .stdout(io.stdout)
            .stderr(Stdio::inherit());

        let child = cmd.spawn()?;
        debug!(program = %stage.program(), pid = child.id(), "stage process spawned");

        Ok(Box::new(ProcessStage { child }))
    }
}

struct ProcessStage {
    child: Child,
}

impl RunningStage for ProcessStage {
    fn wait(&mut self) -> WaitFuture<'_> {
        Box::pin(async move {
            let status = self.child.wait().await?;
            Ok(outcome_from_status(status))
        })
    }
}

/// Map an exit status to an outcome; a signal `s` becomes `128 + s`.
pub fn outcome_from_status(status: ExitStatus) -> StageOutcome {
    match (status.code(), status.signal()) {
        (Some(code), _) => StageOutcome::from_code(code),
        (None, Some(signal)) => StageOutcome::Failed(128 + signal),
        (None, None) => StageOutcome::Failed(-1),
    }
}
