// src/exec/pipeline.rs

//! The pipeline executor.
//!
//! Stages are walked in segments (see [`plan::segments`]). For each stage the
//! executor allocates the forward pipe if needed, resolves redirections,
//! spawns through the [`StageBackend`], and threads the pipe's read end into
//! the next stage as an `Option<PipeReader>`. Once a segment is launched its
//! stages are waited in order and the last stage's continuation policy
//! decides whether the following segment runs.

use std::io::{self, PipeReader};

use tracing::{debug, error, warn};

use crate::command::{CommandDescriptor, StageOutcome};
use crate::errors::{OshError, Result};
use crate::exec::backend::{RunningStage, StageBackend};
use crate::exec::{plan, redirect};
use crate::types::ExecutionMode;

/// Status recorded for a stage whose redirection target could not be opened.
pub const REDIRECT_FAILURE_STATUS: i32 = 1;
/// Status recorded when the program could not be found.
pub const EXEC_NOT_FOUND_STATUS: i32 = 127;
/// Status recorded when the program was found but could not be executed.
pub const EXEC_FAILURE_STATUS: i32 = 126;

/// What happened to one attempted stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    /// Position in the descriptor sequence.
    pub index: usize,
    pub program: String,
    pub outcome: StageOutcome,
    /// `false` when the stage failed before a process existed (redirection
    /// or exec failure).
    pub spawned: bool,
}

/// Result of running one descriptor sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Attempted stages, in order. Stages after a halt are absent.
    pub stages: Vec<StageReport>,
    /// Index of the stage whose continuation policy stopped the sequence
    /// before its end.
    pub halted_after: Option<usize>,
}

impl PipelineReport {
    /// Status of the last stage that ran; this is the pipeline's status.
    pub fn last_outcome(&self) -> Option<StageOutcome> {
        self.stages.last().map(|s| s.outcome)
    }

    /// Programs for which a process was actually created.
    pub fn spawned_programs(&self) -> Vec<&str> {
        self.stages
            .iter()
            .filter(|s| s.spawned)
            .map(|s| s.program.as_str())
            .collect()
    }
}

enum Launched {
    Running(Box<dyn RunningStage>),
    Finished(StageOutcome),
}

/// Drives a descriptor sequence through a [`StageBackend`].
pub struct PipelineExecutor<B: StageBackend> {
    backend: B,
    mode: ExecutionMode,
}

impl<B: StageBackend> PipelineExecutor<B> {
    pub fn new(backend: B, mode: ExecutionMode) -> Self {
        Self { backend, mode }
    }

    /// Run `stages` to completion, a policy halt, or a spawn failure.
    ///
    /// Stage-local failures never produce an `Err`; they are recorded as
    /// non-zero outcomes. `Err` means the line was aborted: a process or
    /// pipe could not be created. Any stage already spawned is reaped before
    /// returning.
    pub async fn execute(&mut self, stages: Vec<CommandDescriptor>) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        let mut upstream: Option<PipeReader> = None;

        for segment in plan::segments(&stages, self.mode) {
            let is_final = segment.end == stages.len();
            let mut launched = Vec::with_capacity(segment.len());

            for index in segment.clone() {
                match self.launch(&stages, index, upstream.take()) {
                    Ok((stage, reader)) => {
                        launched.push((index, stage));
                        upstream = reader;
                    }
                    Err(err) => {
                        reap(launched).await;
                        return Err(err);
                    }
                }
            }

            // Nothing consumes a pipe hanging off the final stage.
            if is_final {
                drop(upstream.take());
            }

            let finished = wait_segment(&stages, launched).await?;
            report.stages.extend(finished);

            if is_final {
                break;
            }
            let Some(last) = report.stages.last() else {
                break;
            };
            let policy = stages[last.index].policy();
            if !policy.should_continue(last.outcome) {
                debug!(
                    stage = last.index,
                    program = %last.program,
                    status = last.outcome.code(),
                    ?policy,
                    "continuation policy stops the sequence"
                );
                report.halted_after = Some(last.index);
                break;
            }
        }

        Ok(report)
    }

    /// Allocate the forward pipe for stage `index`, wire its streams and
    /// spawn it. Returns the launched stage and the read end for the next
    /// stage.
    fn launch(
        &mut self,
        stages: &[CommandDescriptor],
        index: usize,
        upstream: Option<PipeReader>,
    ) -> Result<(Launched, Option<PipeReader>)> {
        let stage = &stages[index];

        let (reader, writer) = if plan::links_forward(stages, index) {
            let (reader, writer) = io::pipe().map_err(OshError::PipeFailure)?;
            (Some(reader), Some(writer))
        } else {
            (None, None)
        };

        let stage_io = match redirect::resolve_stdio(stage, upstream, writer) {
            Ok(stage_io) => stage_io,
            Err(err) => {
                eprintln!("osh: {err}");
                warn!(
                    stage = index,
                    program = %stage.program(),
                    error = %err,
                    "redirection failed; stage not started"
                );
                let outcome = StageOutcome::Failed(REDIRECT_FAILURE_STATUS);
                return Ok((Launched::Finished(outcome), reader));
            }
        };

        match self.backend.spawn_stage(stage, stage_io) {
            Ok(child) => Ok((Launched::Running(child), reader)),
            Err(source) if is_resource_exhaustion(&source) => {
                error!(
                    stage = index,
                    program = %stage.program(),
                    error = %source,
                    "process creation failed"
                );
                Err(OshError::SpawnFailure {
                    program: stage.program().to_string(),
                    source,
                })
            }
            Err(err) => {
                eprintln!("osh: {}: {err}", stage.program());
                warn!(stage = index, program = %stage.program(), error = %err, "exec failed");
                let outcome = StageOutcome::Failed(exec_failure_status(&err));
                Ok((Launched::Finished(outcome), reader))
            }
        }
    }
}

/// Wait every launched stage in order, even if one wait fails.
async fn wait_segment(
    stages: &[CommandDescriptor],
    launched: Vec<(usize, Launched)>,
) -> Result<Vec<StageReport>> {
    let mut reports = Vec::with_capacity(launched.len());
    let mut first_error = None;

    for (index, stage) in launched {
        let program = stages[index].program();
        let (outcome, spawned) = match stage {
            Launched::Finished(outcome) => (outcome, false),
            Launched::Running(mut child) => match child.wait().await {
                Ok(outcome) => (outcome, true),
                Err(source) => {
                    first_error.get_or_insert(OshError::WaitFailure {
                        program: program.to_string(),
                        source,
                    });
                    continue;
                }
            },
        };

        debug!(stage = index, program, status = outcome.code(), spawned, "stage finished");
        reports.push(StageReport {
            index,
            program: program.to_string(),
            outcome,
            spawned,
        });
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(reports),
    }
}

/// Reap stages of an aborted segment so no zombie is left behind.
async fn reap(launched: Vec<(usize, Launched)>) {
    for (index, stage) in launched {
        if let Launched::Running(mut child) = stage {
            if let Err(err) = child.wait().await {
                debug!(stage = index, error = %err, "failed to reap stage of aborted pipeline");
            }
        }
    }
}

fn is_resource_exhaustion(err: &io::Error) -> bool {
    matches!(
        err.raw_os_error(),
        Some(libc::EAGAIN | libc::ENOMEM | libc::EMFILE | libc::ENFILE)
    ) || matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory
    )
}

fn exec_failure_status(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::NotFound => EXEC_NOT_FOUND_STATUS,
        _ => EXEC_FAILURE_STATUS,
    }
}
