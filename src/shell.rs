// src/shell.rs

//! Line-oriented front-end around the executor.
//!
//! Reads lines, handles the `exit` keyword, parses each line and hands the
//! descriptors to the [`PipelineExecutor`]. Parse errors are written to the
//! session's output and the loop moves on to the next line.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error};

use crate::errors::{OshError, Result};
use crate::exec::{PipelineExecutor, PipelineReport, StageBackend};
use crate::parser::{ParseError, parse_command_line};
use crate::types::SessionMode;

const EXIT_KEYWORD: &str = "exit";

/// What happened to one input line.
#[derive(Debug)]
pub enum LineOutcome {
    Executed(PipelineReport),
    /// Blank line.
    Skipped,
    ParseFailed(ParseError),
    /// Process or pipe creation failed; the rest of the line was dropped.
    Aborted(OshError),
    Exit,
}

/// Why a session stopped reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    ExitKeyword,
    EndOfInput,
    /// Interactive line budget used up.
    LimitReached,
}

pub struct Shell<B: StageBackend> {
    executor: PipelineExecutor<B>,
    prompt: String,
}

impl<B: StageBackend> Shell<B> {
    pub fn new(executor: PipelineExecutor<B>, prompt: impl Into<String>) -> Self {
        Self {
            executor,
            prompt: prompt.into(),
        }
    }

    /// Handle a single line.
    ///
    /// Only a failure to write to `out` is returned as `Err`; everything
    /// else is reported through [`LineOutcome`].
    pub async fn run_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<LineOutcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(LineOutcome::Skipped);
        }
        if line == EXIT_KEYWORD {
            return Ok(LineOutcome::Exit);
        }

        let stages = match parse_command_line(line) {
            Ok(stages) => stages,
            Err(err) => {
                writeln!(out, "{err}")?;
                return Ok(LineOutcome::ParseFailed(err));
            }
        };

        // Children write straight to the inherited descriptors; anything we
        // buffered must go out first.
        out.flush()?;

        debug!(line, stages = stages.len(), "executing line");
        match self.executor.execute(stages).await {
            Ok(report) => Ok(LineOutcome::Executed(report)),
            Err(err) => {
                eprintln!("osh: {err}");
                error!(line, error = %err, "line aborted");
                Ok(LineOutcome::Aborted(err))
            }
        }
    }

    /// Read and run lines from `input` until `exit`, end of input, or the
    /// interactive limit.
    pub async fn run_session<R, W>(
        &mut self,
        input: R,
        mode: SessionMode,
        out: &mut W,
    ) -> Result<SessionEnd>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut read = 0usize;

        loop {
            if let SessionMode::Interactive { limit } = mode {
                if read >= limit {
                    return Ok(SessionEnd::LimitReached);
                }
                write!(out, "{}", self.prompt)?;
                out.flush()?;
            }

            let Some(line) = lines.next_line().await? else {
                return Ok(SessionEnd::EndOfInput);
            };
            read += 1;

            if let LineOutcome::Exit = self.run_line(&line, out).await? {
                return Ok(SessionEnd::ExitKeyword);
            }
        }
    }
}
