use clap::ValueEnum;
use serde::Deserialize;

/// How the executor schedules stages that are joined by a pipe.
///
/// - `Sequential`: every stage runs to completion before the next one is
///   spawned. Pipe data sits in the kernel buffer between stages, so a
///   producer that writes more than the buffer holds will block forever.
/// - `Concurrent`: all stages of a pipe-connected segment are spawned up
///   front and waited afterwards (default).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Sequential,
    #[default]
    Concurrent,
}

/// How the front-end reads its input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// No prompt, unbounded; `exit` terminates the process right away.
    Batch,
    /// Prompt before each line, at most `limit` lines are read.
    Interactive { limit: usize },
}
