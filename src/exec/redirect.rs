// src/exec/redirect.rs

//! Single redirection step shared by every stage.
//!
//! [`resolve_stdio`] takes the stage's wiring plus the pipe ends available to
//! it and produces the `Stdio` pair to spawn with. Pipe ends the stage does
//! not use are dropped here, which closes them in the orchestrator.

use std::fs::{File, OpenOptions};
use std::io::{self, PipeReader, PipeWriter};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;

use crate::command::{CommandDescriptor, InputSource, OutputSink};
use crate::exec::backend::StageIo;

/// Permission bits for files created by output redirection (before umask).
const CREATE_MODE: u32 = 0o644;

/// A redirection target could not be opened. Local to one stage.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("{}: cannot open for reading: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: cannot open for writing: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Build the standard streams for `stage`.
///
/// - `upstream` is the read end of the pipe allocated by the previous stage,
///   if any; it becomes stdin only when the stage's input is `Pipe`.
/// - `downstream` is the write end of the pipe allocated for the next stage,
///   if any; it becomes stdout only when the stage's output is `Pipe`.
///
/// File redirection wins over an available pipe. When no pipe exists for a
/// `Pipe` side (first stage, or last stage piping nowhere) the stream is
/// inherited.
pub fn resolve_stdio(
    stage: &CommandDescriptor,
    upstream: Option<PipeReader>,
    downstream: Option<PipeWriter>,
) -> Result<StageIo, RedirectError> {
    let stdin = match stage.input() {
        InputSource::Inherit => Stdio::inherit(),
        InputSource::Pipe => upstream.map_or_else(Stdio::inherit, Stdio::from),
        InputSource::File(path) => Stdio::from(open_input(path)?),
    };

    let stdout = match stage.output() {
        OutputSink::Inherit => Stdio::inherit(),
        OutputSink::Pipe => downstream.map_or_else(Stdio::inherit, Stdio::from),
        OutputSink::File(path) => Stdio::from(open_output(path, false)?),
        OutputSink::Append(path) => Stdio::from(open_output(path, true)?),
    };

    Ok(StageIo { stdin, stdout })
}

fn open_input(path: &Path) -> Result<File, RedirectError> {
    File::open(path).map_err(|source| RedirectError::Input {
        path: path.to_path_buf(),
        source,
    })
}

fn open_output(path: &Path, append: bool) -> Result<File, RedirectError> {
    let mut options = OpenOptions::new();
    options.create(true).mode(CREATE_MODE);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    options.open(path).map_err(|source| RedirectError::Output {
        path: path.to_path_buf(),
        source,
    })
}
