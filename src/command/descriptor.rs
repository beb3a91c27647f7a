// src/command/descriptor.rs

use std::path::{Path, PathBuf};

use crate::command::policy::ContinuationPolicy;
use crate::errors::{OshError, Result};

/// Where a stage's standard input comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputSource {
    /// The shell's own standard input.
    #[default]
    Inherit,
    /// Read end of the pipe allocated for the previous stage.
    Pipe,
    /// A file opened read-only.
    File(PathBuf),
}

/// Where a stage's standard output goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputSink {
    #[default]
    Inherit,
    /// Write end of a pipe consumed by the next stage.
    Pipe,
    /// Created if absent, truncated otherwise.
    File(PathBuf),
    /// Created if absent, existing content preserved.
    Append(PathBuf),
}

/// Flat view of [`InputSource`] without the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Inherit,
    Pipe,
    File,
}

/// Flat view of [`OutputSink`] without the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Inherit,
    Pipe,
    File,
    Append,
}

impl InputSource {
    pub fn mode(&self) -> InputMode {
        match self {
            InputSource::Inherit => InputMode::Inherit,
            InputSource::Pipe => InputMode::Pipe,
            InputSource::File(_) => InputMode::File,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_pipe(&self) -> bool {
        matches!(self, InputSource::Pipe)
    }
}

impl OutputSink {
    pub fn mode(&self) -> OutputMode {
        match self {
            OutputSink::Inherit => OutputMode::Inherit,
            OutputSink::Pipe => OutputMode::Pipe,
            OutputSink::File(_) => OutputMode::File,
            OutputSink::Append(_) => OutputMode::Append,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputSink::File(path) | OutputSink::Append(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_pipe(&self) -> bool {
        matches!(self, OutputSink::Pipe)
    }
}

/// One pipeline stage.
///
/// Built once through [`CommandDescriptor::builder`] and never mutated
/// afterwards; the executor takes descriptors by value and drops them when
/// the line is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    program: String,
    arguments: Vec<String>,
    input: InputSource,
    output: OutputSink,
    policy: ContinuationPolicy,
}

impl CommandDescriptor {
    pub fn builder(program: impl Into<String>) -> CommandBuilder {
        CommandBuilder::new(program)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments after argument zero.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn input(&self) -> &InputSource {
        &self.input
    }

    pub fn output(&self) -> &OutputSink {
        &self.output
    }

    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    pub fn input_path(&self) -> Option<&Path> {
        self.input.path()
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output.mode()
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output.path()
    }

    pub fn policy(&self) -> ContinuationPolicy {
        self.policy
    }
}

/// Builder for [`CommandDescriptor`].
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    arguments: Vec<String>,
    input: InputSource,
    output: OutputSink,
    policy: ContinuationPolicy,
}

impl CommandBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            arguments: Vec::new(),
            input: InputSource::default(),
            output: OutputSink::default(),
            policy: ContinuationPolicy::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn input(mut self, input: InputSource) -> Self {
        self.input = input;
        self
    }

    pub fn output(mut self, output: OutputSink) -> Self {
        self.output = output;
        self
    }

    pub fn policy(mut self, policy: ContinuationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate and freeze the descriptor.
    ///
    /// Rejects an empty program, NUL bytes in the program or arguments (they
    /// cannot cross `execvp`), and empty redirection paths.
    pub fn build(self) -> Result<CommandDescriptor> {
        if self.program.is_empty() {
            return Err(OshError::InvalidDescriptor(
                "program name must not be empty".to_string(),
            ));
        }
        if self.program.contains('\0') {
            return Err(OshError::InvalidDescriptor(format!(
                "program name '{}' contains a NUL byte",
                self.program.escape_default()
            )));
        }
        if let Some(arg) = self.arguments.iter().find(|a| a.contains('\0')) {
            return Err(OshError::InvalidDescriptor(format!(
                "argument '{}' of '{}' contains a NUL byte",
                arg.escape_default(),
                self.program
            )));
        }
        if self.input.path().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(OshError::InvalidDescriptor(format!(
                "input redirection of '{}' has an empty path",
                self.program
            )));
        }
        if self.output.path().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(OshError::InvalidDescriptor(format!(
                "output redirection of '{}' has an empty path",
                self.program
            )));
        }

        Ok(CommandDescriptor {
            program: self.program,
            arguments: self.arguments,
            input: self.input,
            output: self.output,
            policy: self.policy,
        })
    }
}
