#![allow(dead_code)]

use osh::command::{CommandDescriptor, ContinuationPolicy, InputSource, OutputSink};
use osh::config::{ConfigFile, RawConfigFile};
use osh::types::ExecutionMode;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn prompt(mut self, prompt: &str) -> Self {
        self.config.shell.prompt = prompt.to_string();
        self
    }

    pub fn interactive_limit(mut self, limit: usize) -> Self {
        self.config.shell.interactive_limit = limit;
        self
    }

    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.shell.execution_mode = mode;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a stage with inherited streams and the given policy.
pub fn stage(program: &str, args: &[&str], policy: ContinuationPolicy) -> CommandDescriptor {
    CommandDescriptor::builder(program)
        .args(args.iter().copied())
        .policy(policy)
        .build()
        .expect("valid stage")
}

/// Shorthand for a stage with explicit wiring.
pub fn wired_stage(
    program: &str,
    args: &[&str],
    input: InputSource,
    output: OutputSink,
    policy: ContinuationPolicy,
) -> CommandDescriptor {
    CommandDescriptor::builder(program)
        .args(args.iter().copied())
        .input(input)
        .output(output)
        .policy(policy)
        .build()
        .expect("valid stage")
}
