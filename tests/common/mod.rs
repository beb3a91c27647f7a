#![allow(dead_code)]

use osh::exec::{PipelineExecutor, PipelineReport, ProcessBackend};
use osh::parser::parse_command_line;
use osh::types::ExecutionMode;

pub use osh_test_utils::{init_tracing, with_timeout};

/// Parse `line` and run it with real processes.
pub async fn run_line(line: &str, mode: ExecutionMode) -> PipelineReport {
    let stages = parse_command_line(line).expect("line should parse");
    let mut executor = PipelineExecutor::new(ProcessBackend::new(), mode);
    with_timeout(executor.execute(stages))
        .await
        .expect("pipeline should not abort")
}

/// Both execution modes, for tests whose result must not depend on it.
pub const MODES: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Concurrent];
