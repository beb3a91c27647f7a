use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};

use osh::command::{CommandDescriptor, StageOutcome};
use osh::exec::{RunningStage, StageBackend, StageIo, WaitFuture};

/// A scripted backend that never creates a process:
/// - records every stage it was asked to spawn, and every stage waited on
/// - reports a scripted exit code per program (`false` → 1, others → 0 by
///   default)
/// - can simulate an exec failure (`missing`) or resource exhaustion
///   (`exhausted`) for a given program.
///
/// Clones share their records, so a test can keep one clone and hand the
/// other to the executor.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    exit_codes: HashMap<String, i32>,
    missing: HashSet<String>,
    exhausted: HashSet<String>,
    launched: Arc<Mutex<Vec<CommandDescriptor>>>,
    waited: Arc<Mutex<Vec<String>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exit_code(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    /// Spawning `program` fails as if it were not on `PATH`.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    /// Spawning `program` fails as if the process table were full.
    pub fn exhausted(mut self, program: &str) -> Self {
        self.exhausted.insert(program.to_string());
        self
    }

    /// Programs spawned so far, in order.
    pub fn launched(&self) -> Vec<String> {
        self.launched
            .lock()
            .unwrap()
            .iter()
            .map(|stage| stage.program().to_string())
            .collect()
    }

    /// Full descriptors spawned so far, in order.
    pub fn launched_stages(&self) -> Vec<CommandDescriptor> {
        self.launched.lock().unwrap().clone()
    }

    /// Programs whose process has been waited on, in order.
    pub fn waited(&self) -> Vec<String> {
        self.waited.lock().unwrap().clone()
    }

    fn scripted_code(&self, program: &str) -> i32 {
        match self.exit_codes.get(program) {
            Some(code) => *code,
            None if program == "false" => 1,
            None => 0,
        }
    }
}

impl StageBackend for FakeBackend {
    fn spawn_stage(
        &mut self,
        stage: &CommandDescriptor,
        io: StageIo,
    ) -> io::Result<Box<dyn RunningStage>> {
        // Closes whatever pipe ends or files the executor handed over.
        drop(io);

        if self.missing.contains(stage.program()) {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        if self.exhausted.contains(stage.program()) {
            return Err(io::Error::from(io::ErrorKind::WouldBlock));
        }

        self.launched.lock().unwrap().push(stage.clone());

        Ok(Box::new(FakeStage {
            program: stage.program().to_string(),
            outcome: StageOutcome::from_code(self.scripted_code(stage.program())),
            waited: Arc::clone(&self.waited),
        }))
    }
}

struct FakeStage {
    program: String,
    outcome: StageOutcome,
    waited: Arc<Mutex<Vec<String>>>,
}

impl RunningStage for FakeStage {
    fn wait(&mut self) -> WaitFuture<'_> {
        Box::pin(async move {
            self.waited.lock().unwrap().push(self.program.clone());
            Ok(self.outcome)
        })
    }
}
