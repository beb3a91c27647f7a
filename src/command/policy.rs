// src/command/policy.rs

//! Exit-status-driven continuation between stages.

/// Outcome of one stage as seen by the orchestrator.
///
/// Stage-local failures (exec failure, redirection failure) never surface as
/// structured errors; they collapse into `Failed` with a non-zero status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Success,
    Failed(i32),
}

impl StageOutcome {
    pub fn from_code(code: i32) -> Self {
        if code == 0 {
            StageOutcome::Success
        } else {
            StageOutcome::Failed(code)
        }
    }

    /// Integer exit status, `0` for success.
    pub fn code(self) -> i32 {
        match self {
            StageOutcome::Success => 0,
            StageOutcome::Failed(code) => code,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, StageOutcome::Success)
    }
}

/// Rule deciding whether the stage *after* this one runs.
///
/// | policy       | success  | failure  |
/// |--------------|----------|----------|
/// | `Always`     | proceed  | proceed  |
/// | `OnSuccess`  | proceed  | stop     |
/// | `OnFail`     | stop     | proceed  |
/// | `Sequential` | proceed  | stop     |
///
/// `Sequential` is what a stage gets when no conditional operator follows it
/// (pipes and the end of the line). Unlike a conventional shell it stops the
/// sequence on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinuationPolicy {
    Always,
    OnSuccess,
    OnFail,
    #[default]
    Sequential,
}

impl ContinuationPolicy {
    pub fn should_continue(self, outcome: StageOutcome) -> bool {
        match self {
            ContinuationPolicy::Always => true,
            ContinuationPolicy::OnSuccess | ContinuationPolicy::Sequential => outcome.is_success(),
            ContinuationPolicy::OnFail => !outcome.is_success(),
        }
    }
}
