// src/exec/plan.rs

//! Pure planning helpers for the executor: which stages need a pipe to their
//! successor, and how stages are grouped into segments that are spawned
//! together. No IO happens here.

use std::ops::Range;

use crate::command::{CommandDescriptor, ContinuationPolicy};
use crate::types::ExecutionMode;

/// Whether a pipe must be allocated between stage `index` and its successor.
///
/// True when the stage writes to a pipe, or when the next stage expects to
/// read from one. In the second case a stage whose output is redirected
/// elsewhere leaves the pipe empty and the reader sees EOF.
pub fn links_forward(stages: &[CommandDescriptor], index: usize) -> bool {
    let writes_pipe = stages
        .get(index)
        .is_some_and(|stage| stage.output().is_pipe());
    let next_reads_pipe = stages
        .get(index + 1)
        .is_some_and(|next| next.input().is_pipe());
    writes_pipe || next_reads_pipe
}

/// Split stages into the groups the executor launches before waiting.
///
/// - `Sequential`: every stage is its own segment.
/// - `Concurrent`: a segment extends across a forward pipe link, so
///   `a | b | c ; d` yields `[0..3, 3..4]`. A linked stage whose policy is
///   `OnSuccess` or `OnFail` still closes its segment: its status must be
///   known before the successor may be spawned.
///
/// Segments are contiguous, non-empty, and cover `0..stages.len()` in order.
pub fn segments(stages: &[CommandDescriptor], mode: ExecutionMode) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = 0;

    for index in 0..stages.len() {
        let extends = mode == ExecutionMode::Concurrent
            && index + 1 < stages.len()
            && links_forward(stages, index)
            && spans_link(stages[index].policy());
        if !extends {
            out.push(start..index + 1);
            start = index + 1;
        }
    }

    out
}

/// Policies under which a pipe-linked successor is spawned together with
/// the stage. `Sequential` is the policy the parser puts on `|`.
fn spans_link(policy: ContinuationPolicy) -> bool {
    matches!(
        policy,
        ContinuationPolicy::Always | ContinuationPolicy::Sequential
    )
}
