// src/command/mod.rs

//! Command descriptors: one record per pipeline stage.
//!
//! - [`descriptor`] holds the immutable [`CommandDescriptor`] plus its input
//!   and output wiring.
//! - [`policy`] holds the [`ContinuationPolicy`] that decides whether the next
//!   stage runs, and the [`StageOutcome`] it is evaluated against.

pub mod descriptor;
pub mod policy;

pub use descriptor::{
    CommandBuilder, CommandDescriptor, InputMode, InputSource, OutputMode, OutputSink,
};
pub use policy::{ContinuationPolicy, StageOutcome};
