// src/exec/mod.rs

//! Process execution layer.
//!
//! This module turns an ordered sequence of [`CommandDescriptor`]s into
//! wired and sequenced OS processes.
//!
//! - [`pipeline`] owns the [`PipelineExecutor`] loop.
//! - [`plan`] computes pipe links and launch segments (pure).
//! - [`redirect`] opens redirection targets and picks each stage's stdio.
//! - [`backend`] provides the `StageBackend` trait and the concrete
//!   `ProcessBackend` used in production, which tests replace with a fake.
//!
//! [`CommandDescriptor`]: crate::command::CommandDescriptor

pub mod backend;
pub mod pipeline;
pub mod plan;
pub mod redirect;

pub use backend::{ProcessBackend, RunningStage, StageBackend, StageIo, WaitFuture};
pub use pipeline::{PipelineExecutor, PipelineReport, StageReport};
pub use redirect::RedirectError;
