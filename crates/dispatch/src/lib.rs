//! Non-blocking feedback dispatch for Hectic
//!
//! `FeedbackPerformer::perform` may block for up to the cooldown. This crate
//! moves that blocking off the caller:
//! - `FeedbackDispatcher`: single background worker fed by a queue,
//!   fire-and-forget with an optional completion handle
//! - `perform_async` / `spawn_perform`: run on tokio's blocking pool

pub mod error;
pub mod queue;
pub mod task;

// Re-exports
pub use error::{DispatchError, Result};
pub use queue::{Completion, FeedbackDispatcher};
pub use task::{perform_async, spawn_perform, wait_and_perform_async};
