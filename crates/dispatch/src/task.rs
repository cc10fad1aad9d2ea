//! Async entry points on tokio's blocking pool
//!
//! The cooldown sleep is a real thread sleep, so requests are moved onto
//! `spawn_blocking` rather than run on an async worker.

use crate::error::Result;
use hectic_core::{FeedbackKind, FeedbackPerformer, Outcome};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Run `perform` without blocking the async caller
///
/// Dropping the returned future does not cancel the request; it still
/// runs to completion on the blocking pool.
pub async fn perform_async(performer: Arc<FeedbackPerformer>, kind: FeedbackKind) -> Result<Outcome> {
    Ok(spawn_perform(performer, kind).await?)
}

/// Run `wait_and_perform` without blocking the async caller
pub async fn wait_and_perform_async(
    performer: Arc<FeedbackPerformer>,
    kind: FeedbackKind,
) -> Result<Outcome> {
    let outcome = tokio::task::spawn_blocking(move || performer.wait_and_perform(kind)).await?;
    Ok(outcome)
}

/// Fire-and-forget: start a `perform` and hand back its join handle
///
/// Must be called from within a tokio runtime.
pub fn spawn_perform(performer: Arc<FeedbackPerformer>, kind: FeedbackKind) -> JoinHandle<Outcome> {
    tokio::task::spawn_blocking(move || performer.perform(kind))
}
