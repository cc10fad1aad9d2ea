//! Dispatch errors
//!
//! None of these mean the haptic backend failed; that is never observable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Dispatcher was shut down before the request was submitted
    #[error("feedback dispatcher is shut down")]
    Closed,

    /// Worker went away without reporting an outcome (it panicked)
    #[error("feedback worker stopped before completing the request")]
    WorkerLost,

    /// Worker thread could not be started
    #[error("failed to spawn feedback worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// Blocking task on the tokio pool panicked or was cancelled
    #[error("feedback task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;
