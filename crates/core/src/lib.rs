//! Debounced haptic feedback for Hectic
//!
//! This crate provides:
//! - Feedback kinds and their backend encoding
//! - The `FeedbackPerformer` debounce component (blocking catch-up policy)
//! - Backend, clock and diagnostic seams
//! - Performer configuration (TOML)

pub mod backend;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod kind;
pub mod performer;

// Re-exports
pub use backend::{HapticBackend, NullBackend, RecordingBackend, TriggerRecord};
#[cfg(feature = "native")]
pub use backend::NativeBackend;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::PerformerConfig;
pub use diagnostics::{Decision, DiagnosticSink, NullSink, TracingSink};
pub use error::{HapticError, Result};
pub use kind::FeedbackKind;
pub use performer::{FeedbackPerformer, FeedbackPerformerBuilder, Outcome, DEFAULT_MIN_DELAY};
