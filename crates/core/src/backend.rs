//! Haptic backends
//!
//! A backend is the opaque "make the motor do something" call. It has no
//! return value and no error channel: whatever happens on the far side is
//! invisible to the performer.

use crate::clock::Clock;
use crate::kind::FeedbackKind;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// The native trigger collaborator
pub trait HapticBackend: Send + Sync {
    /// Fire a single feedback event of the given kind
    fn trigger(&self, kind: FeedbackKind);
}

impl<F> HapticBackend for F
where
    F: Fn(FeedbackKind) + Send + Sync,
{
    fn trigger(&self, kind: FeedbackKind) {
        self(kind)
    }
}

/// Backend that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl HapticBackend for NullBackend {
    fn trigger(&self, _kind: FeedbackKind) {}
}

/// A single observed backend call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerRecord {
    pub kind: FeedbackKind,
    /// Clock reading at the moment of the call
    pub at: Duration,
}

/// Backend that remembers every call and when it happened
///
/// Clones share the same log, so a test can hand one clone to a performer
/// and inspect the other.
#[derive(Clone)]
pub struct RecordingBackend {
    clock: Arc<dyn Clock>,
    log: Arc<Mutex<Vec<TriggerRecord>>>,
}

impl RecordingBackend {
    /// Record against the given clock (share it with the performer)
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of all calls so far, in call order
    pub fn records(&self) -> Vec<TriggerRecord> {
        self.log.lock().clone()
    }

    /// Number of calls so far
    pub fn count(&self) -> usize {
        self.log.lock().len()
    }

    /// Smallest gap between two consecutive calls, if there were at least two
    pub fn min_gap(&self) -> Option<Duration> {
        let log = self.log.lock();
        log.windows(2)
            .map(|pair| pair[1].at.saturating_sub(pair[0].at))
            .min()
    }
}

impl HapticBackend for RecordingBackend {
    fn trigger(&self, kind: FeedbackKind) {
        let at = self.clock.now();
        self.log.lock().push(TriggerRecord { kind, at });
    }
}

impl std::fmt::Debug for RecordingBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingBackend")
            .field("count", &self.count())
            .finish()
    }
}

#[cfg(feature = "native")]
mod native {
    use super::HapticBackend;
    use crate::kind::FeedbackKind;
    use std::os::raw::c_int;

    #[link(name = "SwiftHaptics")]
    extern "C" {
        fn haptic_trigger(kind: c_int);
    }

    /// Backend calling `haptic_trigger` from libSwiftHaptics
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NativeBackend;

    impl HapticBackend for NativeBackend {
        fn trigger(&self, kind: FeedbackKind) {
            // SAFETY: haptic_trigger takes a plain int and has no other preconditions
            unsafe { haptic_trigger(kind.code() as c_int) }
        }
    }
}

#[cfg(feature = "native")]
pub use native::NativeBackend;
