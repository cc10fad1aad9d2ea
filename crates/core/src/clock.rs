//! Time sources for the debounce logic
//!
//! Timestamps are `Duration`s since the clock's own origin, so a clock
//! never goes negative and manual clocks can start at zero.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Source of "now" plus the ability to block for a while
pub trait Clock: Send + Sync {
    /// Time since this clock's origin
    fn now(&self) -> Duration;

    /// Block the calling context for `duration`
    fn sleep(&self, duration: Duration);
}

/// Real monotonic clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Simulated clock for deterministic tests
///
/// Time only moves when `advance` or `sleep` is called. Sleeping advances
/// the shared time immediately instead of blocking.
#[derive(Debug, Default)]
pub struct ManualClock {
    inner: Mutex<ManualState>,
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    slept: Duration,
}

impl ManualClock {
    /// Clock starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock starting at `start`
    pub fn starting_at(start: Duration) -> Self {
        Self {
            inner: Mutex::new(ManualState {
                now: start,
                slept: Duration::ZERO,
            }),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.inner.lock().now += by;
    }

    /// Total time spent in `sleep` so far
    pub fn slept(&self) -> Duration {
        self.inner.lock().slept
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.inner.lock().now
    }

    fn sleep(&self, duration: Duration) {
        let mut state = self.inner.lock();
        state.now += duration;
        state.slept += duration;
    }
}
