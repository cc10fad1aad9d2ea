//! Debounced feedback performer
//!
//! Policy: blocking catch-up. A request that arrives while the previous
//! event is still cooling down blocks its caller for the remainder of the
//! window and then triggers anyway. Every `perform` call ends in exactly
//! one backend trigger, and no two triggers are closer than `min_delay`.

use crate::backend::HapticBackend;
use crate::clock::{Clock, MonotonicClock};
use crate::config::PerformerConfig;
use crate::diagnostics::{Decision, DiagnosticSink, NullSink, TracingSink};
use crate::error::{HapticError, Result};
use crate::kind::FeedbackKind;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;

/// Cooldown used when nothing else is configured
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(100);

/// Extra time `wait` adds on top of the cooldown
const WAIT_PADDING: Duration = Duration::from_millis(1);

/// How a request went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Window was already open, triggered right away
    Immediate,
    /// Window was cooling, caller blocked this long before the trigger
    Delayed(Duration),
}

impl Outcome {
    /// Time the caller spent blocked by the cooldown
    pub fn waited(&self) -> Duration {
        match self {
            Outcome::Immediate => Duration::ZERO,
            Outcome::Delayed(wait) => *wait,
        }
    }
}

/// Rolling timestamp state, guarded by the performer's mutex
#[derive(Debug, Default)]
struct DebounceState {
    /// Timestamp of the most recent allowed trigger (None = never)
    last_event_at: Option<Duration>,
    /// Gap measured at the start of the most recent request
    elapsed: Option<Duration>,
}

/// Performs haptic feedback events no more often than a minimum delay
///
/// One instance is shared (usually behind an `Arc`) by every caller that
/// wants feedback. The cooldown is global across all feedback kinds.
pub struct FeedbackPerformer {
    /// Held across measure, sleep and trigger
    state: Mutex<DebounceState>,
    /// Separate so reconfiguring never waits on an in-flight request
    min_delay: RwLock<Duration>,
    backend: Box<dyn HapticBackend>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn DiagnosticSink>,
}

impl FeedbackPerformer {
    /// Performer with the default cooldown, monotonic clock and tracing sink
    pub fn new(backend: impl HapticBackend + 'static) -> Self {
        Self::builder().build(backend)
    }

    /// Start configuring a performer
    pub fn builder() -> FeedbackPerformerBuilder {
        FeedbackPerformerBuilder::default()
    }

    /// Build a performer from a validated configuration
    pub fn from_config(
        config: &PerformerConfig,
        backend: impl HapticBackend + 'static,
    ) -> Result<Self> {
        Ok(Self::builder().with_config(config)?.build(backend))
    }

    /// Set the minimum delay between feedback events (zero disables debouncing)
    pub fn set_min_delay(&self, min_delay: Duration) {
        *self.min_delay.write() = min_delay;
    }

    /// Set the minimum delay from a signed millisecond value
    ///
    /// Negative values are rejected rather than clamped.
    pub fn set_min_delay_ms(&self, millis: i64) -> Result<()> {
        let millis = u64::try_from(millis).map_err(|_| HapticError::InvalidConfiguration {
            key: "min_delay_ms",
            reason: format!("must be non-negative, got {}", millis),
        })?;
        self.set_min_delay(Duration::from_millis(millis));
        Ok(())
    }

    /// Current minimum delay between feedback events
    pub fn min_delay(&self) -> Duration {
        *self.min_delay.read()
    }

    /// Gap measured by the most recent request
    ///
    /// `None` until a request has been measured against an earlier event.
    /// Waits for an in-flight request to finish.
    pub fn elapsed(&self) -> Option<Duration> {
        self.state.lock().elapsed
    }

    /// Timestamp (on this performer's clock) of the last trigger
    pub fn last_event_at(&self) -> Option<Duration> {
        self.state.lock().last_event_at
    }

    /// The clock this performer measures against
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Perform feedback, blocking while the previous event cools down
    pub fn perform(&self, kind: FeedbackKind) -> Outcome {
        let mut state = self.state.lock();
        let min_delay = self.min_delay();
        let now = self.clock.now();
        let last_event_at = state.last_event_at;

        let elapsed = last_event_at.map(|last| {
            if now < last {
                self.sink.error(&format!(
                    "Clock went backwards: now {:?} is before last event {:?}",
                    now, last
                ));
            }
            now.saturating_sub(last)
        });
        state.elapsed = elapsed;

        // COOLING vs READY. The first request ever is always READY.
        let outcome = match elapsed {
            Some(elapsed) if elapsed < min_delay => Outcome::Delayed(min_delay - elapsed),
            _ => Outcome::Immediate,
        };

        self.sink.record(&Decision {
            kind,
            now,
            last_event_at,
            elapsed,
            min_delay,
            outcome,
        });

        if let Outcome::Delayed(wait) = outcome {
            self.clock.sleep(wait);
        }
        self.backend.trigger(kind);

        let triggered_at = self.clock.now();
        state.last_event_at = Some(match last_event_at {
            Some(last) => last.max(triggered_at),
            None => triggered_at,
        });

        outcome
    }

    /// Block for the cooldown plus one millisecond, regardless of elapsed time
    pub fn wait(&self) {
        self.clock.sleep(self.min_delay() + WAIT_PADDING);
    }

    /// `wait` followed by `perform` on the same thread
    pub fn wait_and_perform(&self, kind: FeedbackKind) -> Outcome {
        self.wait();
        self.perform(kind)
    }
}

impl std::fmt::Debug for FeedbackPerformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackPerformer")
            .field("min_delay", &self.min_delay())
            .finish_non_exhaustive()
    }
}

/// Builder for `FeedbackPerformer`
pub struct FeedbackPerformerBuilder {
    min_delay: Duration,
    clock: Option<Arc<dyn Clock>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl Default for FeedbackPerformerBuilder {
    fn default() -> Self {
        Self {
            min_delay: DEFAULT_MIN_DELAY,
            clock: None,
            sink: None,
        }
    }
}

impl FeedbackPerformerBuilder {
    /// Minimum delay between feedback events
    pub fn min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    /// Apply a validated configuration (min delay and decision sink)
    pub fn with_config(self, config: &PerformerConfig) -> Result<Self> {
        config.validate()?;

        let sink: Arc<dyn DiagnosticSink> = match config.trace_level()? {
            Some(level) => Arc::new(TracingSink::new(level)),
            None => Arc::new(NullSink),
        };
        Ok(self.min_delay(config.min_delay()).sink(sink))
    }

    /// Time source (default: `MonotonicClock`)
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Decision sink (default: `TracingSink` at debug)
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self, backend: impl HapticBackend + 'static) -> FeedbackPerformer {
        FeedbackPerformer {
            state: Mutex::new(DebounceState::default()),
            min_delay: RwLock::new(self.min_delay),
            backend: Box::new(backend),
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(MonotonicClock::new())),
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;
    use crate::clock::ManualClock;
    use std::time::Instant;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn manual_performer(min_delay: Duration) -> (FeedbackPerformer, Arc<ManualClock>, RecordingBackend) {
        let clock = Arc::new(ManualClock::new());
        let backend = RecordingBackend::new(clock.clone());
        let performer = FeedbackPerformer::builder()
            .min_delay(min_delay)
            .clock(clock.clone())
            .sink(Arc::new(NullSink))
            .build(backend.clone());
        (performer, clock, backend)
    }

    #[test]
    fn test_defaults() {
        let performer = FeedbackPerformer::new(crate::backend::NullBackend);
        assert_eq!(performer.min_delay(), ms(100));
        assert_eq!(performer.elapsed(), None);
        assert_eq!(performer.last_event_at(), None);
    }

    #[test]
    fn test_first_request_passes_immediately() {
        let (performer, clock, backend) = manual_performer(ms(100));

        assert_eq!(performer.perform(FeedbackKind::Generic), Outcome::Immediate);
        assert_eq!(backend.count(), 1);
        assert_eq!(clock.slept(), Duration::ZERO);
        assert_eq!(performer.elapsed(), None);
        assert_eq!(performer.last_event_at(), Some(Duration::ZERO));
    }

    #[test]
    fn test_request_during_cooldown_blocks_then_triggers() {
        let (performer, clock, backend) = manual_performer(ms(100));

        performer.perform(FeedbackKind::Generic);
        clock.advance(ms(30));
        let outcome = performer.perform(FeedbackKind::Alignment);

        // Blocked for the remaining 70ms, then triggered anyway
        assert_eq!(outcome, Outcome::Delayed(ms(70)));
        assert_eq!(clock.slept(), ms(70));

        let records = backend.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].kind, FeedbackKind::Alignment);
        assert_eq!(records[1].at, ms(100));
        assert_eq!(performer.last_event_at(), Some(ms(100)));
    }

    #[test]
    fn test_request_after_window_is_immediate() {
        let (performer, clock, backend) = manual_performer(ms(100));

        performer.perform(FeedbackKind::Generic);
        clock.advance(ms(100));
        assert_eq!(performer.perform(FeedbackKind::Generic), Outcome::Immediate);
        clock.advance(ms(250));
        assert_eq!(performer.perform(FeedbackKind::LevelChange), Outcome::Immediate);

        assert_eq!(backend.count(), 3);
        assert_eq!(clock.slept(), Duration::ZERO);
    }

    #[test]
    fn test_zero_delay_disables_debouncing() {
        let (performer, clock, backend) = manual_performer(ms(100));
        performer.set_min_delay(Duration::ZERO);

        assert_eq!(performer.perform(FeedbackKind::Generic), Outcome::Immediate);
        assert_eq!(performer.perform(FeedbackKind::Generic), Outcome::Immediate);

        assert_eq!(backend.count(), 2);
        assert_eq!(clock.slept(), Duration::ZERO);
        assert_eq!(performer.elapsed(), Some(Duration::ZERO));
    }

    #[test]
    fn test_elapsed_reflects_gap_before_each_request() {
        let (performer, clock, _backend) = manual_performer(ms(100));

        performer.perform(FeedbackKind::Generic);
        clock.advance(ms(30));
        performer.perform(FeedbackKind::Generic);
        // Measured before the catch-up sleep
        assert_eq!(performer.elapsed(), Some(ms(30)));

        // Last event is now at 100ms
        clock.advance(ms(500));
        performer.perform(FeedbackKind::Generic);
        assert_eq!(performer.elapsed(), Some(ms(500)));
    }

    #[test]
    fn test_cooldown_is_shared_across_kinds() {
        let (performer, clock, _backend) = manual_performer(ms(50));

        performer.perform(FeedbackKind::Generic);
        clock.advance(ms(10));
        assert_eq!(performer.perform(FeedbackKind::Alignment), Outcome::Delayed(ms(40)));
        assert_eq!(performer.perform(FeedbackKind::LevelChange), Outcome::Delayed(ms(50)));
    }

    #[test]
    fn test_spacing_holds_for_rapid_sequence() {
        let (performer, clock, backend) = manual_performer(ms(100));

        for step in [0u64, 5, 20, 150, 1, 99, 100, 0, 300] {
            clock.advance(ms(step));
            performer.perform(FeedbackKind::Generic);
        }

        assert_eq!(backend.count(), 9);
        assert!(backend.min_gap().unwrap() >= ms(100));
    }

    #[test]
    fn test_negative_min_delay_is_rejected() {
        let (performer, _clock, _backend) = manual_performer(ms(100));

        let err = performer.set_min_delay_ms(-5).unwrap_err();
        assert!(matches!(err, HapticError::InvalidConfiguration { key: "min_delay_ms", .. }));
        assert_eq!(performer.min_delay(), ms(100));

        performer.set_min_delay_ms(250).unwrap();
        assert_eq!(performer.min_delay(), ms(250));
    }

    #[test]
    fn test_wait_and_perform_reopens_window() {
        let (performer, clock, backend) = manual_performer(ms(100));

        performer.perform(FeedbackKind::Generic);
        let outcome = performer.wait_and_perform(FeedbackKind::Alignment);

        assert_eq!(outcome, Outcome::Immediate);
        assert_eq!(clock.slept(), ms(101));
        assert_eq!(backend.count(), 2);
        assert_eq!(performer.elapsed(), Some(ms(101)));
    }

    #[test]
    fn test_wait_ignores_elapsed() {
        let (performer, clock, backend) = manual_performer(ms(40));

        clock.advance(ms(1000));
        performer.wait();
        assert_eq!(clock.slept(), ms(41));
        assert_eq!(backend.count(), 0);
    }

    #[test]
    fn test_real_clock_catch_up_blocks() {
        let performer = FeedbackPerformer::builder()
            .min_delay(ms(100))
            .sink(Arc::new(NullSink))
            .build(crate::backend::NullBackend);

        performer.perform(FeedbackKind::Generic);
        std::thread::sleep(ms(30));

        let start = Instant::now();
        let outcome = performer.perform(FeedbackKind::Generic);
        let blocked = start.elapsed();

        assert!(matches!(outcome, Outcome::Delayed(_)));
        assert!(outcome.waited() <= ms(70));
        assert!(blocked >= outcome.waited());
        assert!(blocked < ms(150), "blocked for {:?}", blocked);
    }

    #[test]
    fn test_real_clock_wait_duration() {
        let performer = FeedbackPerformer::builder()
            .min_delay(ms(100))
            .sink(Arc::new(NullSink))
            .build(crate::backend::NullBackend);

        let start = Instant::now();
        performer.wait();
        let waited = start.elapsed();

        assert!(waited >= ms(100), "waited {:?}", waited);
        assert!(waited <= ms(150), "waited {:?}", waited);
    }

    #[test]
    fn test_from_config() {
        let config = PerformerConfig {
            min_delay_ms: 50,
            ..PerformerConfig::default()
        };
        let performer = FeedbackPerformer::from_config(&config, crate::backend::NullBackend).unwrap();
        assert_eq!(performer.min_delay(), ms(50));

        let bad = PerformerConfig {
            min_delay_ms: -1,
            ..PerformerConfig::default()
        };
        assert!(FeedbackPerformer::from_config(&bad, crate::backend::NullBackend).is_err());
    }
}
