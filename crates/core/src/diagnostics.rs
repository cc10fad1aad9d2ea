//! Decision tracing
//!
//! Every request produces a `Decision` which is handed to the performer's
//! sink. The default sink forwards to `tracing`; `NullSink` drops it.

use crate::kind::FeedbackKind;
use crate::performer::Outcome;
use std::time::Duration;
use tracing::Level;

/// What the performer saw and decided for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub kind: FeedbackKind,
    /// Clock reading when the request was measured
    pub now: Duration,
    /// Last allowed event before this request
    pub last_event_at: Option<Duration>,
    /// `now - last_event_at`, if there was a previous event
    pub elapsed: Option<Duration>,
    pub min_delay: Duration,
    pub outcome: Outcome,
}

/// Receiver for decision traces and anomalies
pub trait DiagnosticSink: Send + Sync {
    /// Called once per request, after the pass/delay decision
    fn record(&self, decision: &Decision);

    /// Something unexpected that did not stop the request
    fn error(&self, message: &str);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _decision: &Decision) {}
    fn error(&self, _message: &str) {}
}

/// Sink that emits `tracing` events under the `hectic::feedback` target
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    /// Emit decisions at `level`
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(Level::DEBUG)
    }
}

// `tracing::event!` wants a constant level, so dispatch by hand.
macro_rules! event_at {
    ($level:expr, $($rest:tt)+) => {{
        let level = $level;
        if level == Level::ERROR {
            tracing::error!(target: "hectic::feedback", $($rest)+)
        } else if level == Level::WARN {
            tracing::warn!(target: "hectic::feedback", $($rest)+)
        } else if level == Level::INFO {
            tracing::info!(target: "hectic::feedback", $($rest)+)
        } else if level == Level::DEBUG {
            tracing::debug!(target: "hectic::feedback", $($rest)+)
        } else {
            tracing::trace!(target: "hectic::feedback", $($rest)+)
        }
    }};
}

impl DiagnosticSink for TracingSink {
    fn record(&self, decision: &Decision) {
        let now_ms = decision.now.as_millis() as u64;
        let last_event_ms = decision.last_event_at.map(|t| t.as_millis() as u64);
        let elapsed_ms = decision.elapsed.map(|e| e.as_millis() as u64);
        let min_delay_ms = decision.min_delay.as_millis() as u64;

        match decision.outcome {
            Outcome::Immediate => event_at!(
                self.level,
                kind = %decision.kind,
                now_ms,
                last_event_ms = ?last_event_ms,
                elapsed_ms = ?elapsed_ms,
                "Triggering feedback"
            ),
            Outcome::Delayed(wait) => {
                let wait_ms = wait.as_millis() as u64;
                event_at!(
                    self.level,
                    kind = %decision.kind,
                    now_ms,
                    last_event_ms = ?last_event_ms,
                    elapsed_ms = ?elapsed_ms,
                    wait_ms,
                    "Can't trigger yet: minimum delay is {}ms but only {}ms have passed",
                    min_delay_ms,
                    elapsed_ms.unwrap_or(0)
                )
            }
        }
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "hectic::feedback", "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tracing_level_is_debug() {
        assert_eq!(TracingSink::default().level(), Level::DEBUG);
    }

    #[test]
    fn test_sinks_accept_decisions_without_subscriber() {
        let decision = Decision {
            kind: FeedbackKind::Alignment,
            now: Duration::from_millis(130),
            last_event_at: Some(Duration::from_millis(100)),
            elapsed: Some(Duration::from_millis(30)),
            min_delay: Duration::from_millis(100),
            outcome: Outcome::Delayed(Duration::from_millis(70)),
        };

        for level in [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE] {
            TracingSink::new(level).record(&decision);
        }
        NullSink.record(&decision);
        NullSink.error("ignored");
    }
}
