//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use hectic_core::{
    Clock, FeedbackKind, FeedbackPerformer, HapticBackend, MonotonicClock, Outcome,
    PerformerConfig, RecordingBackend,
};
use owo_colors::OwoColorize;
use std::sync::Arc;
use std::time::Duration;

/// Backend for the terminal: logs every trigger, prints it, and (with the
/// `native` feature) drives the real motor
pub struct ConsoleBackend {
    clock: Arc<dyn Clock>,
    log: RecordingBackend,
    #[cfg(feature = "native")]
    native: hectic_core::NativeBackend,
}

impl ConsoleBackend {
    pub fn new(clock: Arc<dyn Clock>, log: RecordingBackend) -> Self {
        Self {
            clock,
            log,
            #[cfg(feature = "native")]
            native: hectic_core::NativeBackend,
        }
    }
}

impl HapticBackend for ConsoleBackend {
    fn trigger(&self, kind: FeedbackKind) {
        self.log.trigger(kind);

        #[cfg(feature = "native")]
        self.native.trigger(kind);

        println!(
            "  {} {} {}",
            format!("[{}]", format_ms(self.clock.now())).dimmed(),
            "⚡".yellow(),
            kind.cyan()
        );
    }
}

/// Performer wired to a console backend, plus the trigger log
pub struct Harness {
    pub performer: Arc<FeedbackPerformer>,
    pub log: RecordingBackend,
}

/// Build a performer from the user config, optionally overriding the delay
pub fn build_harness(min_delay_override: Option<i64>) -> Result<Harness> {
    let config = crate::system_config::load()?;
    build_harness_from(&config, min_delay_override)
}

/// Same as `build_harness` with an explicit config
pub fn build_harness_from(config: &PerformerConfig, min_delay_override: Option<i64>) -> Result<Harness> {
    let mut config = config.clone();
    if let Some(min_delay_ms) = min_delay_override {
        config.min_delay_ms = min_delay_ms;
    }

    let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::new());
    let log = RecordingBackend::new(clock.clone());

    let performer = FeedbackPerformer::builder()
        .with_config(&config)
        .context("Invalid feedback configuration")?
        .clock(clock.clone())
        .build(ConsoleBackend::new(clock, log.clone()));

    Ok(Harness {
        performer: Arc::new(performer),
        log,
    })
}

/// Format a duration as milliseconds with one decimal
pub fn format_ms(duration: Duration) -> String {
    format!("{:>8.1}ms", duration.as_secs_f64() * 1000.0)
}

/// Short human description of an outcome
pub fn describe_outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::Immediate => "immediate".green().to_string(),
        Outcome::Delayed(wait) => format!("delayed {}", format_ms(wait).trim()).yellow().to_string(),
    }
}

/// Print trigger count and spacing summary; returns false if spacing was violated
pub fn print_summary(log: &RecordingBackend, min_delay: Duration) -> bool {
    let count = log.count();
    println!();
    println!("Triggers:      {}", count.to_string().cyan());
    println!("Min delay:     {}", format_ms(min_delay).trim());

    match log.min_gap() {
        Some(gap) if gap >= min_delay => {
            println!("Smallest gap:  {} {}", format_ms(gap).trim(), "✓".green());
            true
        }
        Some(gap) => {
            println!("Smallest gap:  {} {}", format_ms(gap).trim(), "✗ below minimum".red());
            false
        }
        None => {
            println!("Smallest gap:  {}", "n/a (fewer than two triggers)".dimmed());
            true
        }
    }
}
