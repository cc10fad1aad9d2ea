//! Perform, wait out the window, perform again

use crate::util;
use anyhow::Result;
use hectic_core::FeedbackKind;
use owo_colors::OwoColorize;
use std::time::Instant;

pub async fn run(kind: FeedbackKind, min_delay_ms: Option<i64>) -> Result<()> {
    let harness = util::build_harness(min_delay_ms)?;
    let performer = harness.performer.clone();
    let min_delay = performer.min_delay();

    println!(
        "{} {} (min delay {})",
        "Wait and perform".bold(),
        kind.cyan(),
        util::format_ms(min_delay).trim()
    );

    // The wait is a real sleep; keep it off the async worker
    let (outcome, waited) = tokio::task::spawn_blocking(move || {
        performer.perform(kind);
        let start = Instant::now();
        let outcome = performer.wait_and_perform(kind);
        (outcome, start.elapsed())
    })
    .await?;

    println!();
    println!("Waited:        {}", util::format_ms(waited).trim());
    println!("Second event:  {}", util::describe_outcome(outcome));

    if !util::print_summary(&harness.log, min_delay) {
        anyhow::bail!("Triggers were spaced closer than the minimum delay");
    }
    Ok(())
}
