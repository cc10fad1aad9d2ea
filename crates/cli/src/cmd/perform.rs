//! Perform feedback from a single caller

use crate::util;
use anyhow::Result;
use hectic_core::FeedbackKind;
use hectic_dispatch::perform_async;
use owo_colors::OwoColorize;
use std::time::Duration;

pub async fn run(
    kind: FeedbackKind,
    count: usize,
    interval_ms: u64,
    min_delay_ms: Option<i64>,
    run_async: bool,
) -> Result<()> {
    let harness = util::build_harness(min_delay_ms)?;
    let min_delay = harness.performer.min_delay();

    println!(
        "{} {} x{} (min delay {}, interval {}ms{})",
        "Performing".bold(),
        kind.cyan(),
        count,
        util::format_ms(min_delay).trim(),
        interval_ms,
        if run_async { ", async" } else { "" }
    );

    for i in 0..count {
        if i > 0 && interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
        }

        let outcome = if run_async {
            perform_async(harness.performer.clone(), kind).await?
        } else {
            // Blocks through the cooldown, like a UI thread calling in directly
            tokio::task::block_in_place(|| harness.performer.perform(kind))
        };

        let elapsed = match harness.performer.elapsed() {
            Some(elapsed) => util::format_ms(elapsed).trim().to_string(),
            None => "first".to_string(),
        };
        println!(
            "    #{:<3} {} {}",
            i + 1,
            util::describe_outcome(outcome),
            format!("(elapsed: {})", elapsed).dimmed()
        );
    }

    if !util::print_summary(&harness.log, min_delay) {
        anyhow::bail!("Triggers were spaced closer than the minimum delay");
    }
    Ok(())
}
