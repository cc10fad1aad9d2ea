//! Fire many concurrent requests through the dispatch queue
//!
//! Stand-in for a UI where pointer and slider events all ask for feedback
//! at once from different threads.

use crate::util;
use anyhow::{Context, Result};
use hectic_core::FeedbackKind;
use hectic_dispatch::FeedbackDispatcher;
use owo_colors::OwoColorize;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub async fn run(
    requests: usize,
    spread_ms: u64,
    min_delay_ms: Option<i64>,
    seed: Option<u64>,
) -> Result<()> {
    let harness = util::build_harness(min_delay_ms)?;
    let min_delay = harness.performer.min_delay();
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    println!(
        "{} {} requests over {}ms (min delay {}, seed {})",
        "Burst".bold(),
        requests.to_string().cyan(),
        spread_ms,
        util::format_ms(min_delay).trim(),
        seed
    );

    let dispatcher = Arc::new(
        FeedbackDispatcher::new(harness.performer.clone())
            .context("Failed to start feedback dispatcher")?,
    );

    // Plan arrivals up front so the seed fully determines the run
    let plan: Vec<(Duration, FeedbackKind)> = (0..requests)
        .map(|_| {
            let arrival = Duration::from_millis(rng.gen_range(0..=spread_ms));
            let kind = FeedbackKind::ALL[rng.gen_range(0..FeedbackKind::ALL.len())];
            (arrival, kind)
        })
        .collect();

    let submitters: Vec<_> = plan
        .into_iter()
        .map(|(arrival, kind)| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                tokio::time::sleep(arrival).await;
                dispatcher.request_perform(kind)
            })
        })
        .collect();

    let mut completions = Vec::with_capacity(requests);
    for submitter in submitters {
        completions.push(submitter.await??);
    }
    info!("All {} requests submitted, {} pending", requests, dispatcher.pending());

    let mut total_wait = Duration::ZERO;
    let mut delayed = 0usize;
    for completion in completions {
        let outcome = tokio::task::spawn_blocking(move || completion.wait()).await??;
        if !outcome.waited().is_zero() {
            delayed += 1;
        }
        total_wait += outcome.waited();
    }

    dispatcher.shutdown()?;

    println!();
    println!("Delayed:       {} of {}", delayed, requests);
    println!("Total blocked: {}", util::format_ms(total_wait).trim());

    if !util::print_summary(&harness.log, min_delay) {
        anyhow::bail!("Triggers were spaced closer than the minimum delay");
    }
    Ok(())
}
