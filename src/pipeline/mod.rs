// src/pipeline/mod.rs
// =============================================================================
// Batch runner shared by the course and capacity pipelines.
//
// Shape of a run:
// 1. One future per key: build URL -> gated fetch with retries
// 2. All futures live in a FuturesUnordered polled by the calling task, so
//    everything is multiplexed on one thread and only yields at network
//    I/O and backoff sleeps
// 3. Results are consumed in completion order; each page is parsed and its
//    rows appended to one flat Vec
//
// A key whose fetch never succeeds contributes zero rows and is listed in
// Batch::failed. The batch itself always completes.
// =============================================================================

mod capacity;
mod courses;

pub use capacity::{capacity_keys, scrape_capacity};
pub use courses::{course_keys, scrape_courses};

use crate::config::ScrapeConfig;
use crate::fetch::{fetch_with_retry, Gate, PageSource};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::fmt::Display;
use tracing::info;
use url::Url;

/// Everything a batch produced.
#[derive(Debug)]
pub struct Batch<K, T> {
    pub tasks: usize,
    pub rows: Vec<T>,
    pub failed: Vec<K>,
}

/// What `--json` prints after a run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub pipeline: &'static str,
    pub tasks: usize,
    pub records: usize,
    pub failed_keys: Vec<String>,
    pub output: String,
    pub elapsed: String,
}

impl RunSummary {
    pub fn new<K: Display, T>(
        pipeline: &'static str,
        batch: &Batch<K, T>,
        output: &std::path::Path,
        elapsed: String,
    ) -> Self {
        RunSummary {
            pipeline,
            tasks: batch.tasks,
            records: batch.rows.len(),
            failed_keys: batch.failed.iter().map(|k| k.to_string()).collect(),
            output: output.display().to_string(),
            elapsed,
        }
    }
}

async fn run_batch<K, T, S, U, P>(
    source: &S,
    config: &ScrapeConfig,
    keys: Vec<K>,
    url_for: U,
    parse: P,
) -> Batch<K, T>
where
    K: Display,
    S: PageSource + ?Sized,
    U: Fn(&K) -> Url,
    P: Fn(&str, &K) -> Vec<T>,
{
    let total = keys.len();

    // One gate per batch: at most `concurrency` keys hold a permit at once
    let gate = Gate::new(config.concurrency);

    // Borrow once so the `move` closure below copies references, not values
    let gate = &gate;
    let url_for = &url_for;

    // Build every future up front. Nothing runs until the stream is polled,
    // and each future waits at the gate before its first request.
    let mut pending: FuturesUnordered<_> = keys
        .into_iter()
        .map(move |key| async move {
            let url = url_for(&key);
            let page = fetch_with_retry(source, gate, &url, &config.retry, &key).await;
            (key, page)
        })
        .collect();

    let mut batch = Batch {
        tasks: total,
        rows: Vec::new(),
        failed: Vec::new(),
    };
    let mut completed = 0;

    // next() yields whichever future finished first (completion order)
    while let Some((key, page)) = pending.next().await {
        completed += 1;
        match page {
            // Parsing is synchronous, so it never overlaps another parse
            Some(html) => batch.rows.extend(parse(&html, &key)),
            // Retries exhausted: the key gets no rows but is remembered
            None => batch.failed.push(key),
        }
        info!("Completed {}/{} tasks.", completed, total);
    }

    batch
}
