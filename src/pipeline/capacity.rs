// src/pipeline/capacity.rs
// =============================================================================
// Capacity pipeline: distinct (term, crn) pairs read from a course
// table -> one seat-count record per detail page that has the
// availability table.
// =============================================================================

use super::{run_batch, Batch};
use crate::catalog::{CapacityKey, CapacityRecord};
use crate::config::ScrapeConfig;
use crate::extract::parse_capacity;
use crate::fetch::{detail_url, PageSource};
use std::collections::HashSet;

/// Distinct (term, crn) pairs in first-seen order. Rows without a CRN are
/// skipped.
pub fn capacity_keys(rows: Vec<CapacityKey>) -> Vec<CapacityKey> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|key| !key.crn.trim().is_empty())
        .map(|key| CapacityKey {
            term: key.term.trim().to_string(),
            crn: key.crn.trim().to_string(),
        })
        // insert() is false for a pair we already queued
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

pub async fn scrape_capacity<S>(
    source: &S,
    config: &ScrapeConfig,
    keys: Vec<CapacityKey>,
) -> Batch<CapacityKey, CapacityRecord>
where
    S: PageSource + ?Sized,
{
    run_batch(
        source,
        config,
        keys,
        |key| detail_url(&config.detail_url, key),
        |html, key| parse_capacity(html, key).into_iter().collect(),
    )
    .await
}
