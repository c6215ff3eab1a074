// src/pipeline/courses.rs
// =============================================================================
// Listing pipeline: (term x course list) -> course records.
// =============================================================================

use super::{run_batch, Batch};
use crate::catalog::{CourseKey, CourseListing, CourseRecord};
use crate::config::ScrapeConfig;
use crate::extract::parse_listing;
use crate::fetch::{listing_url, PageSource};
use tracing::info;

/// One key per (term, listing), terms in the outer loop.
pub fn course_keys(terms: &[String], listings: &[CourseListing]) -> Vec<CourseKey> {
    let mut keys = Vec::with_capacity(terms.len() * listings.len());
    for term in terms {
        info!("Processing term {}...", term);
        for listing in listings {
            keys.push(CourseKey::new(term, &listing.subject, &listing.course_number));
        }
    }
    keys
}

pub async fn scrape_courses<S>(
    source: &S,
    config: &ScrapeConfig,
    keys: Vec<CourseKey>,
) -> Batch<CourseKey, CourseRecord>
where
    S: PageSource + ?Sized,
{
    let layout = config.title_layout;
    run_batch(
        source,
        config,
        keys,
        |key| listing_url(&config.catalog_url, key),
        |html, key| parse_listing(html, key, layout),
    )
    .await
}
