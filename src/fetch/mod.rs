// src/fetch/mod.rs
// =============================================================================
// Fetching pages from the catalog.
//
// Submodules:
// - source: PageSource trait and the reqwest-backed HttpSource
// - gate: concurrency gate (tokio Semaphore)
// - retry: gated fetch with exponential backoff
// - urls: deterministic query URLs per key
// =============================================================================

mod gate;
mod retry;
mod source;
mod urls;

#[cfg(test)]
pub(crate) mod fake;

pub use gate::Gate;
pub use retry::fetch_with_retry;
pub use source::{HttpSource, PageSource};
pub use urls::{detail_url, listing_url};
