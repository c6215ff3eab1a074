// src/fetch/retry.rs
// =============================================================================
// Gated fetch with exponential backoff.
//
// fetch_with_retry() never fails loudly. After the last attempt it logs and
// returns None, which callers read as "this key produced zero records".
// =============================================================================

use super::gate::Gate;
use super::source::PageSource;
use crate::config::RetryPolicy;
use std::fmt::Display;
use tracing::{debug, warn};
use url::Url;

pub async fn fetch_with_retry<S>(
    source: &S,
    gate: &Gate,
    url: &Url,
    policy: &RetryPolicy,
    what: &dyn Display,
) -> Option<String>
where
    S: PageSource + ?Sized,
{
    // Held for every attempt of this key; dropped on return
    let _permit = gate.enter().await.ok()?;

    for attempt in 0..policy.attempts {
        debug!(
            "Fetching {} (attempt {}, {} in flight)",
            what,
            attempt + 1,
            gate.in_flight()
        );

        match source.get(url).await {
            Ok(body) => {
                debug!("Successfully fetched {}", what);
                return Some(body);
            }
            Err(e) if attempt + 1 < policy.attempts => {
                let wait = policy.delay_for(attempt);
                warn!(
                    "Attempt {} failed for {}: {}. Retrying in {:?}",
                    attempt + 1,
                    what,
                    e,
                    wait
                );
                tokio::time::sleep(wait).await;
            }
            Err(e) => {
                warn!("Attempt {} failed for {}: {}", attempt + 1, what, e);
            }
        }
    }

    warn!("Failed to fetch {} after {} attempts", what, policy.attempts);
    None
}
