// src/config.rs
// =============================================================================
// Run configuration shared by every pipeline.
//
// The scraper used to hard-code its terms, base URLs and concurrency limit.
// They now live in one ScrapeConfig value that the CLI fills in and passes
// down, so tests can point a pipeline at a fake page source with tiny
// backoff delays.
// =============================================================================

use anyhow::{bail, Result};
use clap::ValueEnum;
use std::time::Duration;
use url::Url;

/// Listing endpoint: one page per (term, subject, course number).
pub const DEFAULT_CATALOG_URL: &str = "https://www.uvic.ca/BAN1P/bwckctlg.p_disp_listcrse";

/// Detail endpoint: one page per (term, crn).
pub const DEFAULT_DETAIL_URL: &str = "https://www.uvic.ca/BAN1P/bwckschd.p_disp_detail_sched";

pub const DEFAULT_TERMS: [&str; 2] = ["202409", "202501"];
pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Which title shape the listing parser accepts.
///
/// The catalog changed its section titles over time. Old pages use
/// "Name - CRN - Section", newer ones "Name - CRN - SUBJ NUM - Section".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TitleLayout {
    /// Pick the layout from the piece count (3 or 4+)
    #[default]
    Auto,
    /// Only "Name - CRN - Section"
    ThreePart,
    /// Only "Name - CRN - SUBJ NUM - Section"
    FourPart,
}

/// Exponential backoff: wait `base_delay * 2^attempt` between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay after the zero-based `attempt` failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub terms: Vec<String>,
    pub concurrency: usize,
    pub catalog_url: Url,
    pub detail_url: Url,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub title_layout: TitleLayout,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            terms: DEFAULT_TERMS.iter().map(|t| t.to_string()).collect(),
            concurrency: DEFAULT_CONCURRENCY,
            // Both constants are known-good URLs; failing here is a programmer error
            catalog_url: Url::parse(DEFAULT_CATALOG_URL).expect("built-in catalog URL parses"),
            detail_url: Url::parse(DEFAULT_DETAIL_URL).expect("built-in detail URL parses"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            title_layout: TitleLayout::Auto,
        }
    }
}

impl ScrapeConfig {
    /// Rejects settings that would stall or misroute a run.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            bail!("concurrency limit must be at least 1");
        }
        if self.retry.attempts == 0 {
            bail!("retry policy must allow at least one attempt");
        }
        if self.terms.iter().any(|t| t.trim().is_empty()) {
            bail!("terms must not be blank");
        }
        for url in [&self.catalog_url, &self.detail_url] {
            if !matches!(url.scheme(), "http" | "https") {
                bail!("base URL must be http or https: {}", url);
            }
        }
        Ok(())
    }

    /// Extra check for the listing pipeline, which iterates over terms.
    pub fn require_terms(&self) -> Result<()> {
        if self.terms.is_empty() {
            bail!("at least one term is required");
        }
        Ok(())
    }
}
