// src/fetch/source.rs
// =============================================================================
// Where pages come from.
//
// PageSource is the seam between the pipelines and the network: the real
// implementation wraps a reqwest client, tests plug in an in-memory fake.
// A single GET either yields the body text or an error describing why it
// failed; retrying is the caller's business (see retry.rs).
//
// Rust concepts:
// - async-trait: async methods on a trait used behind &dyn / generics
// - Send + Sync bounds so one source can be shared by every task
// =============================================================================

use crate::config::ScrapeConfig;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches `url` and returns the response body.
    async fn get(&self, url: &Url) -> Result<String>;
}

/// Live HTTP source with the configured user agent and per-request timeout.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        // One client for the whole run (connection pooling)
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(HttpSource { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn get(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!(describe_error(&e)))?;

        // Non-2xx counts as a failed attempt, same as a dropped connection
        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {}", status.as_u16());
        }

        response
            .text()
            .await
            .map_err(|e| anyhow!(describe_error(&e)))
    }
}

/// Short human-readable reason for a reqwest failure.
fn describe_error(error: &reqwest::Error) -> String {
    let error_string = error.to_string();

    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error.is_body() || error.is_decode() {
        format!("Could not read response body: {}", error_string)
    } else {
        error_string
    }
}
