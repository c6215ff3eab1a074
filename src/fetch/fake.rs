// src/fetch/fake.rs
// In-memory PageSource for tests: canned pages, scripted failures, and a
// record of how many requests were in flight at once.

use super::source::PageSource;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

#[derive(Default)]
pub struct FakeSource {
    pages: HashMap<String, String>,
    fallback: Option<String>,
    failing_first: usize,
    latency: Duration,
    calls: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        FakeSource::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Body served for any URL without its own page.
    pub fn fallback(mut self, body: &str) -> Self {
        self.fallback = Some(body.to_string());
        self
    }

    /// Every URL fails its first `n` requests.
    pub fn failing_first(mut self, n: usize) -> Self {
        self.failing_first = n;
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn get(&self, url: &Url) -> Result<String> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(url.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if call <= self.failing_first {
            return Err(anyhow!("simulated network failure"));
        }

        self.pages
            .get(url.as_str())
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| anyhow!("HTTP 404"))
    }
}
