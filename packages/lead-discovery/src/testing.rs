//! Testing utilities including a mock search provider.
//!
//! Useful for exercising discovery without network calls: canned results
//! per query, per-query failures and latency, and call tracking so tests
//! can observe early exit.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{DiscoveryError, ProviderError, ProviderResult, Result};
use crate::traits::searcher::{LeadSearcher, SearchRequest};
use crate::types::item::SearchResultItem;

/// A profile result item as SerpAPI would return it for `handle`.
pub fn profile_result(handle: &str, snippet: &str) -> SearchResultItem {
    SearchResultItem::new(format!("https://www.instagram.com/{}/", handle))
        .with_title(format!("{} (@{}) - Instagram", handle, handle))
        .with_snippet(snippet)
}

/// A profile result with a written-out gmail address.
pub fn profile_with_email(handle: &str) -> SearchResultItem {
    profile_result(handle, &format!("Bookings: {}@gmail.com", handle))
}

/// Mock search provider for testing.
#[derive(Default)]
pub struct MockSearcher {
    /// Canned results by exact query
    results: RwLock<HashMap<String, Vec<SearchResultItem>>>,

    /// Results for queries without a canned entry
    fallback: RwLock<Vec<SearchResultItem>>,

    /// Queries that fail with a provider error
    failing: RwLock<HashSet<String>>,

    /// Queries that panic inside the provider
    panicking: RwLock<HashSet<String>>,

    /// Per-query latency
    delays: RwLock<HashMap<String, Duration>>,

    /// Latency for queries without a specific delay
    default_delay: RwLock<Option<Duration>>,

    fail_all: bool,
    unconfigured: bool,

    /// Call tracking for assertions
    started: AtomicUsize,
    completed: AtomicUsize,
    requests: Arc<RwLock<Vec<SearchRequest>>>,
}

impl MockSearcher {
    /// Create a mock that returns nothing for every query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results for a query.
    pub fn with_results(self, query: impl Into<String>, items: Vec<SearchResultItem>) -> Self {
        self.results.write().unwrap().insert(query.into(), items);
        self
    }

    /// Results for every query without its own entry.
    pub fn with_fallback(self, items: Vec<SearchResultItem>) -> Self {
        *self.fallback.write().unwrap() = items;
        self
    }

    /// Make one query fail.
    pub fn failing(self, query: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(query.into());
        self
    }

    /// Make every query fail.
    pub fn failing_all(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Make one query panic inside the provider.
    pub fn panicking(self, query: impl Into<String>) -> Self {
        self.panicking.write().unwrap().insert(query.into());
        self
    }

    /// Delay one query.
    pub fn with_delay(self, query: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(query.into(), delay);
        self
    }

    /// Delay every query without its own delay.
    pub fn with_default_delay(self, delay: Duration) -> Self {
        *self.default_delay.write().unwrap() = Some(delay);
        self
    }

    /// Behave as if no credential were set.
    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    /// Provider calls that began.
    pub fn calls_started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Provider calls that ran to completion (success or failure).
    pub fn calls_completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Every request received, in arrival order.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.read().unwrap().clone()
    }

    fn delay_for(&self, query: &str) -> Option<Duration> {
        self.delays
            .read()
            .unwrap()
            .get(query)
            .copied()
            .or(*self.default_delay.read().unwrap())
    }
}

#[async_trait]
impl LeadSearcher for MockSearcher {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.unconfigured {
            return Err(DiscoveryError::NotConfigured { provider: "mock" });
        }
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> ProviderResult<Vec<SearchResultItem>> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.requests.write().unwrap().push(request.clone());

        if let Some(delay) = self.delay_for(&request.query) {
            tokio::time::sleep(delay).await;
        }

        if self.panicking.read().unwrap().contains(&request.query) {
            panic!("mock provider panic for {}", request.query);
        }

        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.fail_all || self.failing.read().unwrap().contains(&request.query) {
            return Err(ProviderError::Status {
                status: 503,
                message: "mock failure".to_string(),
            });
        }

        let items = self
            .results
            .read()
            .unwrap()
            .get(&request.query)
            .cloned()
            .unwrap_or_else(|| self.fallback.read().unwrap().clone());
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_canned_results() {
        let searcher = MockSearcher::new().with_results("q1", vec![profile_with_email("jane")]);

        let items = searcher.search(&SearchRequest::new("q1")).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].link.as_deref(),
            Some("https://www.instagram.com/jane/")
        );

        let none = searcher.search(&SearchRequest::new("other")).await.unwrap();
        assert!(none.is_empty());
        assert_eq!(searcher.calls_started(), 2);
        assert_eq!(searcher.calls_completed(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure_and_fallback() {
        let searcher = MockSearcher::new()
            .with_fallback(vec![profile_with_email("sam")])
            .failing("bad");

        assert!(searcher.search(&SearchRequest::new("bad")).await.is_err());
        assert_eq!(searcher.search(&SearchRequest::new("any")).await.unwrap().len(), 1);
        assert_eq!(searcher.requests().len(), 2);
    }

    #[test]
    fn test_mock_unconfigured() {
        assert!(MockSearcher::new().unconfigured().ensure_configured().is_err());
        assert!(MockSearcher::new().ensure_configured().is_ok());
    }
}
