//! Racing search coordinator.
//!
//! Fires every query of a topic's query set at the provider concurrently,
//! runs each returned item through the extractor, and collects unique
//! candidates into a map scoped to the call. Once the map holds `quota`
//! candidates the run is finished: tasks stop at their next check and
//! outstanding provider calls are no longer polled.
//!
//! ```rust,ignore
//! let discovery = LeadDiscovery::new(SerpApiSearcher::new(key, timeout));
//! let leads = discovery.discover("Fitness", 15).await?;
//! ```
//!
//! Provider failures never fail the run. A topic where every query failed
//! and a topic that is simply low-yield both come back as a short list.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::{stream, FutureExt, StreamExt};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ProviderError, ProviderResult, Result};
use crate::extract::extract_with_location;
use crate::queries::build_queries;
use crate::traits::searcher::{LeadSearcher, SearchRequest};
use crate::types::{candidate::Candidate, config::DiscoveryConfig, item::SearchResultItem};

/// Candidates accumulated by one discovery call.
///
/// Check-then-insert happens under one lock so two tasks can never both
/// believe they are first for an identity.
struct Accumulator {
    quota: usize,
    leads: Mutex<IndexMap<String, Candidate>>,
    finished: AtomicBool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Offer {
    Inserted,
    Duplicate,
    Full,
}

impl Accumulator {
    fn new(quota: usize) -> Self {
        Self {
            quota,
            leads: Mutex::new(IndexMap::with_capacity(quota)),
            finished: AtomicBool::new(false),
        }
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    fn offer(&self, candidate: Candidate) -> Offer {
        let mut leads = self.leads.lock().unwrap_or_else(PoisonError::into_inner);

        if leads.len() >= self.quota {
            self.finished.store(true, Ordering::Release);
            return Offer::Full;
        }
        if leads.contains_key(&candidate.identity) {
            return Offer::Duplicate;
        }

        leads.insert(candidate.identity.clone(), candidate);
        if leads.len() >= self.quota {
            self.finished.store(true, Ordering::Release);
        }
        Offer::Inserted
    }

    fn into_candidates(self) -> Vec<Candidate> {
        let quota = self.quota;
        self.leads
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_values()
            .take(quota)
            .collect()
    }
}

/// What one query task contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskOutcome {
    /// Quota was already met before the provider was called.
    Skipped,
    /// Provider call failed; contributes nothing.
    Failed,
    /// Provider answered with `items` raw results.
    Completed { items: usize },
}

/// Result of a discovery call plus per-query bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryRun {
    pub topic: String,
    pub quota: usize,
    /// Unique candidates in insertion order, at most `quota`.
    pub candidates: Vec<Candidate>,
    pub queries_total: usize,
    pub queries_completed: usize,
    pub queries_failed: usize,
    pub queries_skipped: usize,
    /// Raw provider items seen across completed queries.
    pub items_seen: usize,
    /// Queries still outstanding when the quota was reached.
    pub queries_abandoned: usize,
}

impl DiscoveryRun {
    fn empty(topic: &str, quota: usize) -> Self {
        Self {
            topic: topic.to_string(),
            quota,
            candidates: Vec::new(),
            queries_total: 0,
            queries_completed: 0,
            queries_failed: 0,
            queries_skipped: 0,
            items_seen: 0,
            queries_abandoned: 0,
        }
    }

    fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Skipped => self.queries_skipped += 1,
            TaskOutcome::Failed => self.queries_failed += 1,
            TaskOutcome::Completed { items } => {
                self.queries_completed += 1;
                self.items_seen += items;
            }
        }
    }

    /// True when the run stopped because the quota was met.
    pub fn quota_reached(&self) -> bool {
        self.candidates.len() >= self.quota
    }
}

/// Racing lead discovery over one search provider.
pub struct LeadDiscovery<S: LeadSearcher> {
    searcher: S,
    config: DiscoveryConfig,
}

impl<S: LeadSearcher> LeadDiscovery<S> {
    pub fn new(searcher: S) -> Self {
        Self {
            searcher,
            config: DiscoveryConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Discover up to `quota` unique candidates for a topic.
    ///
    /// Fails only when the provider is not configured; that check runs
    /// before any query is sent. A quota of zero returns an empty list.
    pub async fn discover(&self, topic: &str, quota: usize) -> Result<Vec<Candidate>> {
        Ok(self.discover_with_report(topic, quota).await?.candidates)
    }

    /// Same as [`discover`](Self::discover), keeping per-query counts.
    pub async fn discover_with_report(&self, topic: &str, quota: usize) -> Result<DiscoveryRun> {
        self.searcher.ensure_configured()?;

        let topic = topic.trim();
        if quota == 0 {
            return Ok(DiscoveryRun::empty(topic, quota));
        }

        let queries = build_queries(topic);
        let accumulator = Accumulator::new(quota);
        let in_flight = self.config.max_in_flight.unwrap_or(queries.len()).max(1);

        info!(
            topic = %topic,
            quota,
            queries = queries.len(),
            in_flight,
            provider = self.searcher.provider_name(),
            "Starting lead discovery"
        );

        let mut run = DiscoveryRun::empty(topic, quota);
        run.queries_total = queries.len();

        let mut tasks = stream::iter(queries.iter().enumerate())
            .map(|(idx, query)| self.run_query(idx, query, topic, &accumulator))
            .buffer_unordered(in_flight);

        while let Some(outcome) = tasks.next().await {
            run.record(outcome);
            if accumulator.is_finished() {
                debug!(topic = %topic, quota, "Quota reached, abandoning outstanding queries");
                break;
            }
        }
        drop(tasks);

        run.queries_abandoned =
            run.queries_total - run.queries_completed - run.queries_failed - run.queries_skipped;
        run.candidates = accumulator.into_candidates();

        info!(
            topic = %topic,
            found = run.candidates.len(),
            completed = run.queries_completed,
            failed = run.queries_failed,
            skipped = run.queries_skipped,
            abandoned = run.queries_abandoned,
            "Lead discovery complete"
        );

        Ok(run)
    }

    /// One racing task: call the provider, then feed items to the accumulator in order.
    async fn run_query(
        &self,
        idx: usize,
        query: &str,
        topic: &str,
        accumulator: &Accumulator,
    ) -> TaskOutcome {
        if accumulator.is_finished() {
            return TaskOutcome::Skipped;
        }

        let request = SearchRequest::new(query)
            .with_num(self.config.results_per_query)
            .with_start(self.config.pick_start_offset());

        let items = match self.call_provider(&request).await {
            Ok(items) => items,
            Err(e) => {
                warn!(idx, query = %query, error = %e, "Search query failed, skipping");
                return TaskOutcome::Failed;
            }
        };

        let total = items.len();
        let mut inserted = 0;
        for item in &items {
            if accumulator.is_finished() {
                break;
            }
            let Some(candidate) =
                extract_with_location(item, topic, &self.config.location_placeholder)
            else {
                continue;
            };
            match accumulator.offer(candidate) {
                Offer::Inserted => inserted += 1,
                Offer::Duplicate => {}
                Offer::Full => break,
            }
        }

        debug!(idx, start = request.start, items = total, inserted, "Search query finished");
        TaskOutcome::Completed { items: total }
    }

    /// Provider call with its own deadline. Panics inside the provider are contained here.
    async fn call_provider(&self, request: &SearchRequest) -> ProviderResult<Vec<SearchResultItem>> {
        let timeout = self.config.request_timeout;
        let call = AssertUnwindSafe(self.searcher.search(request)).catch_unwind();

        match tokio::time::timeout(timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(_panic)) => Err(ProviderError::Other("provider panicked".to_string())),
            Err(_elapsed) => Err(ProviderError::Timeout {
                millis: timeout.as_millis() as u64,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::candidate::{Confidence, LeadStatus};

    fn candidate(identity: &str) -> Candidate {
        Candidate {
            identity: identity.to_string(),
            display_name: identity.to_string(),
            profile_url: format!("https://instagram.com/{}", identity),
            email: format!("{}@gmail.com", identity),
            confidence: Confidence::Verbatim,
            topic: "Fitness".to_string(),
            location: "Verified".to_string(),
            status: LeadStatus::Allocated,
        }
    }

    #[test]
    fn test_accumulator_first_writer_wins() {
        let acc = Accumulator::new(5);
        let mut first = candidate("jane");
        first.display_name = "First".to_string();
        let mut second = candidate("jane");
        second.display_name = "Second".to_string();

        assert_eq!(acc.offer(first), Offer::Inserted);
        assert_eq!(acc.offer(second), Offer::Duplicate);

        let leads = acc.into_candidates();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].display_name, "First");
    }

    #[test]
    fn test_accumulator_stops_at_quota() {
        let acc = Accumulator::new(2);
        assert_eq!(acc.offer(candidate("a")), Offer::Inserted);
        assert!(!acc.is_finished());
        assert_eq!(acc.offer(candidate("b")), Offer::Inserted);
        assert!(acc.is_finished());
        assert_eq!(acc.offer(candidate("c")), Offer::Full);

        let ids: Vec<String> = acc.into_candidates().into_iter().map(|c| c.identity).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_run_records_outcomes() {
        let mut run = DiscoveryRun::empty("t", 3);
        run.queries_total = 5;
        run.record(TaskOutcome::Failed);
        run.record(TaskOutcome::Completed { items: 4 });
        run.record(TaskOutcome::Skipped);
        assert_eq!(run.queries_failed, 1);
        assert_eq!(run.queries_completed, 1);
        assert_eq!(run.queries_skipped, 1);
        assert_eq!(run.items_seen, 4);
    }
}
