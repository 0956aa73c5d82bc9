//! Configuration types for discovery and allocation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Location placeholder written onto every candidate.
pub const LOCATION_PLACEHOLDER: &str = "Verified";

/// Configuration for one racing discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Deadline for each individual provider call.
    ///
    /// One slow call must not dominate the fan-out. Default: 8s.
    pub request_timeout: Duration,

    /// Result-count hint sent with every query. Default: 30.
    pub results_per_query: u32,

    /// Number of 10-result pages the random start offset is drawn from.
    ///
    /// Spreading offsets makes parallel queries surface different results.
    /// `1` pins every call to offset 0. Default: 5.
    pub start_page_window: u32,

    /// Upper bound on provider calls in flight at once.
    ///
    /// `None` fires every query at once. Default: `None`.
    pub max_in_flight: Option<usize>,

    /// Location written onto candidates. Default: [`LOCATION_PLACEHOLDER`].
    pub location_placeholder: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(8),
            results_per_query: 30,
            start_page_window: 5,
            max_in_flight: None,
            location_placeholder: LOCATION_PLACEHOLDER.to_string(),
        }
    }
}

impl DiscoveryConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-call timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the result-count hint.
    pub fn with_results_per_query(mut self, num: u32) -> Self {
        self.results_per_query = num;
        self
    }

    /// Set the start-offset window (in pages of 10).
    pub fn with_start_page_window(mut self, pages: u32) -> Self {
        self.start_page_window = pages.max(1);
        self
    }

    /// Limit concurrent provider calls.
    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = Some(max.max(1));
        self
    }

    /// Pick a pagination offset for one call.
    pub fn pick_start_offset(&self) -> u32 {
        if self.start_page_window <= 1 {
            return 0;
        }
        fastrand::u32(0..self.start_page_window) * 10
    }
}

/// Limits applied by the allocation layer around discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Most leads a single request may discover. Default: 15.
    pub per_request_cap: usize,

    /// Most leads an owner may allocate per day. Default: 1000.
    pub daily_limit: usize,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            per_request_cap: 15,
            daily_limit: 1000,
        }
    }
}

impl AllocationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_daily_limit(mut self, limit: usize) -> Self {
        self.daily_limit = limit;
        self
    }

    pub fn with_per_request_cap(mut self, cap: usize) -> Self {
        self.per_request_cap = cap;
        self
    }

    /// Leads still allocatable today given what is already used.
    pub fn remaining(&self, used_today: usize) -> usize {
        self.daily_limit.saturating_sub(used_today)
    }
}
