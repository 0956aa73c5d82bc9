//! Lead allocation: the caller-side flow around discovery.
//!
//! Validates the request, sizes the discovery quota against the daily
//! budget, runs discovery, drops identities the owner already has and
//! shapes the survivors into drafts ready to persist. Persisting and
//! usage accounting stay with the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coordinator::LeadDiscovery;
use crate::dedup::{filter_known, KnownIdentitySet};
use crate::error::{DiscoveryError, Result};
use crate::traits::searcher::LeadSearcher;
use crate::types::{
    candidate::{Candidate, Confidence, LeadStatus},
    config::AllocationPolicy,
};

const DEFAULT_LOCATION: &str = "World";

/// Incoming allocation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Niche/topic to search.
    pub topic: String,
    pub location: Option<String>,
    pub campaign: Option<String>,
}

impl AllocationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_campaign(mut self, campaign: impl Into<String>) -> Self {
        self.campaign = Some(campaign.into());
        self
    }

    fn validated_topic(&self) -> Result<&str> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(DiscoveryError::InvalidTopic {
                reason: "niche is required".to_string(),
            });
        }
        Ok(topic)
    }

    fn campaign_or_default(&self, topic: &str) -> String {
        non_blank(self.campaign.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} Outreach", topic))
    }

    fn location_or_default(&self) -> String {
        non_blank(self.location.as_deref())
            .unwrap_or(DEFAULT_LOCATION)
            .to_string()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A discovered lead shaped for storage, not yet saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadDraft {
    pub identity: String,
    pub business_name: String,
    pub website: String,
    pub email: String,
    pub email_confidence: Confidence,
    pub industry: String,
    pub campaign: String,
    pub location: String,
    pub status: LeadStatus,
    pub discovered_at: DateTime<Utc>,
}

impl LeadDraft {
    fn from_candidate(
        candidate: Candidate,
        campaign: &str,
        location: &str,
        discovered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identity: candidate.identity,
            business_name: candidate.display_name,
            website: candidate.profile_url,
            email: candidate.email,
            email_confidence: candidate.confidence,
            industry: candidate.topic,
            campaign: campaign.to_string(),
            location: location.to_string(),
            status: candidate.status,
            discovered_at,
        }
    }
}

/// Outcome of one allocation.
#[derive(Debug, Clone, Serialize)]
pub struct Allocation {
    pub leads: Vec<LeadDraft>,
    pub allocated: usize,
    pub message: String,
}

impl Allocation {
    fn new(leads: Vec<LeadDraft>) -> Self {
        let allocated = leads.len();
        let message = if allocated == 0 {
            "No new unique leads found.".to_string()
        } else {
            format!("Found {} potential leads.", allocated)
        };

        Self {
            leads,
            allocated,
            message,
        }
    }
}

/// Runs discovery under an allocation policy.
pub struct LeadAllocator<S: LeadSearcher> {
    discovery: LeadDiscovery<S>,
    policy: AllocationPolicy,
}

impl<S: LeadSearcher> LeadAllocator<S> {
    pub fn new(discovery: LeadDiscovery<S>) -> Self {
        Self {
            discovery,
            policy: AllocationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn discovery(&self) -> &LeadDiscovery<S> {
        &self.discovery
    }

    /// Quota for the next request, or an error when today's budget is spent.
    pub fn quota_for(&self, used_today: usize) -> Result<usize> {
        let remaining = self.policy.remaining(used_today);
        if remaining == 0 {
            return Err(DiscoveryError::DailyLimitReached {
                limit: self.policy.daily_limit,
            });
        }
        Ok(remaining.min(self.policy.per_request_cap))
    }

    /// Discover, dedup against `known`, and shape the result.
    pub async fn allocate(
        &self,
        request: &AllocationRequest,
        used_today: usize,
        known: &KnownIdentitySet,
    ) -> Result<Allocation> {
        let topic = request.validated_topic()?;
        let quota = self.quota_for(used_today)?;

        let discovered = self.discovery.discover(topic, quota).await?;
        let found = discovered.len();
        let fresh = filter_known(discovered, known);

        info!(
            topic = %topic,
            quota,
            found,
            new = fresh.len(),
            duplicates = found - fresh.len(),
            "Lead allocation complete"
        );

        let campaign = request.campaign_or_default(topic);
        let location = request.location_or_default();
        let now = Utc::now();

        let leads = fresh
            .into_iter()
            .map(|c| LeadDraft::from_candidate(c, &campaign, &location, now))
            .collect();

        Ok(Allocation::new(leads))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSearcher;

    fn allocator(policy: AllocationPolicy) -> LeadAllocator<MockSearcher> {
        LeadAllocator::new(LeadDiscovery::new(MockSearcher::new())).with_policy(policy)
    }

    #[test]
    fn test_quota_capped_per_request() {
        let allocator = allocator(AllocationPolicy::default());
        assert_eq!(allocator.quota_for(0).unwrap(), 15);
        assert_eq!(allocator.quota_for(990).unwrap(), 10);
    }

    #[test]
    fn test_quota_errors_when_budget_spent() {
        let allocator = allocator(AllocationPolicy::default().with_daily_limit(20));
        let err = allocator.quota_for(20).unwrap_err();
        assert!(matches!(err, DiscoveryError::DailyLimitReached { limit: 20 }));
    }

    #[tokio::test]
    async fn test_blank_topic_rejected() {
        let allocator = allocator(AllocationPolicy::default());
        let err = allocator
            .allocate(&AllocationRequest::new("   "), 0, &KnownIdentitySet::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidTopic { .. }));
        assert_eq!(allocator.discovery().searcher().calls_started(), 0);
    }

    #[test]
    fn test_request_defaults() {
        let request = AllocationRequest::new("Fitness").with_location("  ");
        assert_eq!(request.campaign_or_default("Fitness"), "Fitness Outreach");
        assert_eq!(request.location_or_default(), "World");

        let request = request.with_campaign("Spring push").with_location("Austin");
        assert_eq!(request.campaign_or_default("Fitness"), "Spring push");
        assert_eq!(request.location_or_default(), "Austin");
    }

    #[test]
    fn test_allocation_message() {
        assert_eq!(Allocation::new(vec![]).message, "No new unique leads found.");
    }
}
