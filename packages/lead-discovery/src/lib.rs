//! Lead Discovery Engine
//!
//! Finds contactable Instagram profiles for a topic by racing many search
//! queries against a third-party search API and keeping the first `quota`
//! unique profiles that carry a contact address.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lead_discovery::{filter_known, LeadDiscovery, SerpApiSearcher};
//!
//! let searcher = SerpApiSearcher::new(api_key, Duration::from_secs(8));
//! let discovery = LeadDiscovery::new(searcher);
//!
//! let candidates = discovery.discover("Fitness", 15).await?;
//! let fresh = filter_known(candidates, &already_saved);
//! ```
//!
//! # Modules
//!
//! - [`queries`] - Topic to query-set expansion
//! - [`extract`] - Result item to candidate heuristics
//! - [`coordinator`] - Concurrent racing discovery
//! - [`dedup`] - Filtering against stored identities
//! - [`allocate`] - Quota sizing and lead drafts around discovery
//! - [`traits`] - Search provider abstraction
//! - [`searchers`] - Provider implementations (SerpAPI)
//! - [`security`] - API key normalisation
//! - [`testing`] - Mock provider for tests

pub mod allocate;
pub mod coordinator;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod queries;
pub mod searchers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use allocate::{Allocation, AllocationRequest, LeadAllocator, LeadDraft};
pub use coordinator::{DiscoveryRun, LeadDiscovery};
pub use dedup::{filter_known, KnownIdentitySet};
pub use error::{DiscoveryError, ProviderError, ProviderResult, Result};
pub use extract::{extract, extract_with_location};
pub use queries::{build_queries, QUERY_COUNT};
pub use searchers::SerpApiSearcher;
pub use security::{api_key, SecretString};
pub use traits::searcher::{LeadSearcher, SearchRequest};
pub use types::{
    candidate::{Candidate, Confidence, ContactAddress, LeadStatus},
    config::{AllocationPolicy, DiscoveryConfig, LOCATION_PLACEHOLDER},
    item::SearchResultItem,
};

// Re-export testing utilities
pub use testing::MockSearcher;
