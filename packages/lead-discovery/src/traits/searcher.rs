//! Search provider trait.
//!
//! The coordinator only ever talks to a provider through this trait, so the
//! racing logic can be exercised against `MockSearcher` and run in
//! production against `SerpApiSearcher`.
//!
//! # Configuration vs. runtime failures
//!
//! A provider without credentials reports it through
//! [`LeadSearcher::ensure_configured`], which the coordinator checks once
//! before launching any task. Everything [`LeadSearcher::search`] returns as
//! an error is a per-call failure and is swallowed by the coordinator.

use async_trait::async_trait;

use crate::error::{ProviderResult, Result};
use crate::types::item::SearchResultItem;

/// One provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Opaque query string.
    pub query: String,

    /// Result-count hint.
    pub num: u32,

    /// Pagination offset.
    pub start: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            num: 10,
            start: 0,
        }
    }

    pub fn with_num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }

    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }
}

/// A third-party web search API.
#[async_trait]
pub trait LeadSearcher: Send + Sync {
    /// Short provider name for logs and configuration errors.
    fn provider_name(&self) -> &'static str;

    /// Fail fast when credentials are missing.
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    /// Run one query and return the raw result items in provider order.
    async fn search(&self, request: &SearchRequest) -> ProviderResult<Vec<SearchResultItem>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_builder() {
        let request = SearchRequest::new("site:instagram.com yoga")
            .with_num(30)
            .with_start(40);
        assert_eq!(request.query, "site:instagram.com yoga");
        assert_eq!(request.num, 30);
        assert_eq!(request.start, 40);
    }
}
