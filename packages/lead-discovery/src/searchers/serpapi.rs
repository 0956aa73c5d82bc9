//! SerpAPI-backed searcher.

use std::time::Duration;

use async_trait::async_trait;
use serpapi_client::{SearchParams, SerpApiClient, SerpApiError};

use crate::error::{DiscoveryError, ProviderError, ProviderResult, Result};
use crate::security::{ExposeSecret, SecretString};
use crate::traits::searcher::{LeadSearcher, SearchRequest};
use crate::types::item::SearchResultItem;

const PROVIDER: &str = "serpapi";

/// Google search through SerpAPI.
///
/// Constructed with an optional key so a missing `SERPAPI_API_KEY` surfaces
/// as [`DiscoveryError::NotConfigured`] at discovery time rather than at
/// startup.
pub struct SerpApiSearcher {
    client: Option<SerpApiClient>,
    timeout: Duration,
}

impl SerpApiSearcher {
    /// Create a searcher. `None` yields an unconfigured searcher; run raw
    /// values through [`crate::security::api_key`] so blanks count as missing.
    pub fn new(api_key: Option<SecretString>, timeout: Duration) -> Self {
        let client = api_key
            .map(|key| SerpApiClient::new(key.expose_secret().to_string()).with_timeout(timeout));

        Self { client, timeout }
    }

    /// Point the client at another host (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client = self.client.map(|c| c.with_base_url(base_url));
        self
    }

    fn map_error(&self, err: SerpApiError) -> ProviderError {
        match err {
            SerpApiError::Http(e) => ProviderError::Http(Box::new(e)),
            SerpApiError::Api { status, message } => ProviderError::Status { status, message },
            SerpApiError::Malformed(message) => ProviderError::Malformed(message),
            SerpApiError::Timeout => ProviderError::Timeout {
                millis: self.timeout.as_millis() as u64,
            },
        }
    }
}

#[async_trait]
impl LeadSearcher for SerpApiSearcher {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn ensure_configured(&self) -> Result<()> {
        match self.client {
            Some(_) => Ok(()),
            None => Err(DiscoveryError::NotConfigured { provider: PROVIDER }),
        }
    }

    async fn search(&self, request: &SearchRequest) -> ProviderResult<Vec<SearchResultItem>> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ProviderError::Other("serpapi client not configured".to_string()))?;

        let params = SearchParams::google(request.query.as_str())
            .with_num(request.num)
            .with_start(request.start);

        let response = client.search(&params).await.map_err(|e| self.map_error(e))?;

        Ok(response
            .organic_results
            .into_iter()
            .map(SearchResultItem::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_not_configured() {
        let searcher = SerpApiSearcher::new(None, Duration::from_secs(5));
        let err = searcher.ensure_configured().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("serpapi"));
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let key = crate::security::api_key(Some("   "));
        let searcher = SerpApiSearcher::new(key, Duration::from_secs(5));
        assert!(searcher.ensure_configured().is_err());
    }

    #[test]
    fn test_key_present_is_configured() {
        let searcher = SerpApiSearcher::new(Some("sk-live".into()), Duration::from_secs(5));
        assert!(searcher.ensure_configured().is_ok());
        assert_eq!(searcher.provider_name(), "serpapi");
    }

    #[test]
    fn test_timeout_maps_with_budget() {
        let searcher = SerpApiSearcher::new(None, Duration::from_millis(2500));
        match searcher.map_error(SerpApiError::Timeout) {
            ProviderError::Timeout { millis } => assert_eq!(millis, 2500),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_serpapi_search() {
        let api_key = std::env::var("SERPAPI_API_KEY").expect("SERPAPI_API_KEY required");
        let searcher = SerpApiSearcher::new(Some(api_key.into()), Duration::from_secs(8));

        let items = searcher
            .search(&SearchRequest::new(r#"site:instagram.com "bakery" "@gmail.com""#).with_num(10))
            .await
            .unwrap();

        assert!(!items.is_empty());
    }
}
