//! Pure SerpAPI REST client.
//!
//! A minimal client for SerpAPI's Google search endpoint. Returns organic
//! results as-is; interpreting them is the caller's job.
//!
//! # Example
//!
//! ```rust,ignore
//! use serpapi_client::{SearchParams, SerpApiClient};
//!
//! let client = SerpApiClient::new("your-api-key".into());
//!
//! let params = SearchParams::google(r#"site:instagram.com "fitness" "@gmail.com""#).with_num(30);
//! let response = client.search(&params).await?;
//! for result in &response.organic_results {
//!     println!("{}", result.link.as_deref().unwrap_or("(no link)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, SerpApiError};
pub use types::{OrganicResult, SearchParams, SearchResponse};

use std::time::Duration;

const BASE_URL: &str = "https://serpapi.com";

/// SerpAPI reports a query with zero hits as a 200 carrying this `error`.
const NO_RESULTS_PREFIX: &str = "Google hasn't returned any results";

pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl SerpApiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Per-request deadline. Without one, requests wait as long as reqwest does.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Run one search. Non-success statuses and in-body `error` fields become `SerpApiError::Api`;
    /// an undecodable body becomes `SerpApiError::Malformed`. SerpAPI's "no results" notice is
    /// an empty response, not an error.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .query(params)
            .query(&[("api_key", self.api_key.as_str())]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let resp = request.send().await.map_err(SerpApiError::from_transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SerpApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await.map_err(SerpApiError::from_transport)?;
        let response =
            parse_response(&body).map_err(|e| SerpApiError::Malformed(e.to_string()))?;

        if let Some(message) = response.error {
            if message.starts_with(NO_RESULTS_PREFIX) {
                tracing::debug!(q = %params.q, start = params.start, "SerpAPI search returned no results");
                return Ok(SearchResponse::default());
            }
            return Err(SerpApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(
            q = %params.q,
            start = params.start,
            count = response.organic_results.len(),
            "SerpAPI search complete"
        );

        Ok(response)
    }
}

fn parse_response(body: &str) -> serde_json::Result<SearchResponse> {
    serde_json::from_str(body)
}
