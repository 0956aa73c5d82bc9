use serde::{Deserialize, Serialize};

/// Query-string parameters for `GET /search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchParams {
    pub q: String,
    pub engine: String,
    pub num: u32,
    pub start: u32,
    /// `0` disables Google's "similar results" collapsing.
    pub filter: u8,
}

impl SearchParams {
    pub fn google(query: impl Into<String>) -> Self {
        Self {
            q: query.into(),
            engine: "google".to_string(),
            num: 10,
            start: 0,
            filter: 0,
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

/// The subset of a SerpAPI search response we consume.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,

    /// SerpAPI reports some failures (bad key, exhausted plan) as a 200 with this field set.
    #[serde(default)]
    pub error: Option<String>,
}

/// A single organic (non-ad) result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    pub position: Option<u32>,
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub link: Option<String>,
}
