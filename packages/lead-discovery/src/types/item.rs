//! Provider-neutral search result item.

/// One raw entry from a search provider's response.
///
/// Every field is optional because providers omit fields freely; the
/// extractor treats a missing link or title as a non-match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultItem {
    /// Display title of the result.
    pub title: Option<String>,

    /// Snippet/description text.
    pub snippet: Option<String>,

    /// Result URL.
    pub link: Option<String>,
}

impl SearchResultItem {
    /// Create an item with only a link.
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            ..Default::default()
        }
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

impl From<serpapi_client::OrganicResult> for SearchResultItem {
    fn from(r: serpapi_client::OrganicResult) -> Self {
        Self {
            title: r.title,
            snippet: r.snippet,
            link: r.link,
        }
    }
}
