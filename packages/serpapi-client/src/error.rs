use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerpApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SerpAPI error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed SerpAPI response: {0}")]
    Malformed(String),

    #[error("SerpAPI request timed out")]
    Timeout,
}

impl SerpApiError {
    /// Map a transport error, keeping timeouts distinct.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, SerpApiError>;
