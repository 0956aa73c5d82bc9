//! Typed errors for the lead discovery library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Only
//! `DiscoveryError` ever reaches a caller; `ProviderError` is contained
//! to the task that produced it.

use thiserror::Error;

/// Errors that fail a whole discovery or allocation call.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The search provider has no credential. Checked before any task starts.
    #[error("search provider '{provider}' is not configured")]
    NotConfigured { provider: &'static str },

    /// Topic was empty after trimming
    #[error("invalid topic: {reason}")]
    InvalidTopic { reason: String },

    /// Daily allocation budget already spent
    #[error("daily lead limit reached ({limit})")]
    DailyLimitReached { limit: usize },
}

impl DiscoveryError {
    /// True when the caller should show setup instructions rather than a transient error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }
}

/// Failure of a single provider call. Recovered locally as "zero results".
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider answered with a non-success status or an error body
    #[error("provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Per-call deadline elapsed
    #[error("provider call timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// Body could not be decoded
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// Anything else a provider implementation wants to report
    #[error("provider error: {0}")]
    Other(String),
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Result type alias for provider calls.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
