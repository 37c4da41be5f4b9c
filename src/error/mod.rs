//! Error types for the subscriber count pipeline.
//!
//! All variants are non-fatal: the public accessor degrades to "no count
//! available" instead of surfacing these to the presentation layer.

use thiserror::Error;

/// Errors produced while resolving, fetching or parsing the subscriber count.
#[derive(Debug, Error)]
pub enum CountError {
    /// API key or list ID is missing, or the key carries no data-center
    /// suffix. Not retryable; requires reconfiguration.
    #[error("invalid MailChimp credentials: missing or malformed API key / list ID")]
    InvalidCredentials,

    /// Transport-level failure: timeout, DNS, connection refused, or a
    /// non-2xx status. Transient; retried on the next cache-expiry cycle.
    #[error("MailChimp request failed: {0}")]
    FetchFailed(#[source] reqwest::Error),

    /// The response body did not contain a numeric `stats.member_count`.
    #[error("malformed MailChimp response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl CountError {
    /// Whether a retry on a later cycle could succeed without
    /// reconfiguration.
    #[allow(dead_code)]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::FetchFailed(_))
    }
}
