//! MailChimp API access.
//!
//! This is deliberately not a general API client: the one endpoint we
//! touch is a list's statistics resource, and the one field we read is
//! `stats.member_count`.
//!
//! ## Usage
//!
//! ```rust
//! let client = MailchimpClient::new()?;
//! let count = client.fetch_member_count(&credentials)?;
//! ```

mod endpoint;

pub use endpoint::endpoint_url;

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::Credentials;
use crate::error::CountError;

/// Fixed Basic-auth username; MailChimp only inspects the password slot.
const BASIC_AUTH_USER: &str = "x";

/// Bounded request timeout so a slow API never stalls the caller.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Transient parsed payload; never persisted beyond the fetch call.
#[derive(Debug, Deserialize)]
struct ListResponse {
    stats: ListStats,
}

#[derive(Debug, Deserialize)]
struct ListStats {
    member_count: u64,
}

/// Blocking HTTP client for the list statistics endpoint.
///
/// Performs no retries; the TTL cache in front of it naturally limits
/// attempts to one per expiry window.
#[derive(Debug, Clone)]
pub struct MailchimpClient {
    http: reqwest::blocking::Client,
    endpoint_override: Option<Url>,
}

impl MailchimpClient {
    /// Create a client resolving endpoints from the API key's data-center
    /// suffix.
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Self::build_http()?,
            endpoint_override: None,
        })
    }

    /// Create a client pinned to a fixed endpoint instead of resolving
    /// one from the credentials. Used against alternate hosts and local
    /// test servers.
    pub fn with_endpoint(endpoint: Url) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Self::build_http()?,
            endpoint_override: Some(endpoint),
        })
    }

    fn build_http() -> Result<reqwest::blocking::Client, reqwest::Error> {
        reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
    }

    /// Fetch the list's current subscriber count.
    ///
    /// Maps transport failures and non-2xx statuses to
    /// [`CountError::FetchFailed`] and unexpected payload shapes to
    /// [`CountError::MalformedResponse`]; both are non-fatal to callers.
    pub fn fetch_member_count(&self, credentials: &Credentials) -> Result<u64, CountError> {
        let url = match &self.endpoint_override {
            Some(endpoint) => endpoint.clone(),
            None => endpoint_url(credentials)?,
        };

        debug!(%url, "requesting list statistics");

        let response = self
            .http
            .get(url)
            .basic_auth(BASIC_AUTH_USER, Some(&credentials.api_key))
            .send()
            .map_err(CountError::FetchFailed)?
            .error_for_status()
            .map_err(CountError::FetchFailed)?;

        let body = response.text().map_err(CountError::FetchFailed)?;

        parse_member_count(&body)
    }
}

/// Extract `stats.member_count` from a list statistics payload.
fn parse_member_count(body: &str) -> Result<u64, CountError> {
    serde_json::from_str::<ListResponse>(body)
        .map(|response| response.stats.member_count)
        .map_err(CountError::MalformedResponse)
}

#[cfg(test)]
mod tests {
    use mockito::Server;

    use super::*;

    fn creds() -> Credentials {
        Credentials::new("abc123-us6", "L1")
    }

    fn client_for(server: &Server) -> MailchimpClient {
        let endpoint = Url::parse(&format!("{}/3.0/lists/L1", server.url())).unwrap();
        MailchimpClient::with_endpoint(endpoint).unwrap()
    }

    #[test]
    fn test_parse_member_count() {
        let body = r#"{"stats":{"member_count":4821}}"#;
        assert_eq!(parse_member_count(body).unwrap(), 4821);
    }

    #[test]
    fn test_parse_ignores_unrelated_fields() {
        let body = r#"{"id":"L1","name":"Newsletter","stats":{"member_count":12,"open_rate":0.4}}"#;
        assert_eq!(parse_member_count(body).unwrap(), 12);
    }

    #[test]
    fn test_missing_member_count_is_malformed() {
        let body = r#"{"stats":{"unsubscribe_count":3}}"#;
        let err = parse_member_count(body).unwrap_err();
        assert!(matches!(err, CountError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_numeric_member_count_is_malformed() {
        let body = r#"{"stats":{"member_count":"lots"}}"#;
        let err = parse_member_count(body).unwrap_err();
        assert!(matches!(err, CountError::MalformedResponse(_)));
    }

    #[test]
    fn test_fetch_sends_basic_auth_and_parses_count() {
        let mut server = Server::new();
        // base64("x:abc123-us6")
        let mock = server
            .mock("GET", "/3.0/lists/L1")
            .match_header("authorization", "Basic eDphYmMxMjMtdXM2")
            .with_status(200)
            .with_body(r#"{"stats":{"member_count":4821}}"#)
            .create();

        let count = client_for(&server).fetch_member_count(&creds()).unwrap();

        assert_eq!(count, 4821);
        mock.assert();
    }

    #[test]
    fn test_non_2xx_status_is_fetch_failed() {
        let mut server = Server::new();
        server
            .mock("GET", "/3.0/lists/L1")
            .with_status(401)
            .with_body(r#"{"title":"API Key Invalid"}"#)
            .create();

        let err = client_for(&server).fetch_member_count(&creds()).unwrap_err();
        assert!(matches!(err, CountError::FetchFailed(_)));
    }

    #[test]
    fn test_unresolvable_credentials_short_circuit() {
        let client = MailchimpClient::new().unwrap();
        let err = client
            .fetch_member_count(&Credentials::new("keywithoutsuffix", "L1"))
            .unwrap_err();
        assert!(matches!(err, CountError::InvalidCredentials));
    }
}
