//! Configuration module.
//!
//! Loads configuration from environment variables. Unlike most settings,
//! absent MailChimp credentials are a legal state: the accessor simply
//! reports no count until they are configured.

use std::env;
use std::time::Duration;

use parking_lot::RwLock;

/// Default cache lifetime for a fetched count: 3 days.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 3);

/// The API key / list ID pair addressing one mailing list.
///
/// Opaque and externally supplied; either field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub list_id: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, list_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            list_id: list_id.into(),
        }
    }

    /// Both fields are present. Says nothing about whether the key is
    /// well-formed; that is the endpoint resolver's job.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.list_id.is_empty()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,

    /// How long a fetched count stays valid.
    /// Override with CACHE_TTL_SECS.
    pub cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing credential variables yield empty strings rather than an
    /// error, so an unconfigured deployment still starts.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let credentials = Credentials::new(
            env::var("MAILCHIMP_API_KEY").unwrap_or_default(),
            env::var("MAILCHIMP_LIST_ID").unwrap_or_default(),
        );

        let cache_ttl = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CACHE_TTL);

        Self {
            credentials,
            cache_ttl,
        }
    }
}

/// The config provider: owns the current credentials and hands out
/// snapshots to readers.
///
/// Updates go through [`crate::counter::SubscriberCounter::update_credentials`],
/// which invalidates the count cache whenever the pair changes.
#[derive(Debug)]
pub struct Settings {
    credentials: RwLock<Credentials>,
}

impl Settings {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }

    /// Snapshot of the current credentials.
    pub fn credentials(&self) -> Credentials {
        self.credentials.read().clone()
    }

    /// Replace the stored credentials.
    ///
    /// Returns `true` if the pair actually changed, so the caller knows
    /// whether to invalidate dependent caches.
    pub fn replace(&self, new: Credentials) -> bool {
        let mut current = self.credentials.write();
        if *current == new {
            return false;
        }
        *current = new;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_credentials_are_not_configured() {
        assert!(!Credentials::default().is_configured());
        assert!(!Credentials::new("abc-us6", "").is_configured());
        assert!(!Credentials::new("", "L1").is_configured());
    }

    #[test]
    fn test_full_credentials_are_configured() {
        assert!(Credentials::new("abc-us6", "L1").is_configured());
    }

    #[test]
    fn test_settings_replace_detects_change() {
        let settings = Settings::new(Credentials::new("abc-us6", "L1"));

        assert!(!settings.replace(Credentials::new("abc-us6", "L1")));
        assert!(settings.replace(Credentials::new("other-us2", "L1")));
        assert_eq!(settings.credentials().api_key, "other-us2");
    }
}
