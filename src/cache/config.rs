//! Cache configuration.

use std::time::Duration;

use crate::config::DEFAULT_CACHE_TTL;

/// Configuration for the count cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Time-to-live for the cached count.
    /// After this duration the entry is automatically evicted and the
    /// next read triggers a fresh fetch.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl CacheConfig {
    /// Set time-to-live for the cached count (builder pattern).
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = duration;
        self
    }
}
