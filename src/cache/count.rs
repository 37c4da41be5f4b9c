//! The single-slot count cache.

use chrono::{DateTime, Utc};
use moka::sync::Cache;
use tracing::debug;

use super::CacheConfig;
use crate::config::Credentials;
use crate::error::CountError;

/// Fixed key of the one cache slot. The system addresses exactly one list,
/// so there is never more than one entry.
const CACHE_KEY: &str = "mailchimp_subscriber_count";

/// A successfully fetched subscriber count.
#[derive(Debug, Clone)]
pub struct CachedCount {
    pub value: u64,
    pub fetched_at: DateTime<Utc>,
}

/// TTL'd cache in front of the remote count fetch.
///
/// Thread-safe and cheap to clone (shares the underlying Moka cache).
/// Last writer wins on the slot; concurrent duplicate fetches on a miss
/// are acceptable and cannot corrupt state.
#[derive(Clone)]
pub struct CountCache {
    inner: Cache<&'static str, CachedCount>,
}

impl CountCache {
    /// Create a new count cache with the given config.
    pub fn new(config: CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.ttl)
            .build();

        Self { inner }
    }

    /// Return the cached count, fetching it on a miss.
    ///
    /// A valid (non-expired) entry is returned without invoking `fetch`.
    /// On a miss, `fetch` runs and a successful result is stored
    /// unconditionally with the current timestamp; a failed fetch stores
    /// nothing and the error is propagated to the caller.
    pub fn get_or_fetch<F>(&self, credentials: &Credentials, fetch: F) -> Result<u64, CountError>
    where
        F: FnOnce(&Credentials) -> Result<u64, CountError>,
    {
        if let Some(cached) = self.inner.get(&CACHE_KEY) {
            debug!(
                value = cached.value,
                fetched_at = %cached.fetched_at,
                "subscriber count served from cache"
            );
            return Ok(cached.value);
        }

        let value = fetch(credentials)?;

        self.inner.insert(
            CACHE_KEY,
            CachedCount {
                value,
                fetched_at: Utc::now(),
            },
        );
        debug!(value, "subscriber count fetched and cached");

        Ok(value)
    }

    /// Peek at the cached entry without triggering a fetch.
    #[allow(dead_code)]
    pub fn peek(&self) -> Option<CachedCount> {
        self.inner.get(&CACHE_KEY)
    }

    /// Clear the cached count unconditionally.
    ///
    /// The config provider's update path calls this whenever credentials
    /// change, so the next read reflects the new configuration instead of
    /// a count fetched with the old one.
    pub fn invalidate(&self) {
        self.inner.invalidate(&CACHE_KEY);
        // Moka applies invalidations lazily; flush so a read that follows
        // immediately sees the slot empty.
        self.inner.run_pending_tasks();
        debug!("subscriber count cache invalidated");
    }
}

impl std::fmt::Debug for CountCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountCache")
            .field("entry", &self.inner.get(&CACHE_KEY))
            .finish()
    }
}
