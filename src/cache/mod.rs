//! Cache module - TTL'd subscriber-count cache using Moka.
//!
//! The system tracks exactly one configured list, so the cache is a single
//! slot under a fixed key. Expiry is handled by Moka's time-to-live; a
//! credential change clears the slot explicitly via [`CountCache::invalidate`].
//!
//! ## Usage
//!
//! ```rust
//! let cache = CountCache::new(CacheConfig::default());
//!
//! let count = cache.get_or_fetch(&credentials, |c| client.fetch_member_count(c))?;
//! ```

mod config;
mod count;

pub use config::CacheConfig;
pub use count::{CachedCount, CountCache};
