//! The public subscriber-count accessor.
//!
//! Wires the config provider, cache and fetcher together behind one
//! query operation. Errors never escape to the presentation layer: a
//! failed or unconfigured read degrades to `None` and is logged.
//!
//! ## Usage
//!
//! ```rust
//! let counter = SubscriberCounter::new(settings, cache, client);
//!
//! match counter.subscriber_count() {
//!     Some(count) => println!("{count} subscribers"),
//!     None => println!("count unavailable"),
//! }
//! ```

use tracing::{debug, warn};

use crate::cache::CountCache;
use crate::config::{Credentials, Settings};
use crate::mailchimp::MailchimpClient;
use crate::utils::format_count;

/// Cached, formatted subscriber count for the configured list.
#[derive(Debug)]
pub struct SubscriberCounter {
    settings: Settings,
    cache: CountCache,
    client: MailchimpClient,
}

impl SubscriberCounter {
    pub fn new(settings: Settings, cache: CountCache, client: MailchimpClient) -> Self {
        Self {
            settings,
            cache,
            client,
        }
    }

    /// The formatted subscriber count, or `None` when credentials are
    /// unset or the count cannot currently be determined.
    ///
    /// Served from cache within the TTL window; otherwise one blocking
    /// HTTP fetch runs before returning.
    pub fn subscriber_count(&self) -> Option<String> {
        let credentials = self.settings.credentials();

        if !credentials.is_configured() {
            debug!("MailChimp credentials not configured, skipping fetch");
            return None;
        }

        match self
            .cache
            .get_or_fetch(&credentials, |c| self.client.fetch_member_count(c))
        {
            Ok(count) => Some(format_count(count)),
            Err(err) => {
                warn!(error = %err, "subscriber count unavailable");
                None
            }
        }
    }

    /// Store new credentials, invalidating the cached count if the pair
    /// actually changed.
    ///
    /// This is the change-notification path the settings surface must
    /// call; it guarantees the next read reflects the new configuration
    /// rather than a count fetched with the old one.
    pub fn update_credentials(&self, credentials: Credentials) {
        if self.settings.replace(credentials) {
            self.cache.invalidate();
        }
    }
}
