//! MailChimp Subscriber Count
//!
//! Displays a cached subscriber count for one MailChimp mailing list.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration and the credentials provider
//! - `error` - Error taxonomy for the fetch pipeline
//! - `mailchimp` - Endpoint resolution and the blocking count fetcher
//! - `cache` - TTL'd single-slot count cache with Moka
//! - `counter` - Public accessor tying the pieces together
//! - `utils` - Display formatting

mod cache;
mod config;
mod counter;
mod error;
mod mailchimp;
mod utils;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::{CacheConfig, CountCache};
use config::{Config, Settings};
use counter::SubscriberCounter;
use mailchimp::MailchimpClient;

fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mailchimp_subscriber_count=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    info!("Configuration loaded");
    info!("Cache TTL: {:?}", config.cache_ttl);

    let cache = CountCache::new(CacheConfig::default().ttl(config.cache_ttl));
    let client = MailchimpClient::new()?;
    let counter = SubscriberCounter::new(Settings::new(config.credentials), cache, client);

    match counter.subscriber_count() {
        Some(count) => println!("{count}"),
        None => println!("subscriber count unavailable"),
    }

    Ok(())
}
