//! In-memory quote cache with TTL using moka

use std::time::Duration;

use moka::future::Cache;

use crate::models::{NormalizedQuote, AUTO_PREFERENCE};

/// Cache key: resolved symbol plus the provider preference ("auto" when none).
pub type CacheKey = (String, String);

/// Bounded TTL cache of validated quotes.
///
/// Entries are never invalidated explicitly; they expire after the TTL or are
/// evicted once the capacity is reached.
#[derive(Clone)]
pub struct QuoteCache {
    inner: Cache<CacheKey, NormalizedQuote>,
}

impl QuoteCache {
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(capacity)
                .build(),
        }
    }

    pub fn key(symbol: &str, prefer: Option<&str>) -> CacheKey {
        (
            symbol.to_string(),
            prefer.unwrap_or(AUTO_PREFERENCE).to_string(),
        )
    }

    pub async fn get(&self, key: &CacheKey) -> Option<NormalizedQuote> {
        self.inner.get(key).await
    }

    /// Store a quote, replacing any previous entry for the key.
    pub async fn insert(&self, key: CacheKey, quote: NormalizedQuote) {
        self.inner.insert(key, quote).await;
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Apply pending expirations and evictions now instead of lazily.
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;

    #[test]
    fn test_key_defaults_to_auto() {
        assert_eq!(
            QuoteCache::key("PETR4.SA", None),
            ("PETR4.SA".to_string(), "auto".to_string())
        );
        assert_ne!(
            QuoteCache::key("PETR4.SA", None),
            QuoteCache::key("PETR4.SA", Some("stooq"))
        );
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let cache = QuoteCache::new(Duration::from_secs(30), 16);
        let key = QuoteCache::key("VALE3.SA", None);

        cache
            .insert(key.clone(), NormalizedQuote::new("stooq", Confidence::Medium))
            .await;
        cache
            .insert(key.clone(), NormalizedQuote::new("yahoo", Confidence::High))
            .await;

        let cached = cache.get(&key).await.unwrap();
        assert_eq!(cached.source(), "yahoo");
        assert!(cache.get(&QuoteCache::key("VALE3.SA", Some("yahoo"))).await.is_none());
    }

    // moka keeps its own clock, so expiry needs real time to pass.
    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = QuoteCache::new(Duration::from_millis(100), 16);
        let key = QuoteCache::key("PETR4.SA", None);

        cache
            .insert(key.clone(), NormalizedQuote::new("brapi", Confidence::High))
            .await;
        assert!(cache.get(&key).await.is_some());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_capacity_bounds_entries() {
        let cache = QuoteCache::new(Duration::from_secs(30), 2);

        for symbol in ["PETR4.SA", "VALE3.SA", "ITUB4.SA", "AAPL", "MSFT"] {
            cache
                .insert(
                    QuoteCache::key(symbol, None),
                    NormalizedQuote::new("yahoo", Confidence::High),
                )
                .await;
        }
        cache.run_pending_tasks().await;

        assert!(cache.entry_count() <= 2);
    }
}
