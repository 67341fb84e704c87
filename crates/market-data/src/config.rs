//! Runtime configuration for the quote core, read from the environment.

use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::provider::{brapi, stooq, yahoo};
use crate::registry::FetchStrategy;

/// Default cache entry lifetime.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);
/// Default cache capacity, in entries.
pub const DEFAULT_CACHE_CAPACITY: u64 = 4096;
/// Default number of simultaneous lookups in a batch.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct MarketDataConfig {
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
    /// brapi access token; brapi is not registered without one.
    pub brapi_token: Option<String>,
    pub brapi_timeout: Duration,
    pub yahoo_timeout: Duration,
    pub stooq_timeout: Duration,
    pub strategy: FetchStrategy,
    pub batch_concurrency: usize,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            brapi_token: None,
            brapi_timeout: brapi::DEFAULT_TIMEOUT,
            yahoo_timeout: yahoo::DEFAULT_TIMEOUT,
            stooq_timeout: stooq::DEFAULT_TIMEOUT,
            strategy: FetchStrategy::default(),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

impl MarketDataConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable            | Meaning                         | Default |
    /// |---------------------|---------------------------------|---------|
    /// | `CACHE_TTL`         | cache lifetime, seconds         | 30      |
    /// | `CACHE_CAPACITY`    | cache capacity, entries         | 4096    |
    /// | `BRAPI_TOKEN`       | brapi token, blank means absent | unset   |
    /// | `BRAPI_TIMEOUT`     | brapi timeout, seconds          | 2.0     |
    /// | `YF_TIMEOUT`        | Yahoo timeout, seconds          | 2.5     |
    /// | `STOOQ_TIMEOUT`     | Stooq timeout, seconds          | 2.0     |
    /// | `QUOTE_STRATEGY`    | `race` or `sequential`          | race    |
    /// | `BATCH_CONCURRENCY` | simultaneous batch lookups      | 5       |
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let brapi_token = lookup("BRAPI_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            cache_ttl: seconds(&lookup, "CACHE_TTL", defaults.cache_ttl),
            cache_capacity: parsed(&lookup, "CACHE_CAPACITY", defaults.cache_capacity),
            brapi_token,
            brapi_timeout: seconds(&lookup, "BRAPI_TIMEOUT", defaults.brapi_timeout),
            yahoo_timeout: seconds(&lookup, "YF_TIMEOUT", defaults.yahoo_timeout),
            stooq_timeout: seconds(&lookup, "STOOQ_TIMEOUT", defaults.stooq_timeout),
            strategy: parsed(&lookup, "QUOTE_STRATEGY", defaults.strategy),
            batch_concurrency: parsed(&lookup, "BATCH_CONCURRENCY", defaults.batch_concurrency)
                .max(1),
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => default,
        Some(raw) if raw.trim().is_empty() => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparseable {}={:?}, using default", key, raw);
            default
        }),
    }
}

fn seconds<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let secs: f64 = parsed(lookup, key, default.as_secs_f64());
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
        .unwrap_or_else(|| {
            warn!("Ignoring out-of-range {}={}, using default", key, secs);
            default
        })
}
