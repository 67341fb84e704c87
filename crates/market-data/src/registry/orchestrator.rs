//! Quote orchestrator.
//!
//! Turns a resolved symbol into exactly one validated quote:
//! - Cache lookup keyed by symbol and provider preference
//! - Provider ordering (preferred provider first, then priority)
//! - Race or sequential attempts, each under the provider's own deadline
//! - Synthesized terminal quote when every provider comes up empty
//! - Validation, then an unconditional cache write

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{QuoteCache, QuoteValidator};
use crate::errors::NoData;
use crate::models::{NormalizedQuote, ResolvedSymbol, AUTO_PREFERENCE};
use crate::provider::QuoteProvider;

/// How providers are attempted on a cache miss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStrategy {
    /// Query every provider concurrently; the first success in provider order wins.
    #[default]
    Race,
    /// Query providers one at a time, stopping at the first success.
    Sequential,
}

impl FetchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Race => "race",
            Self::Sequential => "sequential",
        }
    }
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FetchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "race" => Ok(Self::Race),
            "sequential" => Ok(Self::Sequential),
            other => Err(format!("unknown fetch strategy '{}'", other)),
        }
    }
}

/// Orchestrates the providers for single-symbol lookups.
pub struct QuoteOrchestrator {
    providers: Vec<Arc<dyn QuoteProvider>>,
    cache: QuoteCache,
    strategy: FetchStrategy,
    validator: QuoteValidator,
}

impl QuoteOrchestrator {
    pub fn new(
        providers: Vec<Arc<dyn QuoteProvider>>,
        cache: QuoteCache,
        strategy: FetchStrategy,
    ) -> Self {
        Self {
            providers,
            cache,
            strategy,
            validator: QuoteValidator::new(),
        }
    }

    /// Return the quote for `resolved`, from cache or from the providers.
    ///
    /// Never fails: when no provider produces data the result is the
    /// terminal "unavailable" quote, which is cached like any other.
    pub async fn get_quote(
        &self,
        resolved: &ResolvedSymbol,
        prefer: Option<&str>,
    ) -> NormalizedQuote {
        let prefer = normalize_preference(prefer);
        let key = QuoteCache::key(&resolved.symbol, prefer.as_deref());

        if let Some(quote) = self.cache.get(&key).await {
            debug!("Cache hit for {} ({})", key.0, key.1);
            return quote;
        }
        debug!("Cache miss for {} ({})", key.0, key.1);

        let providers = self.ordered_providers(prefer.as_deref());

        let fetched = match self.strategy {
            FetchStrategy::Race => self.race(&providers, &resolved.symbol).await,
            FetchStrategy::Sequential => self.sequential(&providers, &resolved.symbol).await,
        };

        let mut quote = fetched.unwrap_or_else(|| {
            warn!(
                "No provider returned data for {} ({} tried)",
                resolved.symbol,
                providers.len()
            );
            NormalizedQuote::unavailable()
        });

        self.validator.validate(&mut quote, resolved);

        info!(
            "Quote for {} from '{}' ({})",
            resolved.symbol,
            quote.source(),
            quote.status.confidence
        );

        self.cache.insert(key, quote.clone()).await;
        quote
    }

    async fn race(
        &self,
        providers: &[&Arc<dyn QuoteProvider>],
        symbol: &str,
    ) -> Option<NormalizedQuote> {
        let results = join_all(providers.iter().map(|p| attempt(p, symbol))).await;

        // join_all keeps input order, so the first success is the highest ranked one.
        results.into_iter().find_map(|result| match result {
            Ok(quote) => Some(quote),
            Err(no_data) => {
                debug!("{}", no_data);
                None
            }
        })
    }

    async fn sequential(
        &self,
        providers: &[&Arc<dyn QuoteProvider>],
        symbol: &str,
    ) -> Option<NormalizedQuote> {
        for provider in providers {
            match attempt(provider, symbol).await {
                Ok(quote) => return Some(quote),
                Err(no_data) => debug!("{}, trying next provider", no_data),
            }
        }
        None
    }

    /// Get providers ordered by preference.
    ///
    /// Orders providers by:
    /// 1. Preferred provider first (if set and registered)
    /// 2. Then by priority (lower is higher priority)
    fn ordered_providers(&self, prefer: Option<&str>) -> Vec<&Arc<dyn QuoteProvider>> {
        let mut providers: Vec<_> = self.providers.iter().collect();

        if let Some(preferred) = prefer {
            providers.sort_by_key(|p| {
                if p.id() == preferred {
                    0i32
                } else {
                    p.priority() as i32 + 1
                }
            });
        } else {
            providers.sort_by_key(|p| p.priority());
        }

        providers
    }

    /// Identifiers of the registered providers, in priority order.
    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.ordered_providers(None)
            .into_iter()
            .map(|p| p.id())
            .collect()
    }

    pub fn strategy(&self) -> FetchStrategy {
        self.strategy
    }
}

/// One provider attempt, bounded by the provider's own deadline.
async fn attempt(
    provider: &Arc<dyn QuoteProvider>,
    symbol: &str,
) -> Result<NormalizedQuote, NoData> {
    let quote = tokio::time::timeout(provider.timeout(), provider.fetch(symbol))
        .await
        .map_err(|_| NoData::timed_out(provider.id()))??;

    if quote.price.last.is_none() {
        return Err(NoData::new(provider.id(), "no price in response"));
    }

    Ok(quote)
}

/// Lowercase a provider preference; blank and "auto" mean no preference.
fn normalize_preference(prefer: Option<&str>) -> Option<String> {
    prefer
        .map(|p| p.trim().to_ascii_lowercase())
        .filter(|p| !p.is_empty() && p != AUTO_PREFERENCE)
}
