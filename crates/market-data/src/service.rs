//! Quote service facade.
//!
//! Entry point used by the HTTP layer: resolves raw tickers, delegates to the
//! orchestrator and shapes responses for single, batch and watchlist lookups.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::MarketDataConfig;
use crate::errors::MarketDataError;
use crate::models::{NormalizedQuote, ResolvedSymbol};
use crate::provider::{default_providers, QuoteProvider};
use crate::registry::{QuoteCache, QuoteOrchestrator};
use crate::resolver::RulesResolver;
use crate::watchlists;

/// Quote for one ticker, echoing the input and its resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub ticker_in: String,
    pub resolved: ResolvedSymbol,
    #[serde(flatten)]
    pub quote: NormalizedQuote,
}

/// One slot of a batch response: a quote, or an error marker in its place.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchItem {
    pub ticker_in: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedSymbol>,
    #[serde(flatten)]
    pub quote: Option<NormalizedQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItem {
    fn failed(ticker_in: impl Into<String>, error: &MarketDataError) -> Self {
        Self {
            ticker_in: ticker_in.into(),
            resolved: None,
            quote: None,
            error: Some(error.to_string()),
        }
    }
}

impl From<QuoteResponse> for BatchItem {
    fn from(response: QuoteResponse) -> Self {
        Self {
            ticker_in: response.ticker_in,
            resolved: Some(response.resolved),
            quote: Some(response.quote),
            error: None,
        }
    }
}

/// Batch result for a named watchlist.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WatchlistQuotes {
    pub id: &'static str,
    pub label: &'static str,
    pub items: Vec<BatchItem>,
}

pub struct QuoteService {
    resolver: RulesResolver,
    orchestrator: QuoteOrchestrator,
    batch_concurrency: usize,
}

impl QuoteService {
    pub fn new(orchestrator: QuoteOrchestrator, batch_concurrency: usize) -> Self {
        Self {
            resolver: RulesResolver::new(),
            orchestrator,
            batch_concurrency: batch_concurrency.max(1),
        }
    }

    /// Wire the service from configuration with the built-in providers.
    pub fn from_config(config: &MarketDataConfig) -> Self {
        Self::with_providers(config, default_providers(config))
    }

    /// Wire the service from configuration with an explicit provider set.
    pub fn with_providers(
        config: &MarketDataConfig,
        providers: Vec<Arc<dyn QuoteProvider>>,
    ) -> Self {
        let cache = QuoteCache::new(config.cache_ttl, config.cache_capacity);
        let orchestrator = QuoteOrchestrator::new(providers, cache, config.strategy);
        Self::new(orchestrator, config.batch_concurrency)
    }

    /// Resolve and quote a single ticker.
    ///
    /// A blank ticker is the only error; provider failures surface as a
    /// `none`-confidence quote instead.
    pub async fn quote(
        &self,
        ticker: &str,
        prefer: Option<&str>,
    ) -> Result<QuoteResponse, MarketDataError> {
        if ticker.trim().is_empty() {
            return Err(MarketDataError::InvalidTicker);
        }

        let (ticker_in, resolved) = self.resolver.resolve(ticker);
        debug!("Resolved '{}' to {} ({})", ticker_in, resolved.symbol, resolved.exchange);

        let quote = self.orchestrator.get_quote(&resolved, prefer).await;

        Ok(QuoteResponse {
            ticker_in,
            resolved,
            quote,
        })
    }

    /// Quote many tickers with bounded concurrency, preserving input order.
    pub async fn quote_batch<S>(&self, tickers: &[S], prefer: Option<&str>) -> Vec<BatchItem>
    where
        S: AsRef<str>,
    {
        // Owned tickers keep the returned future `Send` for any `S`.
        let tickers: Vec<String> = tickers.iter().map(|t| t.as_ref().to_string()).collect();

        stream::iter(tickers)
            .map(|ticker| async move {
                match self.quote(&ticker, prefer).await {
                    Ok(response) => BatchItem::from(response),
                    Err(e) => BatchItem::failed(&ticker, &e),
                }
            })
            .buffered(self.batch_concurrency)
            .collect()
            .await
    }

    /// Quote every symbol of a built-in watchlist.
    pub async fn quote_watchlist(
        &self,
        id: &str,
        prefer: Option<&str>,
    ) -> Result<WatchlistQuotes, MarketDataError> {
        let watchlist = watchlists::get(id)?;
        let items = self.quote_batch(watchlist.symbols, prefer).await;

        Ok(WatchlistQuotes {
            id: watchlist.id,
            label: watchlist.label,
            items,
        })
    }

    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.orchestrator.provider_ids()
    }
}
