//! Quote provider abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait that all upstream adapters implement
//! - Shared HTTP helpers for the adapters
//! - The brapi, Yahoo Finance and Stooq adapters
//!
//! Adapters receive an already resolved symbol and return a normalized quote
//! or [`NoData`](crate::errors::NoData). Ordering, racing, fallback and
//! validation happen in the registry module, not in the providers themselves.

pub mod http;
mod traits;

pub mod brapi;
pub mod stooq;
pub mod yahoo;

use std::sync::Arc;

use log::{info, warn};

pub use brapi::BrapiProvider;
pub use stooq::StooqProvider;
pub use traits::QuoteProvider;
pub use yahoo::YahooProvider;

use crate::config::MarketDataConfig;

/// Build the provider set described by `config`, in priority order.
///
/// brapi is only registered when a token is configured. A Yahoo connector
/// that fails to initialize is skipped with a warning.
pub fn default_providers(config: &MarketDataConfig) -> Vec<Arc<dyn QuoteProvider>> {
    let mut providers: Vec<Arc<dyn QuoteProvider>> = Vec::with_capacity(3);

    match &config.brapi_token {
        Some(token) => providers.push(Arc::new(BrapiProvider::new(
            token.clone(),
            config.brapi_timeout,
        ))),
        None => info!("BRAPI_TOKEN not set, brapi provider disabled"),
    }

    match YahooProvider::new(config.yahoo_timeout) {
        Ok(provider) => providers.push(Arc::new(provider)),
        Err(e) => warn!("Yahoo provider unavailable: {}", e),
    }

    providers.push(Arc::new(StooqProvider::new(config.stooq_timeout)));

    providers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brapi_requires_token() {
        let providers = default_providers(&MarketDataConfig::default());
        assert!(providers.iter().all(|p| p.id() != "brapi"));
        assert_eq!(providers.last().map(|p| p.id()), Some("stooq"));
    }

    #[test]
    fn test_brapi_registered_first_with_token() {
        let config = MarketDataConfig {
            brapi_token: Some("token".to_string()),
            ..Default::default()
        };
        let providers = default_providers(&config);
        assert_eq!(providers[0].id(), "brapi");
        assert_eq!(providers[0].timeout(), config.brapi_timeout);
    }
}
