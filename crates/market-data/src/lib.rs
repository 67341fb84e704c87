//! Triadex Market Data Crate
//!
//! This crate turns free-text tickers into normalized, validated quotes for
//! B3 and US listings, backed by several upstream providers.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Deterministic symbol resolution (B3 equity/fund codes, index aliases)
//! - Multiple providers: brapi.dev, Yahoo Finance, Stooq
//! - Race or sequential fetching with per-provider deadlines and fallback
//! - Quote validation and a TTL cache
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Raw ticker     | --> |    Resolver      |  (pure rules + exception table)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  ResolvedSymbol  |  (symbol, exchange, name)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  Orchestrator    |  (cache, ordering, race/fallback)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Providers     |  (brapi, Yahoo, Stooq)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | NormalizedQuote  |  (validated, cached)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ResolvedSymbol`] - Canonical symbol produced by the resolver
//! - [`NormalizedQuote`] - The common quote shape every provider produces
//! - [`QuoteProvider`] - Trait implemented by each upstream adapter
//! - [`QuoteOrchestrator`] - Cache plus provider fallback for one symbol
//! - [`QuoteService`] - Facade for single, batch and watchlist lookups

pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod watchlists;

pub use config::MarketDataConfig;
pub use errors::{MarketDataError, NoData};

// Re-export all public types from models
pub use models::{
    Confidence, Currency, Exchange, NormalizedQuote, ProviderId, QuoteStatus, ResolvedSymbol,
};

pub use resolver::{resolve, ResolutionRule, RulesResolver};

pub use provider::{BrapiProvider, QuoteProvider, StooqProvider, YahooProvider};

pub use registry::{FetchStrategy, QuoteCache, QuoteOrchestrator, QuoteValidator};

pub use service::{BatchItem, QuoteResponse, QuoteService, WatchlistQuotes};
pub use watchlists::Watchlist;
