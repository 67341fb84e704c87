//! Error types for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: faults raised inside provider adapters and the service facade
//! - [`NoData`]: the only failure a provider adapter ever reports to the orchestrator

use thiserror::Error;

use crate::models::ProviderId;

/// Errors that can occur during market data operations.
///
/// Transport and decode variants never leave a provider adapter: the adapter
/// boundary folds them into [`NoData`]. Only the input variants
/// ([`InvalidTicker`](Self::InvalidTicker), [`UnknownWatchlist`](Self::UnknownWatchlist))
/// are surfaced to callers of the service facade.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The upstream has no quote for the symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-success status, upstream error body).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered with a payload we could not make sense of.
    #[error("Decode error: {provider} - {message}")]
    Decode {
        /// The provider whose payload failed to decode
        provider: String,
        /// What was wrong with the payload
        message: String,
    },

    /// The caller supplied an empty ticker.
    #[error("Ticker must not be empty")]
    InvalidTicker,

    /// The caller asked for a watchlist that does not exist.
    #[error("Unknown watchlist: {0}")]
    UnknownWatchlist(String),

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether this error stems from the caller's input rather than an upstream.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidTicker | Self::UnknownWatchlist(_))
    }
}

/// A provider produced no usable quote.
///
/// Carries the provider id and a short reason for diagnostics. The reason is
/// logged but never shown to API consumers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoData {
    /// Provider that came up empty
    pub provider: ProviderId,
    /// Why it came up empty
    pub reason: String,
}

impl NoData {
    pub fn new(provider: impl Into<ProviderId>, reason: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// The provider's deadline elapsed before it answered.
    pub fn timed_out(provider: impl Into<ProviderId>) -> Self {
        Self::new(provider, "deadline elapsed")
    }

    /// Fold an adapter-internal fault into a `NoData`.
    pub fn from_error(provider: impl Into<ProviderId>, error: &MarketDataError) -> Self {
        Self::new(provider, error.to_string())
    }
}

impl std::fmt::Display for NoData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: no data ({})", self.provider, self.reason)
    }
}
