//! Quote provider trait definition.
//!
//! This module defines the `QuoteProvider` trait that every upstream
//! adapter implements.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::NoData;
use crate::models::NormalizedQuote;

/// Trait for quote providers.
///
/// Implement this trait to add support for a new upstream. The orchestrator
/// uses the provider's priority to order attempts and its timeout to bound
/// each attempt.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use triadex_market_data::provider::QuoteProvider;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl QuoteProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "my_provider"
///     }
///
///     fn timeout(&self) -> Duration {
///         Duration::from_secs(2)
///     }
///
///     async fn fetch(&self, symbol: &str) -> Result<NormalizedQuote, NoData> {
///         // ... call the upstream, normalize, fold faults into NoData
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Becomes `price.source` on quotes this provider produces and is what
    /// callers name in a provider preference.
    fn id(&self) -> &'static str;

    /// Provider priority for ordering.
    ///
    /// Lower values = higher priority. Default is 10.
    fn priority(&self) -> u8 {
        10
    }

    /// Deadline for a single `fetch`.
    fn timeout(&self) -> Duration;

    /// Fetch and normalize the latest quote for `symbol`.
    ///
    /// Transport faults, non-success statuses and malformed payloads must all
    /// come back as `Err(NoData)`; implementations never panic on upstream
    /// input. The returned quote carries the provider's own confidence.
    async fn fetch(&self, symbol: &str) -> Result<NormalizedQuote, NoData>;
}
