//! Yahoo Finance quote provider.
//!
//! Always available; no credential needed. The chart API has no cheap
//! "latest price" call that survives rate limiting, so the last price is
//! extracted from progressively coarser bar series:
//!
//! 1. 1-minute bars over the last day
//! 2. 5-minute bars over the last five days
//! 3. daily bars over the last two days
//!
//! The daily series also supplies the previous close used for the daily change.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::{MarketDataError, NoData};
use crate::models::{change_pct, Confidence, NormalizedQuote, NOTE_CHANGE_UNAVAILABLE, YAHOO};
use crate::provider::QuoteProvider;

/// Default timeout for a whole fetch, all extraction strategies included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2500);

/// Intraday (interval, range) pairs, cheapest first.
const INTRADAY_STRATEGIES: &[(&str, &str)] = &[("1m", "1d"), ("5m", "5d")];

const DAILY_INTERVAL: &str = "1d";
const DAILY_RANGE: &str = "2d";

/// One bar reduced to what quote normalization needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub close: f64,
    pub volume: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Everything the Yahoo adapter managed to extract for one symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct YahooSnapshot {
    pub last: Option<f64>,
    pub prev_close: Option<f64>,
    pub volume: Option<f64>,
    pub asof: Option<DateTime<Utc>>,
}

/// Yahoo Finance provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    timeout: Duration,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new(timeout: Duration) -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: YAHOO.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector, timeout })
    }

    /// Fetch one bar series, keeping only bars with a usable close.
    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let response = self
            .connector
            .get_quote_range(symbol, interval, range)
            .await
            .map_err(|e| map_yahoo_error(symbol, e))?;

        let quotes = response
            .quotes()
            .map_err(|e| map_yahoo_error(symbol, e))?;

        Ok(quotes
            .into_iter()
            .filter(|q| q.close.is_finite())
            .map(|q| Bar {
                close: q.close,
                volume: Some(q.volume as f64).filter(|v| *v > 0.0),
                timestamp: Utc.timestamp_opt(q.timestamp as i64, 0).single(),
            })
            .collect())
    }

    /// Last bar from the first intraday strategy that yields one.
    async fn intraday_last(&self, symbol: &str) -> Option<Bar> {
        for (interval, range) in INTRADAY_STRATEGIES {
            match self.fetch_bars(symbol, interval, range).await {
                Ok(bars) => {
                    if let Some(bar) = bars.last() {
                        return Some(*bar);
                    }
                    debug!("Yahoo {}/{} returned no bars for {}", interval, range, symbol);
                }
                Err(e) => {
                    debug!("Yahoo {}/{} failed for {}: {}", interval, range, symbol, e);
                }
            }
        }
        None
    }

    async fn snapshot(&self, symbol: &str) -> Result<YahooSnapshot, MarketDataError> {
        let (intraday, daily) = tokio::join!(
            self.intraday_last(symbol),
            self.fetch_bars(symbol, DAILY_INTERVAL, DAILY_RANGE)
        );

        let daily = daily.unwrap_or_else(|e| {
            debug!("Yahoo daily series failed for {}: {}", symbol, e);
            Vec::new()
        });

        let snapshot = snapshot_from_bars(intraday, &daily);
        if snapshot.last.is_none() {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        Ok(snapshot)
    }
}

fn map_yahoo_error(symbol: &str, error: yahoo::YahooError) -> MarketDataError {
    if matches!(error, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
        MarketDataError::SymbolNotFound(symbol.to_string())
    } else {
        MarketDataError::ProviderError {
            provider: YAHOO.to_string(),
            message: error.to_string(),
        }
    }
}

/// Combine the intraday bar (if any) with the daily series.
pub fn snapshot_from_bars(intraday: Option<Bar>, daily: &[Bar]) -> YahooSnapshot {
    let latest_daily = daily.last();
    let last_bar = intraday.or_else(|| latest_daily.copied());

    let prev_close = if daily.len() >= 2 {
        Some(daily[daily.len() - 2].close)
    } else {
        None
    };

    YahooSnapshot {
        last: last_bar.map(|b| b.close),
        prev_close,
        // Session volume lives on the daily bar, not on the last minute.
        volume: latest_daily.and_then(|b| b.volume),
        asof: last_bar.and_then(|b| b.timestamp),
    }
}

/// Normalize an extracted snapshot.
///
/// Confidence is `high` when nothing had to be caveated, `medium` otherwise.
pub fn snapshot_to_quote(snapshot: YahooSnapshot) -> NormalizedQuote {
    let mut quote = NormalizedQuote::new(YAHOO, Confidence::Medium);

    quote.price.last = snapshot.last;
    quote.price.change_pct = change_pct(snapshot.last, snapshot.prev_close);
    quote.price.asof = Some(snapshot.asof.unwrap_or_else(Utc::now));
    quote.volume.value = snapshot.volume;

    if quote.price.change_pct.is_none() {
        quote.status.note(NOTE_CHANGE_UNAVAILABLE);
    }

    if quote.status.notes.is_empty() {
        quote.status.confidence = Confidence::High;
    }

    quote
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        YAHOO
    }

    fn priority(&self) -> u8 {
        1
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, symbol: &str) -> Result<NormalizedQuote, NoData> {
        // The connector has no per-request deadline of its own.
        match tokio::time::timeout(self.timeout, self.snapshot(symbol)).await {
            Ok(Ok(snapshot)) => Ok(snapshot_to_quote(snapshot)),
            Ok(Err(e)) => {
                warn!("Yahoo failed for {}: {}", symbol, e);
                Err(NoData::from_error(YAHOO, &e))
            }
            Err(_) => {
                warn!("Yahoo timed out for {}", symbol);
                Err(NoData::timed_out(YAHOO))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(close: f64, volume: Option<f64>, ts: i64) -> Bar {
        Bar {
            close,
            volume,
            timestamp: Utc.timestamp_opt(ts, 0).single(),
        }
    }

    #[test]
    fn test_snapshot_prefers_intraday_price() {
        let intraday = Some(bar(101.5, Some(300.0), 1_705_349_000));
        let daily = [
            bar(95.0, Some(9_000.0), 1_705_190_400),
            bar(100.0, Some(12_000.0), 1_705_276_800),
        ];

        let snapshot = snapshot_from_bars(intraday, &daily);
        assert_eq!(snapshot.last, Some(101.5));
        assert_eq!(snapshot.prev_close, Some(95.0));
        assert_eq!(snapshot.volume, Some(12_000.0));
        assert_eq!(snapshot.asof.unwrap().timestamp(), 1_705_349_000);
    }

    #[test]
    fn test_snapshot_falls_back_to_daily_close() {
        let daily = [
            bar(95.0, None, 1_705_190_400),
            bar(100.0, None, 1_705_276_800),
        ];

        let snapshot = snapshot_from_bars(None, &daily);
        assert_eq!(snapshot.last, Some(100.0));
        assert_eq!(snapshot.prev_close, Some(95.0));
        assert_eq!(snapshot.asof.unwrap().timestamp(), 1_705_276_800);
    }

    #[test]
    fn test_snapshot_single_daily_bar_has_no_previous_close() {
        let snapshot = snapshot_from_bars(None, &[bar(100.0, None, 1_705_276_800)]);
        assert_eq!(snapshot.last, Some(100.0));
        assert_eq!(snapshot.prev_close, None);
    }

    #[test]
    fn test_snapshot_without_any_bar_is_empty() {
        assert_eq!(snapshot_from_bars(None, &[]), YahooSnapshot::default());
    }

    #[test]
    fn test_quote_with_derivable_change_is_high_confidence() {
        let quote = snapshot_to_quote(YahooSnapshot {
            last: Some(100.0),
            prev_close: Some(95.0),
            ..Default::default()
        });

        assert_eq!(quote.source(), "yahoo");
        assert_eq!(quote.price.last, Some(100.0));
        assert!((quote.price.change_pct.unwrap() - 5.263).abs() < 1e-3);
        assert_eq!(quote.status.confidence, Confidence::High);
        assert!(quote.status.notes.is_empty());
        assert!(quote.price.currency.is_none());
        assert!(quote.price.asof.is_some());
    }

    #[test]
    fn test_quote_without_change_is_medium_with_note() {
        let quote = snapshot_to_quote(YahooSnapshot {
            last: Some(100.0),
            ..Default::default()
        });

        assert!(quote.price.change_pct.is_none());
        assert_eq!(quote.status.confidence, Confidence::Medium);
        assert!(quote.status.has_note(NOTE_CHANGE_UNAVAILABLE));
    }
}
