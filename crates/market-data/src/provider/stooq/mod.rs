//! Stooq quote provider.
//!
//! Serves the daily history CSV (`Date,Open,High,Low,Close,Volume`). Only the
//! last session close is available, so every quote carries a stale-price note.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::{MarketDataError, NoData};
use crate::models::{
    change_pct, Confidence, NormalizedQuote, NOTE_CHANGE_UNAVAILABLE, NOTE_LAST_CLOSE, STOOQ,
};
use crate::provider::http::{build_client, check_status, csv_headers, transport_error};
use crate::provider::QuoteProvider;

const BASE_URL: &str = "https://stooq.com/q/d/l/";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// One parsed CSV row.
#[derive(Clone, Debug, PartialEq)]
pub struct StooqRow {
    pub date: Option<NaiveDate>,
    pub close: f64,
    pub volume: Option<f64>,
}

/// Stooq provider.
pub struct StooqProvider {
    client: Client,
    timeout: Duration,
    base_url: String,
}

impl StooqProvider {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(csv_headers(), timeout),
            timeout,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Stooq symbols are lowercase; bare US tickers need the ".us" market suffix.
    fn request_symbol(symbol: &str) -> String {
        let lower = symbol.to_lowercase();
        if lower.contains('.') || lower.starts_with('^') {
            lower
        } else {
            format!("{}.us", lower)
        }
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<NormalizedQuote, MarketDataError> {
        let request_symbol = Self::request_symbol(symbol);
        debug!("Stooq request: {} as {}", symbol, request_symbol);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("s", request_symbol.as_str()), ("i", "d")])
            .send()
            .await
            .map_err(|e| transport_error(STOOQ, e))?;

        let body = check_status(STOOQ, response)?
            .text()
            .await
            .map_err(|e| transport_error(STOOQ, e))?;

        let rows = parse_csv(symbol, &body)?;
        rows_to_quote(symbol, &rows)
    }
}

/// Parse the daily history CSV, skipping rows without a readable close.
pub fn parse_csv(symbol: &str, body: &str) -> Result<Vec<StooqRow>, MarketDataError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.to_lowercase().starts_with("no data") {
        return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(trimmed.as_bytes());

    let headers = reader.headers().map_err(|e| MarketDataError::Decode {
        provider: STOOQ.to_string(),
        message: format!("Unreadable CSV header: {}", e),
    })?;

    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let close_idx = column("Close").ok_or_else(|| MarketDataError::Decode {
        provider: STOOQ.to_string(),
        message: "CSV has no Close column".to_string(),
    })?;
    let date_idx = column("Date");
    let volume_idx = column("Volume");

    let rows: Vec<StooqRow> = reader
        .records()
        .filter_map(Result::ok)
        .filter_map(|record| {
            let close = record
                .get(close_idx)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite())?;
            let date = date_idx
                .and_then(|i| record.get(i))
                .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok());
            let volume = volume_idx
                .and_then(|i| record.get(i))
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite());
            Some(StooqRow {
                date,
                close,
                volume,
            })
        })
        .collect();

    if rows.is_empty() {
        return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
    }

    Ok(rows)
}

/// Normalize parsed rows into a quote built from the latest session.
pub fn rows_to_quote(symbol: &str, rows: &[StooqRow]) -> Result<NormalizedQuote, MarketDataError> {
    let last = rows
        .last()
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;
    let prev_close = rows.len().checked_sub(2).map(|i| rows[i].close);

    let mut quote = NormalizedQuote::new(STOOQ, Confidence::Medium);
    quote.price.last = Some(last.close);
    quote.price.change_pct = change_pct(Some(last.close), prev_close);
    quote.price.asof = Some(
        last.date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now),
    );
    quote.volume.value = last.volume;

    quote.status.note(NOTE_LAST_CLOSE);
    if quote.price.change_pct.is_none() {
        quote.status.note(NOTE_CHANGE_UNAVAILABLE);
    }

    Ok(quote)
}

#[async_trait]
impl QuoteProvider for StooqProvider {
    fn id(&self) -> &'static str {
        STOOQ
    }

    fn priority(&self) -> u8 {
        2
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, symbol: &str) -> Result<NormalizedQuote, NoData> {
        self.fetch_quote(symbol).await.map_err(|e| {
            warn!("Stooq failed for {}: {}", symbol, e);
            NoData::from_error(STOOQ, &e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Date,Open,High,Low,Close,Volume\n\
        2024-01-11,36.1,36.9,35.8,36.50,31000000\n\
        2024-01-12,36.5,37.4,36.2,37.00,\n\
        2024-01-15,37.0,38.3,36.9,38.12,41000000\n";

    #[test]
    fn test_request_symbol() {
        assert_eq!(StooqProvider::request_symbol("PETR4.SA"), "petr4.sa");
        assert_eq!(StooqProvider::request_symbol("AAPL"), "aapl.us");
        assert_eq!(StooqProvider::request_symbol("^BVSP"), "^bvsp");
    }

    #[test]
    fn test_parse_csv_rows() {
        let rows = parse_csv("PETR4.SA", CSV).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].volume, None);
        assert_eq!(rows[2].close, 38.12);
        assert_eq!(rows[2].date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_parse_csv_skips_rows_without_close() {
        let body = "Date,Open,High,Low,Close,Volume\n2024-01-12,1,1,1,,10\n2024-01-15,1,1,1,2.5,20\n";
        let rows = parse_csv("X", body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].close, 2.5);
    }

    #[test]
    fn test_parse_csv_no_data() {
        assert!(matches!(
            parse_csv("XXXX", "No data"),
            Err(MarketDataError::SymbolNotFound(_))
        ));
        assert!(matches!(
            parse_csv("XXXX", "   "),
            Err(MarketDataError::SymbolNotFound(_))
        ));
        assert!(matches!(
            parse_csv("XXXX", "Date,Open,High,Low,Close,Volume\n"),
            Err(MarketDataError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_parse_csv_without_close_column() {
        assert!(matches!(
            parse_csv("XXXX", "<html>blocked</html>\n"),
            Err(MarketDataError::Decode { .. })
        ));
    }

    #[test]
    fn test_rows_to_quote_marks_stale_close() {
        let rows = parse_csv("PETR4.SA", CSV).unwrap();
        let quote = rows_to_quote("PETR4.SA", &rows).unwrap();

        assert_eq!(quote.source(), "stooq");
        assert_eq!(quote.price.last, Some(38.12));
        assert!((quote.price.change_pct.unwrap() - 3.027).abs() < 1e-3);
        assert_eq!(quote.volume.value, Some(41000000.0));
        assert_eq!(quote.status.confidence, Confidence::Medium);
        assert!(quote.status.has_note(NOTE_LAST_CLOSE));
        assert!(quote.market_cap.value.is_none());
        assert_eq!(
            quote.price.asof.map(|dt| dt.date_naive()),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_single_row_has_no_change() {
        let rows = vec![StooqRow {
            date: None,
            close: 10.0,
            volume: None,
        }];
        let quote = rows_to_quote("X", &rows).unwrap();
        assert!(quote.price.change_pct.is_none());
        assert!(quote.status.has_note(NOTE_CHANGE_UNAVAILABLE));
        assert!(quote.price.asof.is_some());
    }
}
