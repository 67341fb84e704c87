//! brapi.dev quote provider.
//!
//! Primary source for B3 listings. Requires an access token; when none is
//! configured the provider is never registered.
//!
//! API documentation: https://brapi.dev/docs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::{MarketDataError, NoData};
use crate::models::{
    change_pct, Confidence, NormalizedQuote, B3_SUFFIX, BRAPI, NOTE_CHANGE_UNAVAILABLE,
};
use crate::provider::http::{
    build_client, check_status, first_f64, first_str, first_timestamp, json_headers,
    transport_error,
};
use crate::provider::QuoteProvider;

const BASE_URL: &str = "https://brapi.dev/api/quote";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

const PRICE_KEYS: &[&str] = &["regularMarketPrice", "close", "price"];
const CHANGE_PCT_KEYS: &[&str] = &["regularMarketChangePercent", "changePercent"];
const PREV_CLOSE_KEYS: &[&str] = &["regularMarketPreviousClose", "previousClose"];
const VOLUME_KEYS: &[&str] = &["regularMarketVolume", "volume"];
const TIME_KEYS: &[&str] = &["regularMarketTime", "updatedAt"];

/// brapi.dev provider.
pub struct BrapiProvider {
    client: Client,
    token: String,
    timeout: Duration,
    base_url: String,
}

impl BrapiProvider {
    /// Create a provider authenticated with `token`.
    pub fn new(token: String, timeout: Duration) -> Self {
        Self {
            client: build_client(json_headers(), timeout),
            token,
            timeout,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// brapi addresses B3 tickers without the Yahoo suffix and indices without the caret.
    fn request_symbol(symbol: &str) -> String {
        symbol
            .trim_start_matches('^')
            .trim_end_matches(B3_SUFFIX)
            .to_string()
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<NormalizedQuote, MarketDataError> {
        let url = format!("{}/{}", self.base_url, encode(&Self::request_symbol(symbol)));

        debug!("brapi request: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("range", "1d"), ("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| transport_error(BRAPI, e))?;

        let response = check_status(BRAPI, response)?;

        let body: Value = response.json().await.map_err(|e| MarketDataError::Decode {
            provider: BRAPI.to_string(),
            message: format!("Invalid JSON: {}", e),
        })?;

        parse_quote(symbol, &body)
    }
}

/// Normalize a brapi `/quote` response body.
pub fn parse_quote(symbol: &str, body: &Value) -> Result<NormalizedQuote, MarketDataError> {
    if body.get("error").and_then(Value::as_bool).unwrap_or(false) {
        let message = first_str(body, &["message"]).unwrap_or("upstream error");
        return Err(MarketDataError::ProviderError {
            provider: BRAPI.to_string(),
            message: message.to_string(),
        });
    }

    let data = body
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
        .filter(|result| result.is_object())
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    let last = first_f64(data, PRICE_KEYS).ok_or_else(|| MarketDataError::Decode {
        provider: BRAPI.to_string(),
        message: format!("No price for {}", symbol),
    })?;

    let mut quote = NormalizedQuote::new(BRAPI, Confidence::High);
    let currency = first_str(data, &["currency"]).map(str::to_string);

    quote.price.last = Some(last);
    quote.price.change_pct = first_f64(data, CHANGE_PCT_KEYS)
        .or_else(|| change_pct(Some(last), first_f64(data, PREV_CLOSE_KEYS)));
    quote.price.currency = currency.clone();
    quote.price.asof = first_timestamp(data, TIME_KEYS);
    quote.market_cap.value = first_f64(data, &["marketCap"]);
    quote.market_cap.currency = currency;
    quote.volume.value = first_f64(data, VOLUME_KEYS);

    if quote.price.change_pct.is_none() {
        quote.status.note(NOTE_CHANGE_UNAVAILABLE);
    }

    Ok(quote)
}

#[async_trait]
impl QuoteProvider for BrapiProvider {
    fn id(&self) -> &'static str {
        BRAPI
    }

    fn priority(&self) -> u8 {
        0
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, symbol: &str) -> Result<NormalizedQuote, NoData> {
        self.fetch_quote(symbol).await.map_err(|e| {
            warn!("brapi failed for {}: {}", symbol, e);
            NoData::from_error(BRAPI, &e)
        })
    }
}
