//! Shared HTTP plumbing for the upstream adapters: headers, client
//! construction, status mapping and lenient JSON field extraction.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::warn;

use crate::errors::MarketDataError;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) Triadex/1.0";

/// Headers sent to JSON upstreams.
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}

/// Headers sent to CSV upstreams.
pub fn csv_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("text/csv, text/plain, */*"));
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}

/// Build a client whose every request is bounded by `timeout`.
pub fn build_client(headers: HeaderMap, timeout: Duration) -> Client {
    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!(
                "Failed to build HTTP client ({}), using defaults without timeout or headers",
                e
            );
            Client::new()
        })
}

/// Map a transport error to the matching `MarketDataError`.
pub fn transport_error(provider: &str, error: reqwest::Error) -> MarketDataError {
    if error.is_timeout() {
        MarketDataError::Timeout {
            provider: provider.to_string(),
        }
    } else {
        MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: format!("Request failed: {}", error),
        }
    }
}

/// Reject non-success responses.
pub fn check_status(provider: &str, response: Response) -> Result<Response, MarketDataError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::RateLimited {
            provider: provider.to_string(),
        });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(MarketDataError::SymbolNotFound(
            response.url().path().to_string(),
        ));
    }

    if !status.is_success() {
        return Err(MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: format!("HTTP {}", status),
        });
    }

    Ok(response)
}

/// Read a number that may arrive as a JSON number or a numeric string.
pub fn lenient_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => normalize_separators(s.trim())?.parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Rewrite grouping and decimal separators into a plain `f64` literal.
///
/// "12,5" and "1.234,56" use a decimal comma; "1,234" and "1,234.56" use
/// commas for grouping.
fn normalize_separators(s: &str) -> Option<String> {
    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');

    match (last_comma, last_dot) {
        (None, _) => Some(s.to_string()),
        (Some(comma), Some(dot)) if comma > dot => {
            Some(s.replace('.', "").replace(',', "."))
        }
        (Some(_), Some(_)) => Some(s.replace(',', "")),
        (Some(comma), None) => {
            let decimals = &s[comma + 1..];
            let single = s.matches(',').count() == 1;
            if single && (1..=2).contains(&decimals.len()) {
                Some(s.replace(',', "."))
            } else if decimals.len() == 3 {
                Some(s.replace(',', ""))
            } else {
                None
            }
        }
    }
}

/// First key of `object` that holds a readable number.
pub fn first_f64(object: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(lenient_f64)
}

/// First key of `object` that holds a non-empty string.
pub fn first_str<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Read a timestamp given either as RFC 3339 text or as Unix seconds.
pub fn lenient_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}

/// First key of `object` that holds a readable timestamp.
pub fn first_timestamp(object: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(lenient_timestamp)
}
