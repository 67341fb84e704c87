use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{ProviderId, NO_SOURCE};

/// Note appended when a provider reported a non-positive or non-finite price.
pub const NOTE_INVALID_PRICE: &str = "Invalid or missing price";

/// Note appended when the currency was filled in from the exchange default.
pub const NOTE_CURRENCY_INFERRED: &str = "Currency inferred from exchange";

/// Note appended when the daily change could not be derived.
pub const NOTE_CHANGE_UNAVAILABLE: &str = "Daily change unavailable";

/// Note appended by the closing-price provider.
pub const NOTE_LAST_CLOSE: &str = "Last session close (stale closing price)";

/// Note carried by the terminal quote when every provider came up empty.
pub const NOTE_NO_SOURCE: &str = "Pricing data temporarily unavailable";

/// Coarse reliability label attached to a quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price block of a normalized quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceInfo {
    /// Last traded (or closing) price
    pub last: Option<f64>,
    /// Daily change in percent
    pub change_pct: Option<f64>,
    /// Quote currency
    pub currency: Option<String>,
    /// When the upstream says the price was observed
    pub asof: Option<DateTime<Utc>>,
    /// Provider that produced the quote ("none" when nobody did)
    pub source: ProviderId,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketCapInfo {
    pub value: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub value: Option<f64>,
}

/// Reliability label plus the caveats that explain it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteStatus {
    pub confidence: Confidence,
    /// Append-only diagnostics
    pub notes: Vec<String>,
}

impl QuoteStatus {
    pub fn new(confidence: Confidence) -> Self {
        Self {
            confidence,
            notes: Vec::new(),
        }
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn has_note(&self, note: &str) -> bool {
        self.notes.iter().any(|n| n == note)
    }
}

/// The common internal quote shape every provider adapter produces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuote {
    pub price: PriceInfo,
    pub market_cap: MarketCapInfo,
    pub volume: VolumeInfo,
    pub status: QuoteStatus,
}

impl NormalizedQuote {
    /// Create an empty quote attributed to `source`.
    pub fn new(source: impl Into<ProviderId>, confidence: Confidence) -> Self {
        Self {
            price: PriceInfo {
                last: None,
                change_pct: None,
                currency: None,
                asof: None,
                source: source.into(),
            },
            market_cap: MarketCapInfo::default(),
            volume: VolumeInfo::default(),
            status: QuoteStatus::new(confidence),
        }
    }

    /// Terminal quote returned when no provider produced data.
    pub fn unavailable() -> Self {
        let mut quote = Self::new(NO_SOURCE, Confidence::None);
        quote.price.asof = Some(Utc::now());
        quote.status.note(NOTE_NO_SOURCE);
        quote
    }

    /// Whether any numeric field carries a value.
    pub fn has_numbers(&self) -> bool {
        self.price.last.is_some()
            || self.price.change_pct.is_some()
            || self.market_cap.value.is_some()
            || self.volume.value.is_some()
    }

    pub fn source(&self) -> &str {
        &self.price.source
    }
}

/// Daily change in percent, when `prev_close` makes it meaningful.
pub fn change_pct(last: Option<f64>, prev_close: Option<f64>) -> Option<f64> {
    match (last, prev_close) {
        (Some(last), Some(prev)) if prev > 0.0 && last.is_finite() && prev.is_finite() => {
            Some((last / prev - 1.0) * 100.0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_pct_from_previous_close() {
        let pct = change_pct(Some(100.0), Some(95.0)).unwrap();
        assert!((pct - 5.263157).abs() < 1e-4);
    }

    #[test]
    fn test_change_pct_requires_positive_previous_close() {
        assert_eq!(change_pct(Some(100.0), Some(0.0)), None);
        assert_eq!(change_pct(Some(100.0), Some(-3.0)), None);
        assert_eq!(change_pct(None, Some(95.0)), None);
        assert_eq!(change_pct(Some(100.0), None), None);
        assert_eq!(change_pct(Some(f64::NAN), Some(95.0)), None);
    }

    #[test]
    fn test_unavailable_quote_is_empty() {
        let quote = NormalizedQuote::unavailable();
        assert_eq!(quote.source(), "none");
        assert_eq!(quote.status.confidence, Confidence::None);
        assert!(!quote.has_numbers());
        assert!(quote.status.has_note(NOTE_NO_SOURCE));
    }

    #[test]
    fn test_confidence_serializes_lowercase() {
        let quote = NormalizedQuote::new("yahoo", Confidence::Medium);
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["status"]["confidence"], "medium");
        assert_eq!(json["price"]["source"], "yahoo");
        assert!(json["price"]["last"].is_null());
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
        assert!(Confidence::Low > Confidence::None);
    }
}
