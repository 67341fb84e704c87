//! Quote data validation.
//!
//! Runs on every quote that comes out of a provider before it is cached:
//! - Price sanity (present but non-finite or non-positive)
//! - Currency defaulting from the resolved exchange, including on the
//!   unavailable quote
//!
//! Findings never reject a quote. They append a note and may lower the
//! confidence.

use log::warn;

use crate::models::{
    Confidence, NormalizedQuote, ResolvedSymbol, NOTE_CURRENCY_INFERRED, NOTE_INVALID_PRICE,
};

/// Quote data validator.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuoteValidator;

impl QuoteValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate and annotate `quote` in place.
    pub fn validate(&self, quote: &mut NormalizedQuote, resolved: &ResolvedSymbol) {
        self.validate_price(quote, resolved);
        self.fill_currency(quote, resolved);
    }

    fn validate_price(&self, quote: &mut NormalizedQuote, resolved: &ResolvedSymbol) {
        let Some(last) = quote.price.last else {
            return;
        };

        if !last.is_finite() || last <= 0.0 {
            warn!(
                "Invalid price {} for {} from '{}'",
                last,
                resolved.symbol,
                quote.source()
            );
            quote.status.note(NOTE_INVALID_PRICE);
            quote.status.confidence = Confidence::Low;
        }
    }

    fn fill_currency(&self, quote: &mut NormalizedQuote, resolved: &ResolvedSymbol) {
        if quote.price.currency.is_none() {
            quote.price.currency = Some(resolved.default_currency().into_owned());
            quote.status.note(NOTE_CURRENCY_INFERRED);
        }

        if quote.market_cap.currency.is_none() {
            quote.market_cap.currency = quote.price.currency.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exchange;

    fn b3() -> ResolvedSymbol {
        ResolvedSymbol::new("PETR4.SA", Exchange::B3, "PETR4")
    }

    fn priced(last: f64) -> NormalizedQuote {
        let mut quote = NormalizedQuote::new("brapi", Confidence::High);
        quote.price.last = Some(last);
        quote.price.currency = Some("BRL".to_string());
        quote
    }

    #[test]
    fn test_valid_quote_untouched() {
        let mut quote = priced(38.12);
        QuoteValidator::new().validate(&mut quote, &b3());

        assert_eq!(quote.status.confidence, Confidence::High);
        assert!(quote.status.notes.is_empty());
        assert_eq!(quote.market_cap.currency.as_deref(), Some("BRL"));
    }

    #[test]
    fn test_non_positive_price_is_low_confidence() {
        for last in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let mut quote = priced(last);
            QuoteValidator::new().validate(&mut quote, &b3());

            assert_eq!(quote.status.confidence, Confidence::Low);
            assert!(quote.status.has_note(NOTE_INVALID_PRICE));
        }
    }

    #[test]
    fn test_missing_currency_inferred_from_exchange() {
        let mut quote = NormalizedQuote::new("yahoo", Confidence::High);
        quote.price.last = Some(10.0);
        quote.market_cap.value = Some(1_000.0);

        QuoteValidator::new().validate(&mut quote, &b3());
        assert_eq!(quote.price.currency.as_deref(), Some("BRL"));
        assert_eq!(quote.market_cap.currency.as_deref(), Some("BRL"));
        assert!(quote.status.has_note(NOTE_CURRENCY_INFERRED));
        assert_eq!(quote.status.confidence, Confidence::High);

        let mut quote = NormalizedQuote::new("stooq", Confidence::Medium);
        quote.price.last = Some(10.0);
        let us = ResolvedSymbol::new("AAPL", Exchange::Auto, "AAPL");
        QuoteValidator::new().validate(&mut quote, &us);
        assert_eq!(quote.price.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_unavailable_quote_gets_exchange_currency() {
        let mut quote = NormalizedQuote::unavailable();
        QuoteValidator::new().validate(&mut quote, &b3());

        assert_eq!(quote.status.confidence, Confidence::None);
        assert!(!quote.has_numbers());
        assert_eq!(quote.price.currency.as_deref(), Some("BRL"));
        assert!(quote.status.has_note(NOTE_CURRENCY_INFERRED));
        assert!(!quote.status.has_note(NOTE_INVALID_PRICE));
    }
}
