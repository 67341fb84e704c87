use serde::{Deserialize, Serialize};

use super::types::Currency;

/// Suffix Yahoo-style symbols carry for B3 listings.
pub const B3_SUFFIX: &str = ".SA";

/// Exchange a resolved symbol is assumed to trade on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    /// Brasil Bolsa Balcão (São Paulo)
    B3,
    /// United States
    Us,
    /// Not determined by the resolver; treated as a US listing
    Auto,
}

impl Exchange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::B3 => "B3",
            Self::Us => "US",
            Self::Auto => "AUTO",
        }
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trading currency assumed when a provider does not report one.
pub fn default_currency(exchange: Exchange) -> Currency {
    match exchange {
        Exchange::B3 => Currency::Borrowed("BRL"),
        Exchange::Us | Exchange::Auto => Currency::Borrowed("USD"),
    }
}

/// Canonical symbol produced by the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedSymbol {
    /// Symbol as providers expect it (e.g. "PETR4.SA", "AAPL", "^BVSP")
    pub symbol: String,
    /// Exchange tag
    pub exchange: Exchange,
    /// Display name
    pub name: String,
}

impl ResolvedSymbol {
    pub fn new(symbol: impl Into<String>, exchange: Exchange, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            exchange,
            name: name.into(),
        }
    }

    pub fn default_currency(&self) -> Currency {
        default_currency(self.exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_currency_by_exchange() {
        assert_eq!(default_currency(Exchange::B3), "BRL");
        assert_eq!(default_currency(Exchange::Us), "USD");
        assert_eq!(default_currency(Exchange::Auto), "USD");
    }

    #[test]
    fn test_exchange_serializes_uppercase() {
        let resolved = ResolvedSymbol::new("PETR4.SA", Exchange::B3, "PETR4");
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["exchange"], "B3");
        assert_eq!(
            serde_json::to_value(Exchange::Auto).unwrap(),
            serde_json::json!("AUTO")
        );
        assert_eq!(
            serde_json::to_value(Exchange::Us).unwrap(),
            serde_json::json!("US")
        );
    }
}
