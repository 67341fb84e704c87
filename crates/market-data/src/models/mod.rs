//! Market data models
//!
//! This module contains the core data types for quote resolution:
//! - `types` - Type aliases and well-known provider identifiers
//! - `symbol` - Resolved symbol, exchange tag and default currency
//! - `quote` - The normalized quote every provider produces

mod quote;
mod symbol;
mod types;

pub use quote::{
    change_pct, Confidence, MarketCapInfo, NormalizedQuote, PriceInfo, QuoteStatus, VolumeInfo,
    NOTE_CHANGE_UNAVAILABLE, NOTE_CURRENCY_INFERRED, NOTE_INVALID_PRICE, NOTE_LAST_CLOSE,
    NOTE_NO_SOURCE,
};
pub use symbol::{default_currency, Exchange, ResolvedSymbol, B3_SUFFIX};
pub use types::{Currency, ProviderId, AUTO_PREFERENCE, BRAPI, NO_SOURCE, STOOQ, YAHOO};
