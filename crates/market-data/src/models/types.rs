use std::borrow::Cow;

/// Provider identifier - mostly static constants
pub type ProviderId = Cow<'static, str>;

/// Currency code (ISO 4217) - mostly static
pub type Currency = Cow<'static, str>;

/// brapi.dev, the token-gated primary source for B3 quotes.
pub const BRAPI: &str = "brapi";

/// Yahoo Finance chart API, always available.
pub const YAHOO: &str = "yahoo";

/// Stooq daily CSV, closing prices only.
pub const STOOQ: &str = "stooq";

/// Source tag of a quote no provider could produce.
pub const NO_SOURCE: &str = "none";

/// Cache key segment used when the caller expressed no provider preference.
pub const AUTO_PREFERENCE: &str = "auto";
