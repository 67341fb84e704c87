//! Symbol resolution.
//!
//! Maps free-text ticker input to a canonical [`ResolvedSymbol`] using pattern
//! heuristics and a static exception table. Resolution is pure and total: it
//! never fails and never calls out to a provider.
//!
//! # Rules
//!
//! ```text
//! input ──▶ 1. exception table (IBOV, WIN, ..)        ──▶ fixed symbol
//!       ──▶ 2. ends in "11", no ".SA" (funds/ETFs)    ──▶ "<input>.SA", B3
//!       ──▶ 3. 1-4 letters + 1-2 digits, no ".SA"     ──▶ "<input>.SA", B3
//!       ──▶ 4. already ends in ".SA"                  ──▶ unchanged, B3
//!       ──▶ 5. anything else                          ──▶ unchanged, AUTO
//! ```
//!
//! # Example
//!
//! ```
//! use triadex_market_data::resolver::resolve;
//!
//! let (original, resolved) = resolve("petr4");
//! assert_eq!(original, "petr4");
//! assert_eq!(resolved.symbol, "PETR4.SA");
//! ```

mod exceptions;
mod rules_resolver;

pub use rules_resolver::{ResolutionRule, RulesResolver};

use crate::models::ResolvedSymbol;

/// Resolve `raw` with the default rules.
pub fn resolve(raw: &str) -> (String, ResolvedSymbol) {
    RulesResolver::new().resolve(raw)
}
