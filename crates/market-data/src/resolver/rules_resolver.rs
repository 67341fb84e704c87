//! Rules resolver - deterministic ticker -> canonical symbol resolution.
//!
//! Applies, in order: the exception table, the B3 fund rule (`..11`), the B3
//! equity code pattern (`PETR4`, `VALE3`), an explicit `.SA` suffix, and finally
//! a pass-through that assumes a US listing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{Exchange, ResolvedSymbol, B3_SUFFIX};

use super::exceptions;

lazy_static! {
    /// 1-4 letters followed by 1-2 digits: the B3 equity code shape.
    static ref B3_EQUITY_CODE: Regex = Regex::new(r"^[A-Z]{1,4}[0-9]{1,2}$").unwrap();
}

/// Which rule claimed an input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionRule {
    /// Exact alias from the exception table
    Exception,
    /// Fund/ETF code ending in "11"
    B3Fund,
    /// Equity code pattern
    B3Equity,
    /// Caller already supplied the ".SA" suffix
    B3Suffixed,
    /// Nothing matched; assumed foreign
    PassThrough,
}

/// Resolves free-text tickers without touching the network.
#[derive(Clone, Copy, Debug, Default)]
pub struct RulesResolver;

impl RulesResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `raw`, returning the original text alongside the resolved symbol.
    pub fn resolve(&self, raw: &str) -> (String, ResolvedSymbol) {
        let (_, resolved) = self.resolve_with_rule(raw);
        (raw.to_string(), resolved)
    }

    /// Resolve `raw` and report the rule that matched.
    pub fn resolve_with_rule(&self, raw: &str) -> (ResolutionRule, ResolvedSymbol) {
        let upper = raw.trim().to_uppercase();

        if let Some(resolved) = exceptions::lookup(&upper) {
            return (ResolutionRule::Exception, resolved);
        }

        let suffixed = upper.ends_with(B3_SUFFIX);

        // Checked before the equity pattern: "BOVA11" matches both.
        if !suffixed && upper.ends_with("11") {
            let symbol = format!("{}{}", upper, B3_SUFFIX);
            return (
                ResolutionRule::B3Fund,
                ResolvedSymbol::new(symbol, Exchange::B3, upper),
            );
        }

        if !suffixed && B3_EQUITY_CODE.is_match(&upper) {
            let symbol = format!("{}{}", upper, B3_SUFFIX);
            return (
                ResolutionRule::B3Equity,
                ResolvedSymbol::new(symbol, Exchange::B3, upper),
            );
        }

        if suffixed {
            let name = upper.trim_end_matches(B3_SUFFIX).to_string();
            return (
                ResolutionRule::B3Suffixed,
                ResolvedSymbol::new(upper, Exchange::B3, name),
            );
        }

        (
            ResolutionRule::PassThrough,
            ResolvedSymbol::new(upper.clone(), Exchange::Auto, upper),
        )
    }
}
