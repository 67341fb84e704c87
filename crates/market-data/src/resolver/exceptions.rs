//! Static aliases for indices and derivatives that don't follow listing rules.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::models::{Exchange, ResolvedSymbol};

lazy_static! {
    /// Uppercased alias -> canonical symbol.
    static ref EXCEPTIONS: HashMap<&'static str, ResolvedSymbol> = {
        let ibovespa = ResolvedSymbol::new("^BVSP", Exchange::B3, "Ibovespa");
        let mut m = HashMap::new();
        m.insert("IBOV", ibovespa.clone());
        m.insert("IBOVESPA", ibovespa.clone());
        m.insert("BVSP", ibovespa.clone());
        // Mini-index future; quoted through the spot index.
        m.insert("WIN", ibovespa);
        m
    };
}

/// Look up an alias. `key` must already be uppercased.
pub fn lookup(key: &str) -> Option<ResolvedSymbol> {
    EXCEPTIONS.get(key).cloned()
}
