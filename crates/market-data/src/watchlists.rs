//! Built-in watchlists.

use serde::Serialize;

use crate::errors::MarketDataError;

/// A named, static list of symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Watchlist {
    pub id: &'static str,
    pub label: &'static str,
    pub note: &'static str,
    pub symbols: &'static [&'static str],
}

pub const WATCHLISTS: &[Watchlist] = &[
    Watchlist {
        id: "br_bluechips",
        label: "B3 • Blue Chips",
        note: "Compact high-liquidity set.",
        symbols: &[
            "PETR4.SA", "VALE3.SA", "ITUB4.SA", "B3SA3.SA", "ABEV3.SA", "BBAS3.SA", "BBDC4.SA",
            "WEGE3.SA", "ELET3.SA", "ELET6.SA", "PRIO3.SA", "GGBR4.SA", "SUZB3.SA", "JBSS3.SA",
        ],
    },
    Watchlist {
        id: "br_bancos",
        label: "B3 • Banks",
        note: "Financials (banks and services).",
        symbols: &["ITUB4.SA", "BBDC4.SA", "BBAS3.SA", "SANB11.SA", "BPAC11.SA"],
    },
    Watchlist {
        id: "br_energia",
        label: "B3 • Energy/Utilities",
        note: "Generation, transmission and distribution.",
        symbols: &[
            "ELET3.SA", "ELET6.SA", "TAEE11.SA", "ENBR3.SA", "EQTL3.SA", "CMIG4.SA",
        ],
    },
    Watchlist {
        id: "br_commodities",
        label: "B3 • Commodities",
        note: "Mining, oil and steel.",
        symbols: &[
            "VALE3.SA", "PETR4.SA", "PETR3.SA", "GGBR4.SA", "SUZB3.SA", "PRIO3.SA",
        ],
    },
    Watchlist {
        id: "us_mega",
        label: "US • Mega Caps",
        note: "Technology giants (USD).",
        symbols: &["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META"],
    },
];

/// All built-in watchlists.
pub fn all() -> &'static [Watchlist] {
    WATCHLISTS
}

/// Look up a watchlist by id (case-insensitive).
pub fn get(id: &str) -> Result<&'static Watchlist, MarketDataError> {
    let id = id.trim();
    WATCHLISTS
        .iter()
        .find(|w| w.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| MarketDataError::UnknownWatchlist(id.to_string()))
}
