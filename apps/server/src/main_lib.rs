use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use triadex_market_data::{QuoteProvider, QuoteService};

pub struct AppState {
    pub quote_service: Arc<QuoteService>,
}

impl AppState {
    pub fn new(quote_service: QuoteService) -> Arc<Self> {
        Arc::new(Self {
            quote_service: Arc::new(quote_service),
        })
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("TRIADEX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let quote_service = QuoteService::from_config(&config.market_data);
    tracing::info!(
        "Quote providers: {:?} (strategy: {}, cache ttl: {:?})",
        quote_service.provider_ids(),
        config.market_data.strategy,
        config.market_data.cache_ttl
    );
    AppState::new(quote_service)
}

/// Build state around an explicit provider set instead of the built-in ones.
pub fn build_state_with_providers(
    config: &Config,
    providers: Vec<Arc<dyn QuoteProvider>>,
) -> Arc<AppState> {
    AppState::new(QuoteService::with_providers(&config.market_data, providers))
}
