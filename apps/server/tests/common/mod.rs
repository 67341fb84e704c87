use std::sync::Arc;
use std::time::Duration;

use axum::{body::to_bytes, body::Body, http::Request, Router};
use serde_json::Value;
use tower::ServiceExt;
use triadex_market_data::{Confidence, NoData, NormalizedQuote, QuoteProvider};
use triadex_server::{api::app_router, build_state_with_providers, config::Config};

/// Offline provider: prices every symbol except those starting with "ZZ".
pub struct StaticProvider;

#[async_trait::async_trait]
impl QuoteProvider for StaticProvider {
    fn id(&self) -> &'static str {
        "yahoo"
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(1)
    }

    async fn fetch(&self, symbol: &str) -> Result<NormalizedQuote, NoData> {
        if symbol.starts_with("ZZ") {
            return Err(NoData::new("yahoo", "unknown symbol"));
        }
        let mut quote = NormalizedQuote::new("yahoo", Confidence::High);
        quote.price.last = Some(100.0);
        quote.price.change_pct = Some(5.0);
        Ok(quote)
    }
}

pub fn test_router() -> Router {
    let config = Config::from_env().unwrap();
    let providers: Vec<Arc<dyn QuoteProvider>> = vec![Arc::new(StaticProvider)];
    let state = build_state_with_providers(&config, providers);
    app_router(state, &config)
}

pub async fn send(app: Router, request: Request<Body>) -> (u16, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
