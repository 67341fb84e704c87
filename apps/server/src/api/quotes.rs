use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use triadex_market_data::{BatchItem, QuoteResponse};

/// Upper bound on tickers accepted by one batch request.
const MAX_BATCH_TICKERS: usize = 100;

#[derive(Deserialize)]
struct QuoteQuery {
    #[serde(default)]
    ticker: String,
    prefer: Option<String>,
}

#[derive(Deserialize)]
struct BatchRequest {
    tickers: Vec<String>,
    prefer: Option<String>,
}

async fn get_quote(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuoteQuery>,
) -> ApiResult<Json<QuoteResponse>> {
    let response = state
        .quote_service
        .quote(&query.ticker, query.prefer.as_deref())
        .await?;
    Ok(Json(response))
}

async fn quote_batch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> ApiResult<Json<Vec<BatchItem>>> {
    if request.tickers.len() > MAX_BATCH_TICKERS {
        return Err(ApiError::BadRequest(format!(
            "At most {} tickers per batch",
            MAX_BATCH_TICKERS
        )));
    }
    let items = state
        .quote_service
        .quote_batch(request.tickers.as_slice(), request.prefer.as_deref())
        .await;
    Ok(Json(items))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quote", get(get_quote))
        .route("/quotes/batch", post(quote_batch))
}
