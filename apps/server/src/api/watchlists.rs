use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use triadex_market_data::{watchlists, Watchlist, WatchlistQuotes};

#[derive(Deserialize)]
struct PreferQuery {
    prefer: Option<String>,
}

async fn list_watchlists() -> Json<&'static [Watchlist]> {
    Json(watchlists::all())
}

async fn watchlist_quotes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<PreferQuery>,
) -> ApiResult<Json<WatchlistQuotes>> {
    let quotes = state
        .quote_service
        .quote_watchlist(&id, query.prefer.as_deref())
        .await?;
    Ok(Json(quotes))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/watchlists", get(list_watchlists))
        .route("/watchlists/{id}/quotes", get(watchlist_quotes))
}
