use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    time_utc: String,
    providers: Vec<&'static str>,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        time_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        providers: state.quote_service.provider_ids(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
