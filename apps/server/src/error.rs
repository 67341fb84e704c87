use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use triadex_market_data::MarketDataError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    MarketData(#[from] MarketDataError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::MarketData(e) => match e {
                MarketDataError::InvalidTicker => (StatusCode::BAD_REQUEST, e.to_string()),
                MarketDataError::UnknownWatchlist(_) => (StatusCode::NOT_FOUND, e.to_string()),
                // Upstream detail stays in the logs.
                _ => {
                    tracing::error!("Unexpected market data error: {}", e);
                    (StatusCode::BAD_GATEWAY, "Upstream data error".to_string())
                }
            },
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
