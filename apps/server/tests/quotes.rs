mod common;

use axum::{
    body::Body,
    http::{header, Method, Request},
};
use common::{get, send, test_router};

#[tokio::test]
async fn quote_resolves_and_prices() {
    let (status, body) = send(test_router(), get("/api/quote?ticker=petr4")).await;

    assert_eq!(status, 200);
    assert_eq!(body["ticker_in"], "petr4");
    assert_eq!(body["resolved"]["symbol"], "PETR4.SA");
    assert_eq!(body["resolved"]["exchange"], "B3");
    assert_eq!(body["price"]["last"], 100.0);
    assert_eq!(body["price"]["currency"], "BRL");
    assert_eq!(body["price"]["source"], "yahoo");
    assert_eq!(body["status"]["confidence"], "high");
}

#[tokio::test]
async fn blank_ticker_is_400() {
    for uri in ["/api/quote?ticker=%20%20", "/api/quote"] {
        let (status, body) = send(test_router(), get(uri)).await;
        assert_eq!(status, 400, "{}", uri);
        assert_eq!(body["code"], 400);
    }
}

#[tokio::test]
async fn unpriceable_ticker_is_unavailable_quote() {
    let (status, body) = send(test_router(), get("/api/quote?ticker=ZZZZ")).await;

    assert_eq!(status, 200);
    assert_eq!(body["resolved"]["exchange"], "AUTO");
    assert_eq!(body["price"]["source"], "none");
    assert!(body["price"]["last"].is_null());
    assert_eq!(body["price"]["currency"], "USD");
    assert_eq!(body["status"]["confidence"], "none");
}

#[tokio::test]
async fn batch_keeps_order_and_marks_errors() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/quotes/batch")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"tickers":["VALE3","","AAPL"]}"#))
        .unwrap();

    let (status, body) = send(test_router(), request).await;
    assert_eq!(status, 200);

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["resolved"]["symbol"], "VALE3.SA");
    assert_eq!(items[1]["ticker_in"], "");
    assert!(items[1]["error"].is_string());
    assert_eq!(items[2]["price"]["currency"], "USD");
}

#[tokio::test]
async fn watchlists_are_listed() {
    let (status, body) = send(test_router(), get("/api/watchlists")).await;

    assert_eq!(status, 200);
    let ids: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_str().unwrap().to_string())
        .collect();
    assert!(ids.contains(&"br_bluechips".to_string()));
    assert!(ids.contains(&"us_mega".to_string()));
}

#[tokio::test]
async fn watchlist_quotes() {
    let (status, body) = send(test_router(), get("/api/watchlists/br_bancos/quotes")).await;

    assert_eq!(status, 200);
    assert_eq!(body["id"], "br_bancos");
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["items"][3]["ticker_in"], "SANB11.SA");
}

#[tokio::test]
async fn unknown_watchlist_is_404() {
    let (status, body) = send(test_router(), get("/api/watchlists/crypto/quotes")).await;

    assert_eq!(status, 404);
    assert_eq!(body["message"], "Unknown watchlist: crypto");
}
