#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use credvest_server::{api::app_router, build_state, config::Config};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router backed by a fresh database. Keep the `TempDir` alive for the test.
pub async fn test_app() -> (TempDir, Router) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        db_path: tmp
            .path()
            .join("db")
            .join("credvest.db")
            .to_string_lossy()
            .into_owned(),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    (tmp, app_router(state, &config))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

/// Creates an account and returns its id.
pub async fn create_account(app: &Router, number: &str, balance: f64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/accounts",
        Some(serde_json::json!({
            "holderName": "Meera",
            "accountNumber": number,
            "balance": balance
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["id"].as_str().unwrap().to_string()
}
