mod common;

use axum::http::{Method, StatusCode};
use common::{create_account, send, test_app};
use serde_json::json;

#[tokio::test]
async fn test_accounts_can_be_created_listed_and_updated() {
    let (_tmp, app) = test_app().await;
    let id = create_account(&app, "SB-001", 1500.5).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["holderName"], "Meera");
    assert_eq!(body["accountType"], "Savings");
    assert_eq!(body["balance"].as_f64(), Some(1500.5));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/accounts/{}/balance", id),
        Some(json!({ "balance": "2000" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"].as_f64(), Some(2000.0));

    let (status, body) = send(&app, Method::GET, "/api/v1/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_account_is_not_found() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/accounts/missing", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_duplicate_account_number_conflicts() {
    let (_tmp, app) = test_app().await;
    create_account(&app, "SB-001", 0.0).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/accounts",
        Some(json!({ "holderName": "Arjun", "accountNumber": "SB-001" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_negative_balance_is_rejected() {
    let (_tmp, app) = test_app().await;
    let id = create_account(&app, "SB-002", 10.0).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/accounts/{}/balance", id),
        Some(json!({ "balance": -5 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}
