mod common;

use axum::http::{Method, StatusCode};
use common::{create_account, send, test_app};
use serde_json::json;

#[tokio::test]
async fn test_plan_creation_accepts_legacy_field_names() {
    let (_tmp, app) = test_app().await;
    let account = create_account(&app, "SB-100", 25_000.0).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/accounts/{}/goal-plans", account),
        Some(json!({ "title": "Car", "amount": "100000", "months": 12, "risk": "medium" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    let plan = &body["plan"];
    assert_eq!(plan["goal"], "Car");
    assert_eq!(plan["shortfall"].as_f64(), Some(75_000.0));
    assert_eq!(plan["monthlySIP"].as_f64(), Some(6_250.0));
    assert_eq!(plan["horizonMonths"], 12);
    assert_eq!(plan["category"], "Wealth");
    assert_eq!(plan["allocation"]["MutualFunds"], 50);
    assert!(body["message"].as_str().unwrap().contains("6250"));
}

#[tokio::test]
async fn test_plan_creation_accepts_the_web_client_payload() {
    let (_tmp, app) = test_app().await;
    let account = create_account(&app, "SB-110", 0.0).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/accounts/{}/goal-plans", account),
        Some(json!({
            "goal": "Car",
            "targetAmount": 240000,
            "durationValue": 2,
            "durationUnit": "years",
            "amount": 240000,
            "duration": 2,
            "years": 2,
            "riskLevel": "high"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    let plan = &body["plan"];
    assert_eq!(plan["horizonMonths"], 24);
    assert_eq!(plan["riskTier"], "high");
    assert_eq!(plan["monthlySIP"].as_f64(), Some(10_000.0));
}

#[tokio::test]
async fn test_history_is_scoped_and_delete_checks_ownership() {
    let (_tmp, app) = test_app().await;
    let owner = create_account(&app, "SB-101", 25_000.0).await;
    let other = create_account(&app, "SB-102", 0.0).await;

    let (_, created) = send(
        &app,
        Method::POST,
        &format!("/api/v1/accounts/{}/goal-plans", owner),
        Some(json!({ "goal": "Car", "targetAmount": 100000, "durationValue": 1, "durationUnit": "years" })),
    )
    .await;
    let plan_id = created["plan"]["id"].as_str().unwrap().to_string();

    let (status, history) = send(
        &app,
        Method::GET,
        &format!("/api/v1/accounts/{}/goal-plans", owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["progressPercent"], 25);

    let (_, other_history) = send(
        &app,
        Method::GET,
        &format!("/api/v1/accounts/{}/goal-plans", other),
        None,
    )
    .await;
    assert!(other_history.as_array().unwrap().is_empty());

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/accounts/{}/goal-plans/{}", other, plan_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/accounts/{}/goal-plans/{}", owner, plan_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_invalid_plans_are_bad_requests() {
    let (_tmp, app) = test_app().await;
    let account = create_account(&app, "SB-103", 0.0).await;
    let uri = format!("/api/v1/accounts/{}/goal-plans", account);

    for body in [
        json!({ "goal": "Car", "targetAmount": 0, "months": 12 }),
        json!({ "goal": "Car", "targetAmount": 1000, "months": 0 }),
        json!({ "goal": "Car", "targetAmount": 1000, "months": 12, "priority": 9 }),
        json!({ "targetAmount": 1000, "months": 12 }),
    ] {
        let (status, response) = send(&app, Method::POST, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", response);
    }
}

#[tokio::test]
async fn test_plan_for_unknown_account_is_not_found() {
    let (_tmp, app) = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/accounts/ghost/goal-plans",
        Some(json!({ "goal": "Car", "targetAmount": 1000, "months": 12 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_saved_forecast_is_evaluated_against_actuals() {
    let (_tmp, app) = test_app().await;
    let account = create_account(&app, "SB-104", 0.0).await;
    let (_, created) = send(
        &app,
        Method::POST,
        &format!("/api/v1/accounts/{}/goal-plans", account),
        Some(json!({ "goal": "Fund", "targetAmount": 50000, "months": 6 })),
    )
    .await;
    let plan_id = created["plan"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/goal-plans/{}/forecast/evaluate", plan_id),
        Some(json!({ "actuals": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, saved) = send(
        &app,
        Method::POST,
        &format!("/api/v1/goal-plans/{}/forecast", plan_id),
        Some(json!({ "dates": ["2024-05-01", "2024-05-02"], "values": [90.0, 110.0] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", saved);
    assert_eq!(saved["forecast"]["values"][1].as_f64(), Some(110.0));

    let (status, evaluation) = send(
        &app,
        Method::POST,
        &format!("/api/v1/goal-plans/{}/forecast/evaluate", plan_id),
        Some(json!({ "actuals": [
            { "date": "2024-05-01", "close": 100.0 },
            { "date": "2024-05-02", "close": 100.0 }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", evaluation);
    assert_eq!(evaluation["pairs"].as_array().unwrap().len(), 2);
    assert!((evaluation["mape"].as_f64().unwrap() - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_forecast_for_unknown_plan_is_not_found() {
    let (_tmp, app) = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/goal-plans/missing/forecast",
        Some(json!({ "dates": [], "values": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stateless_projection_matches_reference_case() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/goal-plans/project",
        Some(json!({
            "targetAmount": 100000,
            "horizonMonths": 12,
            "currentBalance": 0,
            "riskTier": "medium"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["shortfall"].as_f64(), Some(100_000.0));
    assert_eq!(body["monthlySIP"].as_f64(), Some(8_334.0));
    assert_eq!(body["expectedAnnualReturn"].as_f64(), Some(0.10));
    assert_eq!(body["allocation"]["Stocks"], 35);
}

#[tokio::test]
async fn test_optimizer_suggests_a_discounted_sip() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/goal-plans/optimize",
        Some(json!({ "targetAmount": 12000, "months": 12 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestedSIP"].as_f64(), Some(900.0));
}
