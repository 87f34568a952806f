mod common;

use axum::http::{Method, StatusCode};
use common::{send, test_app};

#[tokio::test]
async fn test_healthz_works() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/healthz", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_readyz_checks_the_database() {
    let (_tmp, app) = test_app().await;

    let (status, _) = send(&app, Method::GET, "/api/v1/readyz", None).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_lists_the_routes() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/v1/goal-plans/project"));
    assert!(paths.contains_key("/api/v1/simulations/monte-carlo"));
}
