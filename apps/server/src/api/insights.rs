use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{DriftForecastBody, PriceSeriesBody},
};
use axum::{routing::post, Json, Router};
use credvest_core::{
    goals::ForecastSnapshot,
    insights::{linear_drift_forecast, price_insights as compute_insights, PriceInsights},
};

#[utoipa::path(
    post,
    path = "/api/v1/insights/prices",
    request_body = PriceSeriesBody,
    responses((status = 200, description = "Annualized return, volatility and risk label"))
)]
pub async fn price_insights(Json(payload): Json<PriceSeriesBody>) -> ApiResult<Json<PriceInsights>> {
    Ok(Json(compute_insights(&payload.closes)?))
}

#[utoipa::path(
    post,
    path = "/api/v1/insights/forecast",
    request_body = DriftForecastBody,
    responses((status = 200, description = "Linear drift forecast"))
)]
pub async fn drift_forecast(
    Json(payload): Json<DriftForecastBody>,
) -> ApiResult<Json<ForecastSnapshot>> {
    let forecast = linear_drift_forecast(&payload.history, payload.horizon_days)?;
    Ok(Json(forecast))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/insights/prices", post(price_insights))
        .route("/insights/forecast", post(drift_forecast))
}
