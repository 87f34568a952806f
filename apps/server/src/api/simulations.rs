use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::MonteCarloResponse,
};
use axum::{extract::State, routing::post, Json, Router};
use credvest_core::simulation::{
    histogram, run_simulation, MonteCarloParams, DEFAULT_HISTOGRAM_BINS,
};
use tokio::task;

/// Runs a GBM Monte Carlo simulation. Path generation happens off the async workers.
#[utoipa::path(
    post,
    path = "/api/v1/simulations/monte-carlo",
    responses((status = 200, body = MonteCarloResponse), (status = 400))
)]
pub async fn monte_carlo(
    State(state): State<Arc<AppState>>,
    Json(params): Json<MonteCarloParams>,
) -> ApiResult<Json<MonteCarloResponse>> {
    let max_simulations = state.max_simulations;
    let response = task::spawn_blocking(move || {
        run_simulation(&params, max_simulations).map(|result| {
            let hist = histogram(&result.samples, DEFAULT_HISTOGRAM_BINS);
            MonteCarloResponse::new(result, hist)
        })
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Simulation task failed: {}", e)))??;
    Ok(Json(response))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/simulations/monte-carlo", post(monte_carlo))
}
