use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{
        EvaluateBody, GoalPlanBody, GoalPlanCreated, OptimizeBody, ProjectBody, ProjectionResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use credvest_core::goals::{
    project_goal, projection_message, suggest_sip, ForecastEvaluation, ForecastSnapshot,
    GoalInput, GoalPlan, GoalPlanHistoryItem, GoalPlanRequest, SipSuggestion,
};

#[utoipa::path(
    post,
    path = "/api/v1/accounts/{id}/goal-plans",
    request_body = GoalPlanBody,
    responses((status = 200, body = GoalPlanCreated), (status = 400), (status = 404))
)]
pub async fn create_plan(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GoalPlanBody>,
) -> ApiResult<Json<GoalPlanCreated>> {
    let request = GoalPlanRequest::try_from(payload)?;
    let plan = state.goal_plan_service.create_plan(&id, request).await?;
    let message = projection_message(&plan.projection());
    Ok(Json(GoalPlanCreated { plan, message }))
}

#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/goal-plans",
    responses((status = 200, description = "Plans of the account, newest first"))
)]
pub async fn list_plans(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<GoalPlanHistoryItem>>> {
    let plans = state.goal_plan_service.list_plans(&id)?;
    Ok(Json(plans))
}

#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{id}/goal-plans/{plan_id}",
    responses((status = 204), (status = 404))
)]
pub async fn delete_plan(
    Path((id, plan_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.goal_plan_service.delete_plan(&id, &plan_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/goal-plans/{plan_id}/forecast",
    responses((status = 200, description = "Plan with the forecast attached"))
)]
pub async fn save_forecast(
    Path(plan_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(forecast): Json<ForecastSnapshot>,
) -> ApiResult<Json<GoalPlan>> {
    let plan = state
        .goal_plan_service
        .save_forecast(&plan_id, forecast)
        .await?;
    Ok(Json(plan))
}

#[utoipa::path(
    post,
    path = "/api/v1/goal-plans/{plan_id}/forecast/evaluate",
    request_body = EvaluateBody,
    responses((status = 200, description = "Matched pairs and MAPE"))
)]
pub async fn evaluate_forecast(
    Path(plan_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EvaluateBody>,
) -> ApiResult<Json<ForecastEvaluation>> {
    let evaluation = state
        .goal_plan_service
        .evaluate_forecast(&plan_id, &payload.actuals)?;
    Ok(Json(evaluation))
}

/// Projection without persisting anything.
#[utoipa::path(
    post,
    path = "/api/v1/goal-plans/project",
    request_body = ProjectBody,
    responses((status = 200, body = ProjectionResponse))
)]
pub async fn project(Json(payload): Json<ProjectBody>) -> ApiResult<Json<ProjectionResponse>> {
    let input = GoalInput::try_from(payload)?;
    let projection = project_goal(&input)?;
    Ok(Json(ProjectionResponse::new(
        projection,
        input.risk_tier.allocation(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/goal-plans/optimize",
    request_body = OptimizeBody,
    responses((status = 200, description = "Suggested monthly contribution"))
)]
pub async fn optimize(Json(payload): Json<OptimizeBody>) -> ApiResult<Json<SipSuggestion>> {
    let suggestion = suggest_sip(payload.target_amount, payload.months)?;
    Ok(Json(suggestion))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/accounts/{id}/goal-plans",
            post(create_plan).get(list_plans),
        )
        .route("/accounts/{id}/goal-plans/{plan_id}", delete(delete_plan))
        .route("/goal-plans/project", post(project))
        .route("/goal-plans/optimize", post(optimize))
        .route("/goal-plans/{plan_id}/forecast", post(save_forecast))
        .route(
            "/goal-plans/{plan_id}/forecast/evaluate",
            post(evaluate_forecast),
        )
}
