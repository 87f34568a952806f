use std::sync::Arc;

use crate::{
    config::Config,
    main_lib::AppState,
    models::{
        Account, BalanceUpdate, DriftForecastBody, EvaluateBody, GoalPlanBody, GoalPlanCreated,
        MonteCarloResponse, NewAccount, NewTransactionBody, OptimizeBody, PriceSeriesBody,
        ProjectBody, ProjectionResponse, TradeBody, Transaction,
    },
};
use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

mod accounts;
mod goal_plans;
mod health;
mod insights;
mod simulations;
mod transactions;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        health::readyz,
        accounts::list_accounts,
        accounts::create_account,
        accounts::get_account,
        accounts::set_balance,
        transactions::list_transactions,
        transactions::record_transaction,
        transactions::summarize,
        transactions::buy,
        transactions::sell,
        transactions::holdings,
        goal_plans::create_plan,
        goal_plans::list_plans,
        goal_plans::delete_plan,
        goal_plans::save_forecast,
        goal_plans::evaluate_forecast,
        goal_plans::project,
        goal_plans::optimize,
        simulations::monte_carlo,
        insights::price_insights,
        insights::drift_forecast,
    ),
    components(schemas(
        Account,
        NewAccount,
        BalanceUpdate,
        Transaction,
        NewTransactionBody,
        TradeBody,
        GoalPlanBody,
        GoalPlanCreated,
        ProjectBody,
        ProjectionResponse,
        OptimizeBody,
        EvaluateBody,
        MonteCarloResponse,
        PriceSeriesBody,
        DriftForecastBody,
    )),
    tags((name = "credvest"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new().allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .merge(health::router())
        .merge(accounts::router())
        .merge(transactions::router())
        .merge(goal_plans::router())
        .merge(simulations::router())
        .merge(insights::router());

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
