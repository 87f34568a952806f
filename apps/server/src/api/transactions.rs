use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{NewTransactionBody, SummaryQuery, TradeBody, Transaction, TransactionQuery},
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use credvest_core::{
    portfolio::HoldingsReport,
    transactions::{CashflowSummary, TradeSide},
};

#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/transactions",
    params(TransactionQuery),
    responses((status = 200, body = [Transaction]))
)]
pub async fn list_transactions(
    Path(id): Path<String>,
    Query(query): Query<TransactionQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let rows = state
        .transaction_service
        .list_transactions(&id, &query.into())?;
    Ok(Json(rows.into_iter().map(Transaction::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/accounts/{id}/transactions",
    request_body = NewTransactionBody,
    responses((status = 200, body = Transaction))
)]
pub async fn record_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewTransactionBody>,
) -> ApiResult<Json<Transaction>> {
    let new_transaction = payload.into_new_transaction(&id)?;
    let created = state
        .transaction_service
        .record_transaction(new_transaction)
        .await?;
    Ok(Json(Transaction::from(created)))
}

#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/transactions/summary",
    params(SummaryQuery),
    responses((status = 200, description = "Credit and debit totals for the period"))
)]
pub async fn summarize(
    Path(id): Path<String>,
    Query(query): Query<SummaryQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CashflowSummary>> {
    let today = Utc::now().date_naive();
    let summary =
        state
            .transaction_service
            .summarize(&id, query.period.unwrap_or_default(), today)?;
    Ok(Json(summary))
}

async fn trade(
    state: &AppState,
    account_id: &str,
    side: TradeSide,
    body: TradeBody,
) -> ApiResult<Json<Transaction>> {
    let created = state
        .transaction_service
        .record_trade(account_id, side, body.into())
        .await?;
    tracing::info!(
        "Recorded {} of {} for account {}",
        side,
        created.symbol.as_deref().unwrap_or_default(),
        account_id
    );
    Ok(Json(Transaction::from(created)))
}

#[utoipa::path(
    post,
    path = "/api/v1/accounts/{id}/investments/buy",
    request_body = TradeBody,
    responses((status = 200, body = Transaction))
)]
pub async fn buy(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TradeBody>,
) -> ApiResult<Json<Transaction>> {
    trade(&state, &id, TradeSide::Buy, payload).await
}

#[utoipa::path(
    post,
    path = "/api/v1/accounts/{id}/investments/sell",
    request_body = TradeBody,
    responses((status = 200, body = Transaction))
)]
pub async fn sell(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TradeBody>,
) -> ApiResult<Json<Transaction>> {
    trade(&state, &id, TradeSide::Sell, payload).await
}

#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/investments/holdings",
    responses((status = 200, description = "Open positions with a portfolio summary"))
)]
pub async fn holdings(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HoldingsReport>> {
    let report = state.holdings_service.get_holdings(&id).await?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/accounts/{id}/transactions",
            get(list_transactions).post(record_transaction),
        )
        .route("/accounts/{id}/transactions/summary", get(summarize))
        .route("/accounts/{id}/investments/buy", post(buy))
        .route("/accounts/{id}/investments/sell", post(sell))
        .route("/accounts/{id}/investments/holdings", get(holdings))
}
