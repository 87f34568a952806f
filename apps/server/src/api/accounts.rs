use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{Account, BalanceUpdate, NewAccount},
};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

#[utoipa::path(get, path = "/api/v1/accounts", responses((status = 200, body = [Account])))]
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Account>>> {
    let accounts = state.account_service.get_all_accounts()?;
    Ok(Json(accounts.into_iter().map(Account::from).collect()))
}

#[utoipa::path(post, path = "/api/v1/accounts", request_body = NewAccount, responses((status = 200, body = Account)))]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAccount>,
) -> ApiResult<Json<Account>> {
    let created = state.account_service.create_account(payload.try_into()?).await?;
    Ok(Json(Account::from(created)))
}

#[utoipa::path(get, path = "/api/v1/accounts/{id}", responses((status = 200, body = Account), (status = 404)))]
pub async fn get_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Account>> {
    let account = state.account_service.get_account(&id)?;
    Ok(Json(Account::from(account)))
}

#[utoipa::path(put, path = "/api/v1/accounts/{id}/balance", request_body = BalanceUpdate, responses((status = 200, body = Account)))]
pub async fn set_balance(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BalanceUpdate>,
) -> ApiResult<Json<Account>> {
    let updated = state.account_service.set_balance(&id, payload.balance).await?;
    Ok(Json(Account::from(updated)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", get(get_account))
        .route("/accounts/{id}/balance", put(set_balance))
}
