use std::sync::Arc;

use crate::config::Config;
use credvest_core::{
    accounts::{AccountService, AccountServiceTrait},
    goals::{GoalPlanService, GoalPlanServiceTrait},
    portfolio::{HoldingsService, HoldingsServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
};
use credvest_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, AccountRepository, GoalPlanRepository,
    TransactionRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait + Send + Sync>,
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub holdings_service: Arc<dyn HoldingsServiceTrait + Send + Sync>,
    pub goal_plan_service: Arc<dyn GoalPlanServiceTrait + Send + Sync>,
    pub max_simulations: usize,
}

/// Installs the JSON log subscriber. `log` records from the library crates are
/// bridged in by `tracing-subscriber`'s default `tracing-log` feature.
pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(&pool)?;

    let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let goal_plan_repository = Arc::new(GoalPlanRepository::new(pool.clone(), writer.clone()));

    let account_service = Arc::new(AccountService::new(account_repository.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository,
        account_repository.clone(),
    ));
    let holdings_service = Arc::new(HoldingsService::new(
        account_repository.clone(),
        transaction_service.clone(),
    ));
    let goal_plan_service = Arc::new(GoalPlanService::new(
        goal_plan_repository,
        account_repository,
    ));

    Ok(Arc::new(AppState {
        account_service,
        transaction_service,
        holdings_service,
        goal_plan_service,
        max_simulations: config.max_simulations,
    }))
}
