use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::holdings_calculator::aggregate_holdings;
use super::holdings_model::HoldingsReport;
use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;
use crate::transactions::TransactionServiceTrait;

#[async_trait]
pub trait HoldingsServiceTrait: Send + Sync {
    /// Current positions of an account, derived from its full investment ledger.
    async fn get_holdings(&self, account_id: &str) -> Result<HoldingsReport>;
}

pub struct HoldingsService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
}

impl HoldingsService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
    ) -> Self {
        Self {
            account_repository,
            transaction_service,
        }
    }
}

#[async_trait]
impl HoldingsServiceTrait for HoldingsService {
    async fn get_holdings(&self, account_id: &str) -> Result<HoldingsReport> {
        self.account_repository.get_by_id(account_id)?;
        let entries = self.transaction_service.get_ledger_entries(account_id)?;
        debug!(
            "Aggregating {} ledger entries for account {}",
            entries.len(),
            account_id
        );
        aggregate_holdings(&entries)
    }
}
