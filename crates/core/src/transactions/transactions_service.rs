use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use std::sync::Arc;

use super::ledger::LedgerEntry;
use super::transactions_model::{
    NewTransaction, SummaryPeriod, TradeRequest, TradeSide, Transaction, TransactionFilter,
};
use super::transactions_summary::{summarize_transactions, CashflowSummary};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::constants::{ALL_CATEGORIES, MANUAL_SOURCE};
use crate::errors::Result;
use crate::utils::time_utils::{month_range, week_range, year_range};
use crate::Error;

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            account_repository,
        }
    }

    fn start_of(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(0, 0, 0).unwrap_or_default()
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn record_transaction(&self, mut new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        self.account_repository
            .get_by_id(&new_transaction.account_id)?;

        if new_transaction
            .source
            .as_ref()
            .map_or(true, |s| s.trim().is_empty())
        {
            new_transaction.source = Some(MANUAL_SOURCE.to_string());
        }
        debug!(
            "Recording {} {} transaction for account {}",
            new_transaction.direction.as_str(),
            new_transaction.category,
            new_transaction.account_id
        );
        self.repository.create(new_transaction).await
    }

    async fn record_trade(
        &self,
        account_id: &str,
        side: TradeSide,
        trade: TradeRequest,
    ) -> Result<Transaction> {
        trade.validate()?;
        self.account_repository.get_by_id(account_id)?;

        let new_transaction = trade.into_new_transaction(account_id, side)?;
        info!(
            "Recording {} of {:?} {:?} for account {}",
            side,
            new_transaction.quantity,
            new_transaction.symbol,
            account_id
        );
        self.repository.create(new_transaction).await
    }

    fn list_transactions(
        &self,
        account_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let (start, end) = match (filter.year, filter.month) {
            (Some(year), Some(month)) => {
                let (start, end) = month_range(year, month).ok_or_else(|| {
                    Error::invalid_input(format!("Invalid month {}-{}", year, month))
                })?;
                (Some(Self::start_of(start)), Some(Self::start_of(end)))
            }
            _ => (None, None),
        };
        let category = filter
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty() && *c != ALL_CATEGORIES);

        self.repository
            .list_for_account(account_id, start, end, category)
    }

    fn summarize(
        &self,
        account_id: &str,
        period: SummaryPeriod,
        today: NaiveDate,
    ) -> Result<CashflowSummary> {
        use chrono::Datelike;

        let (start, end) = match period {
            SummaryPeriod::Week => week_range(today),
            SummaryPeriod::Month => month_range(today.year(), today.month())
                .ok_or_else(|| Error::Unexpected(format!("No month range for {}", today)))?,
            SummaryPeriod::Year => year_range(today),
        };
        let transactions = self.repository.list_for_account(
            account_id,
            Some(Self::start_of(start)),
            Some(Self::start_of(end)),
            None,
        )?;
        Ok(summarize_transactions(period, &transactions))
    }

    fn get_ledger_entries(&self, account_id: &str) -> Result<Vec<LedgerEntry>> {
        let transactions = self.repository.list_investment_transactions(account_id)?;
        Ok(transactions
            .iter()
            .filter_map(LedgerEntry::from_transaction)
            .collect())
    }
}
