use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use super::ledger::LedgerEntry;
use super::transactions_model::{
    NewTransaction, SummaryPeriod, TradeRequest, TradeSide, Transaction, TransactionFilter,
};
use super::transactions_summary::CashflowSummary;
use crate::errors::Result;

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;

    /// Lists an account's transactions, newest first.
    ///
    /// `start`/`end` bound `transaction_date` as a half-open range.
    fn list_for_account(
        &self,
        account_id: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        category: Option<&str>,
    ) -> Result<Vec<Transaction>>;

    /// Investment rows with a symbol, oldest first.
    fn list_investment_transactions(&self, account_id: &str) -> Result<Vec<Transaction>>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn record_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Records a buy or sell as an investment ledger row.
    async fn record_trade(
        &self,
        account_id: &str,
        side: TradeSide,
        trade: TradeRequest,
    ) -> Result<Transaction>;

    fn list_transactions(
        &self,
        account_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>>;

    fn summarize(
        &self,
        account_id: &str,
        period: SummaryPeriod,
        today: NaiveDate,
    ) -> Result<CashflowSummary>;

    /// Chronological investment ledger of an account.
    fn get_ledger_entries(&self, account_id: &str) -> Result<Vec<LedgerEntry>>;
}
