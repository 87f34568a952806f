//! Transactions module - the account ledger, trades, and cash-flow summaries.

mod ledger;
mod transactions_model;
mod transactions_service;
mod transactions_summary;
mod transactions_traits;


pub use ledger::LedgerEntry;
pub use transactions_model::{
    NewTransaction, SummaryPeriod, TradeRequest, TradeSide, Transaction, TransactionDirection,
    TransactionFilter,
};
pub use transactions_service::TransactionService;
pub use transactions_summary::{summarize_transactions, CashflowSummary};
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
