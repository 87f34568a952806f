use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::transactions_model::{SummaryPeriod, Transaction, TransactionDirection};

/// Credit/debit totals for a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowSummary {
    pub period: SummaryPeriod,
    pub total_credit: Decimal,
    pub total_debit: Decimal,
    pub balance: Decimal,
    pub by_category: BTreeMap<String, Decimal>,
}

/// Totals the given transactions. The caller is responsible for restricting
/// them to the reporting window.
pub fn summarize_transactions(period: SummaryPeriod, transactions: &[Transaction]) -> CashflowSummary {
    let mut total_credit = Decimal::ZERO;
    let mut total_debit = Decimal::ZERO;
    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();

    for tx in transactions {
        match tx.direction {
            TransactionDirection::Credit => total_credit += tx.amount,
            TransactionDirection::Debit => total_debit += tx.amount,
        }
        let category = if tx.category.trim().is_empty() {
            "Others".to_string()
        } else {
            tx.category.clone()
        };
        *by_category.entry(category).or_insert(Decimal::ZERO) += tx.amount;
    }

    CashflowSummary {
        period,
        total_credit,
        total_debit,
        balance: total_credit - total_debit,
        by_category,
    }
}
