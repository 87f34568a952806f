//! Investment ledger view over the transaction table.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transactions_model::{TradeSide, Transaction, TransactionDirection};
use crate::constants::FALLBACK_INSTRUMENT_TYPE;

/// One BUY or SELL fill for a symbol.
///
/// `price_per_unit` is `None` when the source row carried no usable price;
/// the holdings fold then falls back to the last traded price for the symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub transaction_id: String,
    pub symbol: String,
    pub instrument_type: String,
    pub side: TradeSide,
    pub quantity: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub timestamp: NaiveDateTime,
}

impl LedgerEntry {
    /// Projects an investment transaction onto a ledger entry.
    ///
    /// Returns `None` for non-investment rows and rows without a symbol.
    /// Rows that predate the `side` column are read from their cash direction:
    /// a credit is a sale, anything else a purchase.
    pub fn from_transaction(tx: &Transaction) -> Option<Self> {
        if !tx.is_investment() {
            return None;
        }
        let symbol = tx.symbol.as_deref().map(str::trim).filter(|s| !s.is_empty())?;

        let side = tx.side.unwrap_or(match tx.direction {
            TransactionDirection::Credit => TradeSide::Sell,
            TransactionDirection::Debit => TradeSide::Buy,
        });

        Some(LedgerEntry {
            transaction_id: tx.id.clone(),
            symbol: symbol.to_string(),
            instrument_type: tx
                .instrument_type
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_INSTRUMENT_TYPE.to_string()),
            side,
            quantity: tx.quantity.unwrap_or(Decimal::ZERO),
            price_per_unit: tx.unit_price.filter(|p| !p.is_zero()),
            timestamp: tx.transaction_date,
        })
    }
}
