//! Database model for transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::utils::{parse_decimal_tolerant, parse_optional_decimal};
use credvest_core::constants::MANUAL_SOURCE;
use credvest_core::transactions::{NewTransaction, TradeSide, Transaction, TransactionDirection};

/// Database model for ledger rows
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub account_id: String,
    pub category: String,
    pub description: Option<String>,
    pub amount: String,
    pub direction: String,
    pub transaction_date: NaiveDateTime,
    pub source: String,
    pub merchant: Option<String>,
    pub symbol: Option<String>,
    pub instrument_type: Option<String>,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
    pub side: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        let direction = db
            .direction
            .parse::<TransactionDirection>()
            .unwrap_or_else(|_| {
                warn!(
                    "Transaction {} has unknown direction '{}', reading it as a debit",
                    db.id, db.direction
                );
                TransactionDirection::Debit
            });
        // Rows without a recognizable side fall back to their direction in the ledger view
        let side = db.side.as_deref().and_then(|s| s.parse::<TradeSide>().ok());

        Self {
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            quantity: parse_optional_decimal(db.quantity.as_deref(), "quantity"),
            unit_price: parse_optional_decimal(db.unit_price.as_deref(), "unit_price"),
            id: db.id,
            account_id: db.account_id,
            category: db.category,
            description: db.description,
            direction,
            transaction_date: db.transaction_date,
            source: db.source,
            merchant: db.merchant,
            symbol: db.symbol,
            instrument_type: db.instrument_type,
            side,
            created_at: db.created_at,
        }
    }
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            account_id: domain.account_id,
            category: domain.category.trim().to_string(),
            description: domain.description,
            amount: domain.amount.to_string(),
            direction: domain.direction.as_str().to_string(),
            transaction_date: domain.transaction_date.unwrap_or(now),
            source: domain
                .source
                .unwrap_or_else(|| MANUAL_SOURCE.to_string()),
            merchant: domain.merchant,
            symbol: domain.symbol,
            instrument_type: domain.instrument_type,
            quantity: domain.quantity.map(|q| q.to_string()),
            unit_price: domain.unit_price.map(|p| p.to_string()),
            side: domain.side.map(|s| s.as_str().to_string()),
            created_at: now,
        }
    }
}
