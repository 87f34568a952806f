//! Transaction domain models.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_INSTRUMENT_TYPE, INVESTMENT_CATEGORY, INVESTMENT_SOURCE};
use crate::errors::ValidationError;
use crate::{Error, Result};

/// Money direction of a ledger row, seen from the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionDirection {
    #[serde(alias = "credit")]
    Credit,
    #[serde(alias = "debit")]
    Debit,
}

impl TransactionDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionDirection::Credit => "CREDIT",
            TransactionDirection::Debit => "DEBIT",
        }
    }
}

impl FromStr for TransactionDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("credit") {
            Ok(TransactionDirection::Credit)
        } else if s.eq_ignore_ascii_case("debit") {
            Ok(TransactionDirection::Debit)
        } else {
            Err(Error::invalid_input(format!(
                "Unknown transaction direction '{}'",
                s
            )))
        }
    }
}

/// Side of an investment trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    #[serde(alias = "buy")]
    Buy,
    #[serde(alias = "sell")]
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }

    /// Cash direction a trade of this side produces.
    pub fn direction(&self) -> TransactionDirection {
        match self {
            TradeSide::Buy => TransactionDirection::Debit,
            TradeSide::Sell => TransactionDirection::Credit,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("buy") {
            Ok(TradeSide::Buy)
        } else if s.eq_ignore_ascii_case("sell") {
            Ok(TradeSide::Sell)
        } else {
            Err(Error::invalid_input(format!("Unknown trade side '{}'", s)))
        }
    }
}

/// A recorded ledger row. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub category: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub direction: TransactionDirection,
    pub transaction_date: NaiveDateTime,
    pub source: String,
    pub merchant: Option<String>,
    pub symbol: Option<String>,
    pub instrument_type: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub side: Option<TradeSide>,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    pub fn is_investment(&self) -> bool {
        self.category.eq_ignore_ascii_case(INVESTMENT_CATEGORY)
    }
}

/// Input model for recording a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub account_id: String,
    pub category: String,
    pub description: Option<String>,
    pub amount: Decimal,
    #[serde(rename = "type", alias = "direction")]
    pub direction: TransactionDirection,
    #[serde(alias = "date")]
    pub transaction_date: Option<NaiveDateTime>,
    pub source: Option<String>,
    pub merchant: Option<String>,
    pub symbol: Option<String>,
    pub instrument_type: Option<String>,
    pub quantity: Option<Decimal>,
    #[serde(alias = "price")]
    pub unit_price: Option<Decimal>,
    pub side: Option<TradeSide>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        if self.amount < Decimal::ZERO {
            return Err(Error::invalid_input("Amount cannot be negative"));
        }
        if let Some(q) = self.quantity {
            if q < Decimal::ZERO {
                return Err(Error::invalid_input("Quantity cannot be negative"));
            }
        }
        if let Some(p) = self.unit_price {
            if p < Decimal::ZERO {
                return Err(Error::invalid_input("Price cannot be negative"));
            }
        }
        Ok(())
    }
}

/// Body of a buy or sell request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub symbol: String,
    pub instrument_type: Option<String>,
    pub quantity: Decimal,
    pub price: Decimal,
    pub trade_date: Option<NaiveDateTime>,
}

impl TradeRequest {
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(Error::invalid_input("Quantity must be positive"));
        }
        if self.price <= Decimal::ZERO {
            return Err(Error::invalid_input("Price must be positive"));
        }
        self.notional()?;
        Ok(())
    }

    /// Quantity times price, rejected when it leaves the `Decimal` range.
    pub fn notional(&self) -> Result<Decimal> {
        self.quantity
            .checked_mul(self.price)
            .ok_or_else(|| Error::invalid_input("Trade value is too large"))
    }

    /// Builds the investment ledger row a trade produces.
    pub fn into_new_transaction(
        self,
        account_id: &str,
        side: TradeSide,
    ) -> Result<NewTransaction> {
        let amount = self.notional()?;
        let symbol = self.symbol.trim().to_string();
        let verb = match side {
            TradeSide::Buy => "Buy",
            TradeSide::Sell => "Sell",
        };
        Ok(NewTransaction {
            id: None,
            account_id: account_id.to_string(),
            category: INVESTMENT_CATEGORY.to_string(),
            description: Some(format!("{} {} {}", verb, self.quantity.normalize(), symbol)),
            amount,
            direction: side.direction(),
            transaction_date: Some(self.trade_date.unwrap_or_else(|| Utc::now().naive_utc())),
            source: Some(INVESTMENT_SOURCE.to_string()),
            merchant: None,
            symbol: Some(symbol),
            instrument_type: Some(
                self.instrument_type
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_INSTRUMENT_TYPE.to_string()),
            ),
            quantity: Some(self.quantity),
            unit_price: Some(self.price),
            side: Some(side),
        })
    }
}

/// Filter for listing transactions. `year` and `month` apply only together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub category: Option<String>,
}

/// Reporting window for cash-flow summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPeriod {
    Week,
    #[default]
    Month,
    Year,
}
