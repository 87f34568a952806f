//! Account domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_CURRENCY;
use crate::{errors::ValidationError, Error, Result};

/// Kind of bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccountType {
    #[default]
    Savings,
    Current,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" => Ok(AccountType::Savings),
            "current" => Ok(AccountType::Current),
            other => Err(Error::invalid_input(format!(
                "Unknown account type '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a bank account.
///
/// `balance` is the figure goal planning treats as money already saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub holder_name: String,
    pub account_number: String,
    pub account_type: AccountType,
    pub currency: String,
    pub balance: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub holder_name: String,
    pub account_number: String,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub balance: Decimal,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.holder_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account holder name cannot be empty".to_string(),
            )));
        }
        if self.account_number.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account number cannot be empty".to_string(),
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency cannot be empty".to_string(),
            )));
        }
        if self.balance.is_sign_negative() && !self.balance.is_zero() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Opening balance cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}
