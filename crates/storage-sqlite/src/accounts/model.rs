//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::utils::parse_decimal_tolerant;
use credvest_core::accounts::{Account, AccountType, NewAccount};

/// Database model for accounts
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub holder_name: String,
    pub account_number: String,
    pub account_type: String,
    pub currency: String,
    pub balance: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        let account_type = db.account_type.parse::<AccountType>().unwrap_or_else(|_| {
            warn!(
                "Account {} has unknown type '{}', reading it as {}",
                db.id,
                db.account_type,
                AccountType::default()
            );
            AccountType::default()
        });
        Self {
            balance: parse_decimal_tolerant(&db.balance, "balance"),
            id: db.id,
            holder_name: db.holder_name,
            account_number: db.account_number,
            account_type,
            currency: db.currency,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewAccount> for AccountDB {
    fn from(domain: NewAccount) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            holder_name: domain.holder_name.trim().to_string(),
            account_number: domain.account_number.trim().to_string(),
            account_type: domain.account_type.as_str().to_string(),
            currency: domain.currency,
            balance: domain.balance.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
