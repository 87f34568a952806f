use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::accounts_model::{Account, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;
use crate::Error;

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!(
            "Creating account for {} ({})",
            new_account.holder_name, new_account.account_type
        );
        self.repository.create(new_account).await
    }

    async fn set_balance(&self, account_id: &str, balance: Decimal) -> Result<Account> {
        if balance < Decimal::ZERO {
            return Err(Error::invalid_input("Balance cannot be negative"));
        }
        // Surface a not-found before attempting the write
        self.repository.get_by_id(account_id)?;
        self.repository.update_balance(account_id, balance).await
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    fn get_all_accounts(&self) -> Result<Vec<Account>> {
        self.repository.list(None)
    }

    fn get_active_accounts(&self) -> Result<Vec<Account>> {
        self.repository.list(Some(true))
    }
}
