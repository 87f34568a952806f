use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use credvest_core::accounts::{Account, AccountRepositoryTrait, NewAccount};
use credvest_core::Result;

use super::model::AccountDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;

        self.writer
            .exec(move |conn| {
                let mut account_db: AccountDB = new_account.into();
                if account_db.id.is_empty() {
                    account_db.id = uuid::Uuid::new_v4().to_string();
                }

                let inserted = diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .returning(AccountDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                debug!("Inserted account {}", inserted.id);
                Ok(inserted.into())
            })
            .await
    }

    async fn update_balance(&self, account_id: &str, new_balance: Decimal) -> Result<Account> {
        let account_id_owned = account_id.to_string();
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(accounts.find(&account_id_owned))
                    .set((
                        balance.eq(new_balance.to_string()),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .returning(AccountDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(updated.into())
            })
            .await
    }

    /// Retrieves an account by its ID
    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let account = accounts
            .select(AccountDB::as_select())
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(account.into())
    }

    /// Lists accounts, optionally filtering by active status
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = accounts::table.into_boxed();

        if let Some(active) = is_active_filter {
            query = query.filter(is_active.eq(active));
        }

        let results = query
            .select(AccountDB::as_select())
            .order((is_active.desc(), holder_name.asc()))
            .load::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Account::from).collect())
    }
}
