use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use credvest_core::constants::INVESTMENT_CATEGORY;
use credvest_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};
use credvest_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use crate::schema::transactions::dsl::*;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let mut row: TransactionDB = new_transaction.into();
                if row.id.is_empty() {
                    row.id = Uuid::new_v4().to_string();
                }

                let inserted = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::from(inserted))
            })
            .await
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions
            .select(TransactionDB::as_select())
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn list_for_account(
        &self,
        for_account_id: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        for_category: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(account_id.eq(for_account_id))
            .into_boxed();
        if let Some(start) = start {
            query = query.filter(transaction_date.ge(start));
        }
        if let Some(end) = end {
            query = query.filter(transaction_date.lt(end));
        }
        if let Some(for_category) = for_category {
            query = query.filter(category.eq(for_category.to_string()));
        }

        let rows = query
            .select(TransactionDB::as_select())
            .order((transaction_date.desc(), created_at.desc()))
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn list_investment_transactions(&self, for_account_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions
            .filter(account_id.eq(for_account_id))
            .filter(category.eq(INVESTMENT_CATEGORY))
            .filter(symbol.is_not_null())
            .select(TransactionDB::as_select())
            .order((transaction_date.asc(), created_at.asc()))
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }
}
