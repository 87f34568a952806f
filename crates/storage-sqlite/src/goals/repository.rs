use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use credvest_core::goals::{ForecastSnapshot, GoalPlan, GoalPlanRepositoryTrait, NewGoalPlan};
use credvest_core::Result;

use super::model::GoalPlanDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::goal_plans;
use crate::schema::goal_plans::dsl::*;

pub struct GoalPlanRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalPlanRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalPlanRepository { pool, writer }
    }
}

#[async_trait]
impl GoalPlanRepositoryTrait for GoalPlanRepository {
    async fn create(&self, new_plan: NewGoalPlan) -> Result<GoalPlan> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<GoalPlan> {
                let mut row = GoalPlanDB::from_new(new_plan)?;
                if row.id.is_empty() {
                    row.id = Uuid::new_v4().to_string();
                }

                let inserted = diesel::insert_into(goal_plans::table)
                    .values(&row)
                    .returning(GoalPlanDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(GoalPlan::from(inserted))
            })
            .await
    }

    fn get_by_id(&self, plan_id: &str) -> Result<GoalPlan> {
        let mut conn = get_connection(&self.pool)?;
        let row = goal_plans
            .select(GoalPlanDB::as_select())
            .find(plan_id)
            .first::<GoalPlanDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn list_for_account(&self, for_account_id: &str) -> Result<Vec<GoalPlan>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goal_plans
            .filter(account_id.eq(for_account_id))
            .select(GoalPlanDB::as_select())
            .order((created_at.desc(), id.desc()))
            .load::<GoalPlanDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(GoalPlan::from).collect())
    }

    async fn delete(&self, plan_id: &str) -> Result<usize> {
        let plan_id_owned = plan_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(goal_plans.find(plan_id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn attach_forecast(
        &self,
        plan_id: &str,
        snapshot: ForecastSnapshot,
        saved_at: NaiveDateTime,
    ) -> Result<GoalPlan> {
        let plan_id_owned = plan_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<GoalPlan> {
                let encoded = serde_json::to_string(&snapshot).map_err(StorageError::from)?;
                let updated = diesel::update(goal_plans.find(&plan_id_owned))
                    .set((forecast.eq(Some(encoded)), forecast_saved_at.eq(Some(saved_at))))
                    .returning(GoalPlanDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(updated.into())
            })
            .await
    }
}
