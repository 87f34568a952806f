//! Goal plan repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::goals_model::{
    ForecastEvaluation, ForecastSnapshot, GoalPlan, GoalPlanHistoryItem, GoalPlanRequest,
    NewGoalPlan, PricePoint,
};
use crate::errors::Result;

/// Trait defining the contract for goal plan persistence.
#[async_trait]
pub trait GoalPlanRepositoryTrait: Send + Sync {
    /// Persists a new plan.
    async fn create(&self, new_plan: NewGoalPlan) -> Result<GoalPlan>;

    fn get_by_id(&self, plan_id: &str) -> Result<GoalPlan>;

    /// Plans for an account, newest first.
    fn list_for_account(&self, account_id: &str) -> Result<Vec<GoalPlan>>;

    /// Deletes a plan and returns the number of rows removed.
    async fn delete(&self, plan_id: &str) -> Result<usize>;

    /// Stores (or replaces) the forecast snapshot on a plan.
    async fn attach_forecast(
        &self,
        plan_id: &str,
        forecast: ForecastSnapshot,
        saved_at: NaiveDateTime,
    ) -> Result<GoalPlan>;
}

/// Trait defining the contract for goal plan service operations.
#[async_trait]
pub trait GoalPlanServiceTrait: Send + Sync {
    /// Projects the request against the account balance and saves the plan.
    async fn create_plan(&self, account_id: &str, request: GoalPlanRequest) -> Result<GoalPlan>;

    fn get_plan(&self, plan_id: &str) -> Result<GoalPlan>;

    /// Plan history for an account with progress percentages, newest first.
    fn list_plans(&self, account_id: &str) -> Result<Vec<GoalPlanHistoryItem>>;

    /// Deletes a plan owned by `account_id`.
    async fn delete_plan(&self, account_id: &str, plan_id: &str) -> Result<()>;

    async fn save_forecast(&self, plan_id: &str, forecast: ForecastSnapshot) -> Result<GoalPlan>;

    /// Compares the stored forecast with actual closes.
    fn evaluate_forecast(&self, plan_id: &str, actuals: &[PricePoint])
        -> Result<ForecastEvaluation>;
}
