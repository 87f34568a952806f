use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use num_traits::ToPrimitive;
use std::sync::Arc;

use super::goal_calculator::{evaluate_forecast, progress_percent, project_goal, target_date};
use super::goals_model::{
    ForecastEvaluation, ForecastSnapshot, GoalInput, GoalPlan, GoalPlanHistoryItem,
    GoalPlanRequest, GoalPlanStatus, NewGoalPlan, PricePoint, DEFAULT_GOAL_CATEGORY,
    DEFAULT_GOAL_PRIORITY,
};
use super::goals_traits::{GoalPlanRepositoryTrait, GoalPlanServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::errors::{CalculatorError, Result};
use crate::Error;

/// Service for planning goals against an account balance.
pub struct GoalPlanService {
    repository: Arc<dyn GoalPlanRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl GoalPlanService {
    pub fn new(
        repository: Arc<dyn GoalPlanRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            account_repository,
        }
    }
}

#[async_trait]
impl GoalPlanServiceTrait for GoalPlanService {
    async fn create_plan(&self, account_id: &str, request: GoalPlanRequest) -> Result<GoalPlan> {
        request.validate()?;
        let account = self.account_repository.get_by_id(account_id)?;

        let current_balance = account.balance.to_f64().ok_or_else(|| {
            Error::Unexpected(format!(
                "Balance of account {} does not fit in f64",
                account.id
            ))
        })?;
        let horizon_months = request.horizon_months()?;
        let input = GoalInput {
            target_amount: request.target_amount,
            horizon_months,
            current_balance,
            risk_tier: request.risk_tier,
        };
        let projection = project_goal(&input)?;
        let today = Utc::now().date_naive();
        let target_date = target_date(today, horizon_months)?;

        let category = request
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GOAL_CATEGORY.to_string());

        let new_plan = NewGoalPlan {
            id: None,
            account_id: account.id,
            goal: request.goal.trim().to_string(),
            category,
            priority: request.priority.unwrap_or(DEFAULT_GOAL_PRIORITY),
            emoji: request.emoji,
            notes: request.notes,
            auto_invest: request.auto_invest,
            status: GoalPlanStatus::Active,
            risk_tier: request.risk_tier,
            target_amount: request.target_amount,
            horizon_months,
            current_balance,
            projection,
            allocation: request.risk_tier.allocation(),
            target_date,
        };

        info!(
            "Creating goal plan '{}' for account {} ({} months, {})",
            new_plan.goal, new_plan.account_id, horizon_months, new_plan.risk_tier
        );
        self.repository.create(new_plan).await
    }

    fn get_plan(&self, plan_id: &str) -> Result<GoalPlan> {
        self.repository.get_by_id(plan_id)
    }

    fn list_plans(&self, account_id: &str) -> Result<Vec<GoalPlanHistoryItem>> {
        self.account_repository.get_by_id(account_id)?;
        let plans = self.repository.list_for_account(account_id)?;
        Ok(plans
            .into_iter()
            .map(|plan| {
                let progress_percent = progress_percent(plan.target_amount, plan.shortfall);
                GoalPlanHistoryItem {
                    plan,
                    progress_percent,
                }
            })
            .collect())
    }

    async fn delete_plan(&self, account_id: &str, plan_id: &str) -> Result<()> {
        let plan = self.repository.get_by_id(plan_id)?;
        if plan.account_id != account_id {
            // Another account's plan is reported as missing
            return Err(Error::not_found("Goal plan", plan_id));
        }
        let removed = self.repository.delete(plan_id).await?;
        debug!("Deleted goal plan {} ({} row(s))", plan_id, removed);
        Ok(())
    }

    async fn save_forecast(&self, plan_id: &str, forecast: ForecastSnapshot) -> Result<GoalPlan> {
        forecast.validate()?;
        self.repository.get_by_id(plan_id)?;
        let saved_at = Utc::now().naive_utc();
        debug!(
            "Saving {}-point forecast for goal plan {}",
            forecast.values.len(),
            plan_id
        );
        self.repository
            .attach_forecast(plan_id, forecast, saved_at)
            .await
    }

    fn evaluate_forecast(
        &self,
        plan_id: &str,
        actuals: &[PricePoint],
    ) -> Result<ForecastEvaluation> {
        let plan = self.repository.get_by_id(plan_id)?;
        let forecast = plan
            .forecast
            .ok_or_else(|| CalculatorError::MissingForecast(plan_id.to_string()))?;
        let (pairs, mape) = evaluate_forecast(&forecast, actuals)?;
        Ok(ForecastEvaluation {
            plan_id: plan.id,
            pairs,
            mape,
        })
    }
}
