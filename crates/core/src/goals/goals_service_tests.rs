//! Unit tests for the goal plan service.

use super::*;
use crate::accounts::{Account, AccountRepositoryTrait, AccountType, NewAccount};
use crate::errors::{CalculatorError, Error, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, RwLock};

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockAccountRepository {
    accounts: Vec<Account>,
}

#[async_trait]
impl AccountRepositoryTrait for MockAccountRepository {
    async fn create(&self, _new_account: NewAccount) -> Result<Account> {
        unimplemented!()
    }

    async fn update_balance(&self, _account_id: &str, _balance: Decimal) -> Result<Account> {
        unimplemented!()
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        self.accounts
            .iter()
            .find(|a| a.id == account_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Account", account_id))
    }

    fn list(&self, _is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        unimplemented!()
    }
}

#[derive(Default)]
struct MockGoalPlanRepository {
    plans: RwLock<Vec<GoalPlan>>,
}

#[async_trait]
impl GoalPlanRepositoryTrait for MockGoalPlanRepository {
    async fn create(&self, new_plan: NewGoalPlan) -> Result<GoalPlan> {
        let mut plans = self.plans.write().unwrap();
        let plan = GoalPlan {
            id: new_plan
                .id
                .unwrap_or_else(|| format!("plan-{}", plans.len() + 1)),
            account_id: new_plan.account_id,
            goal: new_plan.goal,
            category: new_plan.category,
            priority: new_plan.priority,
            emoji: new_plan.emoji,
            notes: new_plan.notes,
            auto_invest: new_plan.auto_invest,
            status: new_plan.status,
            risk_tier: new_plan.risk_tier,
            target_amount: new_plan.target_amount,
            horizon_months: new_plan.horizon_months,
            current_balance: new_plan.current_balance,
            shortfall: new_plan.projection.shortfall,
            monthly_sip: new_plan.projection.monthly_sip,
            expected_annual_return: new_plan.projection.expected_annual_return,
            projected_value: new_plan.projection.projected_value,
            success_score: new_plan.projection.success_score,
            allocation: new_plan.allocation,
            target_date: new_plan.target_date,
            forecast: None,
            forecast_saved_at: None,
            created_at: Utc::now().naive_utc(),
        };
        // Newest first, like the storage layer
        plans.insert(0, plan.clone());
        Ok(plan)
    }

    fn get_by_id(&self, plan_id: &str) -> Result<GoalPlan> {
        self.plans
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == plan_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Goal plan", plan_id))
    }

    fn list_for_account(&self, account_id: &str) -> Result<Vec<GoalPlan>> {
        Ok(self
            .plans
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, plan_id: &str) -> Result<usize> {
        let mut plans = self.plans.write().unwrap();
        let before = plans.len();
        plans.retain(|p| p.id != plan_id);
        Ok(before - plans.len())
    }

    async fn attach_forecast(
        &self,
        plan_id: &str,
        forecast: ForecastSnapshot,
        saved_at: NaiveDateTime,
    ) -> Result<GoalPlan> {
        let mut plans = self.plans.write().unwrap();
        let plan = plans
            .iter_mut()
            .find(|p| p.id == plan_id)
            .ok_or_else(|| Error::not_found("Goal plan", plan_id))?;
        plan.forecast = Some(forecast);
        plan.forecast_saved_at = Some(saved_at);
        Ok(plan.clone())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn account(id: &str, balance: Decimal) -> Account {
    let now = Utc::now().naive_utc();
    Account {
        id: id.to_string(),
        holder_name: "Meera".to_string(),
        account_number: format!("no-{}", id),
        account_type: AccountType::Savings,
        currency: "INR".to_string(),
        balance,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn service() -> GoalPlanService {
    GoalPlanService::new(
        Arc::new(MockGoalPlanRepository::default()),
        Arc::new(MockAccountRepository {
            accounts: vec![account("acc-1", dec!(25000)), account("acc-2", dec!(0))],
        }),
    )
}

fn request(goal: &str, target: f64, months: f64) -> GoalPlanRequest {
    GoalPlanRequest {
        goal: goal.to_string(),
        target_amount: target,
        duration_value: months,
        duration_unit: DurationUnit::Months,
        risk_tier: RiskTier::Medium,
        category: None,
        priority: None,
        emoji: None,
        notes: None,
        auto_invest: false,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_create_plan_projects_against_account_balance() {
    let service = service();

    let plan = service
        .create_plan("acc-1", request("Car", 100_000.0, 12.0))
        .await
        .unwrap();

    assert_eq!(plan.current_balance, 25_000.0);
    assert_eq!(plan.shortfall, 75_000.0);
    assert_eq!(plan.monthly_sip, 6_250.0);
    assert_eq!(plan.horizon_months, 12);
    assert_eq!(plan.category, "Wealth");
    assert_eq!(plan.priority, 3);
    assert_eq!(plan.status, GoalPlanStatus::Active);
    assert_eq!(plan.allocation, AssetAllocation::new(50, 35, 15));
    assert!(plan.target_date > Utc::now().date_naive());
}

#[tokio::test]
async fn test_create_plan_for_unknown_account_fails() {
    let service = service();

    let err = service
        .create_plan("ghost", request("Car", 100_000.0, 12.0))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_create_plan_rejects_bad_priority() {
    let service = service();
    let mut bad = request("Car", 100_000.0, 12.0);
    bad.priority = Some(9);

    let err = service.create_plan("acc-1", bad).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_create_plan_rejects_horizon_past_the_calendar() {
    let service = service();
    let mut endless = request("Estate", 100_000.0, 12.0);
    endless.duration_value = 4_000_000_000.0;

    let err = service.create_plan("acc-1", endless).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(service.list_plans("acc-1").unwrap().is_empty());
}

#[tokio::test]
async fn test_history_lists_newest_first_with_progress() {
    let service = service();
    service
        .create_plan("acc-1", request("Car", 100_000.0, 12.0))
        .await
        .unwrap();
    service
        .create_plan("acc-1", request("Trip", 20_000.0, 6.0))
        .await
        .unwrap();
    service
        .create_plan("acc-2", request("Laptop", 80_000.0, 10.0))
        .await
        .unwrap();

    let history = service.list_plans("acc-1").unwrap();

    let goals: Vec<&str> = history.iter().map(|h| h.plan.goal.as_str()).collect();
    assert_eq!(goals, vec!["Trip", "Car"]);
    assert_eq!(history[0].progress_percent, 100);
    assert_eq!(history[1].progress_percent, 25);
}

#[tokio::test]
async fn test_delete_is_scoped_to_the_owning_account() {
    let service = service();
    let plan = service
        .create_plan("acc-1", request("Car", 100_000.0, 12.0))
        .await
        .unwrap();

    let err = service.delete_plan("acc-2", &plan.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(service.get_plan(&plan.id).is_ok());

    service.delete_plan("acc-1", &plan.id).await.unwrap();
    assert!(service.get_plan(&plan.id).unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_saved_forecast_can_be_evaluated() {
    let service = service();
    let plan = service
        .create_plan("acc-1", request("Car", 100_000.0, 12.0))
        .await
        .unwrap();
    let forecast = ForecastSnapshot {
        dates: vec![date(2024, 5, 1), date(2024, 5, 2)],
        values: vec![90.0, 110.0],
    };

    let saved = service.save_forecast(&plan.id, forecast).await.unwrap();
    assert!(saved.forecast_saved_at.is_some());

    let actuals = [
        PricePoint {
            date: date(2024, 5, 1),
            close: 100.0,
        },
        PricePoint {
            date: date(2024, 5, 2),
            close: 100.0,
        },
    ];
    let evaluation = service.evaluate_forecast(&plan.id, &actuals).unwrap();

    assert_eq!(evaluation.plan_id, plan.id);
    assert_eq!(evaluation.pairs.len(), 2);
    assert!((evaluation.mape - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_evaluating_without_a_forecast_fails() {
    let service = service();
    let plan = service
        .create_plan("acc-1", request("Car", 100_000.0, 12.0))
        .await
        .unwrap();

    let err = service.evaluate_forecast(&plan.id, &[]).unwrap_err();

    assert!(matches!(
        err,
        Error::Calculation(CalculatorError::MissingForecast(_))
    ));
}
