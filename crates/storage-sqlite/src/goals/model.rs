//! Database model for goal plans.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use credvest_core::goals::{
    AssetAllocation, ForecastSnapshot, GoalPlan, GoalPlanStatus, NewGoalPlan, RiskTier,
};

/// Database model for goal plans.
///
/// `allocation` and `forecast` are JSON documents.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::goal_plans)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalPlanDB {
    pub id: String,
    pub account_id: String,
    pub goal: String,
    pub category: String,
    pub priority: i32,
    pub emoji: Option<String>,
    pub notes: Option<String>,
    pub auto_invest: bool,
    pub status: String,
    pub risk_tier: String,
    pub target_amount: f64,
    pub horizon_months: i32,
    pub current_balance: f64,
    pub shortfall: f64,
    pub monthly_sip: f64,
    pub expected_annual_return: f64,
    pub projected_value: f64,
    pub success_score: i32,
    pub allocation: String,
    pub target_date: NaiveDate,
    pub forecast: Option<String>,
    pub forecast_saved_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl GoalPlanDB {
    pub fn from_new(domain: NewGoalPlan) -> Result<Self, StorageError> {
        let horizon_months = i32::try_from(domain.horizon_months).map_err(|_| {
            StorageError::Core(credvest_core::Error::invalid_input(format!(
                "horizon of {} months is too large to store",
                domain.horizon_months
            )))
        })?;
        Ok(Self {
            id: domain.id.unwrap_or_default(),
            account_id: domain.account_id,
            goal: domain.goal,
            category: domain.category,
            priority: i32::from(domain.priority),
            emoji: domain.emoji,
            notes: domain.notes,
            auto_invest: domain.auto_invest,
            status: domain.status.as_str().to_string(),
            risk_tier: domain.risk_tier.as_str().to_string(),
            target_amount: domain.target_amount,
            horizon_months,
            current_balance: domain.current_balance,
            shortfall: domain.projection.shortfall,
            monthly_sip: domain.projection.monthly_sip,
            expected_annual_return: domain.projection.expected_annual_return,
            projected_value: domain.projection.projected_value,
            success_score: i32::from(domain.projection.success_score),
            allocation: serde_json::to_string(&domain.allocation)?,
            target_date: domain.target_date,
            forecast: None,
            forecast_saved_at: None,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }
}

impl From<GoalPlanDB> for GoalPlan {
    fn from(db: GoalPlanDB) -> Self {
        let risk_tier = db.risk_tier.parse::<RiskTier>().unwrap_or_else(|_| {
            warn!(
                "Goal plan {} has unknown risk tier '{}'",
                db.id, db.risk_tier
            );
            RiskTier::default()
        });
        let status = db.status.parse::<GoalPlanStatus>().unwrap_or_default();
        let allocation = serde_json::from_str::<AssetAllocation>(&db.allocation)
            .unwrap_or_else(|e| {
                warn!("Goal plan {} has an unreadable allocation: {}", db.id, e);
                risk_tier.allocation()
            });
        let forecast = db.forecast.as_deref().and_then(|raw| {
            serde_json::from_str::<ForecastSnapshot>(raw)
                .map_err(|e| warn!("Goal plan {} has an unreadable forecast: {}", db.id, e))
                .ok()
        });

        Self {
            id: db.id,
            account_id: db.account_id,
            goal: db.goal,
            category: db.category,
            priority: u8::try_from(db.priority).unwrap_or(u8::MAX),
            emoji: db.emoji,
            notes: db.notes,
            auto_invest: db.auto_invest,
            status,
            risk_tier,
            target_amount: db.target_amount,
            horizon_months: u32::try_from(db.horizon_months).unwrap_or_default(),
            current_balance: db.current_balance,
            shortfall: db.shortfall,
            monthly_sip: db.monthly_sip,
            expected_annual_return: db.expected_annual_return,
            projected_value: db.projected_value,
            success_score: u8::try_from(db.success_score.clamp(0, 100)).unwrap_or_default(),
            allocation,
            target_date: db.target_date,
            forecast,
            forecast_saved_at: db.forecast_saved_at,
            created_at: db.created_at,
        }
    }
}
