//! Goal planning domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
pub use crate::insights::PricePoint;

/// Risk appetite chosen for a goal. Drives the assumed return and allocation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    /// Assumed annual return as a fraction.
    pub fn expected_annual_return(&self) -> f64 {
        match self {
            RiskTier::Low => 0.08,
            RiskTier::Medium => 0.10,
            RiskTier::High => 0.12,
        }
    }

    pub fn allocation(&self) -> AssetAllocation {
        match self {
            RiskTier::Low => AssetAllocation::new(60, 20, 20),
            RiskTier::Medium => AssetAllocation::new(50, 35, 15),
            RiskTier::High => AssetAllocation::new(40, 50, 10),
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskTier::Low),
            "medium" => Ok(RiskTier::Medium),
            "high" => Ok(RiskTier::High),
            other => Err(Error::invalid_input(format!("Unknown risk tier '{}'", other))),
        }
    }
}

/// Suggested split of contributions across asset classes, in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct AssetAllocation {
    pub mutual_funds: u8,
    pub stocks: u8,
    pub cash: u8,
}

impl AssetAllocation {
    pub const fn new(mutual_funds: u8, stocks: u8, cash: u8) -> Self {
        Self {
            mutual_funds,
            stocks,
            cash,
        }
    }
}

/// Calculator input for a single goal projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalInput {
    pub target_amount: f64,
    pub horizon_months: u32,
    #[serde(default)]
    pub current_balance: f64,
    #[serde(default)]
    pub risk_tier: RiskTier,
}

impl GoalInput {
    pub fn validate(&self) -> Result<()> {
        if !self.target_amount.is_finite() || self.target_amount <= 0.0 {
            return Err(Error::invalid_input("targetAmount must be greater than 0"));
        }
        if self.horizon_months == 0 {
            return Err(Error::invalid_input("horizonMonths must be greater than 0"));
        }
        if !self.current_balance.is_finite() || self.current_balance < 0.0 {
            return Err(Error::invalid_input(
                "currentBalance must be zero or a positive number",
            ));
        }
        Ok(())
    }
}

/// Output of the goal projection calculator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProjection {
    pub shortfall: f64,
    #[serde(rename = "monthlySIP")]
    pub monthly_sip: f64,
    pub expected_annual_return: f64,
    pub projected_value: f64,
    pub success_score: u8,
}

/// Unit the planning request expresses its duration in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Months,
    Years,
}

impl FromStr for DurationUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" | "months" => Ok(DurationUnit::Months),
            "year" | "years" => Ok(DurationUnit::Years),
            other => Err(Error::invalid_input(format!(
                "Unknown duration unit '{}'",
                other
            ))),
        }
    }
}

/// Lifecycle state of a saved plan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GoalPlanStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl GoalPlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPlanStatus::Active => "active",
            GoalPlanStatus::Completed => "completed",
            GoalPlanStatus::OnHold => "on-hold",
        }
    }
}

impl FromStr for GoalPlanStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(GoalPlanStatus::Active),
            "completed" => Ok(GoalPlanStatus::Completed),
            "on-hold" => Ok(GoalPlanStatus::OnHold),
            other => Err(Error::invalid_input(format!(
                "Unknown goal plan status '{}'",
                other
            ))),
        }
    }
}

/// A forecast series captured against a plan for later evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSnapshot {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl ForecastSnapshot {
    pub fn validate(&self) -> Result<()> {
        if self.dates.len() != self.values.len() {
            return Err(Error::invalid_input(format!(
                "Forecast has {} dates but {} values",
                self.dates.len(),
                self.values.len()
            )));
        }
        if self.values.iter().any(|v| !v.is_finite()) {
            return Err(Error::invalid_input("Forecast values must be finite"));
        }
        Ok(())
    }
}

/// One forecast value matched to the actual close on the same date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPair {
    pub date: NaiveDate,
    pub forecast: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEvaluation {
    pub plan_id: String,
    pub pairs: Vec<ForecastPair>,
    pub mape: f64,
}

/// Suggested monthly contribution from the SIP optimizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SipSuggestion {
    #[serde(rename = "suggestedSIP")]
    pub suggested_sip: f64,
    pub reason: String,
}

/// A persisted goal plan with its projection at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlan {
    pub id: String,
    pub account_id: String,
    pub goal: String,
    pub category: String,
    pub priority: u8,
    pub emoji: Option<String>,
    pub notes: Option<String>,
    pub auto_invest: bool,
    pub status: GoalPlanStatus,
    pub risk_tier: RiskTier,
    pub target_amount: f64,
    pub horizon_months: u32,
    pub current_balance: f64,
    pub shortfall: f64,
    #[serde(rename = "monthlySIP")]
    pub monthly_sip: f64,
    pub expected_annual_return: f64,
    pub projected_value: f64,
    pub success_score: u8,
    pub allocation: AssetAllocation,
    pub target_date: NaiveDate,
    pub forecast: Option<ForecastSnapshot>,
    pub forecast_saved_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl GoalPlan {
    /// The projection fields captured when the plan was created.
    pub fn projection(&self) -> GoalProjection {
        GoalProjection {
            shortfall: self.shortfall,
            monthly_sip: self.monthly_sip,
            expected_annual_return: self.expected_annual_return,
            projected_value: self.projected_value,
            success_score: self.success_score,
        }
    }
}

/// Input model for persisting a new plan. Projection fields are already computed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGoalPlan {
    pub id: Option<String>,
    pub account_id: String,
    pub goal: String,
    pub category: String,
    pub priority: u8,
    pub emoji: Option<String>,
    pub notes: Option<String>,
    pub auto_invest: bool,
    pub status: GoalPlanStatus,
    pub risk_tier: RiskTier,
    pub target_amount: f64,
    pub horizon_months: u32,
    pub current_balance: f64,
    pub projection: GoalProjection,
    pub allocation: AssetAllocation,
    pub target_date: NaiveDate,
}

/// A history row: the plan plus how far its funding already is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlanHistoryItem {
    #[serde(flatten)]
    pub plan: GoalPlan,
    pub progress_percent: i64,
}

pub const DEFAULT_GOAL_CATEGORY: &str = "Wealth";
pub const DEFAULT_GOAL_PRIORITY: u8 = 3;

/// Normalized plan-creation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlanRequest {
    pub goal: String,
    pub target_amount: f64,
    pub duration_value: f64,
    #[serde(default)]
    pub duration_unit: DurationUnit,
    #[serde(default)]
    pub risk_tier: RiskTier,
    pub category: Option<String>,
    pub priority: Option<u8>,
    pub emoji: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub auto_invest: bool,
}

impl GoalPlanRequest {
    pub fn validate(&self) -> Result<()> {
        if self.goal.trim().is_empty() {
            return Err(Error::invalid_input("goal must not be empty"));
        }
        if !self.target_amount.is_finite() || self.target_amount <= 0.0 {
            return Err(Error::invalid_input("targetAmount must be greater than 0"));
        }
        if let Some(priority) = self.priority {
            if !(1..=5).contains(&priority) {
                return Err(Error::invalid_input("priority must be between 1 and 5"));
            }
        }
        self.horizon_months().map(|_| ())
    }

    /// Duration expressed in whole months. Fractions round to the nearest month.
    pub fn horizon_months(&self) -> Result<u32> {
        let factor = match self.duration_unit {
            DurationUnit::Months => 1.0,
            DurationUnit::Years => 12.0,
        };
        let months = self.duration_value * factor;
        if !months.is_finite() || months <= 0.0 {
            return Err(Error::invalid_input("duration must be greater than 0"));
        }
        let rounded = months.round();
        if rounded < 1.0 || rounded > f64::from(u32::MAX) {
            return Err(Error::invalid_input(format!(
                "duration of {} months is out of range",
                months
            )));
        }
        Ok(rounded as u32)
    }
}
