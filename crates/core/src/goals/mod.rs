//! Goals module - goal planning calculators, plan history, and forecasts.

mod goal_calculator;
mod goals_model;
mod goals_service;
mod goals_traits;

#[cfg(test)]
mod goals_service_tests;

pub use goal_calculator::{
    evaluate_forecast, progress_percent, project_goal, projection_message, suggest_sip,
    target_date, ANNUITY_RATE_EPSILON,
};
pub use goals_model::{
    AssetAllocation, DurationUnit, ForecastEvaluation, ForecastPair, ForecastSnapshot, GoalInput,
    GoalPlan, GoalPlanHistoryItem, GoalPlanRequest, GoalPlanStatus, GoalProjection, NewGoalPlan,
    PricePoint, RiskTier, SipSuggestion,
};
pub use goals_service::GoalPlanService;
pub use goals_traits::{GoalPlanRepositoryTrait, GoalPlanServiceTrait};
