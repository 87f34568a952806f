//! Insights module - analytics over a daily close series.

mod price_insights;

pub use price_insights::{
    linear_drift_forecast, price_insights, InsightLabel, PriceInsights, PricePoint,
    DRIFT_LOOKBACK_DAYS, MAX_FORECAST_HORIZON_DAYS, TRADING_DAYS_PER_YEAR,
};
