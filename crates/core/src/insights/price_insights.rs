use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::goals::ForecastSnapshot;
use crate::utils::decimal_utils::round_f64_2dp;

/// Trading days used to annualize daily statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Closes considered when estimating the drift.
pub const DRIFT_LOOKBACK_DAYS: usize = 30;

/// Longest drift forecast, in calendar days.
pub const MAX_FORECAST_HORIZON_DAYS: u32 = 3_650;

/// Guards the return denominator against a zero close.
const MIN_PRICE_DENOMINATOR: f64 = 1e-9;

/// A dated closing price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InsightLabel {
    Growth,
    Stable,
    Defensive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceInsights {
    /// Annualized mean daily return, in percent.
    pub annual_return: f64,
    /// Annualized standard deviation of daily returns, in percent.
    pub annual_volatility: f64,
    pub risk_score: u8,
    pub label: InsightLabel,
}

fn ensure_finite(closes: &[f64]) -> Result<()> {
    if closes.is_empty() {
        return Err(Error::invalid_input("price series must not be empty"));
    }
    if closes.iter().any(|c| !c.is_finite()) {
        return Err(Error::invalid_input("price series must contain finite values"));
    }
    Ok(())
}

/// Annualized return and volatility of a close series, with a coarse risk label.
///
/// Statistics use the population variance of simple daily returns. A single
/// close yields zero return and volatility.
pub fn price_insights(closes: &[f64]) -> Result<PriceInsights> {
    ensure_finite(closes)?;

    let returns: Vec<f64> = closes
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0].max(MIN_PRICE_DENOMINATOR))
        .collect();
    let n = returns.len().max(1) as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

    let annual_return = mean * TRADING_DAYS_PER_YEAR * 100.0;
    let annual_volatility = variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt() * 100.0;

    let risk_score = match annual_volatility {
        v if v > 40.0 => 80,
        v if v > 25.0 => 60,
        v if v > 15.0 => 40,
        _ => 20,
    };
    let label = if annual_return > 10.0 {
        InsightLabel::Growth
    } else if annual_return > 0.0 {
        InsightLabel::Stable
    } else {
        InsightLabel::Defensive
    };

    Ok(PriceInsights {
        annual_return: round_f64_2dp(annual_return),
        annual_volatility: round_f64_2dp(annual_volatility),
        risk_score,
        label,
    })
}

/// Extends the series linearly by the average daily change of its recent closes.
///
/// Forecast dates are consecutive calendar days after the last observation.
/// The horizon is limited to [`MAX_FORECAST_HORIZON_DAYS`].
pub fn linear_drift_forecast(history: &[PricePoint], horizon_days: u32) -> Result<ForecastSnapshot> {
    if horizon_days == 0 {
        return Err(Error::invalid_input("horizon must be greater than 0"));
    }
    if horizon_days > MAX_FORECAST_HORIZON_DAYS {
        return Err(Error::invalid_input(format!(
            "horizon must not exceed {} days",
            MAX_FORECAST_HORIZON_DAYS
        )));
    }
    let closes: Vec<f64> = history.iter().map(|p| p.close).collect();
    ensure_finite(&closes)?;

    let mut ordered = history.to_vec();
    ordered.sort_by_key(|p| p.date);
    let recent = &ordered[ordered.len().saturating_sub(DRIFT_LOOKBACK_DAYS)..];

    let steps = recent.len().saturating_sub(1).max(1) as f64;
    let avg_daily_change = recent
        .windows(2)
        .map(|w| w[1].close - w[0].close)
        .sum::<f64>()
        / steps;

    // `recent` is non-empty because `history` passed the emptiness check
    let last = recent[recent.len() - 1];
    let mut dates = Vec::with_capacity(horizon_days as usize);
    let mut values = Vec::with_capacity(horizon_days as usize);
    for i in 1..=horizon_days {
        let date = last
            .date
            .checked_add_signed(Duration::days(i64::from(i)))
            .ok_or_else(|| Error::invalid_input("forecast date out of range"))?;
        dates.push(date);
        values.push(round_f64_2dp(last.close + avg_daily_change * f64::from(i)));
    }

    Ok(ForecastSnapshot { dates, values })
}
