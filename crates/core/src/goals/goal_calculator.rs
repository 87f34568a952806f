//! Pure goal planning calculators.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;

use crate::errors::{CalculatorError, Error, Result};
use crate::goals::goals_model::{
    ForecastPair, ForecastSnapshot, GoalInput, GoalProjection, PricePoint, SipSuggestion,
};
use crate::utils::time_utils::add_months;

/// Below this monthly rate the annuity term degenerates to `sip * months`.
pub const ANNUITY_RATE_EPSILON: f64 = 1e-12;

/// Floor applied to optimizer suggestions.
const MIN_SUGGESTED_SIP: f64 = 100.0;

/// Optimizer discount on the straight-line contribution.
const SIP_OPTIMIZER_FACTOR: f64 = 0.9;

/// Projects a goal: shortfall, monthly SIP, projected value and success score.
///
/// The monthly rate is the geometric twelfth root of the annual return, and
/// contributions are modelled as an ordinary annuity paid at the end of each
/// month on top of the compounded current balance.
pub fn project_goal(input: &GoalInput) -> Result<GoalProjection> {
    input.validate()?;

    let months = input.horizon_months;
    let shortfall = (input.target_amount - input.current_balance).max(0.0);
    let monthly_sip = if months > 0 {
        (shortfall / f64::from(months)).ceil()
    } else {
        shortfall
    };

    let annual_return = input.risk_tier.expected_annual_return();
    let monthly_rate = (1.0 + annual_return).powf(1.0 / 12.0) - 1.0;
    let growth_factor = (1.0 + monthly_rate).powf(f64::from(months));

    let annuity = if monthly_rate.abs() < ANNUITY_RATE_EPSILON {
        monthly_sip * f64::from(months)
    } else {
        monthly_sip * ((growth_factor - 1.0) / monthly_rate)
    };
    let projected_value = (input.current_balance * growth_factor + annuity).round();

    let success_score = (projected_value / input.target_amount * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8;

    debug!(
        "Projected goal: target={} months={} tier={} sip={} projected={}",
        input.target_amount, months, input.risk_tier, monthly_sip, projected_value
    );

    Ok(GoalProjection {
        shortfall,
        monthly_sip,
        expected_annual_return: annual_return,
        projected_value,
        success_score,
    })
}

/// Calendar date the goal is due, `horizon_months` after `start`.
pub fn target_date(start: NaiveDate, horizon_months: u32) -> Result<NaiveDate> {
    add_months(start, horizon_months).ok_or_else(|| {
        Error::invalid_input(format!(
            "a {} month horizon ends past the supported calendar",
            horizon_months
        ))
    })
}

/// How much of the target is already covered, as a rounded percentage.
pub fn progress_percent(target_amount: f64, shortfall: f64) -> i64 {
    if target_amount > 0.0 {
        ((target_amount - shortfall) / target_amount * 100.0).round() as i64
    } else {
        0
    }
}

/// Human readable summary of a projection.
pub fn projection_message(projection: &GoalProjection) -> String {
    if projection.shortfall <= 0.0 {
        return "You already have enough funds for this goal.".to_string();
    }
    format!(
        "Invest {:.0} per month at an assumed {:.0}% annual return to reach about {:.0} \
         (success score {}%).",
        projection.monthly_sip,
        projection.expected_annual_return * 100.0,
        projection.projected_value,
        projection.success_score
    )
}

/// Suggests a slightly discounted SIP, never below the floor.
pub fn suggest_sip(target_amount: f64, months: u32) -> Result<SipSuggestion> {
    if !target_amount.is_finite() || target_amount <= 0.0 {
        return Err(Error::invalid_input("targetAmount must be greater than 0"));
    }
    if months == 0 {
        return Err(Error::invalid_input("months must be greater than 0"));
    }

    let suggested =
        (target_amount / f64::from(months) * SIP_OPTIMIZER_FACTOR).ceil().max(MIN_SUGGESTED_SIP);

    Ok(SipSuggestion {
        suggested_sip: suggested,
        reason: format!(
            "Investing {:.0} monthly for {} months covers roughly 90% of the target, \
             leaving room for market returns to close the gap.",
            suggested, months
        ),
    })
}

/// Pairs a stored forecast with actual closes on the same dates and computes MAPE.
///
/// Pairs whose actual close is zero are dropped since their percentage error is
/// undefined. Later duplicates in `actuals` win.
pub fn evaluate_forecast(
    forecast: &ForecastSnapshot,
    actuals: &[PricePoint],
) -> Result<(Vec<ForecastPair>, f64)> {
    forecast.validate()?;

    let by_date: BTreeMap<NaiveDate, f64> = actuals.iter().map(|p| (p.date, p.close)).collect();

    let pairs: Vec<ForecastPair> = forecast
        .dates
        .iter()
        .zip(forecast.values.iter())
        .filter_map(|(date, value)| {
            by_date.get(date).and_then(|actual| {
                if *actual == 0.0 || !actual.is_finite() {
                    None
                } else {
                    Some(ForecastPair {
                        date: *date,
                        forecast: *value,
                        actual: *actual,
                    })
                }
            })
        })
        .collect();

    if pairs.is_empty() {
        return Err(CalculatorError::NoMatchingForecastDates.into());
    }

    let total_error: f64 = pairs
        .iter()
        .map(|p| ((p.actual - p.forecast) / p.actual).abs())
        .sum();
    let mape = total_error / pairs.len() as f64 * 100.0;

    Ok((pairs, mape))
}
