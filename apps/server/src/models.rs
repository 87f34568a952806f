use chrono::NaiveDateTime;
use credvest_core::{
    accounts as core_accounts,
    errors::{Error as CoreError, Result as CoreResult},
    goals::{
        projection_message, AssetAllocation, DurationUnit, GoalInput, GoalPlan, GoalPlanRequest,
        GoalProjection, PricePoint, RiskTier,
    },
    simulation::{Histogram, MonteCarloResult},
    transactions as core_transactions,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use utoipa::{IntoParams, ToSchema};

// ===================== Accounts =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub holder_name: String,
    pub account_number: String,
    pub account_type: String,
    pub currency: String,
    #[schema(value_type = f64)]
    pub balance: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_accounts::Account> for Account {
    fn from(a: core_accounts::Account) -> Self {
        Self {
            id: a.id,
            holder_name: a.holder_name,
            account_number: a.account_number,
            account_type: a.account_type.as_str().to_string(),
            currency: a.currency,
            balance: a.balance,
            is_active: a.is_active,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "name")]
    pub holder_name: String,
    pub account_number: String,
    pub account_type: Option<String>,
    pub currency: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub balance: Option<Decimal>,
}

impl TryFrom<NewAccount> for core_accounts::NewAccount {
    type Error = CoreError;

    fn try_from(a: NewAccount) -> CoreResult<Self> {
        let account_type = match a.account_type.as_deref() {
            Some(raw) => raw.parse()?,
            None => core_accounts::AccountType::default(),
        };
        Ok(Self {
            id: a.id,
            holder_name: a.holder_name,
            account_number: a.account_number,
            account_type,
            currency: a
                .currency
                .unwrap_or_else(|| credvest_core::constants::DEFAULT_CURRENCY.to_string()),
            balance: a.balance.unwrap_or_default(),
        })
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdate {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = f64)]
    pub balance: Decimal,
}

// ===================== Transactions =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub category: String,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub direction: String,
    pub transaction_date: NaiveDateTime,
    pub source: String,
    pub merchant: Option<String>,
    pub symbol: Option<String>,
    pub instrument_type: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub quantity: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub unit_price: Option<Decimal>,
    pub side: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<core_transactions::Transaction> for Transaction {
    fn from(t: core_transactions::Transaction) -> Self {
        Self {
            id: t.id,
            account_id: t.account_id,
            category: t.category,
            description: t.description,
            amount: t.amount,
            direction: t.direction.as_str().to_string(),
            transaction_date: t.transaction_date,
            source: t.source,
            merchant: t.merchant,
            symbol: t.symbol,
            instrument_type: t.instrument_type,
            quantity: t.quantity,
            unit_price: t.unit_price,
            side: t.side.map(|s| s.as_str().to_string()),
            created_at: t.created_at,
        }
    }
}

/// Body of a manual transaction. The account comes from the path.
#[serde_as]
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionBody {
    pub category: String,
    pub description: Option<String>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    /// `CREDIT` or `DEBIT`.
    #[serde(rename = "type", alias = "direction")]
    pub direction: String,
    #[serde(alias = "date")]
    pub transaction_date: Option<NaiveDateTime>,
    pub source: Option<String>,
    pub merchant: Option<String>,
}

impl NewTransactionBody {
    pub fn into_new_transaction(
        self,
        account_id: &str,
    ) -> CoreResult<core_transactions::NewTransaction> {
        Ok(core_transactions::NewTransaction {
            id: None,
            account_id: account_id.to_string(),
            category: self.category,
            description: self.description,
            amount: self.amount,
            direction: self.direction.parse()?,
            transaction_date: self.transaction_date,
            source: self.source,
            merchant: self.merchant,
            symbol: None,
            instrument_type: None,
            quantity: None,
            unit_price: None,
            side: None,
        })
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TradeBody {
    pub symbol: String,
    #[serde(alias = "type")]
    pub instrument_type: Option<String>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = f64)]
    pub quantity: Decimal,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(alias = "unitPrice")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(alias = "date")]
    pub trade_date: Option<NaiveDateTime>,
}

impl From<TradeBody> for core_transactions::TradeRequest {
    fn from(t: TradeBody) -> Self {
        Self {
            symbol: t.symbol,
            instrument_type: t.instrument_type,
            quantity: t.quantity,
            price: t.price,
            trade_date: t.trade_date,
        }
    }
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct TransactionQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// `All` or absent means every category.
    pub category: Option<String>,
}

impl From<TransactionQuery> for core_transactions::TransactionFilter {
    fn from(q: TransactionQuery) -> Self {
        Self {
            year: q.year,
            month: q.month,
            category: q.category,
        }
    }
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// `week`, `month` (default) or `year`.
    #[param(value_type = Option<String>)]
    pub period: Option<core_transactions::SummaryPeriod>,
}

// ===================== Goal plans =====================

/// Plan creation body.
///
/// Older clients send several spellings of the same field in one payload, so
/// every spelling is its own field and `TryFrom` picks the first one present.
#[serde_as]
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlanBody {
    pub goal: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub target_amount: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(rename = "target_amount")]
    #[schema(value_type = Option<f64>)]
    pub target_amount_snake: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub amount: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub target: Option<f64>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub duration_value: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(rename = "duration_value")]
    #[schema(value_type = Option<f64>)]
    pub duration_value_snake: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub duration: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub months: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(rename = "time_in_months")]
    #[schema(value_type = Option<f64>)]
    pub time_in_months: Option<f64>,

    /// Used only when no month-based duration field is present.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub years: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub year: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub duration_years: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(rename = "duration_years")]
    #[schema(value_type = Option<f64>)]
    pub duration_years_snake: Option<f64>,

    pub duration_unit: Option<String>,
    #[serde(rename = "duration_unit")]
    pub duration_unit_snake: Option<String>,
    pub unit: Option<String>,

    pub risk_tier: Option<String>,
    pub risk_level: Option<String>,
    pub risk: Option<String>,
    #[serde(rename = "risk_tier")]
    pub risk_tier_snake: Option<String>,

    pub category: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<u8>)]
    pub priority: Option<u8>,
    pub emoji: Option<String>,
    pub notes: Option<String>,
    pub auto_invest: Option<bool>,
    #[serde(rename = "auto_invest")]
    pub auto_invest_snake: Option<bool>,
}

impl GoalPlanBody {
    /// Duration and its unit. A month-based field beats any year field.
    fn resolve_duration(&self) -> CoreResult<(f64, DurationUnit)> {
        let value = self
            .duration_value
            .or(self.duration_value_snake)
            .or(self.duration)
            .or(self.months)
            .or(self.time_in_months);
        if let Some(value) = value {
            let unit = match self
                .duration_unit
                .as_deref()
                .or(self.duration_unit_snake.as_deref())
                .or(self.unit.as_deref())
            {
                Some(raw) => raw.parse()?,
                None => DurationUnit::default(),
            };
            return Ok((value, unit));
        }

        self.years
            .or(self.year)
            .or(self.duration_years)
            .or(self.duration_years_snake)
            .map(|years| (years, DurationUnit::Years))
            .ok_or_else(|| CoreError::invalid_input("duration is required"))
    }
}

impl TryFrom<GoalPlanBody> for GoalPlanRequest {
    type Error = CoreError;

    fn try_from(body: GoalPlanBody) -> CoreResult<Self> {
        let (duration_value, duration_unit) = body.resolve_duration()?;
        let target_amount = body
            .target_amount
            .or(body.target_amount_snake)
            .or(body.amount)
            .or(body.target)
            .ok_or_else(|| CoreError::invalid_input("targetAmount is required"))?;
        let risk_tier = match body
            .risk_tier
            .as_deref()
            .or(body.risk_level.as_deref())
            .or(body.risk.as_deref())
            .or(body.risk_tier_snake.as_deref())
        {
            Some(raw) => raw.parse()?,
            None => RiskTier::default(),
        };
        let goal = body
            .goal
            .or(body.title)
            .or(body.name)
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .ok_or_else(|| CoreError::invalid_input("goal is required"))?;

        Ok(GoalPlanRequest {
            goal,
            target_amount,
            duration_value,
            duration_unit,
            risk_tier,
            category: body.category,
            priority: body.priority,
            emoji: body.emoji,
            notes: body.notes,
            auto_invest: body.auto_invest.or(body.auto_invest_snake).unwrap_or(false),
        })
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlanCreated {
    #[schema(value_type = Object)]
    pub plan: GoalPlan,
    pub message: String,
}

#[serde_as]
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBody {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(alias = "target_amount", alias = "amount", alias = "target")]
    pub target_amount: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(alias = "months", alias = "horizon")]
    pub horizon_months: u32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default, alias = "balance", alias = "current_balance")]
    pub current_balance: f64,
    #[serde(alias = "riskLevel", alias = "risk", alias = "risk_tier")]
    pub risk_tier: Option<String>,
}

impl TryFrom<ProjectBody> for GoalInput {
    type Error = CoreError;

    fn try_from(body: ProjectBody) -> CoreResult<Self> {
        let risk_tier = match body.risk_tier.as_deref() {
            Some(raw) => raw.parse()?,
            None => RiskTier::default(),
        };
        Ok(GoalInput {
            target_amount: body.target_amount,
            horizon_months: body.horizon_months,
            current_balance: body.current_balance,
            risk_tier,
        })
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub shortfall: f64,
    #[serde(rename = "monthlySIP")]
    pub monthly_sip: f64,
    pub expected_annual_return: f64,
    pub projected_value: f64,
    pub success_score: u8,
    #[schema(value_type = Object)]
    pub allocation: AssetAllocation,
    pub message: String,
}

impl ProjectionResponse {
    pub fn new(projection: GoalProjection, allocation: AssetAllocation) -> Self {
        Self {
            shortfall: projection.shortfall,
            monthly_sip: projection.monthly_sip,
            expected_annual_return: projection.expected_annual_return,
            projected_value: projection.projected_value,
            success_score: projection.success_score,
            allocation,
            message: projection_message(&projection),
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeBody {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(alias = "target_amount", alias = "amount", alias = "target")]
    pub target_amount: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(alias = "horizonMonths", alias = "duration")]
    pub months: u32,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateBody {
    #[serde(alias = "prices")]
    #[schema(value_type = Vec<Object>)]
    pub actuals: Vec<PricePoint>,
}

// ===================== Simulation & insights =====================

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloResponse {
    pub median: f64,
    pub p90: f64,
    pub samples: Vec<f64>,
    #[schema(value_type = Object)]
    pub histogram: Histogram,
}

impl MonteCarloResponse {
    pub fn new(result: MonteCarloResult, histogram: Histogram) -> Self {
        Self {
            median: result.median,
            p90: result.p90,
            samples: result.samples,
            histogram,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PriceSeriesBody {
    #[serde(alias = "prices")]
    pub closes: Vec<f64>,
}

fn default_horizon_days() -> u32 {
    90
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DriftForecastBody {
    #[serde(alias = "prices")]
    #[schema(value_type = Vec<Object>)]
    pub history: Vec<PricePoint>,
    #[serde(default = "default_horizon_days", alias = "horizon", alias = "days")]
    pub horizon_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CoreResult<GoalPlanRequest> {
        let body: GoalPlanBody = serde_json::from_value(value).unwrap();
        GoalPlanRequest::try_from(body)
    }

    #[test]
    fn test_goal_plan_body_accepts_canonical_fields() {
        let request = parse(json!({
            "goal": "Car",
            "targetAmount": 100000,
            "durationValue": 2,
            "durationUnit": "years",
            "riskTier": "high"
        }))
        .unwrap();

        assert_eq!(request.goal, "Car");
        assert_eq!(request.target_amount, 100_000.0);
        assert_eq!(request.horizon_months().unwrap(), 24);
        assert_eq!(request.risk_tier, RiskTier::High);
    }

    #[test]
    fn test_goal_plan_body_accepts_aliases_and_strings() {
        let request = parse(json!({
            "title": "Trip",
            "amount": "25000",
            "months": "10",
            "risk": "LOW"
        }))
        .unwrap();

        assert_eq!(request.goal, "Trip");
        assert_eq!(request.target_amount, 25_000.0);
        assert_eq!(request.duration_unit, DurationUnit::Months);
        assert_eq!(request.horizon_months().unwrap(), 10);
        assert_eq!(request.risk_tier, RiskTier::Low);
    }

    #[test]
    fn test_years_field_is_read_in_years_without_a_month_duration() {
        let request = parse(json!({
            "name": "House",
            "target": 5000000,
            "years": 3,
            "unit": "months"
        }))
        .unwrap();

        assert_eq!(request.duration_unit, DurationUnit::Years);
        assert_eq!(request.horizon_months().unwrap(), 36);
        assert_eq!(request.risk_tier, RiskTier::Medium);
    }

    #[test]
    fn test_duration_value_wins_over_years() {
        let request = parse(json!({
            "goal": "Bike",
            "targetAmount": 80000,
            "durationValue": 6,
            "durationUnit": "months",
            "years": 2
        }))
        .unwrap();

        assert_eq!(request.duration_unit, DurationUnit::Months);
        assert_eq!(request.horizon_months().unwrap(), 6);
    }

    #[test]
    fn test_web_client_payload_with_every_spelling_is_accepted() {
        // Shape the web client posts: canonical fields plus their legacy copies
        let in_years = parse(json!({
            "goal": "Car",
            "targetAmount": 500000,
            "durationValue": 2,
            "durationUnit": "years",
            "amount": 500000,
            "duration": 2,
            "years": 2
        }))
        .unwrap();
        assert_eq!(in_years.target_amount, 500_000.0);
        assert_eq!(in_years.horizon_months().unwrap(), 24);

        let in_months = parse(json!({
            "goal": "Laptop",
            "targetAmount": "90000",
            "durationValue": "9",
            "durationUnit": "months",
            "amount": "90000",
            "duration": "9",
            "months": "9"
        }))
        .unwrap();
        assert_eq!(in_months.target_amount, 90_000.0);
        assert_eq!(in_months.horizon_months().unwrap(), 9);
    }

    #[test]
    fn test_first_spelling_present_takes_precedence() {
        let request = parse(json!({
            "title": "Wedding",
            "name": "ignored",
            "target": 1,
            "amount": 2,
            "target_amount": 3,
            "targetAmount": 4,
            "months": 12,
            "duration": 10,
            "risk": "low",
            "riskLevel": "high"
        }))
        .unwrap();

        assert_eq!(request.goal, "Wedding");
        assert_eq!(request.target_amount, 4.0);
        assert_eq!(request.horizon_months().unwrap(), 10);
        assert_eq!(request.risk_tier, RiskTier::High);

        // A blank goal is still the chosen spelling, so the title is not used
        assert!(parse(json!({
            "goal": "  ",
            "title": "Wedding",
            "targetAmount": 4,
            "months": 12
        }))
        .is_err());
    }

    #[test]
    fn test_risk_level_spelling_sets_the_tier() {
        let request = parse(json!({
            "goal": "Car",
            "targetAmount": 100000,
            "months": 12,
            "riskLevel": "high"
        }))
        .unwrap();
        assert_eq!(request.risk_tier, RiskTier::High);

        let body: ProjectBody = serde_json::from_value(json!({
            "targetAmount": 100000,
            "months": 12,
            "riskLevel": "high"
        }))
        .unwrap();
        let input = GoalInput::try_from(body).unwrap();
        assert_eq!(input.risk_tier, RiskTier::High);
    }

    #[test]
    fn test_goal_plan_body_reports_missing_fields() {
        assert!(parse(json!({ "targetAmount": 10, "months": 3 })).is_err());
        assert!(parse(json!({ "goal": "Car", "months": 3 })).is_err());
        assert!(parse(json!({ "goal": "Car", "targetAmount": 10 })).is_err());
        assert!(parse(json!({
            "goal": "Car",
            "targetAmount": 10,
            "months": 3,
            "risk": "reckless"
        }))
        .is_err());
    }

    #[test]
    fn test_new_account_defaults_type_and_currency() {
        let body: NewAccount = serde_json::from_value(json!({
            "holderName": "Meera",
            "accountNumber": "001"
        }))
        .unwrap();

        let account = core_accounts::NewAccount::try_from(body).unwrap();

        assert_eq!(account.account_type, core_accounts::AccountType::Savings);
        assert_eq!(account.currency, "INR");
        assert!(account.balance.is_zero());
    }
}
