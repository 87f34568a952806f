use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net ownership of one symbol, recomputed from the ledger on every read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub instrument_type: String,
    pub quantity: Decimal,
    pub average_cost: Decimal,
    pub current_price: Decimal,
    pub current_value: Decimal,
    /// Signed cost basis: buys add, sells subtract at their trade price.
    pub invested: Decimal,
    pub unrealized_gain: Decimal,
    pub return_percent: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsSummary {
    pub total_value: Decimal,
    pub total_gain: Decimal,
    pub total_return_percent: Decimal,
}

impl HoldingsSummary {
    pub fn zero() -> Self {
        HoldingsSummary {
            total_value: Decimal::ZERO,
            total_gain: Decimal::ZERO,
            total_return_percent: Decimal::ZERO,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsReport {
    pub holdings: Vec<Position>,
    pub summary: HoldingsSummary,
}

impl HoldingsReport {
    pub fn empty() -> Self {
        HoldingsReport {
            holdings: Vec::new(),
            summary: HoldingsSummary::zero(),
        }
    }
}
