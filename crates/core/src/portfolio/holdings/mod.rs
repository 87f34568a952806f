//! Holdings module - positions folded from the investment ledger.

pub mod holdings_calculator;
pub mod holdings_model;
mod holdings_service;


pub use holdings_calculator::aggregate_holdings;
pub use holdings_model::{HoldingsReport, HoldingsSummary, Position};
pub use holdings_service::{HoldingsService, HoldingsServiceTrait};
