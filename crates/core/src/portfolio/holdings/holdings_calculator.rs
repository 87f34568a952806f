use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use super::holdings_model::{HoldingsReport, HoldingsSummary, Position};
use crate::errors::{CalculatorError, Result};
use crate::transactions::{LedgerEntry, TradeSide};
use crate::utils::decimal_utils::round_display;

fn out_of_range(symbol: &str) -> CalculatorError {
    CalculatorError::InvalidLedgerEntry(format!(
        "figures for {} exceed the representable range",
        symbol
    ))
}

/// Running state for one symbol while folding its ledger entries.
#[derive(Debug)]
struct SymbolAccumulator {
    instrument_type: String,
    quantity: Decimal,
    invested: Decimal,
    last_price: Decimal,
}

impl SymbolAccumulator {
    fn new(instrument_type: &str) -> Self {
        SymbolAccumulator {
            instrument_type: instrument_type.to_string(),
            quantity: Decimal::ZERO,
            invested: Decimal::ZERO,
            last_price: Decimal::ZERO,
        }
    }

    fn apply(&mut self, entry: &LedgerEntry) -> Result<()> {
        // Stale-price fallback: an entry without a price trades at the last known one
        let price = entry.price_per_unit.unwrap_or(self.last_price);
        let overflow = || out_of_range(&entry.symbol);
        let trade_value = entry.quantity.checked_mul(price).ok_or_else(overflow)?;

        let (quantity, invested) = match entry.side {
            TradeSide::Buy => (
                self.quantity.checked_add(entry.quantity),
                self.invested.checked_add(trade_value),
            ),
            TradeSide::Sell => (
                self.quantity.checked_sub(entry.quantity),
                self.invested.checked_sub(trade_value),
            ),
        };
        self.quantity = quantity.ok_or_else(overflow)?;
        self.invested = invested.ok_or_else(overflow)?;

        if !price.is_zero() {
            self.last_price = price;
        }
        Ok(())
    }

    /// Builds the position, or `None` when the symbol is closed or over-sold.
    fn into_position(self, symbol: String) -> Result<Option<Position>> {
        if self.quantity <= Decimal::ZERO {
            debug!(
                "Dropping {} from holdings: net quantity {}",
                symbol, self.quantity
            );
            return Ok(None);
        }

        let average_cost = self
            .invested
            .checked_div(self.quantity)
            .unwrap_or(Decimal::ZERO);
        let current_price = if self.last_price.is_zero() {
            average_cost
        } else {
            self.last_price
        };
        let current_value = self
            .quantity
            .checked_mul(current_price)
            .ok_or_else(|| out_of_range(&symbol))?;
        let gain = current_value
            .checked_sub(self.invested)
            .ok_or_else(|| out_of_range(&symbol))?;
        let return_percent =
            percent_of(gain, self.invested).ok_or_else(|| out_of_range(&symbol))?;

        Ok(Some(Position {
            symbol,
            instrument_type: self.instrument_type,
            quantity: round_display(self.quantity),
            average_cost: round_display(average_cost),
            current_price: round_display(current_price),
            current_value: round_display(current_value),
            invested: round_display(self.invested),
            unrealized_gain: round_display(gain),
            return_percent: round_display(return_percent),
        }))
    }
}

/// `part / whole * 100`, zero when `whole` is zero.
fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return Some(Decimal::ZERO);
    }
    part.checked_div(whole)?.checked_mul(dec!(100))
}

/// Folds an account's investment ledger into open positions plus a summary.
///
/// Entries are processed in timestamp order (ties keep their input order).
/// Symbols whose net quantity ends at or below zero are left out. Figures are
/// rounded to two decimals; the summary totals the rounded positions.
///
/// Fails with [`CalculatorError::InvalidLedgerEntry`] when a running figure
/// leaves the range `Decimal` can represent.
pub fn aggregate_holdings(entries: &[LedgerEntry]) -> Result<HoldingsReport> {
    if entries.is_empty() {
        return Ok(HoldingsReport::empty());
    }

    let mut ordered: Vec<&LedgerEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.timestamp);

    let mut by_symbol: BTreeMap<String, SymbolAccumulator> = BTreeMap::new();
    for entry in ordered {
        if entry.quantity < Decimal::ZERO {
            warn!(
                "Skipping ledger entry {} for {}: negative quantity {}",
                entry.transaction_id, entry.symbol, entry.quantity
            );
            continue;
        }
        by_symbol
            .entry(entry.symbol.clone())
            .or_insert_with(|| SymbolAccumulator::new(&entry.instrument_type))
            .apply(entry)?;
    }

    let mut holdings: Vec<Position> = Vec::with_capacity(by_symbol.len());
    for (symbol, acc) in by_symbol {
        if let Some(position) = acc.into_position(symbol)? {
            holdings.push(position);
        }
    }

    let overflow = || out_of_range("the portfolio total");
    let (total_value, total_gain) = holdings
        .iter()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(value, gain), p| {
            Some((
                value.checked_add(p.current_value)?,
                gain.checked_add(p.unrealized_gain)?,
            ))
        })
        .ok_or_else(overflow)?;
    let total_return_percent = percent_of(total_gain, total_value).ok_or_else(overflow)?;

    Ok(HoldingsReport {
        holdings,
        summary: HoldingsSummary {
            total_value: round_display(total_value),
            total_gain: round_display(total_gain),
            total_return_percent: round_display(total_return_percent),
        },
    })
}
