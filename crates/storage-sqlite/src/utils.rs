//! Column encoding helpers shared by the SQLite models.
//!
//! Monetary values are stored as TEXT so no precision is lost to SQLite's REAL.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a TEXT decimal column, accepting scientific notation written by older rows.
///
/// Unparseable values are logged and read as zero.
pub fn parse_decimal_tolerant(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(decimal_err) => match f64::from_str(value).ok().and_then(Decimal::from_f64) {
            Some(d) => d,
            None => {
                log::error!(
                    "Failed to parse {} '{}' as a decimal ({}). Falling back to ZERO.",
                    field_name,
                    value,
                    decimal_err
                );
                Decimal::ZERO
            }
        },
    }
}

pub fn parse_optional_decimal(value: Option<&str>, field_name: &str) -> Option<Decimal> {
    value.map(|v| parse_decimal_tolerant(v, field_name))
}
