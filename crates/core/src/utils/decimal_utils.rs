use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Rounds a value to display precision, half away from zero.
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Rounds an `f64` to two decimal places.
pub fn round_f64_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_display_midpoint() {
        assert_eq!(round_display(dec!(1.005)), dec!(1.01));
        assert_eq!(round_display(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_display(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_round_f64_2dp() {
        assert_eq!(round_f64_2dp(123.456), 123.46);
        assert_eq!(round_f64_2dp(10.0), 10.0);
    }
}
