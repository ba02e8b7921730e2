//! Explicit monetary rounding.
//!
//! Costs are rounded with banker's rounding (midpoint to even) so that a
//! re-run over the same facts yields the same cents. Nothing here reads
//! locale or process state.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for unit and settled costs unless configured otherwise.
pub const DEFAULT_COST_SCALE: u32 = 2;

/// Round a cost to `scale` decimal places, midpoint to even.
pub fn round_cost(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn midpoints_round_to_even() {
        assert_eq!(round_cost(dec!(2.345), 2), dec!(2.34));
        assert_eq!(round_cost(dec!(2.355), 2), dec!(2.36));
        assert_eq!(round_cost(dec!(-2.345), 2), dec!(-2.34));
    }

    #[test]
    fn non_midpoints_round_to_nearest() {
        assert_eq!(round_cost(dec!(1.006), 2), dec!(1.01));
        assert_eq!(round_cost(dec!(1.004), 2), dec!(1.00));
        assert_eq!(round_cost(dec!(10) / dec!(3), 2), dec!(3.33));
    }

    #[test]
    fn scale_is_respected() {
        assert_eq!(round_cost(dec!(1.23456), 4), dec!(1.2346));
        assert_eq!(round_cost(dec!(2.5), 0), dec!(2));
    }
}
