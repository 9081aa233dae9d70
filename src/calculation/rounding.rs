//! Money rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to `scale` places, halves away from zero.
///
/// # Examples
///
/// ```
/// use reconciliation_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("40909.0909").unwrap(), 2), Decimal::from_str("40909.09").unwrap());
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap(), 2), Decimal::from_str("0.13").unwrap());
/// ```
pub fn round_money(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}
