//! Common utility functions for loan calculations.
//!
//! This module provides shared rounding and clamping used by the
//! amortization calculator and the input normalization of the wizard.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to a whole currency unit using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero, matching the usual
/// `round` on displayed payment amounts.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use loan_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(26096.49)), dec!(26096));
/// assert_eq!(round_to_unit(dec!(26096.5)), dec!(26097));
/// assert_eq!(round_to_unit(dec!(-0.5)), dec!(-1));
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps `value` into the inclusive range `[min, max]`.
///
/// # Examples
///
/// ```
/// use loan_core::calculations::common::clamp;
///
/// assert_eq!(clamp(10, 300_000, 10_000_000), 300_000);
/// assert_eq!(clamp(99_000_000, 300_000, 10_000_000), 10_000_000);
/// assert_eq!(clamp(500_000, 300_000, 10_000_000), 500_000);
/// ```
pub fn clamp<T: Ord>(
    value: T,
    min: T,
    max: T,
) -> T {
    value.max(min).min(max)
}
