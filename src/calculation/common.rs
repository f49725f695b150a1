//! Shared decimal helpers for the calculators.
//!
//! The engine's documented rounding policy lives here: monetary figures
//! are rounded to two decimal places with half-up (away from zero)
//! rounding at the moment they are emitted into a result; intermediate
//! arithmetic stays unrounded.

use rust_decimal::Decimal;

/// Rounds a monetary value to two decimal places, half-up.
///
/// Values at exactly 0.005 round away from zero to 0.01, following
/// standard financial rounding conventions.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use tributo_engine::calculation::round_half_up;
///
/// let value = Decimal::from_str("123.455").unwrap();
/// assert_eq!(round_half_up(value), Decimal::from_str("123.46").unwrap());
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value to zero when negative.
///
/// Used to floor taxable bases and withheld amounts that chained
/// subtractions can push below zero.
pub fn floor_at_zero(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        Decimal::ZERO
    } else {
        value
    }
}
