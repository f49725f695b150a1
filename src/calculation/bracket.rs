//! The shared progressive-bracket primitive.
//!
//! All three simulators reduce to applying an ordered bracket schedule
//! to a base amount. The original portal repeated this walk inline on
//! every page; here it exists exactly once.

use rust_decimal::Decimal;

use crate::models::{BracketLine, BracketResult, BracketSchedule};

use super::common::{floor_at_zero, round_half_up};

/// Applies a progressive schedule to a base amount.
///
/// Walks the brackets in ascending order; each bracket taxes the slice
/// of the base between the previous bound and its own, at its marginal
/// rate. The result carries one line per bracket (zero slices included)
/// so presentation code can render the full bracket table.
///
/// Each slice's tax is rounded to two decimal places half-up;
/// `total_due` is the sum of the rounded slices, so the breakdown
/// always adds up to the total.
///
/// A negative base is a caller error upstream; this function clamps it
/// to zero rather than failing, yielding an all-zero breakdown.
///
/// # Arguments
///
/// * `schedule` - A validated bracket schedule
/// * `base` - The base amount to tax
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use tributo_engine::calculation::apply_schedule;
/// use tributo_engine::models::{Bracket, BracketSchedule};
///
/// let schedule = BracketSchedule::new(
///     "toy",
///     vec![
///         Bracket {
///             upper_bound: Some(Decimal::from(24_000)),
///             rate: Decimal::ZERO,
///             cumulative_deduction: Decimal::ZERO,
///         },
///         Bracket {
///             upper_bound: None,
///             rate: Decimal::from_str("0.15").unwrap(),
///             cumulative_deduction: Decimal::ZERO,
///         },
///     ],
/// )
/// .unwrap();
///
/// let result = apply_schedule(&schedule, Decimal::from(48_000));
/// assert_eq!(result.total_due, Decimal::from_str("3600.00").unwrap());
/// ```
pub fn apply_schedule(schedule: &BracketSchedule, base: Decimal) -> BracketResult {
    let base = floor_at_zero(base);

    let mut lines = Vec::with_capacity(schedule.brackets().len());
    let mut total_due = Decimal::ZERO;
    let mut previous_bound = Decimal::ZERO;

    for (bracket_index, bracket) in schedule.brackets().iter().enumerate() {
        let slice_top = match bracket.upper_bound {
            Some(bound) => base.min(bound),
            None => base,
        };
        let amount_taxed = floor_at_zero(slice_top - previous_bound);
        let tax = round_half_up(amount_taxed * bracket.rate);

        total_due += tax;
        lines.push(BracketLine {
            bracket_index,
            amount_taxed,
            rate: bracket.rate,
            tax,
        });

        if let Some(bound) = bracket.upper_bound {
            previous_bound = bound;
        }
    }

    BracketResult { lines, total_due }
}
