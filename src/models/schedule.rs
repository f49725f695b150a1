//! Progressive bracket schedule model.
//!
//! This module defines the [`BracketSchedule`] type shared by all three
//! calculators, plus the per-bracket breakdown types produced when a
//! schedule is applied to a base amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single bracket in a progressive schedule.
///
/// A bracket covers the slice of the base amount between the previous
/// bracket's upper bound (exclusive) and its own upper bound (inclusive).
/// The final bracket of a schedule is unbounded (`upper_bound: None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Upper bound of the bracket, or `None` for the unbounded final bracket.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate applied to the slice covered by this bracket.
    pub rate: Decimal,
    /// Cumulative deduction for tables published in `rate * base - deduction`
    /// form. Informational: the slice walk is the authoritative algorithm.
    #[serde(default)]
    pub cumulative_deduction: Decimal,
}

/// An ordered, validated progressive bracket schedule.
///
/// Invariants, enforced at construction:
/// - at least one bracket;
/// - finite upper bounds strictly increasing and positive;
/// - exactly one unbounded bracket, in last position;
/// - rates non-negative and non-decreasing bracket to bracket.
///
/// A schedule that fails validation is rejected with
/// [`EngineError::InvalidSchedule`] before it can be applied, so a
/// malformed yearly table can never silently corrupt computations.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
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
/// assert_eq!(schedule.brackets().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSchedule {
    name: String,
    brackets: Vec<Bracket>,
}

impl BracketSchedule {
    /// Builds a validated schedule from its brackets.
    ///
    /// # Arguments
    ///
    /// * `name` - Identifies the schedule in error messages (e.g.,
    ///   "monthly_withholding")
    /// * `brackets` - The brackets in ascending order
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] if any invariant is
    /// violated: empty schedule, non-increasing bounds, a bounded final
    /// bracket, an unbounded bracket before the last position, a negative
    /// rate, or a rate lower than the previous bracket's.
    pub fn new(name: impl Into<String>, brackets: Vec<Bracket>) -> EngineResult<Self> {
        let name = name.into();

        let invalid = |message: &str| EngineError::InvalidSchedule {
            schedule: name.clone(),
            message: message.to_string(),
        };

        let last_index = match brackets.len().checked_sub(1) {
            Some(i) => i,
            None => return Err(invalid("schedule must contain at least one bracket")),
        };

        let mut previous_bound = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            match bracket.upper_bound {
                Some(bound) => {
                    if index == last_index {
                        return Err(invalid("final bracket must be unbounded"));
                    }
                    if bound <= previous_bound {
                        return Err(invalid("bracket bounds must be strictly increasing"));
                    }
                    previous_bound = bound;
                }
                None => {
                    if index != last_index {
                        return Err(invalid("only the final bracket may be unbounded"));
                    }
                }
            }

            if bracket.rate < Decimal::ZERO {
                return Err(invalid("bracket rates must be non-negative"));
            }
            if bracket.rate < previous_rate {
                return Err(invalid("bracket rates must be non-decreasing"));
            }
            previous_rate = bracket.rate;
        }

        Ok(Self { name, brackets })
    }

    /// Returns the schedule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Returns the marginal rate of the highest bracket.
    pub fn top_rate(&self) -> Decimal {
        // new() guarantees at least one bracket
        self.brackets
            .last()
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the marginal rate that applies to the last unit of `base`.
    ///
    /// A base of zero (or below) falls in the first bracket.
    pub fn marginal_rate_for(&self, base: Decimal) -> Decimal {
        for bracket in &self.brackets {
            match bracket.upper_bound {
                Some(bound) if base > bound => continue,
                _ => return bracket.rate,
            }
        }
        self.top_rate()
    }
}

/// One line of a per-bracket breakdown.
///
/// Captures how much of the base fell in the bracket and the tax that
/// slice generated, so presentation code can render the bracket table
/// the simulators show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketLine {
    /// Zero-based index of the bracket in the schedule.
    pub bracket_index: usize,
    /// The slice of the base amount that fell inside this bracket.
    pub amount_taxed: Decimal,
    /// The marginal rate applied to the slice.
    pub rate: Decimal,
    /// Tax generated by this slice (`amount_taxed * rate`).
    pub tax: Decimal,
}

/// The result of applying a schedule to a base amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketResult {
    /// One line per bracket, in ascending bracket order. Brackets past
    /// the base still appear, with a zero slice.
    pub lines: Vec<BracketLine>,
    /// Sum of the per-line tax amounts.
    pub total_due: Decimal,
}
