//! Annual income tax (IRPF) calculation.
//!
//! Computes the tax due under the complete (itemized) and simplified
//! (flat discount) regimes side by side, recommends the cheaper one and
//! classifies the balance against tax already withheld at source.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::ReferenceTable;
use crate::error::EngineResult;
use crate::models::{
    BalanceKind, IncomeTaxInput, IncomeTaxResult, Regime, RegimeOutcome,
};

use super::bracket::apply_schedule;
use super::common::{floor_at_zero, round_half_up};

/// Computes the annual income tax simulation.
///
/// Both regimes are always evaluated:
///
/// - *Complete*: taxable income minus itemized deductions (social
///   security paid, medical expenses uncapped, education expenses
///   capped per person, the per-dependent deduction, alimony and
///   cash-book deductions).
/// - *Simplified*: taxable income minus the flat discount
///   (`taxable * discount rate`, capped at the yearly ceiling).
///
/// Bases are floored at zero before the bracket walk. The recommended
/// regime is the one with strictly lower tax due; on exact equality the
/// complete regime wins, since it exposes a documented-deduction audit
/// trail.
///
/// The education cap is applied per person: taxpayer plus dependents.
///
/// The balance and the bracket breakdown follow the regime in effect:
/// the regime chosen on the form, or the recommendation when the form
/// left the choice open.
///
/// # Arguments
///
/// * `input` - The simulation input; validated before computation
/// * `table` - The yearly reference table (constants and the annual
///   income-tax schedule)
///
/// # Returns
///
/// Returns the two regime outcomes, the recommendation, the bracket
/// breakdown for the regime in effect and the three-way balance
/// classification, or [`crate::error::EngineError::InvalidInput`] when
/// a monetary field is negative.
pub fn calculate_income_tax(
    input: &IncomeTaxInput,
    table: &ReferenceTable,
) -> EngineResult<IncomeTaxResult> {
    input.validate()?;

    let schedule = table.annual_income_tax();

    // Complete regime: itemized deductions
    let education_cap = table.education_cap * Decimal::from(input.dependents + 1);
    let education_allowed = input.education_expenses.min(education_cap);
    let dependents_deduction = table.dependent_deduction * Decimal::from(input.dependents);

    let complete_deduction = round_half_up(
        input.social_security_paid
            + input.medical_expenses
            + education_allowed
            + dependents_deduction
            + input.alimony_paid
            + input.cash_book_deductions,
    );
    let complete_base = floor_at_zero(input.taxable_income - complete_deduction);
    let complete_breakdown = apply_schedule(schedule, complete_base);

    // Simplified regime: flat discount up to the ceiling
    let simplified_deduction = round_half_up(
        (input.taxable_income * table.simplified_discount_rate)
            .min(table.simplified_discount_ceiling),
    );
    let simplified_base = floor_at_zero(input.taxable_income - simplified_deduction);
    let simplified_breakdown = apply_schedule(schedule, simplified_base);

    let complete = RegimeOutcome {
        regime: Regime::Complete,
        deduction_total: complete_deduction,
        taxable_base: complete_base,
        tax_due: complete_breakdown.total_due,
    };
    let simplified = RegimeOutcome {
        regime: Regime::Simplified,
        deduction_total: simplified_deduction,
        taxable_base: simplified_base,
        tax_due: simplified_breakdown.total_due,
    };

    // Ties go to the complete regime
    let recommended = if simplified.tax_due < complete.tax_due {
        Regime::Simplified
    } else {
        Regime::Complete
    };
    let in_effect = input.chosen_regime.unwrap_or(recommended);
    let (tax_due, breakdown) = match in_effect {
        Regime::Complete => (complete.tax_due, complete_breakdown),
        Regime::Simplified => (simplified.tax_due, simplified_breakdown),
    };

    debug!(
        complete_tax = %complete.tax_due,
        simplified_tax = %simplified.tax_due,
        recommended = ?recommended,
        in_effect = ?in_effect,
        "regime comparison"
    );

    let balance = tax_due - input.tax_withheld;
    let balance_kind = if balance > Decimal::ZERO {
        BalanceKind::Owes
    } else if balance < Decimal::ZERO {
        BalanceKind::Refund
    } else {
        BalanceKind::Zero
    };

    Ok(IncomeTaxResult {
        complete,
        simplified,
        recommended,
        in_effect,
        breakdown,
        balance,
        balance_kind,
        exempt_income: input.exempt_income,
    })
}
