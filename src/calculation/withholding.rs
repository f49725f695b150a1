//! Pro-labore withholding calculation.
//!
//! Chains the flat social-security deduction into the monthly
//! income-tax withholding table and produces the net payout plus an
//! annualized projection.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::ReferenceTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{AnnualProjection, PROJECTION_BASIS, WithholdingResult};

use super::bracket::apply_schedule;
use super::common::{floor_at_zero, round_half_up};

/// Computes the withholding on a gross monthly pro-labore.
///
/// Steps:
///
/// 1. Social-security deduction: `min(gross, ceiling)` times the
///    pro-labore rate (11%).
/// 2. Income-tax base: gross minus the deduction, floored at zero.
/// 3. Income tax withheld: monthly withholding schedule applied to the
///    base, floored at zero. (Tables published in `rate * base -
///    deduction` form can go negative near a bracket boundary; the
///    slice walk cannot, but the floor is kept as a hard guarantee.)
/// 4. Net payout: gross minus both deductions.
/// 5. Annualized view: every figure times twelve, labeled
///    [`PROJECTION_BASIS`] so it is never mistaken for a tax-year
///    calculation.
///
/// A gross below the minimum wage is still computed; the result only
/// flags the condition through `below_minimum_wage`.
///
/// # Arguments
///
/// * `gross` - Gross monthly pro-labore
/// * `table` - The yearly reference table (constants and the monthly
///   withholding schedule)
///
/// # Returns
///
/// Returns the full deduction chain and net payout, or
/// [`EngineError::InvalidInput`] when `gross` is negative.
pub fn calculate_withholding(
    gross: Decimal,
    table: &ReferenceTable,
) -> EngineResult<WithholdingResult> {
    if gross < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "gross".to_string(),
            message: "cannot be negative".to_string(),
        });
    }

    let schedule = table.monthly_withholding();

    let inss_deduction = round_half_up(gross.min(table.contribution_ceiling) * table.prolabore_inss_rate);
    let income_tax_base = floor_at_zero(gross - inss_deduction);

    let breakdown = apply_schedule(schedule, income_tax_base);
    let income_tax_withheld = floor_at_zero(breakdown.total_due);
    let marginal_rate = schedule.marginal_rate_for(income_tax_base);

    let total_deductions = inss_deduction + income_tax_withheld;
    let net = gross - total_deductions;

    let below_minimum_wage = gross < table.minimum_wage;
    if below_minimum_wage {
        warn!(%gross, minimum_wage = %table.minimum_wage, "pro-labore below minimum wage");
    }
    debug!(%gross, %inss_deduction, %income_tax_withheld, %net, "withholding computed");

    let twelve = Decimal::from(12);

    Ok(WithholdingResult {
        gross,
        inss_deduction,
        income_tax_base,
        income_tax_withheld,
        marginal_rate,
        breakdown,
        total_deductions,
        net,
        below_minimum_wage,
        minimum_wage: table.minimum_wage,
        annualized: AnnualProjection {
            basis: PROJECTION_BASIS,
            gross: gross * twelve,
            inss_deduction: inss_deduction * twelve,
            income_tax_withheld: income_tax_withheld * twelve,
            net: net * twelve,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn table() -> ReferenceTable {
        ReferenceTable::builtin_2024().unwrap()
    }

    #[test]
    fn test_below_minimum_wage_is_computed_and_flagged() {
        let result = calculate_withholding(dec("1000.00"), &table()).unwrap();

        assert_eq!(result.inss_deduction, dec("110.00"));
        assert_eq!(result.income_tax_base, dec("890.00"));
        // 890.00 sits inside the exempt withholding band
        assert_eq!(result.income_tax_withheld, Decimal::ZERO);
        assert_eq!(result.net, dec("890.00"));
        assert!(result.below_minimum_wage);
    }

    #[test]
    fn test_minimum_wage_gross_is_not_flagged() {
        let result = calculate_withholding(dec("1412.00"), &table()).unwrap();
        assert!(!result.below_minimum_wage);
    }

    #[test]
    fn test_deduction_chain_on_mid_range_gross() {
        let result = calculate_withholding(dec("5000.00"), &table()).unwrap();

        // INSS: 5,000 x 11%
        assert_eq!(result.inss_deduction, dec("550.00"));
        assert_eq!(result.income_tax_base, dec("4450.00"));
        // Slice walk over the 2024 monthly table:
        // 567.45 x 7.5% + 924.40 x 15% + 698.95 x 22.5%
        assert_eq!(result.income_tax_withheld, dec("338.48"));
        assert_eq!(result.marginal_rate, dec("0.225"));
        assert_eq!(result.total_deductions, dec("888.48"));
        assert_eq!(result.net, dec("4111.52"));
    }

    #[test]
    fn test_inss_is_capped_at_ceiling() {
        let result = calculate_withholding(dec("30000.00"), &table()).unwrap();

        // 11% of the 7,786.02 ceiling, not of the gross
        assert_eq!(result.inss_deduction, dec("856.46"));
        assert_eq!(result.marginal_rate, dec("0.275"));
    }

    #[test]
    fn test_zero_gross_is_degenerate_but_valid() {
        let result = calculate_withholding(Decimal::ZERO, &table()).unwrap();

        assert_eq!(result.inss_deduction, Decimal::ZERO);
        assert_eq!(result.income_tax_withheld, Decimal::ZERO);
        assert_eq!(result.net, Decimal::ZERO);
        assert!(result.below_minimum_wage);
    }

    #[test]
    fn test_negative_gross_is_rejected() {
        let err = calculate_withholding(dec("-100"), &table()).unwrap_err();
        assert!(err.to_string().contains("gross"));
    }

    #[test]
    fn test_annualized_projection_is_twelve_times_monthly() {
        let result = calculate_withholding(dec("5000.00"), &table()).unwrap();
        let annual = &result.annualized;

        assert_eq!(annual.basis, PROJECTION_BASIS);
        assert_eq!(annual.gross, dec("60000.00"));
        assert_eq!(annual.inss_deduction, result.inss_deduction * Decimal::from(12));
        assert_eq!(annual.net, result.net * Decimal::from(12));
    }

    #[test]
    fn test_net_plus_deductions_equals_gross() {
        for gross in ["1000.00", "3333.33", "7786.02", "15000.00"] {
            let result = calculate_withholding(dec(gross), &table()).unwrap();
            assert_eq!(
                result.net + result.inss_deduction + result.income_tax_withheld,
                dec(gross)
            );
        }
    }
}
