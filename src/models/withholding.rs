//! Pro-labore withholding simulation models.

use rust_decimal::Decimal;
use serde::Serialize;

use super::schedule::BracketResult;

/// Label attached to [`AnnualProjection`] values.
///
/// The annual view is the monthly result multiplied by twelve. It is a
/// simple projection, not a distinct tax-year calculation; December is
/// computed no differently from any other month.
pub const PROJECTION_BASIS: &str = "monthly_x12";

/// Annualized (x12) projection of a monthly withholding result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnualProjection {
    /// How the projection was derived; always [`PROJECTION_BASIS`].
    pub basis: &'static str,
    /// Gross pro-labore over twelve months.
    pub gross: Decimal,
    /// Social-security deduction over twelve months.
    pub inss_deduction: Decimal,
    /// Income tax withheld over twelve months.
    pub income_tax_withheld: Decimal,
    /// Net payout over twelve months.
    pub net: Decimal,
}

/// The result of a pro-labore withholding simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithholdingResult {
    /// Gross monthly pro-labore, echoed from the input.
    pub gross: Decimal,
    /// Social-security deduction: 11% of the gross capped at the ceiling.
    pub inss_deduction: Decimal,
    /// Income tax base after the social-security deduction, floored at zero.
    pub income_tax_base: Decimal,
    /// Income tax withheld on the base, floored at zero.
    pub income_tax_withheld: Decimal,
    /// Marginal rate of the withholding bracket the base landed in.
    pub marginal_rate: Decimal,
    /// Per-bracket breakdown of the income tax withheld.
    pub breakdown: BracketResult,
    /// Sum of the social-security deduction and the income tax withheld.
    pub total_deductions: Decimal,
    /// Net monthly payout.
    pub net: Decimal,
    /// True when the gross is below the reference minimum wage. A
    /// pro-labore below the minimum wage is still computed, but the
    /// simulator must surface the condition instead of presenting the
    /// result as a normal case.
    pub below_minimum_wage: bool,
    /// The minimum wage used, echoed from the reference table.
    pub minimum_wage: Decimal,
    /// Annualized projection of the monthly figures.
    pub annualized: AnnualProjection,
}
