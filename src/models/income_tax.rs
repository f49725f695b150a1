//! Annual income tax (IRPF) simulation models.
//!
//! This module defines the input record filled from the simulator form,
//! the two deduction regimes, and the result returned to presentation
//! code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::BracketResult;
use crate::error::{EngineError, EngineResult};

/// The deduction regime used to compute the taxable base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Itemized deductions (medical, education, dependents, alimony,
    /// cash-book, social security paid).
    Complete,
    /// Flat 20% discount on taxable income, capped at the yearly ceiling.
    Simplified,
}

/// Classification of the final balance against tax withheld at source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceKind {
    /// Tax due exceeds the amount withheld; the taxpayer owes the difference.
    Owes,
    /// Withholding exceeds tax due; the taxpayer is refunded the difference.
    Refund,
    /// Tax due and withholding match exactly.
    Zero,
}

/// Input record for an annual income tax simulation.
///
/// All monetary fields are non-negative; [`IncomeTaxInput::validate`]
/// rejects violations before any computation runs. Zero values are
/// valid, degenerate inputs (no income, no deductions), never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxInput {
    /// Annual taxable income.
    pub taxable_income: Decimal,
    /// Exempt and non-taxable income. Informational: excluded from the
    /// base, carried through for the caller's simulation snapshot.
    #[serde(default)]
    pub exempt_income: Decimal,
    /// Official social-security contribution paid over the year.
    #[serde(default)]
    pub social_security_paid: Decimal,
    /// Deductible medical expenses (uncapped).
    #[serde(default)]
    pub medical_expenses: Decimal,
    /// Deductible education expenses (capped per person by the yearly table).
    #[serde(default)]
    pub education_expenses: Decimal,
    /// Number of dependents.
    #[serde(default)]
    pub dependents: u32,
    /// Court-ordered alimony paid.
    #[serde(default)]
    pub alimony_paid: Decimal,
    /// Cash-book ("livro-caixa") deductions for self-employment.
    #[serde(default)]
    pub cash_book_deductions: Decimal,
    /// Income tax already withheld at source over the year.
    #[serde(default)]
    pub tax_withheld: Decimal,
    /// Regime the taxpayer chose on the form, if any. When absent the
    /// recommended regime is the one in effect.
    #[serde(default)]
    pub chosen_regime: Option<Regime>,
    /// Whether the taxpayer is 65 or older. Informational: the portal
    /// uses it to label the extra senior exemption already reported
    /// inside `exempt_income`.
    #[serde(default)]
    pub senior_citizen: bool,
}

impl IncomeTaxInput {
    /// Validates the input record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] naming the first monetary
    /// field found to be negative.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("taxable_income", self.taxable_income),
            ("exempt_income", self.exempt_income),
            ("social_security_paid", self.social_security_paid),
            ("medical_expenses", self.medical_expenses),
            ("education_expenses", self.education_expenses),
            ("alimony_paid", self.alimony_paid),
            ("cash_book_deductions", self.cash_book_deductions),
            ("tax_withheld", self.tax_withheld),
        ];

        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: "cannot be negative".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// The outcome of one deduction regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeOutcome {
    /// The regime this outcome belongs to.
    pub regime: Regime,
    /// Total deduction subtracted from taxable income.
    pub deduction_total: Decimal,
    /// Taxable base after deductions, floored at zero.
    pub taxable_base: Decimal,
    /// Tax due on the base under the progressive schedule.
    pub tax_due: Decimal,
}

/// The result of an annual income tax simulation.
///
/// Both regimes are always computed so the simulator can show the
/// side-by-side comparison; `recommended` is the cheaper of the two,
/// with ties resolved in favor of [`Regime::Complete`] (it exposes a
/// documented-deduction audit trail).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeTaxResult {
    /// Outcome under the complete (itemized) regime.
    pub complete: RegimeOutcome,
    /// Outcome under the simplified (flat discount) regime.
    pub simplified: RegimeOutcome,
    /// The regime with the lower tax due; `Complete` on ties.
    pub recommended: Regime,
    /// The regime actually in effect: the one chosen on the form, or
    /// the recommendation when none was chosen.
    pub in_effect: Regime,
    /// Per-bracket breakdown for the regime in effect.
    pub breakdown: BracketResult,
    /// `tax_due(in_effect) - tax_withheld`. Positive means amount
    /// owed, negative means refund.
    pub balance: Decimal,
    /// Three-way classification of `balance`.
    pub balance_kind: BalanceKind,
    /// Exempt income echoed from the input.
    pub exempt_income: Decimal,
}
