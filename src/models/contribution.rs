//! Social-security contribution (INSS) simulation models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::BracketResult;
use crate::error::{EngineError, EngineResult};

/// The contributor category selected on the simulator form.
///
/// Unknown category strings fail deserialization; there is no default
/// category to fall back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributorCategory {
    /// Salaried employee; contribution follows the progressive employee
    /// schedule up to the ceiling.
    Employee,
    /// Self-employed contributor ("contribuinte individual"); flat 20%.
    SelfEmployed,
    /// Micro-entrepreneur (MEI); fixed 5% of the minimum wage.
    MicroEntrepreneur,
    /// Voluntary ("facultativo") contributor; rate set by the sub-plan.
    Voluntary,
}

/// Sub-plan for [`ContributorCategory::Voluntary`] contributors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoluntaryPlan {
    /// 5% of the minimum wage (low-income simplified plan).
    LowIncomeSimplified,
    /// 11% of the declared amount, capped at the ceiling.
    Standard,
    /// 20% of the declared amount, capped at the ceiling.
    Full,
}

/// Input record for a contribution simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionInput {
    /// The contributor category.
    pub category: ContributorCategory,
    /// Declared (or actual) monthly amount. Ignored for
    /// `MicroEntrepreneur` and for the `LowIncomeSimplified` plan.
    #[serde(default)]
    pub declared_amount: Decimal,
    /// Sub-plan, required when `category` is `Voluntary`.
    #[serde(default)]
    pub voluntary_plan: Option<VoluntaryPlan>,
}

impl ContributionInput {
    /// Validates the input record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when `declared_amount` is
    /// negative, or when `category` is `Voluntary` and no sub-plan was
    /// supplied.
    pub fn validate(&self) -> EngineResult<()> {
        if self.declared_amount < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "declared_amount".to_string(),
                message: "cannot be negative".to_string(),
            });
        }

        if self.category == ContributorCategory::Voluntary && self.voluntary_plan.is_none() {
            return Err(EngineError::InvalidInput {
                field: "voluntary_plan".to_string(),
                message: "required for the voluntary category".to_string(),
            });
        }

        Ok(())
    }
}

/// The result of a contribution simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionResult {
    /// The category the result was computed for.
    pub category: ContributorCategory,
    /// The rate applied. For the employee category this is the marginal
    /// rate of the bracket the capped base landed in.
    pub applied_rate: Decimal,
    /// The monthly contribution owed.
    pub contribution: Decimal,
    /// Short human-readable explanation of how the amount was obtained.
    pub rationale: String,
    /// The minimum wage used, echoed from the reference table.
    pub minimum_wage: Decimal,
    /// The contribution ceiling used, echoed from the reference table.
    pub ceiling: Decimal,
    /// Per-bracket breakdown; present only for the employee category.
    pub breakdown: Option<BracketResult>,
}
