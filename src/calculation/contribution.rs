//! Social-security contribution (INSS) calculation.
//!
//! Each contributor category has its own rate rule: employees follow
//! the progressive schedule, the other categories use flat rates over
//! the declared amount or the minimum wage.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::ReferenceTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ContributionInput, ContributionResult, ContributorCategory, VoluntaryPlan,
};

use super::bracket::apply_schedule;
use super::common::round_half_up;

/// Computes the monthly social-security contribution for a category.
///
/// Rules, by category:
///
/// - `employee`: progressive schedule over `min(declared, ceiling)`,
///   with a final cap at `ceiling * top rate`;
/// - `self_employed`: flat 20% of `min(declared, ceiling)`;
/// - `micro_entrepreneur`: fixed 5% of the minimum wage; the declared
///   amount is ignored entirely;
/// - `voluntary`: the sub-plan picks the rate (5% of the minimum wage,
///   or 11% / 20% of `min(declared, ceiling)`).
///
/// No branch ever produces a negative contribution. Unknown categories
/// or sub-plans cannot reach this function: the enums deserialize
/// deny-by-default and the match below has no catch-all arm.
///
/// # Arguments
///
/// * `input` - Category, declared amount and optional voluntary sub-plan
/// * `table` - The yearly reference table
///
/// # Returns
///
/// Returns the applied rate, the contribution, a short rationale and
/// the reference constants used, or
/// [`crate::error::EngineError::InvalidInput`] when the declared amount
/// is negative or a voluntary contributor supplied no sub-plan.
pub fn calculate_contribution(
    input: &ContributionInput,
    table: &ReferenceTable,
) -> EngineResult<ContributionResult> {
    input.validate()?;

    let ceiling = table.contribution_ceiling;
    let minimum_wage = table.minimum_wage;
    let capped_base = input.declared_amount.min(ceiling);

    let (applied_rate, contribution, rationale, breakdown) = match input.category {
        ContributorCategory::Employee => {
            let schedule = table.employee_inss();
            let breakdown = apply_schedule(schedule, capped_base);
            // Belt-and-braces cap; the bracket walk already respects
            // the ceiling through the capped base
            let cap = round_half_up(ceiling * schedule.top_rate());
            let contribution = breakdown.total_due.min(cap);
            let rate = schedule.marginal_rate_for(capped_base);
            let rationale = format!(
                "progressive employee schedule over {capped_base}, capped at the {ceiling} ceiling"
            );
            (rate, contribution, rationale, Some(breakdown))
        }
        ContributorCategory::SelfEmployed => {
            let rate = table.self_employed_rate;
            let contribution = round_half_up(capped_base * rate);
            let rationale =
                format!("flat {rate} over {capped_base} (declared amount up to the ceiling)");
            (rate, contribution, rationale, None)
        }
        ContributorCategory::MicroEntrepreneur => {
            if input.declared_amount > Decimal::ZERO {
                debug!(
                    declared = %input.declared_amount,
                    "declared amount ignored for micro-entrepreneur"
                );
            }
            let rate = table.mei_rate;
            let contribution = round_half_up(minimum_wage * rate);
            let rationale = format!("fixed {rate} of the {minimum_wage} minimum wage");
            (rate, contribution, rationale, None)
        }
        ContributorCategory::Voluntary => match input.voluntary_plan.ok_or_else(|| {
            EngineError::InvalidInput {
                field: "voluntary_plan".to_string(),
                message: "required for the voluntary category".to_string(),
            }
        })? {
            VoluntaryPlan::LowIncomeSimplified => {
                let rate = table.voluntary_low_income_rate;
                let contribution = round_half_up(minimum_wage * rate);
                let rationale =
                    format!("low-income plan: {rate} of the {minimum_wage} minimum wage");
                (rate, contribution, rationale, None)
            }
            VoluntaryPlan::Standard => {
                let rate = table.voluntary_standard_rate;
                let contribution = round_half_up(capped_base * rate);
                let rationale = format!("standard plan: {rate} over {capped_base}");
                (rate, contribution, rationale, None)
            }
            VoluntaryPlan::Full => {
                let rate = table.voluntary_full_rate;
                let contribution = round_half_up(capped_base * rate);
                let rationale = format!("full plan: {rate} over {capped_base}");
                (rate, contribution, rationale, None)
            }
        },
    };

    Ok(ContributionResult {
        category: input.category,
        applied_rate,
        contribution,
        rationale,
        minimum_wage,
        ceiling,
        breakdown,
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

    fn input(category: ContributorCategory, declared: &str) -> ContributionInput {
        ContributionInput {
            category,
            declared_amount: dec(declared),
            voluntary_plan: None,
        }
    }

    #[test]
    fn test_employee_uses_progressive_schedule() {
        let result =
            calculate_contribution(&input(ContributorCategory::Employee, "3000.00"), &table())
                .unwrap();

        // 1412.00 x 7.5% + 1254.68 x 9% + 333.32 x 12%
        assert_eq!(result.contribution, dec("258.82"));
        assert_eq!(result.applied_rate, dec("0.12"));
        assert!(result.breakdown.is_some());
    }

    #[test]
    fn test_employee_base_is_capped_at_ceiling() {
        let at_ceiling =
            calculate_contribution(&input(ContributorCategory::Employee, "7786.02"), &table())
                .unwrap();
        let above_ceiling =
            calculate_contribution(&input(ContributorCategory::Employee, "50000.00"), &table())
                .unwrap();

        assert_eq!(at_ceiling.contribution, above_ceiling.contribution);
        assert_eq!(above_ceiling.applied_rate, dec("0.14"));
    }

    #[test]
    fn test_employee_contribution_never_exceeds_top_rate_cap() {
        let result =
            calculate_contribution(&input(ContributorCategory::Employee, "100000.00"), &table())
                .unwrap();
        let cap = round_half_up(dec("7786.02") * dec("0.14"));
        assert!(result.contribution <= cap);
    }

    #[test]
    fn test_self_employed_flat_rate() {
        let result = calculate_contribution(
            &input(ContributorCategory::SelfEmployed, "2500.00"),
            &table(),
        )
        .unwrap();

        assert_eq!(result.applied_rate, dec("0.20"));
        assert_eq!(result.contribution, dec("500.00"));
        assert!(result.breakdown.is_none());
    }

    #[test]
    fn test_self_employed_declared_amount_capped_at_ceiling() {
        let result = calculate_contribution(
            &input(ContributorCategory::SelfEmployed, "20000.00"),
            &table(),
        )
        .unwrap();

        // 20% of the 7,786.02 ceiling
        assert_eq!(result.contribution, dec("1557.20"));
    }

    #[test]
    fn test_micro_entrepreneur_fixed_amount() {
        let result = calculate_contribution(
            &input(ContributorCategory::MicroEntrepreneur, "0"),
            &table(),
        )
        .unwrap();

        assert_eq!(result.contribution, dec("70.60"));
        assert_eq!(result.applied_rate, dec("0.05"));
    }

    #[test]
    fn test_micro_entrepreneur_ignores_declared_amount() {
        let small = calculate_contribution(
            &input(ContributorCategory::MicroEntrepreneur, "0"),
            &table(),
        )
        .unwrap();
        let large = calculate_contribution(
            &input(ContributorCategory::MicroEntrepreneur, "999999.00"),
            &table(),
        )
        .unwrap();

        assert_eq!(small.contribution, dec("70.60"));
        assert_eq!(large.contribution, dec("70.60"));
    }

    #[test]
    fn test_voluntary_low_income_plan() {
        let input = ContributionInput {
            category: ContributorCategory::Voluntary,
            declared_amount: dec("5000.00"),
            voluntary_plan: Some(VoluntaryPlan::LowIncomeSimplified),
        };
        let result = calculate_contribution(&input, &table()).unwrap();

        // 5% of the minimum wage, regardless of the declared amount
        assert_eq!(result.contribution, dec("70.60"));
    }

    #[test]
    fn test_voluntary_standard_plan() {
        let input = ContributionInput {
            category: ContributorCategory::Voluntary,
            declared_amount: dec("2000.00"),
            voluntary_plan: Some(VoluntaryPlan::Standard),
        };
        let result = calculate_contribution(&input, &table()).unwrap();

        assert_eq!(result.applied_rate, dec("0.11"));
        assert_eq!(result.contribution, dec("220.00"));
    }

    #[test]
    fn test_voluntary_full_plan_capped_at_ceiling() {
        let input = ContributionInput {
            category: ContributorCategory::Voluntary,
            declared_amount: dec("10000.00"),
            voluntary_plan: Some(VoluntaryPlan::Full),
        };
        let result = calculate_contribution(&input, &table()).unwrap();

        assert_eq!(result.contribution, dec("1557.20"));
    }

    #[test]
    fn test_voluntary_without_plan_is_rejected() {
        let err = calculate_contribution(&input(ContributorCategory::Voluntary, "2000"), &table())
            .unwrap_err();
        assert!(err.to_string().contains("voluntary_plan"));
    }

    #[test]
    fn test_negative_declared_amount_is_rejected() {
        let err =
            calculate_contribution(&input(ContributorCategory::SelfEmployed, "-1"), &table())
                .unwrap_err();
        assert!(err.to_string().contains("declared_amount"));
    }

    #[test]
    fn test_contribution_is_never_negative() {
        for category in [
            ContributorCategory::Employee,
            ContributorCategory::SelfEmployed,
            ContributorCategory::MicroEntrepreneur,
        ] {
            let result = calculate_contribution(&input(category, "0"), &table()).unwrap();
            assert!(result.contribution >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_result_echoes_reference_constants() {
        let result = calculate_contribution(
            &input(ContributorCategory::MicroEntrepreneur, "0"),
            &table(),
        )
        .unwrap();

        assert_eq!(result.minimum_wage, dec("1412.00"));
        assert_eq!(result.ceiling, dec("7786.02"));
    }
}
