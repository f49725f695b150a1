//! Yearly reference tables.
//!
//! Reference constants (minimum wage, contribution ceiling, deduction
//! ceilings) and bracket schedules change every year by decree. They are
//! modeled as immutable per-year [`ReferenceTable`] values supplied to
//! each computation, so a new year means new configuration, never edited
//! logic. Two built-in tables ship as fallbacks for callers that do not
//! load their own files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Bracket, BracketSchedule};

/// Raw, unvalidated reference-table file structure.
///
/// Deserialized from a yearly YAML file and converted into a validated
/// [`ReferenceTable`] via [`ReferenceTable::from_config`].
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceTableConfig {
    /// Calendar year the table applies to.
    pub year: i32,
    /// Date the table took effect.
    pub effective_date: NaiveDate,
    /// Monthly minimum wage.
    pub minimum_wage: Decimal,
    /// Monthly social-security contribution ceiling.
    pub contribution_ceiling: Decimal,
    /// Annual income-tax deduction per dependent.
    pub dependent_deduction: Decimal,
    /// Annual education-expense deduction cap, per person.
    pub education_cap: Decimal,
    /// Simplified-regime discount rate (0.20).
    pub simplified_discount_rate: Decimal,
    /// Simplified-regime discount ceiling.
    pub simplified_discount_ceiling: Decimal,
    /// Flat rate for self-employed contributors.
    pub self_employed_rate: Decimal,
    /// Micro-entrepreneur rate over the minimum wage.
    pub mei_rate: Decimal,
    /// Voluntary low-income plan rate over the minimum wage.
    pub voluntary_low_income_rate: Decimal,
    /// Voluntary standard plan rate.
    pub voluntary_standard_rate: Decimal,
    /// Voluntary full plan rate.
    pub voluntary_full_rate: Decimal,
    /// Social-security rate withheld from pro-labore.
    pub prolabore_inss_rate: Decimal,
    /// Annual income-tax brackets.
    pub annual_income_tax: Vec<Bracket>,
    /// Monthly income-tax withholding brackets.
    pub monthly_withholding: Vec<Bracket>,
    /// Progressive employee social-security brackets.
    pub employee_inss: Vec<Bracket>,
}

/// A validated, immutable reference table for one calendar year.
///
/// Construction validates all three bracket schedules, so a table in
/// hand is always safe to compute with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceTable {
    /// Calendar year the table applies to.
    pub year: i32,
    /// Date the table took effect.
    pub effective_date: NaiveDate,
    /// Monthly minimum wage.
    pub minimum_wage: Decimal,
    /// Monthly social-security contribution ceiling.
    pub contribution_ceiling: Decimal,
    /// Annual income-tax deduction per dependent.
    pub dependent_deduction: Decimal,
    /// Annual education-expense deduction cap, per person.
    pub education_cap: Decimal,
    /// Simplified-regime discount rate.
    pub simplified_discount_rate: Decimal,
    /// Simplified-regime discount ceiling.
    pub simplified_discount_ceiling: Decimal,
    /// Flat rate for self-employed contributors.
    pub self_employed_rate: Decimal,
    /// Micro-entrepreneur rate over the minimum wage.
    pub mei_rate: Decimal,
    /// Voluntary low-income plan rate over the minimum wage.
    pub voluntary_low_income_rate: Decimal,
    /// Voluntary standard plan rate.
    pub voluntary_standard_rate: Decimal,
    /// Voluntary full plan rate.
    pub voluntary_full_rate: Decimal,
    /// Social-security rate withheld from pro-labore.
    pub prolabore_inss_rate: Decimal,
    annual_income_tax: BracketSchedule,
    monthly_withholding: BracketSchedule,
    employee_inss: BracketSchedule,
}

/// Shorthand for decimal constants in the built-in tables.
fn d(mantissa: i64, scale: u32) -> Decimal {
    Decimal::new(mantissa, scale)
}

fn br(upper: Option<Decimal>, rate: Decimal, deduction: Decimal) -> Bracket {
    Bracket {
        upper_bound: upper,
        rate,
        cumulative_deduction: deduction,
    }
}

impl ReferenceTable {
    /// Validates a raw config into a usable reference table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] if any of the three
    /// bracket schedules violates the schedule invariants, or
    /// [`EngineError::InvalidInput`] if a reference constant is negative.
    pub fn from_config(config: ReferenceTableConfig) -> EngineResult<Self> {
        let constants = [
            ("minimum_wage", config.minimum_wage),
            ("contribution_ceiling", config.contribution_ceiling),
            ("dependent_deduction", config.dependent_deduction),
            ("education_cap", config.education_cap),
            ("simplified_discount_rate", config.simplified_discount_rate),
            (
                "simplified_discount_ceiling",
                config.simplified_discount_ceiling,
            ),
            ("self_employed_rate", config.self_employed_rate),
            ("mei_rate", config.mei_rate),
            ("voluntary_low_income_rate", config.voluntary_low_income_rate),
            ("voluntary_standard_rate", config.voluntary_standard_rate),
            ("voluntary_full_rate", config.voluntary_full_rate),
            ("prolabore_inss_rate", config.prolabore_inss_rate),
        ];
        for (field, value) in constants {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: "cannot be negative".to_string(),
                });
            }
        }

        Ok(Self {
            year: config.year,
            effective_date: config.effective_date,
            minimum_wage: config.minimum_wage,
            contribution_ceiling: config.contribution_ceiling,
            dependent_deduction: config.dependent_deduction,
            education_cap: config.education_cap,
            simplified_discount_rate: config.simplified_discount_rate,
            simplified_discount_ceiling: config.simplified_discount_ceiling,
            self_employed_rate: config.self_employed_rate,
            mei_rate: config.mei_rate,
            voluntary_low_income_rate: config.voluntary_low_income_rate,
            voluntary_standard_rate: config.voluntary_standard_rate,
            voluntary_full_rate: config.voluntary_full_rate,
            prolabore_inss_rate: config.prolabore_inss_rate,
            annual_income_tax: BracketSchedule::new(
                "annual_income_tax",
                config.annual_income_tax,
            )?,
            monthly_withholding: BracketSchedule::new(
                "monthly_withholding",
                config.monthly_withholding,
            )?,
            employee_inss: BracketSchedule::new("employee_inss", config.employee_inss)?,
        })
    }

    /// Returns the annual income-tax schedule.
    pub fn annual_income_tax(&self) -> &BracketSchedule {
        &self.annual_income_tax
    }

    /// Returns the monthly withholding schedule.
    pub fn monthly_withholding(&self) -> &BracketSchedule {
        &self.monthly_withholding
    }

    /// Returns the progressive employee social-security schedule.
    pub fn employee_inss(&self) -> &BracketSchedule {
        &self.employee_inss
    }

    /// The built-in 2024 reference table.
    ///
    /// Minimum wage 1,412.00; contribution ceiling 7,786.02; the
    /// February 2024 monthly withholding table.
    ///
    /// # Errors
    ///
    /// Propagates schedule validation, which cannot fail for the
    /// shipped constants.
    pub fn builtin_2024() -> EngineResult<Self> {
        Self::from_config(ReferenceTableConfig {
            year: 2024,
            effective_date: NaiveDate::from_ymd_opt(2024, 2, 1).ok_or_else(|| {
                EngineError::InvalidInput {
                    field: "effective_date".to_string(),
                    message: "invalid built-in date".to_string(),
                }
            })?,
            minimum_wage: d(1_412_00, 2),
            contribution_ceiling: d(7_786_02, 2),
            dependent_deduction: d(2_275_08, 2),
            education_cap: d(3_561_50, 2),
            simplified_discount_rate: d(20, 2),
            simplified_discount_ceiling: d(16_754_34, 2),
            self_employed_rate: d(20, 2),
            mei_rate: d(5, 2),
            voluntary_low_income_rate: d(5, 2),
            voluntary_standard_rate: d(11, 2),
            voluntary_full_rate: d(20, 2),
            prolabore_inss_rate: d(11, 2),
            annual_income_tax: Self::annual_income_tax_brackets(),
            monthly_withholding: vec![
                br(Some(d(2_259_20, 2)), Decimal::ZERO, Decimal::ZERO),
                br(Some(d(2_826_65, 2)), d(75, 3), d(169_44, 2)),
                br(Some(d(3_751_05, 2)), d(15, 2), d(381_44, 2)),
                br(Some(d(4_664_68, 2)), d(225, 3), d(662_77, 2)),
                br(None, d(275, 3), d(896_00, 2)),
            ],
            employee_inss: vec![
                br(Some(d(1_412_00, 2)), d(75, 3), Decimal::ZERO),
                br(Some(d(2_666_68, 2)), d(9, 2), d(21_18, 2)),
                br(Some(d(4_000_03, 2)), d(12, 2), d(101_18, 2)),
                br(None, d(14, 2), d(181_18, 2)),
            ],
        })
    }

    /// The built-in 2025 reference table.
    ///
    /// Minimum wage 1,518.00; contribution ceiling 8,157.41; the May
    /// 2025 monthly withholding table.
    ///
    /// # Errors
    ///
    /// Propagates schedule validation, which cannot fail for the
    /// shipped constants.
    pub fn builtin_2025() -> EngineResult<Self> {
        Self::from_config(ReferenceTableConfig {
            year: 2025,
            effective_date: NaiveDate::from_ymd_opt(2025, 5, 1).ok_or_else(|| {
                EngineError::InvalidInput {
                    field: "effective_date".to_string(),
                    message: "invalid built-in date".to_string(),
                }
            })?,
            minimum_wage: d(1_518_00, 2),
            contribution_ceiling: d(8_157_41, 2),
            dependent_deduction: d(2_275_08, 2),
            education_cap: d(3_561_50, 2),
            simplified_discount_rate: d(20, 2),
            simplified_discount_ceiling: d(16_754_34, 2),
            self_employed_rate: d(20, 2),
            mei_rate: d(5, 2),
            voluntary_low_income_rate: d(5, 2),
            voluntary_standard_rate: d(11, 2),
            voluntary_full_rate: d(20, 2),
            prolabore_inss_rate: d(11, 2),
            annual_income_tax: Self::annual_income_tax_brackets(),
            monthly_withholding: vec![
                br(Some(d(2_428_80, 2)), Decimal::ZERO, Decimal::ZERO),
                br(Some(d(2_826_65, 2)), d(75, 3), d(182_16, 2)),
                br(Some(d(3_751_05, 2)), d(15, 2), d(394_16, 2)),
                br(Some(d(4_664_68, 2)), d(225, 3), d(675_49, 2)),
                br(None, d(275, 3), d(908_73, 2)),
            ],
            employee_inss: vec![
                br(Some(d(1_518_00, 2)), d(75, 3), Decimal::ZERO),
                br(Some(d(2_793_88, 2)), d(9, 2), d(22_77, 2)),
                br(Some(d(4_190_83, 2)), d(12, 2), d(106_59, 2)),
                br(None, d(14, 2), d(190_40, 2)),
            ],
        })
    }

    // The annual IRPF table has been frozen since calendar year 2015.
    fn annual_income_tax_brackets() -> Vec<Bracket> {
        vec![
            br(Some(d(24_511_92, 2)), Decimal::ZERO, Decimal::ZERO),
            br(Some(d(33_919_80, 2)), d(75, 3), d(1_838_39, 2)),
            br(Some(d(45_012_60, 2)), d(15, 2), d(4_382_38, 2)),
            br(Some(d(55_976_16, 2)), d(225, 3), d(7_758_32, 2)),
            br(None, d(275, 3), d(10_557_13, 2)),
        ]
    }
}

/// An immutable set of reference tables, one per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSet {
    /// Tables sorted by year, oldest first.
    tables: Vec<ReferenceTable>,
}

impl TableSet {
    /// Creates a table set, sorting tables by year (oldest first).
    pub fn new(tables: Vec<ReferenceTable>) -> Self {
        let mut sorted = tables;
        sorted.sort_by_key(|t| t.year);
        Self { tables: sorted }
    }

    /// Returns the table for the given year.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TableNotFound`] when no table exists for
    /// the year.
    pub fn for_year(&self, year: i32) -> EngineResult<&ReferenceTable> {
        self.tables
            .iter()
            .find(|t| t.year == year)
            .ok_or(EngineError::TableNotFound { year })
    }

    /// Returns the most recent table, or `None` when the set is empty.
    pub fn latest(&self) -> Option<&ReferenceTable> {
        self.tables.last()
    }

    /// Returns all tables, oldest first.
    pub fn tables(&self) -> &[ReferenceTable] {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_builtin_2024_constants() {
        let table = ReferenceTable::builtin_2024().unwrap();
        assert_eq!(table.year, 2024);
        assert_eq!(table.minimum_wage, dec("1412.00"));
        assert_eq!(table.contribution_ceiling, dec("7786.02"));
        assert_eq!(table.dependent_deduction, dec("2275.08"));
        assert_eq!(table.employee_inss().top_rate(), dec("0.14"));
        assert_eq!(table.monthly_withholding().top_rate(), dec("0.275"));
    }

    #[test]
    fn test_builtin_2025_constants() {
        let table = ReferenceTable::builtin_2025().unwrap();
        assert_eq!(table.year, 2025);
        assert_eq!(table.minimum_wage, dec("1518.00"));
        assert_eq!(table.contribution_ceiling, dec("8157.41"));
        assert_eq!(table.annual_income_tax().top_rate(), dec("0.275"));
    }

    #[test]
    fn test_negative_constant_is_rejected() {
        let table = ReferenceTable::builtin_2025().unwrap();
        let mut config = raw_config_from(&table);
        config.minimum_wage = dec("-1");

        let err = ReferenceTable::from_config(config).unwrap_err();
        assert!(err.to_string().contains("minimum_wage"));
    }

    #[test]
    fn test_malformed_schedule_is_rejected_at_construction() {
        let table = ReferenceTable::builtin_2025().unwrap();
        let mut config = raw_config_from(&table);
        // Drop the unbounded final bracket
        config.monthly_withholding.pop();

        let err = ReferenceTable::from_config(config).unwrap_err();
        assert!(
            err.to_string()
                .contains("Invalid bracket schedule 'monthly_withholding'")
        );
    }

    #[test]
    fn test_table_set_lookup_by_year() {
        let set = TableSet::new(vec![
            ReferenceTable::builtin_2025().unwrap(),
            ReferenceTable::builtin_2024().unwrap(),
        ]);

        assert_eq!(set.for_year(2024).unwrap().year, 2024);
        assert_eq!(set.latest().unwrap().year, 2025);
        assert!(matches!(
            set.for_year(2019),
            Err(EngineError::TableNotFound { year: 2019 })
        ));
    }

    #[test]
    fn test_empty_table_set_has_no_latest() {
        let set = TableSet::new(vec![]);
        assert!(set.latest().is_none());
    }

    fn raw_config_from(table: &ReferenceTable) -> ReferenceTableConfig {
        ReferenceTableConfig {
            year: table.year,
            effective_date: table.effective_date,
            minimum_wage: table.minimum_wage,
            contribution_ceiling: table.contribution_ceiling,
            dependent_deduction: table.dependent_deduction,
            education_cap: table.education_cap,
            simplified_discount_rate: table.simplified_discount_rate,
            simplified_discount_ceiling: table.simplified_discount_ceiling,
            self_employed_rate: table.self_employed_rate,
            mei_rate: table.mei_rate,
            voluntary_low_income_rate: table.voluntary_low_income_rate,
            voluntary_standard_rate: table.voluntary_standard_rate,
            voluntary_full_rate: table.voluntary_full_rate,
            prolabore_inss_rate: table.prolabore_inss_rate,
            annual_income_tax: table.annual_income_tax().brackets().to_vec(),
            monthly_withholding: table.monthly_withholding().brackets().to_vec(),
            employee_inss: table.employee_inss().brackets().to_vec(),
        }
    }
}
