//! Core data models for the tax/contribution engine.
//!
//! This module contains all the domain models used throughout the engine:
//! the validated bracket schedule, the three simulators' input and result
//! records, and the simulation snapshot callers forward to persistence.

mod contribution;
mod income_tax;
mod schedule;
mod snapshot;
mod withholding;

pub use contribution::{
    ContributionInput, ContributionResult, ContributorCategory, VoluntaryPlan,
};
pub use income_tax::{BalanceKind, IncomeTaxInput, IncomeTaxResult, Regime, RegimeOutcome};
pub use schedule::{Bracket, BracketLine, BracketResult, BracketSchedule};
pub use snapshot::{SimulationKind, SimulationSnapshot};
pub use withholding::{AnnualProjection, PROJECTION_BASIS, WithholdingResult};
