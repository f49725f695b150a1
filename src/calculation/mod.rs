//! Calculation logic for the tax/contribution engine.
//!
//! This module contains the shared progressive-bracket primitive and
//! the three calculators built on top of it: annual income tax with
//! regime comparison, social-security contribution by category, and
//! pro-labore withholding.

mod bracket;
mod common;
mod contribution;
mod income_tax;
mod withholding;

pub use bracket::apply_schedule;
pub use common::{floor_at_zero, round_half_up};
pub use contribution::calculate_contribution;
pub use income_tax::calculate_income_tax;
pub use withholding::calculate_withholding;
