//! Progressive Tax and Contribution Engine
//!
//! This crate provides the computational core behind three fiscal
//! simulators: annual income tax (IRPF) with complete/simplified regime
//! comparison, social-security contribution (INSS) by contributor
//! category, and pro-labore withholding. All three share a single
//! progressive-bracket primitive parameterized by yearly reference tables.
//!
//! Every computation is a pure function of its inputs and the supplied
//! [`config::ReferenceTable`]: no I/O, no shared mutable state, and exact
//! decimal arithmetic throughout.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
