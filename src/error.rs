//! Error types for the tax/contribution engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading reference tables
//! or running a simulation.

use thiserror::Error;

/// The main error type for the tax/contribution engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tributo_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/2024.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/2024.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A bracket schedule failed validation at construction time.
    ///
    /// Schedules are validated when built so that a malformed table can
    /// never silently produce wrong answers for arbitrarily many calls.
    #[error("Invalid bracket schedule '{schedule}': {message}")]
    InvalidSchedule {
        /// The name of the offending schedule (e.g., "monthly_withholding").
        schedule: String,
        /// A description of the validation failure.
        message: String,
    },

    /// No reference table exists for the requested year.
    #[error("No reference table for year {year}")]
    TableNotFound {
        /// The year that was requested.
        year: i32,
    },

    /// An input field was invalid (negative money amount, missing
    /// voluntary sub-plan, and similar caller errors).
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A simulation snapshot could not be encoded as JSON.
    #[error("Failed to encode simulation snapshot: {message}")]
    SnapshotEncode {
        /// A description of the encoding failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
