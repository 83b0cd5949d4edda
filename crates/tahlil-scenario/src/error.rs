//! Error types for the scenario sub-engine.

use thiserror::Error;

/// A specialized Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors raised while defining or running a scenario.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// An assumption fell outside its plausible bounds.
    #[error("Invalid assumption: {field} = {value} ({reason})")]
    InvalidAssumption {
        /// Assumption field name.
        field: &'static str,
        /// Rejected value.
        value: f64,
        /// Why it was rejected.
        reason: String,
    },

    /// The series holds no statement to project from.
    #[error("No baseline: the statement series is empty")]
    EmptyHistory,

    /// The latest statement is missing a figure projection needs.
    #[error("Missing baseline figure: {field}")]
    MissingBaseline {
        /// The absent statement field.
        field: &'static str,
    },

    /// A state-machine method was called out of order.
    #[error("Invalid scenario state: expected {expected}, was {actual}")]
    InvalidState {
        /// State the operation requires.
        expected: &'static str,
        /// State the scenario was in.
        actual: &'static str,
    },
}

impl ScenarioError {
    /// Creates an invalid-assumption error.
    #[must_use]
    pub fn invalid_assumption(
        field: &'static str,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAssumption {
            field,
            value,
            reason: reason.into(),
        }
    }
}
