//! Error types for the statement model.
//!
//! These cover construction-time validation only. Data-driven gaps during
//! analysis (missing fields, zero denominators, thin history) are not errors;
//! they are enumerated [`Reason`](crate::types::Reason) outcomes.

use thiserror::Error;

/// A specialized Result type for statement model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while assembling statement data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A statement for this year already exists in the series.
    #[error("Duplicate period: statement for {year} already present for {company}")]
    DuplicatePeriod {
        /// Company the series belongs to.
        company: String,
        /// Offending fiscal year.
        year: i32,
    },

    /// The statement's currency does not match the rest of the series.
    #[error("Currency mismatch: series is {expected}, statement for {year} is {found}")]
    CurrencyMismatch {
        /// Currency of the existing series.
        expected: String,
        /// Currency of the rejected statement.
        found: String,
        /// Fiscal year of the rejected statement.
        year: i32,
    },

    /// Operation requires at least one statement.
    #[error("Empty series: {company} has no statements")]
    EmptySeries {
        /// Company the series belongs to.
        company: String,
    },
}

impl ModelError {
    /// Creates a duplicate period error.
    #[must_use]
    pub fn duplicate_period(company: impl Into<String>, year: i32) -> Self {
        Self::DuplicatePeriod {
            company: company.into(),
            year,
        }
    }

    /// Creates an empty series error.
    #[must_use]
    pub fn empty_series(company: impl Into<String>) -> Self {
        Self::EmptySeries {
            company: company.into(),
        }
    }
}
