//! Computation outcomes.
//!
//! Every unit computation resolves to an [`Outcome`]: either a typed value or
//! an enumerated [`Reason`] why the value cannot be computed from the data at
//! hand. `NotComputable` is a result state, never an error; a ratio with a
//! zero denominator must not surface as `NaN`, `Infinity` or a panic.

use super::Field;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a unit could not be computed from the available data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Reason {
    /// A required statement field was not extracted.
    MissingField {
        /// The absent field.
        field: Field,
    },
    /// A denominator resolved to zero.
    DivisionByZero,
    /// The unit needs more periods than the series holds.
    InsufficientHistory {
        /// Periods the computation needs.
        needed: usize,
        /// Periods actually available.
        available: usize,
    },
    /// No peer observations exist for this unit.
    InsufficientPeerData,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::MissingField { field } => write!(f, "missing field {field}"),
            Reason::DivisionByZero => write!(f, "division by zero"),
            Reason::InsufficientHistory { needed, available } => {
                write!(f, "needs {needed} periods, {available} available")
            }
            Reason::InsufficientPeerData => write!(f, "insufficient peer data"),
        }
    }
}

/// One line of a structural breakdown (e.g. current assets share of total).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShare {
    /// Line item label (stable key, snake_case).
    pub item: String,
    /// Share of the structure base, in percent.
    pub percent: Decimal,
}

impl LineShare {
    /// Creates a breakdown line.
    #[must_use]
    pub fn new(item: impl Into<String>, percent: Decimal) -> Self {
        Self {
            item: item.into(),
            percent,
        }
    }
}

/// A computed analysis value.
///
/// The variant records the value's nature for presentation; classification
/// reads the scalar projection via [`AnalysisValue::scalar`]. Percentages are
/// held at full precision internally and rounded to one decimal place only at
/// the presentation boundary ([`AnalysisValue::display`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum AnalysisValue {
    /// Dimensionless multiple.
    Ratio(Decimal),
    /// Percentage (full precision).
    Percent(Decimal),
    /// Monetary amount in the statement currency.
    Amount(Decimal),
    /// Calendar days.
    Days(Decimal),
    /// Composite score or index.
    Score(Decimal),
    /// Growth from a zero prior: the `100%-from-zero` sentinel.
    ///
    /// A percentage change where the prior value is zero and the current
    /// value is positive has no defined growth rate; it is flagged rather
    /// than reported as infinite.
    GrowthFromZero,
    /// Structural breakdown with a headline share used for rating.
    Breakdown {
        /// Share used for classification (e.g. the structure's lead line).
        headline: Decimal,
        /// All lines of the breakdown.
        lines: Vec<LineShare>,
    },
}

impl AnalysisValue {
    /// Scalar projection used by the classifier.
    ///
    /// The from-zero growth sentinel classifies as a 100% increase.
    #[must_use]
    pub fn scalar(&self) -> Decimal {
        match self {
            AnalysisValue::Ratio(v)
            | AnalysisValue::Percent(v)
            | AnalysisValue::Amount(v)
            | AnalysisValue::Days(v)
            | AnalysisValue::Score(v) => *v,
            AnalysisValue::GrowthFromZero => dec!(100),
            AnalysisValue::Breakdown { headline, .. } => *headline,
        }
    }

    /// Presentation string with one-decimal rounding for percentages.
    ///
    /// This is the only place percent rounding happens; internal values keep
    /// full precision.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            AnalysisValue::Ratio(v) => format!("{:.2}x", v.round_dp(2)),
            AnalysisValue::Percent(v) => format!("{:.1}%", v.round_dp(1)),
            AnalysisValue::Amount(v) => format!("{}", v.round_dp(2)),
            AnalysisValue::Days(v) => format!("{:.1} days", v.round_dp(1)),
            AnalysisValue::Score(v) => format!("{:.2}", v.round_dp(2)),
            AnalysisValue::GrowthFromZero => "+100.0% (from zero)".to_string(),
            AnalysisValue::Breakdown { headline, .. } => {
                format!("{:.1}%", headline.round_dp(1))
            }
        }
    }
}

/// The result of evaluating one unit's formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Outcome {
    /// The unit produced a value.
    Value(AnalysisValue),
    /// The unit could not be computed from the available data.
    NotComputable(Reason),
}

impl Outcome {
    /// Shorthand for a ratio value.
    #[must_use]
    pub fn ratio(v: Decimal) -> Self {
        Outcome::Value(AnalysisValue::Ratio(v))
    }

    /// Shorthand for a percent value.
    #[must_use]
    pub fn percent(v: Decimal) -> Self {
        Outcome::Value(AnalysisValue::Percent(v))
    }

    /// Shorthand for a monetary amount.
    #[must_use]
    pub fn amount(v: Decimal) -> Self {
        Outcome::Value(AnalysisValue::Amount(v))
    }

    /// Shorthand for a day count.
    #[must_use]
    pub fn days(v: Decimal) -> Self {
        Outcome::Value(AnalysisValue::Days(v))
    }

    /// Shorthand for a score.
    #[must_use]
    pub fn score(v: Decimal) -> Self {
        Outcome::Value(AnalysisValue::Score(v))
    }

    /// Shorthand for a missing-field outcome.
    #[must_use]
    pub fn missing(field: Field) -> Self {
        Outcome::NotComputable(Reason::MissingField { field })
    }

    /// True when this outcome carries a value.
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    /// The value, if present.
    #[must_use]
    pub fn value(&self) -> Option<&AnalysisValue> {
        match self {
            Outcome::Value(v) => Some(v),
            Outcome::NotComputable(_) => None,
        }
    }
}
