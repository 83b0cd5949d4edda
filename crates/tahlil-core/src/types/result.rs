//! Per-unit analysis results.
//!
//! An [`AnalysisResult`] is created once per orchestrator run and never
//! mutated. Its rating is derivable solely from the raw value, the unit's
//! direction and its benchmark; no hidden state.

use super::{AnalysisValue, Bilingual, Category, Reason, Tier};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical classification of a value relative to its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingBand {
    /// Well ahead of the benchmark.
    Excellent,
    /// At or ahead of the benchmark.
    Good,
    /// Somewhat behind the benchmark.
    Acceptable,
    /// Clearly behind the benchmark.
    Weak,
    /// Balanced-direction value far from its benchmark; needs review.
    NeedsReview,
}

impl fmt::Display for RatingBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RatingBand::Excellent => "excellent",
            RatingBand::Good => "good",
            RatingBand::Acceptable => "acceptable",
            RatingBand::Weak => "weak",
            RatingBand::NeedsReview => "needs-review",
        };
        write!(f, "{label}")
    }
}

/// Completion state of one unit within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Value computed, rated and narrated.
    Computed,
    /// Not computable from the available data (expected, data-driven).
    Unavailable,
    /// The unit's formula raised an unexpected fault.
    Failed,
}

/// Where the benchmark used for classification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BenchmarkSource {
    /// Industry average table supplied in the company context.
    IndustryTable,
    /// Default benchmark declared on the unit descriptor.
    DescriptorDefault,
}

/// Benchmark comparison attached to a computed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Benchmark value the rating was derived from.
    pub benchmark: Decimal,
    /// Provenance of that benchmark.
    pub source: BenchmarkSource,
    /// Value minus benchmark.
    pub delta: Decimal,
    /// Value over benchmark, when the benchmark is nonzero.
    pub ratio: Option<Decimal>,
    /// Percentile within the peer distribution (0-100), when peers exist.
    pub peer_percentile: Option<Decimal>,
    /// Number of peer observations behind the percentile.
    pub peer_count: usize,
}

/// Output of one analysis unit for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unit identifier.
    pub id: String,
    /// Bilingual display name.
    pub name: Bilingual,
    /// Report category.
    pub category: Category,
    /// Sophistication tier.
    pub tier: Tier,
    /// Completion state.
    pub status: Status,
    /// Computed value; present only when `status == Computed`.
    pub value: Option<AnalysisValue>,
    /// Rating band; present only when `status == Computed`.
    pub rating: Option<RatingBand>,
    /// Benchmark comparison; present only when `status == Computed`.
    pub benchmark: Option<BenchmarkComparison>,
    /// Interpretation text; present only when `status == Computed`.
    pub interpretation: Option<Bilingual>,
    /// Recommendations (may be empty, e.g. for excellent ratings).
    pub recommendations: Vec<Bilingual>,
    /// Why the unit was unavailable; present only when `status == Unavailable`.
    pub unavailable_reason: Option<Reason>,
    /// Fault message; present only when `status == Failed`.
    pub failure: Option<String>,
}

impl AnalysisResult {
    /// True when the unit computed a value.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.status == Status::Computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_display() {
        assert_eq!(RatingBand::NeedsReview.to_string(), "needs-review");
        assert_eq!(RatingBand::Excellent.to_string(), "excellent");
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&Status::Unavailable).unwrap(),
            "\"unavailable\""
        );
    }
}
