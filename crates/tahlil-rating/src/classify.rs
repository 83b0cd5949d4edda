//! Threshold classification of values against benchmarks.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tahlil_core::types::{Direction, RatingBand};

/// Classifies a value against its benchmark for the given rating direction.
///
/// For a positive benchmark `b`:
///
/// - `higher-better`: `v >= 1.2b` excellent, `>= 1.0b` good, `>= 0.8b`
///   acceptable, else weak
/// - `lower-better`: `v <= 0.8b` excellent, `<= 1.0b` good, `<= 1.2b`
///   acceptable, else weak
/// - `balanced`: relative deviation `|v - b| / |b|` under 0.1 excellent,
///   under 0.2 good, under 0.3 acceptable, else needs-review
///
/// A zero (or negative) benchmark has no meaningful multiple, so
/// classification falls back to the sign of the value: for `higher-better`
/// a positive value is good, zero acceptable, negative weak; mirrored for
/// `lower-better`; for `balanced`, only an exact match is excellent and
/// anything else needs review.
#[must_use]
pub fn classify(value: Decimal, direction: Direction, benchmark: Decimal) -> RatingBand {
    if benchmark <= Decimal::ZERO {
        return classify_against_sign(value, direction, benchmark);
    }
    match direction {
        Direction::HigherBetter => {
            if value >= benchmark * dec!(1.2) {
                RatingBand::Excellent
            } else if value >= benchmark {
                RatingBand::Good
            } else if value >= benchmark * dec!(0.8) {
                RatingBand::Acceptable
            } else {
                RatingBand::Weak
            }
        }
        Direction::LowerBetter => {
            if value <= benchmark * dec!(0.8) {
                RatingBand::Excellent
            } else if value <= benchmark {
                RatingBand::Good
            } else if value <= benchmark * dec!(1.2) {
                RatingBand::Acceptable
            } else {
                RatingBand::Weak
            }
        }
        Direction::Balanced => {
            let deviation = (value - benchmark).abs() / benchmark.abs();
            if deviation < dec!(0.1) {
                RatingBand::Excellent
            } else if deviation < dec!(0.2) {
                RatingBand::Good
            } else if deviation < dec!(0.3) {
                RatingBand::Acceptable
            } else {
                RatingBand::NeedsReview
            }
        }
    }
}

fn classify_against_sign(value: Decimal, direction: Direction, benchmark: Decimal) -> RatingBand {
    match direction {
        Direction::HigherBetter => {
            if value > benchmark {
                RatingBand::Good
            } else if value == benchmark {
                RatingBand::Acceptable
            } else {
                RatingBand::Weak
            }
        }
        Direction::LowerBetter => {
            if value < benchmark {
                RatingBand::Good
            } else if value == benchmark {
                RatingBand::Acceptable
            } else {
                RatingBand::Weak
            }
        }
        Direction::Balanced => {
            if value == benchmark {
                RatingBand::Excellent
            } else {
                RatingBand::NeedsReview
            }
        }
    }
}
