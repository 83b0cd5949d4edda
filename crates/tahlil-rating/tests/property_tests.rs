//! Property-based tests for classifier and percentile invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tahlil_core::types::{Direction, RatingBand};
use tahlil_rating::{classify, peer_percentile};

fn decimal_in(range: std::ops::Range<i64>) -> impl Strategy<Value = Decimal> {
    // Two-decimal fixed-point values, the precision benchmarks carry.
    (range.start * 100..range.end * 100).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn classify_is_total(
        value in decimal_in(-1000..1000),
        benchmark in decimal_in(-100..100),
    ) {
        for direction in [Direction::HigherBetter, Direction::LowerBetter, Direction::Balanced] {
            let band = classify(value, direction, benchmark);
            prop_assert!(matches!(
                band,
                RatingBand::Excellent
                    | RatingBand::Good
                    | RatingBand::Acceptable
                    | RatingBand::Weak
                    | RatingBand::NeedsReview
            ));
        }
    }

    #[test]
    fn higher_better_is_monotonic_in_value(
        a in decimal_in(-1000..1000),
        b in decimal_in(-1000..1000),
        benchmark in decimal_in(1..100),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let band_low = classify(low, Direction::HigherBetter, benchmark);
        let band_high = classify(high, Direction::HigherBetter, benchmark);
        prop_assert!(rank(band_high) >= rank(band_low));
    }

    #[test]
    fn percentile_is_monotonic(
        mut peers in prop::collection::vec(decimal_in(-500..500), 1..50),
        a in decimal_in(-500..500),
        b in decimal_in(-500..500),
    ) {
        peers.sort_unstable();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let p_low = peer_percentile(&peers, low).unwrap();
        let p_high = peer_percentile(&peers, high).unwrap();
        prop_assert!(p_high >= p_low);
    }

    #[test]
    fn percentile_is_bounded(
        peers in prop::collection::vec(decimal_in(-500..500), 1..50),
        value in decimal_in(-1000..1000),
    ) {
        let p = peer_percentile(&peers, value).unwrap();
        prop_assert!(p >= Decimal::ZERO);
        prop_assert!(p <= Decimal::from(100));
    }
}

/// Band quality rank for monotonicity checks (higher is better).
fn rank(band: RatingBand) -> u8 {
    match band {
        RatingBand::Excellent => 3,
        RatingBand::Good => 2,
        RatingBand::Acceptable => 1,
        RatingBand::Weak | RatingBand::NeedsReview => 0,
    }
}
