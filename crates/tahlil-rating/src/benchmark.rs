//! Benchmark resolution and comparison.
//!
//! Resolution order: the company context's industry table first, the
//! descriptor's default second. The engine never fails on missing reference
//! data; an empty industry table simply means descriptor defaults
//! everywhere, and an empty peer set means no percentile.

use crate::percentile::peer_percentile;
use rust_decimal::Decimal;
use tahlil_core::types::{
    BenchmarkComparison, BenchmarkSource, CompanyContext, UnitDescriptor,
};

/// Resolves the benchmark for a unit: industry average when present,
/// descriptor default otherwise.
#[must_use]
pub fn resolve_benchmark(
    descriptor: &UnitDescriptor,
    context: &CompanyContext,
) -> (Decimal, BenchmarkSource) {
    match context.industry.average(descriptor.id) {
        Some(average) => (average, BenchmarkSource::IndustryTable),
        None => (descriptor.default_benchmark, BenchmarkSource::DescriptorDefault),
    }
}

/// Builds the full benchmark comparison for a computed value.
#[must_use]
pub fn compare(
    value: Decimal,
    descriptor: &UnitDescriptor,
    context: &CompanyContext,
) -> BenchmarkComparison {
    let (benchmark, source) = resolve_benchmark(descriptor, context);
    let peers = context.peer_values(descriptor.id);
    let ratio = if benchmark.is_zero() {
        None
    } else {
        value.checked_div(benchmark)
    };
    BenchmarkComparison {
        benchmark,
        source,
        delta: value - benchmark,
        ratio,
        peer_percentile: peer_percentile(&peers, value),
        peer_count: peers.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tahlil_core::types::{
        Bilingual, Category, Direction, Field, IndustryBenchmark, PeerRecord, Sector, Tier,
        UnitOfMeasure,
    };

    fn descriptor() -> UnitDescriptor {
        UnitDescriptor {
            id: "current_ratio",
            name: Bilingual::new("Current Ratio", "النسبة الجارية"),
            tier: Tier::Basic,
            category: Category::Liquidity,
            required_fields: &[Field::CurrentAssets, Field::CurrentLiabilities],
            direction: Direction::HigherBetter,
            default_benchmark: dec!(2.0),
            unit: UnitOfMeasure::Times,
        }
    }

    #[test]
    fn test_descriptor_default_when_no_industry_entry() {
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let (benchmark, source) = resolve_benchmark(&descriptor(), &context);
        assert_eq!(benchmark, dec!(2.0));
        assert_eq!(source, BenchmarkSource::DescriptorDefault);
    }

    #[test]
    fn test_industry_table_wins() {
        let mut industry = IndustryBenchmark::new();
        industry.insert("current_ratio", dec!(1.6));
        let context = CompanyContext::new("ACME", Sector::Industrial).with_industry(industry);
        let (benchmark, source) = resolve_benchmark(&descriptor(), &context);
        assert_eq!(benchmark, dec!(1.6));
        assert_eq!(source, BenchmarkSource::IndustryTable);
    }

    #[test]
    fn test_compare_with_peers() {
        let context = CompanyContext::new("ACME", Sector::Industrial).with_peers(vec![
            PeerRecord::new("P1").with_value("current_ratio", dec!(1.5)),
            PeerRecord::new("P2").with_value("current_ratio", dec!(1.8)),
            PeerRecord::new("P3").with_value("current_ratio", dec!(2.5)),
        ]);
        let comparison = compare(dec!(2.0), &descriptor(), &context);
        assert_eq!(comparison.benchmark, dec!(2.0));
        assert_eq!(comparison.delta, Decimal::ZERO);
        assert_eq!(comparison.ratio, Some(dec!(1)));
        assert_eq!(comparison.peer_count, 3);
        // two of three peers at or below 2.0
        let pct = comparison.peer_percentile.unwrap();
        assert!((pct - dec!(66.6667)).abs() < dec!(0.001));
    }

    #[test]
    fn test_compare_without_peers_has_no_percentile() {
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let comparison = compare(dec!(2.0), &descriptor(), &context);
        assert_eq!(comparison.peer_percentile, None);
        assert_eq!(comparison.peer_count, 0);
    }
}
