//! Deterministic narrative generation.
//!
//! Interpretation and recommendation text is a pure lookup keyed by
//! `(unit id or category, rating band)` with the computed value interpolated
//! into the template. No randomness, no external calls; identical inputs
//! always yield identical text.

mod templates;

use serde::{Deserialize, Serialize};
use tahlil_core::types::{AnalysisValue, Bilingual, RatingBand, UnitDescriptor};

/// Interpretation plus recommendations for one computed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    /// One-sentence bilingual interpretation of the value.
    pub interpretation: Bilingual,
    /// Bilingual recommendations; empty for affirmed ratings.
    pub recommendations: Vec<Bilingual>,
}

/// Generates the narrative for a computed value.
///
/// Per-unit overrides are consulted first, then the category table; the
/// value is interpolated with presentation rounding (the only place percent
/// rounding is applied).
#[must_use]
pub fn narrate(value: &AnalysisValue, band: RatingBand, descriptor: &UnitDescriptor) -> Narrative {
    let template = templates::unit_override(descriptor.id, band)
        .unwrap_or_else(|| templates::category_template(descriptor.category, band));

    let rendered = value.display();
    let interpolate = |text: &str, name: &str| {
        text.replace("{name}", name).replace("{value}", &rendered)
    };

    Narrative {
        interpretation: Bilingual::new(
            interpolate(template.interpretation.0, &descriptor.name.en),
            interpolate(template.interpretation.1, &descriptor.name.ar),
        ),
        recommendations: template
            .recommendations
            .iter()
            .map(|(en, ar)| {
                Bilingual::new(
                    interpolate(en, &descriptor.name.en),
                    interpolate(ar, &descriptor.name.ar),
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tahlil_core::types::{Category, Direction, Field, Tier, UnitOfMeasure};

    fn descriptor(id: &'static str, category: Category) -> UnitDescriptor {
        UnitDescriptor {
            id,
            name: Bilingual::new("Current Ratio", "النسبة الجارية"),
            tier: Tier::Basic,
            category,
            required_fields: &[Field::CurrentAssets],
            direction: Direction::HigherBetter,
            default_benchmark: dec!(2.0),
            unit: UnitOfMeasure::Times,
        }
    }

    #[test]
    fn test_deterministic() {
        let d = descriptor("current_ratio", Category::Liquidity);
        let v = AnalysisValue::Ratio(dec!(2.0));
        let a = narrate(&v, RatingBand::Good, &d);
        let b = narrate(&v, RatingBand::Good, &d);
        assert_eq!(a, b);
    }

    #[test]
    fn test_value_interpolated() {
        let d = descriptor("some_liquidity_unit", Category::Liquidity);
        let v = AnalysisValue::Ratio(dec!(1.5));
        let n = narrate(&v, RatingBand::Acceptable, &d);
        assert!(n.interpretation.en.contains("1.50x"), "{}", n.interpretation.en);
    }

    #[test]
    fn test_excellent_carries_no_corrective_recommendations() {
        let d = descriptor("some_liquidity_unit", Category::Liquidity);
        let v = AnalysisValue::Ratio(dec!(3.0));
        let n = narrate(&v, RatingBand::Excellent, &d);
        assert!(n.recommendations.is_empty());
    }

    #[test]
    fn test_unit_override_beats_category_table() {
        let flagship = descriptor("current_ratio", Category::Liquidity);
        let generic = descriptor("cash_ratio", Category::Liquidity);
        let v = AnalysisValue::Ratio(dec!(0.4));
        let a = narrate(&v, RatingBand::Weak, &flagship);
        let b = narrate(&v, RatingBand::Weak, &generic);
        assert_ne!(a.interpretation.en, b.interpretation.en);
    }

    #[test]
    fn test_every_category_band_pair_has_text() {
        for category in Category::ALL {
            for band in [
                RatingBand::Excellent,
                RatingBand::Good,
                RatingBand::Acceptable,
                RatingBand::Weak,
                RatingBand::NeedsReview,
            ] {
                let d = descriptor("any_unit", category);
                let n = narrate(&AnalysisValue::Ratio(dec!(1)), band, &d);
                assert!(!n.interpretation.en.is_empty());
                assert!(!n.interpretation.ar.is_empty());
            }
        }
    }
}
