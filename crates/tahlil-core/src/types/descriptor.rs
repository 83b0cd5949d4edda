//! Analysis unit descriptors.
//!
//! A descriptor is the static, append-only metadata for one analysis unit.
//! The registry pairs each descriptor with its computation function; nothing
//! here is mutated at runtime.

use super::Field;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An English/Arabic text pair.
///
/// The product surfaces every analysis bilingually; names and narrative
/// text carry both languages as data. Language selection is a presentation
/// concern and stays outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bilingual {
    /// English text.
    pub en: String,
    /// Arabic text.
    pub ar: String,
}

impl Bilingual {
    /// Creates a text pair.
    #[must_use]
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }
}

impl fmt::Display for Bilingual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.en)
    }
}

/// Sophistication tier of an analysis unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Classical ratio analysis.
    Basic,
    /// Applied comparative and performance analysis.
    Applied,
    /// Advanced modeling, valuation and risk analysis.
    Advanced,
    /// AI-assisted analyses layered on engine outputs. Accepts the short
    /// `"ai"` keyword used by the selection configuration.
    #[serde(alias = "ai")]
    AiAssisted,
}

/// Category grouping of analysis units.
///
/// The order of variants is the declaration order used when grouping report
/// output; it mirrors the catalog's category sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Short-term solvency ratios.
    Liquidity,
    /// Turnover and efficiency ratios.
    Activity,
    /// Margin and return ratios.
    Profitability,
    /// Debt and capital structure ratios.
    Leverage,
    /// Market pricing and valuation ratios.
    Market,
    /// Vertical structure breakdowns.
    Structural,
    /// Cash flow quality analyses.
    Flow,
    /// Horizontal growth and benchmark comparatives.
    Comparative,
    /// Forward-looking modeling and simulation.
    Modeling,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 9] = [
        Category::Liquidity,
        Category::Activity,
        Category::Profitability,
        Category::Leverage,
        Category::Market,
        Category::Structural,
        Category::Flow,
        Category::Comparative,
        Category::Modeling,
    ];

    /// Stable identifier used in report keys and benchmark tables.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Category::Liquidity => "liquidity",
            Category::Activity => "activity",
            Category::Profitability => "profitability",
            Category::Leverage => "leverage",
            Category::Market => "market",
            Category::Structural => "structural",
            Category::Flow => "flow",
            Category::Comparative => "comparative",
            Category::Modeling => "modeling",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// How a computed value compares against its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Larger values are better (e.g. current ratio, ROE).
    HigherBetter,
    /// Smaller values are better (e.g. debt-to-equity, DSO).
    LowerBetter,
    /// Values should sit near the benchmark (e.g. structure shares).
    Balanced,
}

/// Unit of measure of a computed value, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitOfMeasure {
    /// Dimensionless multiple (x).
    Times,
    /// Percent (%).
    Percent,
    /// Monetary amount in the statement currency.
    Currency,
    /// Calendar days.
    Days,
    /// Dimensionless score or index.
    Score,
}

/// Static metadata for one analysis unit.
///
/// Descriptors are compiled into the registry (`&'static` data), so they
/// serialize for report consumers but are never deserialized back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDescriptor {
    /// Stable unit identifier (snake_case).
    pub id: &'static str,
    /// Bilingual display name.
    pub name: Bilingual,
    /// Sophistication tier.
    pub tier: Tier,
    /// Report category.
    pub category: Category,
    /// Statement fields the computation reads.
    pub required_fields: &'static [Field],
    /// Rating direction against the benchmark.
    pub direction: Direction,
    /// Fallback benchmark when the industry table has no entry.
    pub default_benchmark: Decimal,
    /// Unit of measure of the computed value.
    pub unit: UnitOfMeasure,
}

impl UnitDescriptor {
    /// True when this unit needs more than one period of history.
    #[must_use]
    pub fn needs_history(&self) -> bool {
        self.category == Category::Comparative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_declaration_order() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }

    #[test]
    fn test_category_keys_unique() {
        let mut keys: Vec<_> = Category::ALL.iter().map(Category::key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Category::ALL.len());
    }

    #[test]
    fn test_tier_serde_kebab() {
        let json = serde_json::to_string(&Tier::AiAssisted).unwrap();
        assert_eq!(json, "\"ai-assisted\"");
    }
}
