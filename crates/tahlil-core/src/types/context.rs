//! Company and benchmark reference context.
//!
//! Owned by the benchmark-data collaborator; the engine only reads it.
//! Missing benchmark or peer data is never fatal; classification falls back
//! to descriptor defaults and percentile placement is omitted.

use super::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Broad industry sector of the analyzed company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum Sector {
    /// Industrial and manufacturing.
    #[default]
    Industrial,
    /// Banking and financial services.
    Financial,
    /// Energy, oil and gas.
    Energy,
    /// Materials and chemicals.
    Materials,
    /// Consumer staples.
    ConsumerStaples,
    /// Consumer discretionary.
    ConsumerDiscretionary,
    /// Healthcare.
    Healthcare,
    /// Technology.
    Technology,
    /// Telecommunications.
    Telecom,
    /// Utilities.
    Utilities,
    /// Real estate.
    RealEstate,
}

/// Legal form of the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LegalForm {
    /// Publicly listed joint stock company.
    #[default]
    ListedJointStock,
    /// Closed joint stock company.
    ClosedJointStock,
    /// Limited liability company.
    LimitedLiability,
    /// Sole proprietorship.
    SoleProprietorship,
}

/// Geographic scope used when selecting comparison peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ComparisonScope {
    /// Peers from the same country.
    #[default]
    National,
    /// Peers from the surrounding region.
    Regional,
    /// Global peer set.
    Global,
}

/// Industry average values keyed by analysis unit id.
///
/// Produced by the benchmark-data service. Units without an entry fall back
/// to the default benchmark on their descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    averages: HashMap<String, Decimal>,
}

impl IndustryBenchmark {
    /// Creates an empty benchmark table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an industry average for a unit.
    pub fn insert(&mut self, unit_id: impl Into<String>, average: Decimal) {
        self.averages.insert(unit_id.into(), average);
    }

    /// Looks up the industry average for a unit.
    #[must_use]
    pub fn average(&self, unit_id: &str) -> Option<Decimal> {
        self.averages.get(unit_id).copied()
    }

    /// Number of units covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.averages.len()
    }

    /// True when no averages are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}

/// One peer company's observed values, keyed by analysis unit id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerRecord {
    /// Peer company identifier.
    pub company: String,
    /// Observed metric values by unit id.
    pub values: HashMap<String, Decimal>,
}

impl PeerRecord {
    /// Creates a peer record.
    #[must_use]
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            values: HashMap::new(),
        }
    }

    /// Adds an observed value for a unit.
    #[must_use]
    pub fn with_value(mut self, unit_id: impl Into<String>, value: Decimal) -> Self {
        self.values.insert(unit_id.into(), value);
        self
    }

    /// Looks up this peer's value for a unit.
    #[must_use]
    pub fn value(&self, unit_id: &str) -> Option<Decimal> {
        self.values.get(unit_id).copied()
    }
}

/// Everything the engine knows about the analyzed company beyond its
/// statements.
///
/// Passed explicitly into every computation; there is no ambient benchmark
/// state anywhere in the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyContext {
    /// Company identifier.
    pub company: String,
    /// Industry sector.
    pub sector: Sector,
    /// Legal form.
    pub legal_form: LegalForm,
    /// Peer comparison scope.
    pub scope: ComparisonScope,
    /// Target currency for presentation.
    pub target_currency: Currency,
    /// Industry average table (may be empty).
    pub industry: IndustryBenchmark,
    /// Peer observations (may be empty).
    pub peers: Vec<PeerRecord>,
}

impl CompanyContext {
    /// Creates a context with empty reference data.
    #[must_use]
    pub fn new(company: impl Into<String>, sector: Sector) -> Self {
        Self {
            company: company.into(),
            sector,
            ..Self::default()
        }
    }

    /// Sets the comparison scope.
    #[must_use]
    pub fn with_scope(mut self, scope: ComparisonScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the industry benchmark table.
    #[must_use]
    pub fn with_industry(mut self, industry: IndustryBenchmark) -> Self {
        self.industry = industry;
        self
    }

    /// Sets the peer records.
    #[must_use]
    pub fn with_peers(mut self, peers: Vec<PeerRecord>) -> Self {
        self.peers = peers;
        self
    }

    /// Collects all peer values observed for a unit.
    #[must_use]
    pub fn peer_values(&self, unit_id: &str) -> Vec<Decimal> {
        self.peers
            .iter()
            .filter_map(|p| p.value(unit_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_industry_lookup() {
        let mut industry = IndustryBenchmark::new();
        industry.insert("current_ratio", dec!(2.0));
        assert_eq!(industry.average("current_ratio"), Some(dec!(2.0)));
        assert_eq!(industry.average("quick_ratio"), None);
    }

    #[test]
    fn test_peer_values_skips_gaps() {
        let context = CompanyContext::new("ACME", Sector::Industrial).with_peers(vec![
            PeerRecord::new("P1").with_value("roe", dec!(12)),
            PeerRecord::new("P2"),
            PeerRecord::new("P3").with_value("roe", dec!(18)),
        ]);
        assert_eq!(context.peer_values("roe"), vec![dec!(12), dec!(18)]);
    }
}
