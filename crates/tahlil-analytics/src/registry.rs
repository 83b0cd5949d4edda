//! The Analysis Unit Registry.
//!
//! A flat, append-only table pairing each unit's static descriptor with its
//! formula. The global registry is built once on first use and read-only
//! thereafter; orchestrator runs share it without locking.
//!
//! Adding an analysis unit means appending one [`RegisteredUnit`] in the
//! owning category module; the orchestrator and classifier need no changes.

use crate::input::ComputeInput;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tahlil_core::types::{
    Bilingual, Category, Direction, Field, Outcome, Reason, Tier, UnitDescriptor, UnitOfMeasure,
};

pub use crate::support::CalcResult;

use rust_decimal::Decimal;

/// One registry entry: descriptor plus formula.
pub struct RegisteredUnit {
    descriptor: UnitDescriptor,
    compute: fn(&ComputeInput) -> CalcResult,
}

impl RegisteredUnit {
    /// Creates a registry entry.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: &'static str,
        name: (&'static str, &'static str),
        tier: Tier,
        category: Category,
        direction: Direction,
        default_benchmark: Decimal,
        unit: UnitOfMeasure,
        required_fields: &'static [Field],
        compute: fn(&ComputeInput) -> CalcResult,
    ) -> Self {
        Self {
            descriptor: UnitDescriptor {
                id,
                name: Bilingual::new(name.0, name.1),
                tier,
                category,
                required_fields,
                direction,
                default_benchmark,
                unit,
            },
            compute,
        }
    }

    /// The unit's static descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &UnitDescriptor {
        &self.descriptor
    }

    /// The unit's stable identifier.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.descriptor.id
    }

    /// Evaluates the unit's formula against one input.
    ///
    /// Declared required fields are checked before the formula runs, so a
    /// formula can assume its direct inputs exist; derived inputs and
    /// history are still checked inside.
    #[must_use]
    pub fn compute(&self, input: &ComputeInput) -> Outcome {
        if let Some(field) = input.statement.first_missing(self.descriptor.required_fields) {
            return Outcome::NotComputable(Reason::MissingField { field });
        }
        match (self.compute)(input) {
            Ok(value) => Outcome::Value(value),
            Err(reason) => Outcome::NotComputable(reason),
        }
    }
}

impl std::fmt::Debug for RegisteredUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredUnit")
            .field("id", &self.descriptor.id)
            .field("category", &self.descriptor.category)
            .finish()
    }
}

/// The full unit catalog, in category declaration order.
#[derive(Debug)]
pub struct Registry {
    units: Vec<RegisteredUnit>,
    by_id: HashMap<&'static str, usize>,
}

impl Registry {
    /// Builds a registry from explicit entries.
    ///
    /// Entry order is preserved; it defines the report's declaration order.
    #[must_use]
    pub fn from_units(units: Vec<RegisteredUnit>) -> Self {
        let by_id = units
            .iter()
            .enumerate()
            .map(|(i, u)| (u.id(), i))
            .collect();
        Self { units, by_id }
    }

    fn standard() -> Self {
        let mut units = Vec::new();
        units.extend(crate::liquidity::units());
        units.extend(crate::activity::units());
        units.extend(crate::profitability::units());
        units.extend(crate::leverage::units());
        units.extend(crate::market::units());
        units.extend(crate::structural::units());
        units.extend(crate::flow::units());
        units.extend(crate::comparative::units());
        units.extend(crate::modeling::units());
        Self::from_units(units)
    }

    /// All units in declaration order.
    #[must_use]
    pub fn all(&self) -> &[RegisteredUnit] {
        &self.units
    }

    /// Looks up a unit by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RegisteredUnit> {
        self.by_id.get(id).map(|&i| &self.units[i])
    }

    /// Units matching an optional tier and category filter, in declaration
    /// order.
    #[must_use]
    pub fn filter(
        &self,
        tier: Option<Tier>,
        categories: Option<&[Category]>,
    ) -> Vec<&RegisteredUnit> {
        self.units
            .iter()
            .filter(|u| tier.map_or(true, |t| u.descriptor.tier == t))
            .filter(|u| {
                categories.map_or(true, |cats| cats.contains(&u.descriptor.category))
            })
            .collect()
    }

    /// Number of registered units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True when the registry holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::standard);

/// The process-wide standard catalog, built on first use.
#[must_use]
pub fn registry() -> &'static Registry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_unique() {
        let reg = registry();
        assert_eq!(reg.by_id.len(), reg.units.len());
    }

    #[test]
    fn test_lookup() {
        let reg = registry();
        assert!(reg.get("current_ratio").is_some());
        assert!(reg.get("no_such_unit").is_none());
    }

    #[test]
    fn test_categories_are_grouped_in_declaration_order() {
        // Category blocks appear in Category::ALL order.
        let reg = registry();
        let mut last = None;
        for unit in reg.all() {
            let cat = unit.descriptor().category;
            if let Some(prev) = last {
                assert!(cat >= prev, "category {cat} out of order after {prev}");
            }
            last = Some(cat);
        }
    }

    #[test]
    fn test_filter_by_tier() {
        let reg = registry();
        let basic = reg.filter(Some(Tier::Basic), None);
        assert!(!basic.is_empty());
        assert!(basic.iter().all(|u| u.descriptor().tier == Tier::Basic));
    }
}
