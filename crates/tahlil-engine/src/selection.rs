//! Run selection: which units to evaluate and with what stochastic
//! parameters.

use serde::{Deserialize, Serialize};
use tahlil_core::types::{Category, Tier};

/// Category filter: everything, or an explicit set.
///
/// Serializes as the string `"all"` or as a category array, matching the
/// configuration surface consumed from collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategorySelectionRepr", into = "CategorySelectionRepr")]
pub enum CategorySelection {
    /// Every category.
    All,
    /// Only the listed categories.
    Selected(Vec<Category>),
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(untagged)]
enum CategorySelectionRepr {
    Keyword(AllKeyword),
    List(Vec<Category>),
}

#[derive(Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum AllKeyword {
    All,
}

impl From<CategorySelectionRepr> for CategorySelection {
    fn from(repr: CategorySelectionRepr) -> Self {
        match repr {
            CategorySelectionRepr::Keyword(AllKeyword::All) => CategorySelection::All,
            CategorySelectionRepr::List(list) => CategorySelection::Selected(list),
        }
    }
}

impl From<CategorySelection> for CategorySelectionRepr {
    fn from(selection: CategorySelection) -> Self {
        match selection {
            CategorySelection::All => CategorySelectionRepr::Keyword(AllKeyword::All),
            CategorySelection::Selected(list) => CategorySelectionRepr::List(list),
        }
    }
}

/// Default Monte Carlo iteration count.
pub const DEFAULT_MONTE_CARLO_ITERATIONS: usize = 10_000;

fn default_iterations() -> usize {
    DEFAULT_MONTE_CARLO_ITERATIONS
}

fn default_seed() -> u64 {
    42
}

/// One run's configuration, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Restrict to one tier; `None` runs every tier.
    #[serde(default)]
    pub tier: Option<Tier>,

    /// Category filter.
    #[serde(default = "CategorySelection::all")]
    pub categories: CategorySelection,

    /// Monte Carlo sample count for the scenario sub-engine.
    #[serde(default = "default_iterations")]
    pub monte_carlo_iterations: usize,

    /// Seed for stochastic sampling; identical seeds reproduce identical
    /// aggregate statistics.
    #[serde(default = "default_seed")]
    pub random_seed: u64,
}

impl CategorySelection {
    /// The all-categories selection.
    #[must_use]
    pub fn all() -> Self {
        CategorySelection::All
    }

    /// The explicit category list, or `None` for "all".
    #[must_use]
    pub fn as_slice(&self) -> Option<&[Category]> {
        match self {
            CategorySelection::All => None,
            CategorySelection::Selected(list) => Some(list),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}

impl Selection {
    /// Selects every unit in the catalog.
    #[must_use]
    pub fn all() -> Self {
        Self {
            tier: None,
            categories: CategorySelection::All,
            monte_carlo_iterations: DEFAULT_MONTE_CARLO_ITERATIONS,
            random_seed: 42,
        }
    }

    /// Restricts the run to one tier.
    #[must_use]
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Restricts the run to the given categories.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = CategorySelection::Selected(categories);
        self
    }

    /// Sets the Monte Carlo iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.monte_carlo_iterations = iterations;
        self
    }

    /// Sets the stochastic seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }
}
