//! # Tahlil Scenario
//!
//! The Scenario/Projection sub-engine: multi-year forecasting, sensitivity
//! sweeps and seed-deterministic Monte Carlo sampling, built on the same
//! Computation Core contract as the main catalog.
//!
//! A scenario moves through `defined -> projected -> evaluated` (or
//! `failed` on an invalid assumption set). Projection compounds revenue,
//! cost and capital equations forward from the latest real statement;
//! evaluation feeds each projected year back through the Computation Core
//! and Classifier.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tahlil_scenario::prelude::*;
//!
//! let assumptions = Assumptions::new(0.06, 0.15, 0.05, 0.10, 0.20, 5);
//! let report = Scenario::run("base", assumptions, &series, &context)?;
//! assert_eq!(report.yearly_projections.len(), 5);
//!
//! let spec = MonteCarloSpec::new(10_000, 42)
//!     .with_growth(FactorDistribution::normal(0.05, 0.15));
//! let summary = monte_carlo(&series, &assumptions, &spec, None)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod assumptions;
pub mod error;
pub mod monte_carlo;
pub mod projection;
pub mod scenario;
pub mod sensitivity;

pub use assumptions::Assumptions;
pub use error::{ScenarioError, ScenarioResult};
pub use monte_carlo::{
    monte_carlo, CancellationToken, FactorDistribution, MonteCarloSpec, MonteCarloSummary,
};
pub use projection::ProjectedYear;
pub use scenario::{Scenario, ScenarioReport, ScenarioState, YearEvaluation};
pub use sensitivity::{sensitivity_sweep, SensitivityCell, SensitivityTable};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::assumptions::Assumptions;
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::monte_carlo::{
        monte_carlo, CancellationToken, FactorDistribution, MonteCarloSpec, MonteCarloSummary,
    };
    pub use crate::projection::ProjectedYear;
    pub use crate::scenario::{Scenario, ScenarioReport, ScenarioState, YearEvaluation};
    pub use crate::sensitivity::{sensitivity_sweep, SensitivityTable};
}
