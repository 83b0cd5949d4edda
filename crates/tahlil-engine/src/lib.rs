//! # Tahlil Engine
//!
//! The Orchestrator of the Tahlil analysis engine.
//!
//! A run resolves a [`Selection`] against the unit registry, evaluates each
//! unit through the Computation Core, classifies and narrates computed
//! values, and aggregates everything into a [`CategorizedReport`]:
//!
//! - per-unit failures are isolated: a fault in one formula becomes a
//!   `failed` result and never aborts the batch
//! - `NotComputable` outcomes become `unavailable` results carrying their
//!   reason
//! - output order is deterministic: categories in declaration order, units
//!   sorted by id; identical regardless of worker pool size
//!
//! ## Example
//!
//! ```rust
//! use tahlil_engine::{Orchestrator, Selection};
//! use tahlil_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let mut series = StatementSeries::new("ACME");
//! series
//!     .push(Statement::new(2024, Currency::SAR).with_balance_sheet(BalanceSheet {
//!         current_assets: Some(dec!(200_000)),
//!         current_liabilities: Some(dec!(100_000)),
//!         ..BalanceSheet::default()
//!     }))
//!     .unwrap();
//! let context = CompanyContext::new("ACME", Sector::Industrial);
//!
//! let report = Orchestrator::new().run(&series, &context, &Selection::all());
//! let liquidity = report.results_for(Category::Liquidity).unwrap();
//! assert!(liquidity.iter().any(|r| r.id == "current_ratio"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod orchestrator;
pub(crate) mod parallel;
pub mod report;
pub mod selection;

pub use config::EngineConfig;
pub use orchestrator::Orchestrator;
pub use report::{CategorizedReport, CategorySection, HealthStatus, InvestmentGrade, ReportSummary};
pub use selection::{CategorySelection, Selection};
