//! # Tahlil Analytics
//!
//! The Computation Core of the Tahlil engine: one small pure function per
//! analysis unit, plus the Analysis Unit Registry that pairs each unit's
//! static descriptor with its formula.
//!
//! ## Design Philosophy
//!
//! - **Data-driven dispatch**: the registry is a flat table of
//!   `(descriptor, formula)` entries built once at first use; adding an
//!   analysis means adding one entry, nothing else changes
//! - **Absence is an outcome**: a missing field, zero denominator or thin
//!   history resolves to `NotComputable(reason)`, never a `NaN`, `Infinity`
//!   or panic
//! - **Fixed-precision arithmetic**: all monetary math is `rust_decimal`
//! - **No side effects**: no I/O and no logging of business data
//!
//! ## Example
//!
//! ```rust
//! use tahlil_analytics::{registry, ComputeInput};
//! use tahlil_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let balance = BalanceSheet {
//!     current_assets: Some(dec!(200_000)),
//!     current_liabilities: Some(dec!(100_000)),
//!     ..BalanceSheet::default()
//! };
//! let mut series = StatementSeries::new("ACME");
//! series
//!     .push(Statement::new(2024, Currency::SAR).with_balance_sheet(balance))
//!     .unwrap();
//! let context = CompanyContext::new("ACME", Sector::Industrial);
//! let input = ComputeInput::latest(&series, &context).unwrap();
//!
//! let unit = registry().get("current_ratio").unwrap();
//! let outcome = unit.compute(&input);
//! assert_eq!(outcome, Outcome::ratio(dec!(2)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unreadable_literal)]

pub mod activity;
pub mod comparative;
pub mod flow;
pub mod input;
pub mod leverage;
pub mod liquidity;
pub mod market;
pub mod modeling;
pub mod profitability;
pub mod registry;
pub mod structural;
pub(crate) mod support;

pub use input::ComputeInput;
pub use registry::{registry, CalcResult, RegisteredUnit, Registry};
