//! # Tahlil Core
//!
//! Core types and abstractions for the Tahlil financial statement analysis
//! engine.
//!
//! This crate provides the foundational building blocks used throughout
//! Tahlil:
//!
//! - **Statement Model**: normalized income statement, balance sheet and
//!   cash flow statement records, tagged by period and currency
//! - **Context**: company, sector and benchmark reference data
//! - **Descriptors**: static metadata describing each analysis unit
//! - **Outcomes**: the `Value` / `NotComputable` result contract shared by
//!   every computation
//!
//! ## Design Philosophy
//!
//! - **Data, not behavior**: statements are immutable snapshots produced by
//!   the extraction pipeline; nothing in this crate performs analysis
//! - **Absence is first-class**: every line item is optional, and a missing
//!   field is an enumerated outcome rather than a crash or a NaN
//! - **Fixed-precision money**: all monetary values are `rust_decimal`
//!   decimals; floats never enter a monetary path
//!
//! ## Example
//!
//! ```rust
//! use tahlil_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let balance = BalanceSheet {
//!     current_assets: Some(dec!(200_000)),
//!     current_liabilities: Some(dec!(100_000)),
//!     ..BalanceSheet::default()
//! };
//! let statement = Statement::new(2024, Currency::SAR)
//!     .with_balance_sheet(balance);
//! assert_eq!(statement.field(Field::CurrentAssets), Some(dec!(200_000)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ModelError, ModelResult};
    pub use crate::types::{
        AnalysisResult, AnalysisValue, BalanceSheet, BenchmarkComparison, BenchmarkSource,
        Bilingual, CashFlowStatement, Category, CompanyContext, ComparisonScope, Currency,
        Direction, Field, IncomeStatement, IndustryBenchmark, LegalForm, LineShare,
        MarketSnapshot, Outcome, PeerRecord, RatingBand, Reason, Sector, Statement,
        StatementSeries, Status, Tier, UnitDescriptor, UnitOfMeasure,
    };
}

// Re-export commonly used types at crate root
pub use error::{ModelError, ModelResult};
pub use types::{
    AnalysisResult, AnalysisValue, Category, CompanyContext, Currency, Direction, Field, Outcome,
    RatingBand, Reason, Statement, StatementSeries, Status, Tier, UnitDescriptor,
};
