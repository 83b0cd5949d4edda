//! Domain types for financial statement analysis.
//!
//! This module provides the data model shared by every part of the engine:
//!
//! - [`Statement`]: one reporting period's normalized financial data
//! - [`StatementSeries`]: a company's chronological statement history
//! - [`CompanyContext`]: sector, scope and benchmark reference data
//! - [`UnitDescriptor`]: static metadata describing one analysis unit
//! - [`Outcome`]: the `Value` / `NotComputable` computation contract
//! - [`AnalysisResult`]: the fully narrated, rated output of one unit

mod context;
mod currency;
mod descriptor;
mod field;
mod outcome;
mod result;
mod statement;

pub use context::{
    CompanyContext, ComparisonScope, IndustryBenchmark, LegalForm, PeerRecord, Sector,
};
pub use currency::Currency;
pub use descriptor::{Bilingual, Category, Direction, Tier, UnitDescriptor, UnitOfMeasure};
pub use field::Field;
pub use outcome::{AnalysisValue, LineShare, Outcome, Reason};
pub use result::{AnalysisResult, BenchmarkComparison, BenchmarkSource, RatingBand, Status};
pub use statement::{
    BalanceSheet, CashFlowStatement, IncomeStatement, MarketSnapshot, Statement, StatementSeries,
};
