//! The orchestrator: selection resolution, per-unit evaluation with fault
//! isolation, and report assembly.

use crate::config::EngineConfig;
use crate::parallel::maybe_parallel_map;
use crate::report::{CategorizedReport, CategorySection, ReportSummary};
use crate::selection::Selection;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tahlil_analytics::{registry, ComputeInput, RegisteredUnit, Registry};
use tahlil_core::types::{
    AnalysisResult, Category, CompanyContext, Outcome, Reason, StatementSeries, Status,
};
use tahlil_rating::{classify, compare, narrate};

/// Runs selections against a registry and assembles categorized reports.
///
/// A run never throws: every selected unit yields exactly one result with
/// status `computed`, `unavailable` or `failed`.
#[derive(Debug)]
pub struct Orchestrator<'r> {
    registry: &'r Registry,
    config: EngineConfig,
}

impl Default for Orchestrator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator<'static> {
    /// Creates an orchestrator over the standard catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: registry(),
            config: EngineConfig::default(),
        }
    }
}

impl<'r> Orchestrator<'r> {
    /// Creates an orchestrator over an explicit registry.
    ///
    /// Used by callers extending the catalog: a registry with an extra
    /// entry produces the extra result with no engine changes.
    #[must_use]
    pub fn with_registry(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Evaluates every selected unit and assembles the categorized report.
    ///
    /// Results are grouped by category in declaration order and sorted by
    /// unit id within each category, so output is identical regardless of
    /// dispatch order or pool size.
    #[must_use]
    pub fn run(
        &self,
        series: &StatementSeries,
        context: &CompanyContext,
        selection: &Selection,
    ) -> CategorizedReport {
        let units = self
            .registry
            .filter(selection.tier, selection.categories.as_slice());
        let input = ComputeInput::latest(series, context);
        let digest = inputs_digest(series, context);

        let mut results: Vec<AnalysisResult> =
            maybe_parallel_map(&units, &self.config, |unit| {
                evaluate_unit(unit, input, digest)
            });
        results.sort_by(|a, b| a.id.cmp(&b.id));

        let mut sections: Vec<CategorySection> = Vec::new();
        for category in Category::ALL {
            let in_category: Vec<AnalysisResult> = results
                .iter()
                .filter(|r| r.category == category)
                .cloned()
                .collect();
            if !in_category.is_empty() {
                sections.push(CategorySection {
                    category,
                    results: in_category,
                });
            }
        }

        let summary = ReportSummary::from_sections(&sections);
        CategorizedReport { sections, summary }
    }
}

/// Evaluates one unit, isolating faults to a `failed` result.
fn evaluate_unit(
    unit: &RegisteredUnit,
    input: Option<ComputeInput<'_>>,
    digest: u64,
) -> AnalysisResult {
    let descriptor = unit.descriptor();
    let base = AnalysisResult {
        id: descriptor.id.to_string(),
        name: descriptor.name.clone(),
        category: descriptor.category,
        tier: descriptor.tier,
        status: Status::Unavailable,
        value: None,
        rating: None,
        benchmark: None,
        interpretation: None,
        recommendations: Vec::new(),
        unavailable_reason: None,
        failure: None,
    };

    // An empty series means nothing is computable; still one result per unit.
    let Some(input) = input else {
        return AnalysisResult {
            unavailable_reason: Some(Reason::InsufficientHistory {
                needed: 1,
                available: 0,
            }),
            ..base
        };
    };

    let outcome = catch_unwind(AssertUnwindSafe(|| unit.compute(&input)));
    match outcome {
        Err(payload) => {
            let message = panic_message(&payload);
            tracing::error!(
                unit = descriptor.id,
                inputs_digest = digest,
                "computation fault: {message}"
            );
            AnalysisResult {
                status: Status::Failed,
                failure: Some(message),
                ..base
            }
        }
        Ok(Outcome::NotComputable(reason)) => AnalysisResult {
            unavailable_reason: Some(reason),
            ..base
        },
        Ok(Outcome::Value(value)) => {
            let comparison = compare(value.scalar(), descriptor, input.context);
            let band = classify(value.scalar(), descriptor.direction, comparison.benchmark);
            let narrative = narrate(&value, band, descriptor);
            AnalysisResult {
                status: Status::Computed,
                value: Some(value),
                rating: Some(band),
                benchmark: Some(comparison),
                interpretation: Some(narrative.interpretation),
                recommendations: narrative.recommendations,
                ..base
            }
        }
    }
}

/// Stable digest of the run inputs, for fault logs only.
///
/// Identifies which company/periods a fault occurred against without
/// logging any business figures.
fn inputs_digest(series: &StatementSeries, context: &CompanyContext) -> u64 {
    let mut hasher = DefaultHasher::new();
    context.company.hash(&mut hasher);
    for statement in series.statements() {
        statement.year.hash(&mut hasher);
        statement.currency.code().hash(&mut hasher);
    }
    hasher.finish()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unit computation panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tahlil_core::types::{
        BalanceSheet, Currency, RatingBand, Sector, Statement,
    };

    fn series() -> StatementSeries {
        let mut series = StatementSeries::new("ACME");
        series
            .push(
                Statement::new(2024, Currency::SAR).with_balance_sheet(BalanceSheet {
                    current_assets: Some(dec!(200_000)),
                    current_liabilities: Some(dec!(100_000)),
                    ..BalanceSheet::default()
                }),
            )
            .unwrap();
        series
    }

    #[test]
    fn test_one_result_per_selected_unit() {
        let series = series();
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let report = Orchestrator::new().run(&series, &context, &Selection::all());
        assert_eq!(report.len(), registry().len());
    }

    #[test]
    fn test_current_ratio_good_against_default_benchmark() {
        let series = series();
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let report = Orchestrator::new().run(&series, &context, &Selection::all());
        let result = report
            .all_results()
            .find(|r| r.id == "current_ratio")
            .unwrap();
        assert_eq!(result.status, Status::Computed);
        assert_eq!(result.rating, Some(RatingBand::Good));
    }

    #[test]
    fn test_missing_data_is_unavailable_not_failed() {
        let series = series();
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let report = Orchestrator::new().run(&series, &context, &Selection::all());
        let roe = report
            .all_results()
            .find(|r| r.id == "return_on_equity")
            .unwrap();
        assert_eq!(roe.status, Status::Unavailable);
        assert!(roe.unavailable_reason.is_some());
        assert!(roe.rating.is_none());
    }

    #[test]
    fn test_empty_series_still_yields_full_report() {
        let series = StatementSeries::new("ACME");
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let report = Orchestrator::new().run(&series, &context, &Selection::all());
        assert_eq!(report.len(), registry().len());
        assert!(report.all_results().all(|r| r.status == Status::Unavailable));
    }

    #[test]
    fn test_results_sorted_by_id_within_category() {
        let series = series();
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let report = Orchestrator::new().run(&series, &context, &Selection::all());
        for section in &report.sections {
            let ids: Vec<&str> = section.results.iter().map(|r| r.id.as_str()).collect();
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            assert_eq!(ids, sorted, "category {} out of order", section.category);
        }
    }

    #[test]
    fn test_identical_runs_are_byte_identical() {
        let series = series();
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let orchestrator = Orchestrator::new();
        let a = orchestrator.run(&series, &context, &Selection::all());
        let b = orchestrator.run(&series, &context, &Selection::all());
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
    }
}
