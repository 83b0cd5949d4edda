//! End-to-end orchestrator runs over the standard and extended catalogs.

use rust_decimal_macros::dec;
use tahlil_analytics::{registry, RegisteredUnit, Registry};
use tahlil_core::prelude::*;
use tahlil_engine::{EngineConfig, Orchestrator, Selection};

fn series() -> StatementSeries {
    let statement = Statement::new(2024, Currency::SAR)
        .with_balance_sheet(BalanceSheet {
            cash: Some(dec!(50_000)),
            current_assets: Some(dec!(200_000)),
            current_liabilities: Some(dec!(100_000)),
            total_assets: Some(dec!(500_000)),
            total_liabilities: Some(dec!(250_000)),
            shareholders_equity: Some(dec!(250_000)),
            ..BalanceSheet::default()
        })
        .with_income_statement(IncomeStatement {
            revenue: Some(dec!(400_000)),
            net_income: Some(dec!(40_000)),
            ..IncomeStatement::default()
        });
    StatementSeries::from_statements("ACME", vec![statement]).unwrap()
}

#[test]
fn full_run_yields_exactly_one_result_per_unit() {
    let context = CompanyContext::new("ACME", Sector::Industrial);
    let report = Orchestrator::new().run(&series(), &context, &Selection::all());
    assert_eq!(report.len(), registry().len());

    // No unit silently dropped, no duplicates.
    let mut ids: Vec<&str> = report.all_results().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), registry().len());
}

#[test]
fn every_computed_result_has_a_rating_and_others_do_not() {
    let context = CompanyContext::new("ACME", Sector::Industrial);
    let report = Orchestrator::new().run(&series(), &context, &Selection::all());
    for result in report.all_results() {
        match result.status {
            Status::Computed => {
                assert!(result.rating.is_some(), "{} computed without rating", result.id);
                assert!(result.value.is_some());
                assert!(result.interpretation.is_some());
            }
            Status::Unavailable => {
                assert!(result.rating.is_none(), "{} unavailable with rating", result.id);
                assert!(result.unavailable_reason.is_some());
            }
            Status::Failed => {
                assert!(result.rating.is_none());
                assert!(result.failure.is_some());
            }
        }
    }
}

#[test]
fn zero_denominator_end_to_end_is_unavailable_division_by_zero() {
    let statement = Statement::new(2024, Currency::SAR).with_balance_sheet(BalanceSheet {
        current_assets: Some(dec!(200_000)),
        current_liabilities: Some(dec!(0)),
        ..BalanceSheet::default()
    });
    let series = StatementSeries::from_statements("ACME", vec![statement]).unwrap();
    let context = CompanyContext::new("ACME", Sector::Industrial);
    let report = Orchestrator::new().run(&series, &context, &Selection::all());
    let result = report
        .all_results()
        .find(|r| r.id == "current_ratio")
        .unwrap();
    assert_eq!(result.status, Status::Unavailable);
    assert_eq!(result.unavailable_reason, Some(Reason::DivisionByZero));
}

#[test]
fn tier_and_category_filters_compose() {
    let context = CompanyContext::new("ACME", Sector::Industrial);
    let selection = Selection::all()
        .with_tier(Tier::Basic)
        .with_categories(vec![Category::Liquidity]);
    let report = Orchestrator::new().run(&series(), &context, &selection);
    assert!(!report.is_empty());
    for result in report.all_results() {
        assert_eq!(result.tier, Tier::Basic);
        assert_eq!(result.category, Category::Liquidity);
    }
}

#[test]
fn parallel_and_sequential_runs_are_identical() {
    let context = CompanyContext::new("ACME", Sector::Industrial);
    let sequential = Orchestrator::new()
        .with_config(EngineConfig::sequential())
        .run(&series(), &context, &Selection::all());
    let threaded = Orchestrator::new()
        .with_config(EngineConfig::new().with_threshold(1))
        .run(&series(), &context, &Selection::all());
    assert_eq!(
        serde_json::to_vec(&sequential).unwrap(),
        serde_json::to_vec(&threaded).unwrap()
    );
}

#[test]
fn industry_benchmark_overrides_descriptor_default() {
    let mut industry = IndustryBenchmark::new();
    // Against an industry average of 1.5, a 2.0 current ratio is excellent.
    industry.insert("current_ratio", dec!(1.5));
    let context = CompanyContext::new("ACME", Sector::Industrial).with_industry(industry);
    let report = Orchestrator::new().run(&series(), &context, &Selection::all());
    let result = report
        .all_results()
        .find(|r| r.id == "current_ratio")
        .unwrap();
    assert_eq!(result.rating, Some(RatingBand::Excellent));
    let comparison = result.benchmark.as_ref().unwrap();
    assert_eq!(comparison.benchmark, dec!(1.5));
    assert_eq!(comparison.source, BenchmarkSource::IndustryTable);
}

#[test]
fn adding_a_unit_to_the_registry_appears_in_the_next_run() {
    // Registry with one extra unit; no orchestrator or classifier changes.
    let mut units = vec![RegisteredUnit::new(
        "cash_to_equity",
        ("Cash to Equity", "النقد إلى حقوق الملكية"),
        Tier::Basic,
        Category::Liquidity,
        Direction::HigherBetter,
        dec!(0.2),
        UnitOfMeasure::Times,
        &[Field::Cash, Field::ShareholdersEquity],
        |input| {
            let cash = input.get(Field::Cash)?;
            let equity = input.get(Field::ShareholdersEquity)?;
            if equity.is_zero() {
                return Err(Reason::DivisionByZero);
            }
            Ok(AnalysisValue::Ratio(cash / equity))
        },
    )];
    // Keep one stock unit alongside to prove grouping still works.
    units.push(RegisteredUnit::new(
        "current_ratio",
        ("Current Ratio", "النسبة الجارية"),
        Tier::Basic,
        Category::Liquidity,
        Direction::HigherBetter,
        dec!(2.0),
        UnitOfMeasure::Times,
        &[Field::CurrentAssets, Field::CurrentLiabilities],
        |input| {
            let assets = input.get(Field::CurrentAssets)?;
            let liabilities = input.get(Field::CurrentLiabilities)?;
            if liabilities.is_zero() {
                return Err(Reason::DivisionByZero);
            }
            Ok(AnalysisValue::Ratio(assets / liabilities))
        },
    ));
    let extended = Registry::from_units(units);

    let context = CompanyContext::new("ACME", Sector::Industrial);
    let report =
        Orchestrator::with_registry(&extended).run(&series(), &context, &Selection::all());

    assert_eq!(report.len(), 2);
    let custom = report
        .all_results()
        .find(|r| r.id == "cash_to_equity")
        .expect("custom unit missing from run output");
    assert_eq!(custom.category, Category::Liquidity);
    assert_eq!(custom.status, Status::Computed);
    assert_eq!(custom.value, Some(AnalysisValue::Ratio(dec!(0.2))));
    assert!(custom.rating.is_some());
    assert!(custom.interpretation.is_some());
}

#[test]
fn report_serializes_with_stable_category_order() {
    let context = CompanyContext::new("ACME", Sector::Industrial);
    let report = Orchestrator::new().run(&series(), &context, &Selection::all());
    let mut last_index = 0;
    for section in &report.sections {
        let index = Category::ALL
            .iter()
            .position(|c| *c == section.category)
            .unwrap();
        assert!(index >= last_index, "sections out of declaration order");
        last_index = index;
    }
}
