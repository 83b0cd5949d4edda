//! Property-based tests for the numeric policy helpers, exercised through
//! the public unit formulas.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tahlil_analytics::{registry, ComputeInput};
use tahlil_core::prelude::*;

fn decimal_amount() -> impl Strategy<Value = Decimal> {
    // Statement-scale amounts with two decimal places.
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn series_with(revenue_prior: Decimal, revenue_current: Decimal) -> StatementSeries {
    let make = |year, revenue| {
        Statement::new(year, Currency::SAR).with_income_statement(IncomeStatement {
            revenue: Some(revenue),
            ..IncomeStatement::default()
        })
    };
    StatementSeries::from_statements(
        "ACME",
        vec![make(2023, revenue_prior), make(2024, revenue_current)],
    )
    .unwrap()
}

proptest! {
    #[test]
    fn revenue_growth_never_yields_undefined_values(
        prior in decimal_amount(),
        current in decimal_amount(),
    ) {
        let series = series_with(prior, current);
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let input = ComputeInput::latest(&series, &context).unwrap();
        let unit = registry().get("revenue_growth").unwrap();

        // Every input resolves to a value or an enumerated reason; Decimal
        // has no NaN or Infinity to leak.
        match unit.compute(&input) {
            Outcome::Value(value) => {
                let _ = value.scalar();
            }
            Outcome::NotComputable(reason) => {
                let is_enumerated_reason = matches!(
                    reason,
                    Reason::DivisionByZero | Reason::MissingField { .. }
                );
                prop_assert!(is_enumerated_reason);
            }
        }
    }

    #[test]
    fn current_ratio_scales_linearly(
        assets in 1i64..1_000_000,
        liabilities in 1i64..1_000_000,
        scale in 2i64..10,
    ) {
        let build = |a: i64, l: i64| {
            let statement = Statement::new(2024, Currency::SAR).with_balance_sheet(BalanceSheet {
                current_assets: Some(Decimal::from(a)),
                current_liabilities: Some(Decimal::from(l)),
                ..BalanceSheet::default()
            });
            StatementSeries::from_statements("ACME", vec![statement]).unwrap()
        };
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let unit = registry().get("current_ratio").unwrap();

        let base_series = build(assets, liabilities);
        let scaled_series = build(assets * scale, liabilities * scale);
        let base = unit.compute(&ComputeInput::latest(&base_series, &context).unwrap());
        let scaled = unit.compute(&ComputeInput::latest(&scaled_series, &context).unwrap());

        // A pure ratio is invariant under uniform scaling.
        match (base, scaled) {
            (Outcome::Value(a), Outcome::Value(b)) => {
                prop_assert!((a.scalar() - b.scalar()).abs() < dec!(0.0000001));
            }
            other => prop_assert!(false, "unexpected outcomes {other:?}"),
        }
    }

    #[test]
    fn computations_are_pure(
        assets in 1i64..1_000_000,
        liabilities in 0i64..1_000_000,
    ) {
        let statement = Statement::new(2024, Currency::SAR).with_balance_sheet(BalanceSheet {
            current_assets: Some(Decimal::from(assets)),
            current_liabilities: Some(Decimal::from(liabilities)),
            ..BalanceSheet::default()
        });
        let series = StatementSeries::from_statements("ACME", vec![statement]).unwrap();
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let input = ComputeInput::latest(&series, &context).unwrap();
        let unit = registry().get("current_ratio").unwrap();

        prop_assert_eq!(unit.compute(&input), unit.compute(&input));
    }
}
