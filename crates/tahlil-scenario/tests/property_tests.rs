//! Property-based tests for projection invariants.

use proptest::prelude::*;
use rust_decimal_macros::dec;
use tahlil_core::prelude::*;
use tahlil_scenario::prelude::*;
use tahlil_scenario::projection::project;

fn series() -> StatementSeries {
    let statement = Statement::new(2024, Currency::SAR).with_income_statement(IncomeStatement {
        revenue: Some(dec!(250_000)),
        depreciation_amortization: Some(dec!(10_000)),
        ..IncomeStatement::default()
    });
    StatementSeries::from_statements("ACME", vec![statement]).unwrap()
}

proptest! {
    #[test]
    fn projected_revenue_is_monotonic_in_growth(
        g1 in -0.4f64..0.9,
        g2 in -0.4f64..0.9,
        horizon in 1usize..10,
    ) {
        let (low, high) = if g1 <= g2 { (g1, g2) } else { (g2, g1) };
        let series = series();
        let base = Assumptions {
            horizon_years: horizon,
            ..Assumptions::base()
        };
        let low_years = project(&series, &Assumptions { revenue_growth: low, ..base }).unwrap();
        let high_years = project(&series, &Assumptions { revenue_growth: high, ..base }).unwrap();
        for (a, b) in low_years.iter().zip(high_years.iter()) {
            prop_assert!(
                a.statement.income.revenue.unwrap() <= b.statement.income.revenue.unwrap()
            );
        }
    }

    #[test]
    fn projection_horizon_is_respected(horizon in 1usize..15) {
        let assumptions = Assumptions {
            horizon_years: horizon,
            ..Assumptions::base()
        };
        let years = project(&series(), &assumptions).unwrap();
        prop_assert_eq!(years.len(), horizon);
        // Years run consecutively from the baseline.
        for (offset, year) in years.iter().enumerate() {
            prop_assert_eq!(year.year, 2025 + offset as i32);
        }
    }

    #[test]
    fn projection_is_deterministic(g in -0.4f64..0.9) {
        let assumptions = Assumptions {
            revenue_growth: g,
            ..Assumptions::base()
        };
        let a = project(&series(), &assumptions).unwrap();
        let b = project(&series(), &assumptions).unwrap();
        prop_assert_eq!(a, b);
    }
}
