//! Year-by-year projection from the latest real statement.
//!
//! Revenue compounds at the assumed growth rate; operating income, D&A,
//! capex and tax follow ratio equations off projected revenue. Monetary
//! lines stay in fixed-precision decimals throughout.

use crate::assumptions::Assumptions;
use crate::error::{ScenarioError, ScenarioResult};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tahlil_core::types::{
    CashFlowStatement, IncomeStatement, Statement, StatementSeries,
};

/// One projected year: a statement-like record plus its free cash flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedYear {
    /// Projected fiscal year.
    pub year: i32,
    /// Synthesized statement carrying the projected income and cash flow.
    pub statement: Statement,
    /// Projected free cash flow.
    pub free_cash_flow: Decimal,
}

/// Baseline figures extracted from the latest real statement.
struct Baseline {
    year: i32,
    revenue: Decimal,
    da_ratio: Decimal,
    interest: Decimal,
}

/// Default D&A share of revenue when the baseline statement carries none.
const DEFAULT_DA_RATIO: Decimal = dec!(0.05);

fn baseline(series: &StatementSeries) -> ScenarioResult<Baseline> {
    let latest = series.latest().ok_or(ScenarioError::EmptyHistory)?;
    let revenue = latest
        .income
        .revenue
        .ok_or(ScenarioError::MissingBaseline { field: "revenue" })?;
    if revenue <= Decimal::ZERO {
        return Err(ScenarioError::MissingBaseline { field: "revenue" });
    }
    let da_ratio = latest
        .income
        .depreciation_amortization
        .and_then(|da| da.checked_div(revenue))
        .unwrap_or(DEFAULT_DA_RATIO);
    let interest = latest.income.interest_expense.unwrap_or(Decimal::ZERO);
    Ok(Baseline {
        year: latest.year,
        revenue,
        da_ratio,
        interest,
    })
}

fn rate(value: f64, field: &'static str) -> ScenarioResult<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| {
        ScenarioError::invalid_assumption(field, value, "not representable as a decimal")
    })
}

/// Projects `assumptions.horizon_years` statement-like records forward from
/// the latest real statement in `series`.
pub fn project(
    series: &StatementSeries,
    assumptions: &Assumptions,
) -> ScenarioResult<Vec<ProjectedYear>> {
    let base = baseline(series)?;
    let currency = series.latest().map(|s| s.currency).unwrap_or_default();
    let growth = Decimal::ONE + rate(assumptions.revenue_growth, "revenue_growth")?;
    let margin = rate(assumptions.operating_margin, "operating_margin")?;
    let capex_ratio = rate(assumptions.capex_to_revenue, "capex_to_revenue")?;
    let tax_rate = rate(assumptions.tax_rate, "tax_rate")?;

    let mut years = Vec::with_capacity(assumptions.horizon_years);
    let mut revenue = base.revenue;
    for offset in 1..=assumptions.horizon_years {
        revenue *= growth;
        let operating_income = revenue * margin;
        let depreciation = revenue * base.da_ratio;
        let pretax = operating_income - base.interest;
        let tax = if pretax > Decimal::ZERO {
            pretax * tax_rate
        } else {
            Decimal::ZERO
        };
        let net_income = pretax - tax;
        let operating_cash_flow = net_income + depreciation;
        let capex = revenue * capex_ratio;
        let free_cash_flow = operating_cash_flow - capex;

        let year = base.year + offset as i32;
        let statement = Statement::new(year, currency)
            .with_income_statement(IncomeStatement {
                revenue: Some(revenue),
                operating_income: Some(operating_income),
                depreciation_amortization: Some(depreciation),
                interest_expense: Some(base.interest),
                income_before_tax: Some(pretax),
                income_tax: Some(tax),
                net_income: Some(net_income),
                ..IncomeStatement::default()
            })
            .with_cash_flow(CashFlowStatement {
                operating_cash_flow: Some(operating_cash_flow),
                capital_expenditures: Some(capex),
                free_cash_flow: Some(free_cash_flow),
                ..CashFlowStatement::default()
            });
        years.push(ProjectedYear {
            year,
            statement,
            free_cash_flow,
        });
    }
    Ok(years)
}

/// Terminal growth cap used for the Gordon terminal value.
const TERMINAL_GROWTH_CAP: f64 = 0.02;

/// Net present value of the projected free cash flows plus a Gordon
/// terminal value when the discount rate supports one.
pub fn net_present_value(
    projections: &[ProjectedYear],
    assumptions: &Assumptions,
) -> ScenarioResult<Decimal> {
    let discount = Decimal::ONE + rate(assumptions.discount_rate, "discount_rate")?;
    let mut npv = Decimal::ZERO;
    for (index, year) in projections.iter().enumerate() {
        let factor = discount.powi(index as i64 + 1);
        npv += year
            .free_cash_flow
            .checked_div(factor)
            .unwrap_or(Decimal::ZERO);
    }

    // Terminal value only when the discount rate clears terminal growth.
    let terminal_growth = assumptions.revenue_growth.min(TERMINAL_GROWTH_CAP);
    if let Some(last) = projections.last() {
        if assumptions.discount_rate > terminal_growth {
            let g = rate(terminal_growth, "revenue_growth")?;
            let r = rate(assumptions.discount_rate, "discount_rate")?;
            let terminal = last.free_cash_flow * (Decimal::ONE + g) / (r - g);
            let factor = discount.powi(projections.len() as i64);
            npv += terminal.checked_div(factor).unwrap_or(Decimal::ZERO);
        }
    }
    Ok(npv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tahlil_core::types::Currency;

    fn series_with_revenue(revenue: Decimal) -> StatementSeries {
        let mut series = StatementSeries::new("ACME");
        series
            .push(
                Statement::new(2024, Currency::SAR).with_income_statement(IncomeStatement {
                    revenue: Some(revenue),
                    depreciation_amortization: Some(revenue * dec!(0.04)),
                    interest_expense: Some(dec!(1_000)),
                    ..IncomeStatement::default()
                }),
            )
            .unwrap();
        series
    }

    #[test]
    fn test_revenue_compounds() {
        let series = series_with_revenue(dec!(100_000));
        let assumptions = Assumptions {
            revenue_growth: 0.10,
            ..Assumptions::base()
        };
        let years = project(&series, &assumptions).unwrap();
        assert_eq!(years.len(), 5);
        assert_eq!(years[0].statement.income.revenue, Some(dec!(110_000.00)));
        let year5 = years[4].statement.income.revenue.unwrap();
        // 100000 * 1.1^5 = 161051
        assert!((year5 - dec!(161_051)).abs() < dec!(0.01));
    }

    #[test]
    fn test_projection_monotonic_in_growth() {
        let series = series_with_revenue(dec!(100_000));
        let mut last_year5 = Decimal::MIN;
        for growth in [0.00, 0.03, 0.06] {
            let assumptions = Assumptions {
                revenue_growth: growth,
                ..Assumptions::base()
            };
            let years = project(&series, &assumptions).unwrap();
            let year5 = years[4].statement.income.revenue.unwrap();
            assert!(year5 >= last_year5, "projection not monotonic in growth");
            last_year5 = year5;
        }
    }

    #[test]
    fn test_empty_series_rejected() {
        let series = StatementSeries::new("ACME");
        assert_eq!(
            project(&series, &Assumptions::base()).unwrap_err(),
            ScenarioError::EmptyHistory
        );
    }

    #[test]
    fn test_missing_revenue_rejected() {
        let mut series = StatementSeries::new("ACME");
        series.push(Statement::new(2024, Currency::SAR)).unwrap();
        assert!(matches!(
            project(&series, &Assumptions::base()),
            Err(ScenarioError::MissingBaseline { field: "revenue" })
        ));
    }

    #[test]
    fn test_npv_positive_for_positive_cash_flows() {
        let series = series_with_revenue(dec!(100_000));
        let assumptions = Assumptions::base();
        let years = project(&series, &assumptions).unwrap();
        let npv = net_present_value(&years, &assumptions).unwrap();
        assert!(npv > Decimal::ZERO);
    }

    #[test]
    fn test_npv_decreases_with_discount_rate() {
        let series = series_with_revenue(dec!(100_000));
        let low = Assumptions {
            discount_rate: 0.08,
            ..Assumptions::base()
        };
        let high = Assumptions {
            discount_rate: 0.14,
            ..Assumptions::base()
        };
        let years_low = project(&series, &low).unwrap();
        let years_high = project(&series, &high).unwrap();
        let npv_low = net_present_value(&years_low, &low).unwrap();
        let npv_high = net_present_value(&years_high, &high).unwrap();
        assert!(npv_low > npv_high);
    }
}
