//! Cash flow quality analyses.

use crate::input::ComputeInput;
use crate::registry::RegisteredUnit;
use crate::support::{percent, ratio, CalcResult};
use rust_decimal_macros::dec;
use tahlil_core::types::{AnalysisValue, Category, Direction, Field, Tier, UnitOfMeasure};

/// Operating cash flow over net income.
pub fn earnings_quality_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::NetIncome)?,
    )
}

/// Operating cash flow over operating income.
pub fn cash_conversion_rate(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::OperatingIncome)?,
    )
}

/// Capital expenditures as a share of revenue.
pub fn capex_to_revenue(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::CapitalExpenditures)?,
        input.get(Field::Revenue)?,
    )
}

/// Capital expenditures over depreciation & amortization.
///
/// Below 1.0 over a sustained period signals under-investment in the asset
/// base.
pub fn capex_to_depreciation(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::CapitalExpenditures)?,
        input.get(Field::DepreciationAmortization)?,
    )
}

/// Free cash flow as an amount.
pub fn free_cash_flow(input: &ComputeInput) -> CalcResult {
    Ok(AnalysisValue::Amount(input.free_cash_flow()?))
}

/// Free cash flow over net income.
pub fn fcf_conversion(input: &ComputeInput) -> CalcResult {
    ratio(input.free_cash_flow()?, input.get(Field::NetIncome)?)
}

/// Operating cash flow over dividends paid.
pub fn dividend_coverage_cash(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::DividendsPaid)?,
    )
}

/// Operating cash flow over capex, dividends and debt repayment combined.
pub fn cash_flow_adequacy(input: &ComputeInput) -> CalcResult {
    let needs = input.get(Field::CapitalExpenditures)?
        + input.get(Field::DividendsPaid)?
        + input.get(Field::DebtRepayment)?;
    ratio(input.get(Field::OperatingCashFlow)?, needs)
}

/// Capex as a share of operating cash flow.
pub fn reinvestment_ratio(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::CapitalExpenditures)?,
        input.get(Field::OperatingCashFlow)?,
    )
}

/// Operating cash flow over debt repayments.
pub fn debt_repayment_capacity(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::DebtRepayment)?,
    )
}

/// Operating cash flow over accrual earnings (net income plus D&A).
pub fn operating_cash_index(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::NetIncome)? + input.get(Field::DepreciationAmortization)?,
    )
}

/// Operating cash flow over interest-bearing debt.
pub fn cash_flow_to_debt(input: &ComputeInput) -> CalcResult {
    ratio(input.get(Field::OperatingCashFlow)?, input.financial_debt()?)
}

/// Operating cash flow over capital expenditures.
pub fn ocf_to_capex(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::CapitalExpenditures)?,
    )
}

/// Flow catalog entries.
pub(crate) fn units() -> Vec<RegisteredUnit> {
    use Category::Flow;
    use Direction::{Balanced, HigherBetter};
    use Tier::Applied;
    use UnitOfMeasure::{Currency, Percent, Times};

    vec![
        RegisteredUnit::new(
            "earnings_quality_ratio",
            ("Earnings Quality Ratio", "نسبة جودة الأرباح"),
            Applied, Flow, HigherBetter, dec!(1.2), Times,
            &[Field::OperatingCashFlow, Field::NetIncome],
            earnings_quality_ratio,
        ),
        RegisteredUnit::new(
            "cash_conversion_rate",
            ("Cash Conversion Rate", "معدل التحويل النقدي"),
            Applied, Flow, HigherBetter, dec!(1.1), Times,
            &[Field::OperatingCashFlow, Field::OperatingIncome],
            cash_conversion_rate,
        ),
        RegisteredUnit::new(
            "capex_to_revenue",
            ("Capex to Revenue", "الإنفاق الرأسمالي إلى الإيرادات"),
            Applied, Flow, Balanced, dec!(6), Percent,
            &[Field::CapitalExpenditures, Field::Revenue],
            capex_to_revenue,
        ),
        RegisteredUnit::new(
            "capex_to_depreciation",
            ("Capex to Depreciation", "الإنفاق الرأسمالي إلى الإهلاك"),
            Applied, Flow, Balanced, dec!(1.2), Times,
            &[Field::CapitalExpenditures, Field::DepreciationAmortization],
            capex_to_depreciation,
        ),
        RegisteredUnit::new(
            "free_cash_flow",
            ("Free Cash Flow", "التدفق النقدي الحر"),
            Applied, Flow, HigherBetter, dec!(0), Currency,
            &[Field::OperatingCashFlow, Field::CapitalExpenditures],
            free_cash_flow,
        ),
        RegisteredUnit::new(
            "fcf_conversion",
            ("FCF Conversion", "تحويل التدفق النقدي الحر"),
            Applied, Flow, HigherBetter, dec!(0.8), Times,
            &[Field::OperatingCashFlow, Field::CapitalExpenditures, Field::NetIncome],
            fcf_conversion,
        ),
        RegisteredUnit::new(
            "dividend_coverage_cash",
            ("Cash Dividend Coverage", "التغطية النقدية للتوزيعات"),
            Applied, Flow, HigherBetter, dec!(2.5), Times,
            &[Field::OperatingCashFlow, Field::DividendsPaid],
            dividend_coverage_cash,
        ),
        RegisteredUnit::new(
            "cash_flow_adequacy",
            ("Cash Flow Adequacy", "كفاية التدفق النقدي"),
            Applied, Flow, HigherBetter, dec!(1.0), Times,
            &[
                Field::OperatingCashFlow,
                Field::CapitalExpenditures,
                Field::DividendsPaid,
                Field::DebtRepayment,
            ],
            cash_flow_adequacy,
        ),
        RegisteredUnit::new(
            "reinvestment_ratio",
            ("Reinvestment Ratio", "نسبة إعادة الاستثمار"),
            Applied, Flow, Balanced, dec!(50), Percent,
            &[Field::CapitalExpenditures, Field::OperatingCashFlow],
            reinvestment_ratio,
        ),
        RegisteredUnit::new(
            "debt_repayment_capacity",
            ("Debt Repayment Capacity", "القدرة على سداد الدين"),
            Applied, Flow, HigherBetter, dec!(2), Times,
            &[Field::OperatingCashFlow, Field::DebtRepayment],
            debt_repayment_capacity,
        ),
        RegisteredUnit::new(
            "operating_cash_index",
            ("Operating Cash Index", "مؤشر النقد التشغيلي"),
            Applied, Flow, HigherBetter, dec!(0.9), Times,
            &[
                Field::OperatingCashFlow,
                Field::NetIncome,
                Field::DepreciationAmortization,
            ],
            operating_cash_index,
        ),
        RegisteredUnit::new(
            "cash_flow_to_debt",
            ("Cash Flow to Debt", "التدفق النقدي إلى الدين"),
            Applied, Flow, HigherBetter, dec!(0.25), Times,
            &[Field::OperatingCashFlow, Field::ShortTermDebt, Field::LongTermDebt],
            cash_flow_to_debt,
        ),
        RegisteredUnit::new(
            "ocf_to_capex",
            ("OCF to Capex", "التدفق التشغيلي إلى الإنفاق الرأسمالي"),
            Applied, Flow, HigherBetter, dec!(2), Times,
            &[Field::OperatingCashFlow, Field::CapitalExpenditures],
            ocf_to_capex,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tahlil_core::types::{
        CashFlowStatement, CompanyContext, Currency as Ccy, IncomeStatement, Sector, Statement,
        StatementSeries,
    };

    fn input_fixture() -> (StatementSeries, CompanyContext) {
        let statement = Statement::new(2024, Ccy::SAR)
            .with_income_statement(IncomeStatement {
                revenue: Some(dec!(400_000)),
                operating_income: Some(dec!(60_000)),
                depreciation_amortization: Some(dec!(12_000)),
                net_income: Some(dec!(40_000)),
                ..IncomeStatement::default()
            })
            .with_cash_flow(CashFlowStatement {
                operating_cash_flow: Some(dec!(55_000)),
                capital_expenditures: Some(dec!(20_000)),
                dividends_paid: Some(dec!(16_000)),
                debt_repayment: Some(dec!(10_000)),
                ..CashFlowStatement::default()
            });
        let mut series = StatementSeries::new("ACME");
        series.push(statement).unwrap();
        (series, CompanyContext::new("ACME", Sector::Industrial))
    }

    #[test]
    fn test_earnings_quality() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        assert_eq!(
            earnings_quality_ratio(&input),
            Ok(AnalysisValue::Ratio(dec!(1.375)))
        );
    }

    #[test]
    fn test_cash_flow_adequacy() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        // 55000 / (20000 + 16000 + 10000)
        match cash_flow_adequacy(&input).unwrap() {
            AnalysisValue::Ratio(r) => assert!((r - dec!(1.1957)).abs() < dec!(0.001)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_free_cash_flow_amount() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        assert_eq!(
            free_cash_flow(&input),
            Ok(AnalysisValue::Amount(dec!(35_000)))
        );
    }

    #[test]
    fn test_units_count() {
        assert_eq!(units().len(), 13);
    }
}
