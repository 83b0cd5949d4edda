//! Leverage and capital structure ratios.

use crate::input::ComputeInput;
use crate::registry::RegisteredUnit;
use crate::support::{percent, ratio, CalcResult};
use rust_decimal_macros::dec;
use tahlil_core::types::{Category, Direction, Field, Tier, UnitOfMeasure};

/// Total liabilities over shareholders' equity.
pub fn debt_to_equity_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::TotalLiabilities)?,
        input.get(Field::ShareholdersEquity)?,
    )
}

/// Total liabilities over total assets.
pub fn debt_to_assets_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::TotalLiabilities)?,
        input.get(Field::TotalAssets)?,
    )
}

/// Shareholders' equity over total assets.
pub fn equity_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::ShareholdersEquity)?,
        input.get(Field::TotalAssets)?,
    )
}

/// Total assets over shareholders' equity.
pub fn equity_multiplier(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::TotalAssets)?,
        input.get(Field::ShareholdersEquity)?,
    )
}

/// Operating income over interest expense.
pub fn interest_coverage_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::OperatingIncome)?,
        input.get(Field::InterestExpense)?,
    )
}

/// EBITDA over scheduled debt service (interest plus current portion of
/// long-term debt).
pub fn debt_service_coverage_ratio(input: &ComputeInput) -> CalcResult {
    let debt_service =
        input.get(Field::InterestExpense)? + input.get(Field::CurrentPortionLongTermDebt)?;
    ratio(input.ebitda()?, debt_service)
}

/// Long-term debt over long-term capitalization.
pub fn long_term_debt_to_capitalization(input: &ComputeInput) -> CalcResult {
    let long_term_debt = input.get(Field::LongTermDebt)?;
    ratio(
        long_term_debt,
        long_term_debt + input.get(Field::ShareholdersEquity)?,
    )
}

/// Net fixed assets over shareholders' equity.
pub fn fixed_assets_to_equity(input: &ComputeInput) -> CalcResult {
    ratio(
        input.net_fixed_assets()?,
        input.get(Field::ShareholdersEquity)?,
    )
}

/// Liabilities share of total financing.
pub fn external_financing_ratio(input: &ComputeInput) -> CalcResult {
    let liabilities = input.get(Field::TotalLiabilities)?;
    ratio(
        liabilities,
        liabilities + input.get(Field::ShareholdersEquity)?,
    )
}

/// Net debt over EBITDA.
pub fn net_debt_to_ebitda(input: &ComputeInput) -> CalcResult {
    ratio(input.net_debt()?, input.ebitda()?)
}

/// Degree of financial leverage: EBIT over EBIT less interest.
pub fn degree_of_financial_leverage(input: &ComputeInput) -> CalcResult {
    let ebit = input.get(Field::OperatingIncome)?;
    ratio(ebit, ebit - input.get(Field::InterestExpense)?)
}

/// Interest-bearing debt over total assets.
pub fn financial_debt_ratio(input: &ComputeInput) -> CalcResult {
    ratio(input.financial_debt()?, input.get(Field::TotalAssets)?)
}

/// Operating cash flow over total liabilities.
pub fn cash_debt_coverage(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::TotalLiabilities)?,
    )
}

/// Contribution (revenue less COGS) over operating income.
pub fn operating_leverage(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::Revenue)? - input.get(Field::CostOfRevenue)?,
        input.get(Field::OperatingIncome)?,
    )
}

/// Shareholders' equity over total liabilities.
pub fn financial_safety_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::ShareholdersEquity)?,
        input.get(Field::TotalLiabilities)?,
    )
}

/// Interest expense as a share of revenue.
pub fn interest_burden_ratio(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::InterestExpense)?, input.get(Field::Revenue)?)
}

/// Shareholders' equity over net fixed assets.
pub fn equity_to_fixed_assets(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::ShareholdersEquity)?,
        input.net_fixed_assets()?,
    )
}

/// Leverage catalog entries.
pub(crate) fn units() -> Vec<RegisteredUnit> {
    use Category::Leverage;
    use Direction::{Balanced, HigherBetter, LowerBetter};
    use Tier::Basic;
    use UnitOfMeasure::{Percent, Times};

    vec![
        RegisteredUnit::new(
            "debt_to_equity_ratio",
            ("Debt to Equity Ratio", "نسبة الدين إلى حقوق الملكية"),
            Basic, Leverage, LowerBetter, dec!(1.0), Times,
            &[Field::TotalLiabilities, Field::ShareholdersEquity],
            debt_to_equity_ratio,
        ),
        RegisteredUnit::new(
            "debt_to_assets_ratio",
            ("Debt to Assets Ratio", "نسبة الدين إلى الأصول"),
            Basic, Leverage, LowerBetter, dec!(0.5), Times,
            &[Field::TotalLiabilities, Field::TotalAssets],
            debt_to_assets_ratio,
        ),
        RegisteredUnit::new(
            "equity_ratio",
            ("Equity Ratio", "نسبة حقوق الملكية"),
            Basic, Leverage, HigherBetter, dec!(0.5), Times,
            &[Field::ShareholdersEquity, Field::TotalAssets],
            equity_ratio,
        ),
        RegisteredUnit::new(
            "equity_multiplier",
            ("Equity Multiplier", "مضاعف حقوق الملكية"),
            Basic, Leverage, LowerBetter, dec!(2.0), Times,
            &[Field::TotalAssets, Field::ShareholdersEquity],
            equity_multiplier,
        ),
        RegisteredUnit::new(
            "interest_coverage_ratio",
            ("Interest Coverage Ratio", "نسبة تغطية الفوائد"),
            Basic, Leverage, HigherBetter, dec!(4), Times,
            &[Field::OperatingIncome, Field::InterestExpense],
            interest_coverage_ratio,
        ),
        RegisteredUnit::new(
            "debt_service_coverage_ratio",
            ("Debt Service Coverage Ratio", "نسبة تغطية خدمة الدين"),
            Basic, Leverage, HigherBetter, dec!(1.5), Times,
            &[
                Field::OperatingIncome,
                Field::DepreciationAmortization,
                Field::InterestExpense,
                Field::CurrentPortionLongTermDebt,
            ],
            debt_service_coverage_ratio,
        ),
        RegisteredUnit::new(
            "long_term_debt_to_capitalization",
            ("Long-Term Debt to Capitalization", "الدين طويل الأجل إلى رأس المال"),
            Basic, Leverage, LowerBetter, dec!(0.4), Times,
            &[Field::LongTermDebt, Field::ShareholdersEquity],
            long_term_debt_to_capitalization,
        ),
        RegisteredUnit::new(
            "fixed_assets_to_equity",
            ("Fixed Assets to Equity", "الأصول الثابتة إلى حقوق الملكية"),
            Basic, Leverage, LowerBetter, dec!(1.0), Times,
            &[
                Field::PropertyPlantEquipment,
                Field::AccumulatedDepreciation,
                Field::ShareholdersEquity,
            ],
            fixed_assets_to_equity,
        ),
        RegisteredUnit::new(
            "external_financing_ratio",
            ("External Financing Ratio", "نسبة التمويل الخارجي"),
            Basic, Leverage, LowerBetter, dec!(0.5), Times,
            &[Field::TotalLiabilities, Field::ShareholdersEquity],
            external_financing_ratio,
        ),
        RegisteredUnit::new(
            "net_debt_to_ebitda",
            ("Net Debt to EBITDA", "الدين الصافي إلى الأرباح التشغيلية"),
            Basic, Leverage, LowerBetter, dec!(3), Times,
            &[
                Field::TotalLiabilities,
                Field::Cash,
                Field::OperatingIncome,
                Field::DepreciationAmortization,
            ],
            net_debt_to_ebitda,
        ),
        RegisteredUnit::new(
            "degree_of_financial_leverage",
            ("Degree of Financial Leverage", "درجة الرافعة المالية"),
            Basic, Leverage, LowerBetter, dec!(1.5), Times,
            &[Field::OperatingIncome, Field::InterestExpense],
            degree_of_financial_leverage,
        ),
        RegisteredUnit::new(
            "financial_debt_ratio",
            ("Financial Debt Ratio", "نسبة الدين المالي"),
            Basic, Leverage, LowerBetter, dec!(0.3), Times,
            &[Field::ShortTermDebt, Field::LongTermDebt, Field::TotalAssets],
            financial_debt_ratio,
        ),
        RegisteredUnit::new(
            "cash_debt_coverage",
            ("Cash Debt Coverage", "التغطية النقدية للدين"),
            Basic, Leverage, HigherBetter, dec!(0.2), Times,
            &[Field::OperatingCashFlow, Field::TotalLiabilities],
            cash_debt_coverage,
        ),
        RegisteredUnit::new(
            "operating_leverage",
            ("Operating Leverage", "الرافعة التشغيلية"),
            Basic, Leverage, Balanced, dec!(2), Times,
            &[Field::Revenue, Field::CostOfRevenue, Field::OperatingIncome],
            operating_leverage,
        ),
        RegisteredUnit::new(
            "financial_safety_ratio",
            ("Financial Safety Ratio", "معامل الأمان المالي"),
            Basic, Leverage, HigherBetter, dec!(1.0), Times,
            &[Field::ShareholdersEquity, Field::TotalLiabilities],
            financial_safety_ratio,
        ),
        RegisteredUnit::new(
            "interest_burden_ratio",
            ("Interest Burden Ratio", "عبء الفوائد"),
            Basic, Leverage, LowerBetter, dec!(3), Percent,
            &[Field::InterestExpense, Field::Revenue],
            interest_burden_ratio,
        ),
        RegisteredUnit::new(
            "equity_to_fixed_assets",
            ("Equity to Fixed Assets", "حقوق الملكية إلى الأصول الثابتة"),
            Basic, Leverage, HigherBetter, dec!(1.2), Times,
            &[
                Field::ShareholdersEquity,
                Field::PropertyPlantEquipment,
                Field::AccumulatedDepreciation,
            ],
            equity_to_fixed_assets,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tahlil_core::types::{
        AnalysisValue, BalanceSheet, CompanyContext, Currency as Ccy, IncomeStatement, Reason,
        Sector, Statement, StatementSeries,
    };

    fn input_fixture() -> (StatementSeries, CompanyContext) {
        let statement = Statement::new(2024, Ccy::SAR)
            .with_balance_sheet(BalanceSheet {
                total_assets: Some(dec!(500_000)),
                total_liabilities: Some(dec!(250_000)),
                shareholders_equity: Some(dec!(250_000)),
                long_term_debt: Some(dec!(100_000)),
                short_term_debt: Some(dec!(20_000)),
                current_portion_long_term_debt: Some(dec!(10_000)),
                cash: Some(dec!(50_000)),
                ..BalanceSheet::default()
            })
            .with_income_statement(IncomeStatement {
                revenue: Some(dec!(400_000)),
                cost_of_revenue: Some(dec!(240_000)),
                operating_income: Some(dec!(60_000)),
                depreciation_amortization: Some(dec!(12_000)),
                interest_expense: Some(dec!(8_000)),
                ..IncomeStatement::default()
            });
        let mut series = StatementSeries::new("ACME");
        series.push(statement).unwrap();
        (series, CompanyContext::new("ACME", Sector::Industrial))
    }

    #[test]
    fn test_debt_to_equity() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        assert_eq!(debt_to_equity_ratio(&input), Ok(AnalysisValue::Ratio(dec!(1))));
    }

    #[test]
    fn test_debt_service_coverage_uses_full_debt_service() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        // (60000 + 12000) / (8000 + 10000) = 4
        assert_eq!(
            debt_service_coverage_ratio(&input),
            Ok(AnalysisValue::Ratio(dec!(4)))
        );
    }

    #[test]
    fn test_interest_coverage_zero_interest_not_computable() {
        let mut series = StatementSeries::new("ACME");
        series
            .push(
                Statement::new(2024, Ccy::SAR).with_income_statement(IncomeStatement {
                    operating_income: Some(dec!(60_000)),
                    interest_expense: Some(rust_decimal::Decimal::ZERO),
                    ..IncomeStatement::default()
                }),
            )
            .unwrap();
        let context = CompanyContext::new("ACME", Sector::Industrial);
        let input = ComputeInput::latest(&series, &context).unwrap();
        assert_eq!(interest_coverage_ratio(&input), Err(Reason::DivisionByZero));
    }

    #[test]
    fn test_units_count() {
        assert_eq!(units().len(), 17);
    }
}
