//! Profitability ratios: margins and returns on capital.

use crate::input::ComputeInput;
use crate::registry::RegisteredUnit;
use crate::support::{pct_change, percent, CalcResult};
use rust_decimal_macros::dec;
use tahlil_core::types::{Category, Direction, Field, Tier, UnitOfMeasure};

/// Gross profit as a share of revenue.
pub fn gross_profit_margin(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::GrossProfit)?, input.get(Field::Revenue)?)
}

/// Operating income as a share of revenue.
pub fn operating_profit_margin(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::OperatingIncome)?, input.get(Field::Revenue)?)
}

/// Net income as a share of revenue.
pub fn net_profit_margin(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::NetIncome)?, input.get(Field::Revenue)?)
}

/// Net income as a share of total assets (ROA).
pub fn return_on_assets(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::NetIncome)?, input.get(Field::TotalAssets)?)
}

/// Net income as a share of shareholders' equity (ROE).
pub fn return_on_equity(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::NetIncome)?,
        input.get(Field::ShareholdersEquity)?,
    )
}

/// NOPAT as a share of invested capital (ROIC).
pub fn return_on_invested_capital(input: &ComputeInput) -> CalcResult {
    percent(input.nopat()?, input.invested_capital()?)
}

/// Operating income as a share of capital employed (ROCE).
pub fn return_on_capital_employed(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::OperatingIncome)?, input.capital_employed()?)
}

/// EBITDA as a share of revenue.
pub fn ebitda_margin(input: &ComputeInput) -> CalcResult {
    percent(input.ebitda()?, input.get(Field::Revenue)?)
}

/// Operating cash flow as a share of revenue.
pub fn operating_cash_flow_margin(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::Revenue)?,
    )
}

/// Free cash flow as a share of revenue.
pub fn free_cash_flow_margin(input: &ComputeInput) -> CalcResult {
    percent(input.free_cash_flow()?, input.get(Field::Revenue)?)
}

/// Net income as a share of tangible assets.
pub fn return_on_tangible_assets(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::NetIncome)?, input.tangible_assets()?)
}

/// Year-over-year net income growth.
pub fn earnings_growth_rate(input: &ComputeInput) -> CalcResult {
    pct_change(
        input.prior_get(Field::NetIncome)?,
        input.get(Field::NetIncome)?,
    )
}

/// Operating expenses as a share of operating income.
pub fn cost_to_income_ratio(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::OperatingExpenses)?,
        input.get(Field::OperatingIncome)?,
    )
}

/// Operating income as a share of revenue (ROS).
pub fn return_on_sales(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::OperatingIncome)?, input.get(Field::Revenue)?)
}

/// Contribution margin with variable costs estimated at 70% of COGS.
pub fn contribution_margin(input: &ComputeInput) -> CalcResult {
    let revenue = input.get(Field::Revenue)?;
    let variable_costs = input.get(Field::CostOfRevenue)? * dec!(0.7);
    percent(revenue - variable_costs, revenue)
}

/// Gross profit as a share of operating expenses.
pub fn operating_efficiency(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::GrossProfit)?,
        input.get(Field::OperatingExpenses)?,
    )
}

/// Operating income as a share of total assets (basic earning power).
pub fn basic_earning_power(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::OperatingIncome)?,
        input.get(Field::TotalAssets)?,
    )
}

/// EBIT (pre-tax income plus interest) as a share of revenue.
pub fn ebit_margin(input: &ComputeInput) -> CalcResult {
    let ebit = input.get(Field::IncomeBeforeTax)? + input.get(Field::InterestExpense)?;
    percent(ebit, input.get(Field::Revenue)?)
}

/// Operating income as a share of operating assets.
pub fn return_on_operating_assets(input: &ComputeInput) -> CalcResult {
    let operating_assets = input.get(Field::TotalAssets)?
        - input.get(Field::Cash)?
        - input.get(Field::MarketableSecurities)?;
    percent(input.get(Field::OperatingIncome)?, operating_assets)
}

/// Income tax as a share of pre-tax income.
pub fn effective_tax_rate(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::IncomeTax)?,
        input.get(Field::IncomeBeforeTax)?,
    )
}

/// Profitability catalog entries.
pub(crate) fn units() -> Vec<RegisteredUnit> {
    use Category::Profitability;
    use Direction::{Balanced, HigherBetter, LowerBetter};
    use Tier::Basic;
    use UnitOfMeasure::Percent;

    vec![
        RegisteredUnit::new(
            "gross_profit_margin",
            ("Gross Profit Margin", "هامش الربح الإجمالي"),
            Basic, Profitability, HigherBetter, dec!(30), Percent,
            &[Field::GrossProfit, Field::Revenue],
            gross_profit_margin,
        ),
        RegisteredUnit::new(
            "operating_profit_margin",
            ("Operating Profit Margin", "هامش الربح التشغيلي"),
            Basic, Profitability, HigherBetter, dec!(15), Percent,
            &[Field::OperatingIncome, Field::Revenue],
            operating_profit_margin,
        ),
        RegisteredUnit::new(
            "net_profit_margin",
            ("Net Profit Margin", "هامش الربح الصافي"),
            Basic, Profitability, HigherBetter, dec!(10), Percent,
            &[Field::NetIncome, Field::Revenue],
            net_profit_margin,
        ),
        RegisteredUnit::new(
            "return_on_assets",
            ("Return on Assets", "العائد على الأصول"),
            Basic, Profitability, HigherBetter, dec!(7), Percent,
            &[Field::NetIncome, Field::TotalAssets],
            return_on_assets,
        ),
        RegisteredUnit::new(
            "return_on_equity",
            ("Return on Equity", "العائد على حقوق الملكية"),
            Basic, Profitability, HigherBetter, dec!(15), Percent,
            &[Field::NetIncome, Field::ShareholdersEquity],
            return_on_equity,
        ),
        RegisteredUnit::new(
            "return_on_invested_capital",
            ("Return on Invested Capital", "العائد على رأس المال المستثمر"),
            Basic, Profitability, HigherBetter, dec!(12), Percent,
            &[
                Field::OperatingIncome,
                Field::IncomeTax,
                Field::IncomeBeforeTax,
                Field::TotalAssets,
                Field::Cash,
                Field::CurrentLiabilities,
            ],
            return_on_invested_capital,
        ),
        RegisteredUnit::new(
            "return_on_capital_employed",
            ("Return on Capital Employed", "العائد على رأس المال المستخدم"),
            Basic, Profitability, HigherBetter, dec!(12), Percent,
            &[Field::OperatingIncome, Field::TotalAssets, Field::CurrentLiabilities],
            return_on_capital_employed,
        ),
        RegisteredUnit::new(
            "ebitda_margin",
            ("EBITDA Margin", "هامش الأرباح قبل الفوائد والضرائب والإهلاك"),
            Basic, Profitability, HigherBetter, dec!(20), Percent,
            &[Field::OperatingIncome, Field::DepreciationAmortization, Field::Revenue],
            ebitda_margin,
        ),
        RegisteredUnit::new(
            "operating_cash_flow_margin",
            ("Operating Cash Flow Margin", "هامش التدفق النقدي التشغيلي"),
            Basic, Profitability, HigherBetter, dec!(12), Percent,
            &[Field::OperatingCashFlow, Field::Revenue],
            operating_cash_flow_margin,
        ),
        RegisteredUnit::new(
            "free_cash_flow_margin",
            ("Free Cash Flow Margin", "هامش التدفق النقدي الحر"),
            Basic, Profitability, HigherBetter, dec!(8), Percent,
            &[Field::OperatingCashFlow, Field::CapitalExpenditures, Field::Revenue],
            free_cash_flow_margin,
        ),
        RegisteredUnit::new(
            "return_on_tangible_assets",
            ("Return on Tangible Assets", "العائد على الأصول الملموسة"),
            Basic, Profitability, HigherBetter, dec!(9), Percent,
            &[
                Field::NetIncome,
                Field::TotalAssets,
                Field::IntangibleAssets,
                Field::Goodwill,
            ],
            return_on_tangible_assets,
        ),
        RegisteredUnit::new(
            "earnings_growth_rate",
            ("Earnings Growth Rate", "معدل نمو الأرباح"),
            Basic, Profitability, HigherBetter, dec!(10), Percent,
            &[Field::NetIncome],
            earnings_growth_rate,
        ),
        RegisteredUnit::new(
            "cost_to_income_ratio",
            ("Cost to Income Ratio", "نسبة التكلفة إلى الدخل"),
            Basic, Profitability, LowerBetter, dec!(80), Percent,
            &[Field::OperatingExpenses, Field::OperatingIncome],
            cost_to_income_ratio,
        ),
        RegisteredUnit::new(
            "return_on_sales",
            ("Return on Sales", "العائد على المبيعات"),
            Basic, Profitability, HigherBetter, dec!(12), Percent,
            &[Field::OperatingIncome, Field::Revenue],
            return_on_sales,
        ),
        RegisteredUnit::new(
            "contribution_margin",
            ("Contribution Margin", "هامش المساهمة"),
            Basic, Profitability, HigherBetter, dec!(40), Percent,
            &[Field::Revenue, Field::CostOfRevenue],
            contribution_margin,
        ),
        RegisteredUnit::new(
            "operating_efficiency",
            ("Operating Efficiency", "نسبة الكفاءة التشغيلية"),
            Basic, Profitability, HigherBetter, dec!(150), Percent,
            &[Field::GrossProfit, Field::OperatingExpenses],
            operating_efficiency,
        ),
        RegisteredUnit::new(
            "basic_earning_power",
            ("Basic Earning Power", "معدل العائد الأساسي"),
            Basic, Profitability, HigherBetter, dec!(10), Percent,
            &[Field::OperatingIncome, Field::TotalAssets],
            basic_earning_power,
        ),
        RegisteredUnit::new(
            "ebit_margin",
            ("EBIT Margin", "هامش الربح قبل الفوائد والضرائب"),
            Basic, Profitability, HigherBetter, dec!(14), Percent,
            &[Field::IncomeBeforeTax, Field::InterestExpense, Field::Revenue],
            ebit_margin,
        ),
        RegisteredUnit::new(
            "return_on_operating_assets",
            ("Return on Operating Assets", "العائد على الأصول التشغيلية"),
            Basic, Profitability, HigherBetter, dec!(10), Percent,
            &[
                Field::OperatingIncome,
                Field::TotalAssets,
                Field::Cash,
                Field::MarketableSecurities,
            ],
            return_on_operating_assets,
        ),
        RegisteredUnit::new(
            "effective_tax_rate",
            ("Effective Tax Rate", "معدل الضريبة الفعلي"),
            Basic, Profitability, Balanced, dec!(20), Percent,
            &[Field::IncomeTax, Field::IncomeBeforeTax],
            effective_tax_rate,
        ),
    ]
}
