//! Liquidity ratios: short-term solvency of the company.

use crate::input::ComputeInput;
use crate::registry::RegisteredUnit;
use crate::support::{div, percent, ratio, CalcResult, DAYS_PER_YEAR};
use rust_decimal_macros::dec;
use tahlil_core::types::{AnalysisValue, Category, Direction, Field, Tier, UnitOfMeasure};

/// Current assets over current liabilities.
pub fn current_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::CurrentAssets)?,
        input.get(Field::CurrentLiabilities)?,
    )
}

/// Current assets excluding inventory, over current liabilities.
pub fn quick_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::CurrentAssets)? - input.get(Field::Inventory)?,
        input.get(Field::CurrentLiabilities)?,
    )
}

/// Cash over current liabilities.
pub fn cash_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::Cash)?,
        input.get(Field::CurrentLiabilities)?,
    )
}

/// Cash plus marketable securities over current liabilities.
pub fn absolute_cash_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::Cash)? + input.get(Field::MarketableSecurities)?,
        input.get(Field::CurrentLiabilities)?,
    )
}

/// Cash, securities and 80% of receivables over current liabilities.
///
/// The receivables haircut reflects expected near-term collectability.
pub fn super_quick_ratio(input: &ComputeInput) -> CalcResult {
    let liquid = input.get(Field::Cash)?
        + input.get(Field::MarketableSecurities)?
        + input.get(Field::AccountsReceivable)? * dec!(0.8);
    ratio(liquid, input.get(Field::CurrentLiabilities)?)
}

/// Current assets less current liabilities, as an amount.
pub fn working_capital(input: &ComputeInput) -> CalcResult {
    Ok(AnalysisValue::Amount(input.working_capital()?))
}

/// Working capital as a share of total assets.
pub fn working_capital_ratio(input: &ComputeInput) -> CalcResult {
    percent(input.working_capital()?, input.get(Field::TotalAssets)?)
}

/// Operating cash flow over current liabilities.
pub fn operating_cash_flow_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::CurrentLiabilities)?,
    )
}

/// Days of operating expenses covered by liquid assets.
pub fn defensive_interval_ratio(input: &ComputeInput) -> CalcResult {
    let liquid = input.get(Field::Cash)?
        + input.get(Field::MarketableSecurities)?
        + input.get(Field::AccountsReceivable)?;
    let daily_expenses = div(input.get(Field::OperatingExpenses)?, DAYS_PER_YEAR)?;
    div(liquid, daily_expenses).map(AnalysisValue::Days)
}

/// Cash plus receivables over current liabilities.
pub fn critical_liquidity_ratio(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::Cash)? + input.get(Field::AccountsReceivable)?,
        input.get(Field::CurrentLiabilities)?,
    )
}

/// Days inventory plus days receivable less days payable.
pub fn cash_conversion_cycle(input: &ComputeInput) -> CalcResult {
    let cogs = input.get(Field::CostOfRevenue)?;
    let revenue = input.get(Field::Revenue)?;
    let days_inventory = div(input.get(Field::Inventory)? * DAYS_PER_YEAR, cogs)?;
    let days_receivable = div(input.get(Field::AccountsReceivable)? * DAYS_PER_YEAR, revenue)?;
    let days_payable = div(input.get(Field::AccountsPayable)? * DAYS_PER_YEAR, cogs)?;
    Ok(AnalysisValue::Days(
        days_inventory + days_receivable - days_payable,
    ))
}

/// Cash plus securities as a share of total assets.
pub fn liquid_assets_ratio(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::Cash)? + input.get(Field::MarketableSecurities)?,
        input.get(Field::TotalAssets)?,
    )
}

/// Revenue over cash.
pub fn cash_turnover_ratio(input: &ComputeInput) -> CalcResult {
    ratio(input.get(Field::Revenue)?, input.get(Field::Cash)?)
}

/// EBITDA over interest expense.
pub fn cash_coverage_ratio(input: &ComputeInput) -> CalcResult {
    ratio(input.ebitda()?, input.get(Field::InterestExpense)?)
}

/// Liquid current assets over current liabilities net of deferred revenue.
///
/// Deferred revenue is excluded from the denominator because it settles in
/// delivery, not cash.
pub fn modified_liquidity_ratio(input: &ComputeInput) -> CalcResult {
    let numerator = input.get(Field::CurrentAssets)?
        - input.get(Field::Inventory)?
        - input.get(Field::PrepaidExpenses)?;
    let denominator =
        input.get(Field::CurrentLiabilities)? - input.get(Field::DeferredRevenue)?;
    ratio(numerator, denominator)
}

/// Working capital as a share of revenue.
pub fn working_capital_to_revenue(input: &ComputeInput) -> CalcResult {
    percent(input.working_capital()?, input.get(Field::Revenue)?)
}

/// Liquidity catalog entries.
pub(crate) fn units() -> Vec<RegisteredUnit> {
    use Category::Liquidity;
    use Direction::{Balanced, HigherBetter, LowerBetter};
    use Tier::Basic;
    use UnitOfMeasure::{Currency, Days, Percent, Times};

    vec![
        RegisteredUnit::new(
            "current_ratio",
            ("Current Ratio", "النسبة الجارية"),
            Basic, Liquidity, HigherBetter, dec!(2.0), Times,
            &[Field::CurrentAssets, Field::CurrentLiabilities],
            current_ratio,
        ),
        RegisteredUnit::new(
            "quick_ratio",
            ("Quick Ratio", "النسبة السريعة"),
            Basic, Liquidity, HigherBetter, dec!(1.0), Times,
            &[Field::CurrentAssets, Field::Inventory, Field::CurrentLiabilities],
            quick_ratio,
        ),
        RegisteredUnit::new(
            "cash_ratio",
            ("Cash Ratio", "نسبة النقدية"),
            Basic, Liquidity, HigherBetter, dec!(0.5), Times,
            &[Field::Cash, Field::CurrentLiabilities],
            cash_ratio,
        ),
        RegisteredUnit::new(
            "absolute_cash_ratio",
            ("Absolute Cash Ratio", "نسبة النقدية المطلقة"),
            Basic, Liquidity, HigherBetter, dec!(0.6), Times,
            &[Field::Cash, Field::MarketableSecurities, Field::CurrentLiabilities],
            absolute_cash_ratio,
        ),
        RegisteredUnit::new(
            "super_quick_ratio",
            ("Super Quick Ratio", "نسبة التداول السريعة جداً"),
            Basic, Liquidity, HigherBetter, dec!(0.8), Times,
            &[
                Field::Cash,
                Field::MarketableSecurities,
                Field::AccountsReceivable,
                Field::CurrentLiabilities,
            ],
            super_quick_ratio,
        ),
        RegisteredUnit::new(
            "working_capital",
            ("Working Capital", "رأس المال العامل"),
            Basic, Liquidity, HigherBetter, dec!(0), Currency,
            &[Field::CurrentAssets, Field::CurrentLiabilities],
            working_capital,
        ),
        RegisteredUnit::new(
            "working_capital_ratio",
            ("Working Capital Ratio", "نسبة رأس المال العامل"),
            Basic, Liquidity, HigherBetter, dec!(20), Percent,
            &[Field::CurrentAssets, Field::CurrentLiabilities, Field::TotalAssets],
            working_capital_ratio,
        ),
        RegisteredUnit::new(
            "operating_cash_flow_ratio",
            ("Operating Cash Flow Ratio", "نسبة التدفق النقدي التشغيلي"),
            Basic, Liquidity, HigherBetter, dec!(0.4), Times,
            &[Field::OperatingCashFlow, Field::CurrentLiabilities],
            operating_cash_flow_ratio,
        ),
        RegisteredUnit::new(
            "defensive_interval_ratio",
            ("Defensive Interval Ratio", "نسبة الفترة الدفاعية"),
            Basic, Liquidity, HigherBetter, dec!(90), Days,
            &[
                Field::Cash,
                Field::MarketableSecurities,
                Field::AccountsReceivable,
                Field::OperatingExpenses,
            ],
            defensive_interval_ratio,
        ),
        RegisteredUnit::new(
            "critical_liquidity_ratio",
            ("Critical Liquidity Ratio", "نسبة السيولة الحرجة"),
            Basic, Liquidity, HigherBetter, dec!(0.8), Times,
            &[Field::Cash, Field::AccountsReceivable, Field::CurrentLiabilities],
            critical_liquidity_ratio,
        ),
        RegisteredUnit::new(
            "cash_conversion_cycle",
            ("Cash Conversion Cycle", "دورة التحويل النقدي"),
            Basic, Liquidity, LowerBetter, dec!(60), Days,
            &[
                Field::Inventory,
                Field::AccountsReceivable,
                Field::AccountsPayable,
                Field::CostOfRevenue,
                Field::Revenue,
            ],
            cash_conversion_cycle,
        ),
        RegisteredUnit::new(
            "liquid_assets_ratio",
            ("Liquid Assets Ratio", "نسبة الأصول السائلة"),
            Basic, Liquidity, HigherBetter, dec!(10), Percent,
            &[Field::Cash, Field::MarketableSecurities, Field::TotalAssets],
            liquid_assets_ratio,
        ),
        RegisteredUnit::new(
            "cash_turnover_ratio",
            ("Cash Turnover Ratio", "معدل دوران النقدية"),
            Basic, Liquidity, HigherBetter, dec!(10), Times,
            &[Field::Revenue, Field::Cash],
            cash_turnover_ratio,
        ),
        RegisteredUnit::new(
            "cash_coverage_ratio",
            ("Cash Coverage Ratio", "نسبة التغطية النقدية"),
            Basic, Liquidity, HigherBetter, dec!(4), Times,
            &[
                Field::OperatingIncome,
                Field::DepreciationAmortization,
                Field::InterestExpense,
            ],
            cash_coverage_ratio,
        ),
        RegisteredUnit::new(
            "modified_liquidity_ratio",
            ("Modified Liquidity Ratio", "نسبة السيولة المعدلة"),
            Basic, Liquidity, HigherBetter, dec!(1.0), Times,
            &[
                Field::CurrentAssets,
                Field::Inventory,
                Field::PrepaidExpenses,
                Field::CurrentLiabilities,
                Field::DeferredRevenue,
            ],
            modified_liquidity_ratio,
        ),
        RegisteredUnit::new(
            "working_capital_to_revenue",
            ("Working Capital to Revenue", "رأس المال العامل إلى الإيرادات"),
            Basic, Liquidity, Balanced, dec!(15), Percent,
            &[Field::CurrentAssets, Field::CurrentLiabilities, Field::Revenue],
            working_capital_to_revenue,
        ),
    ]
}
