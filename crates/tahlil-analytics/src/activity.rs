//! Activity and efficiency ratios: how productively assets turn into
//! revenue.

use crate::input::ComputeInput;
use crate::registry::RegisteredUnit;
use crate::support::{days_outstanding, div, percent, ratio, CalcResult};
use rust_decimal_macros::dec;
use tahlil_core::types::{AnalysisValue, Category, Direction, Field, Tier, UnitOfMeasure};

/// Cost of revenue over inventory.
pub fn inventory_turnover(input: &ComputeInput) -> CalcResult {
    ratio(input.get(Field::CostOfRevenue)?, input.get(Field::Inventory)?)
}

/// Inventory holding period in days.
pub fn days_inventory_outstanding(input: &ComputeInput) -> CalcResult {
    days_outstanding(input.get(Field::Inventory)?, input.get(Field::CostOfRevenue)?)
}

/// Revenue over receivables.
pub fn receivables_turnover(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::Revenue)?,
        input.get(Field::AccountsReceivable)?,
    )
}

/// Average collection period in days.
pub fn days_sales_outstanding(input: &ComputeInput) -> CalcResult {
    days_outstanding(input.get(Field::AccountsReceivable)?, input.get(Field::Revenue)?)
}

/// Cost of revenue over payables.
pub fn payables_turnover(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::CostOfRevenue)?,
        input.get(Field::AccountsPayable)?,
    )
}

/// Average payment period in days.
pub fn days_payables_outstanding(input: &ComputeInput) -> CalcResult {
    days_outstanding(input.get(Field::AccountsPayable)?, input.get(Field::CostOfRevenue)?)
}

/// Inventory plus collection period: the operating cycle in days.
pub fn operating_cycle(input: &ComputeInput) -> CalcResult {
    let dio = div(
        input.get(Field::Inventory)? * crate::support::DAYS_PER_YEAR,
        input.get(Field::CostOfRevenue)?,
    )?;
    let dso = div(
        input.get(Field::AccountsReceivable)? * crate::support::DAYS_PER_YEAR,
        input.get(Field::Revenue)?,
    )?;
    Ok(AnalysisValue::Days(dio + dso))
}

/// Revenue over total assets.
pub fn asset_turnover(input: &ComputeInput) -> CalcResult {
    ratio(input.get(Field::Revenue)?, input.get(Field::TotalAssets)?)
}

/// Revenue over net fixed assets.
pub fn fixed_asset_turnover(input: &ComputeInput) -> CalcResult {
    ratio(input.get(Field::Revenue)?, input.net_fixed_assets()?)
}

/// Revenue over current assets.
pub fn current_asset_turnover(input: &ComputeInput) -> CalcResult {
    ratio(input.get(Field::Revenue)?, input.get(Field::CurrentAssets)?)
}

/// Revenue over working capital.
pub fn working_capital_turnover(input: &ComputeInput) -> CalcResult {
    ratio(input.get(Field::Revenue)?, input.working_capital()?)
}

/// Operating cash flow as a share of revenue.
pub fn cash_management_efficiency(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::OperatingCashFlow)?, input.get(Field::Revenue)?)
}

/// Gross profit as a share of total assets.
pub fn asset_efficiency_ratio(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::GrossProfit)?, input.get(Field::TotalAssets)?)
}

/// Revenue over shareholders' equity.
pub fn equity_turnover(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::Revenue)?,
        input.get(Field::ShareholdersEquity)?,
    )
}

/// Operating income as a share of total assets.
pub fn asset_utilization(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::OperatingIncome)?,
        input.get(Field::TotalAssets)?,
    )
}

/// Revenue over capital employed.
pub fn capital_employed_efficiency(input: &ComputeInput) -> CalcResult {
    ratio(input.get(Field::Revenue)?, input.capital_employed()?)
}

/// Revenue over intangible assets.
pub fn intangible_asset_turnover(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::Revenue)?,
        input.get(Field::IntangibleAssets)?,
    )
}

/// Share of a month's revenue not tied up in receivables.
pub fn collection_efficiency(input: &ComputeInput) -> CalcResult {
    let monthly_revenue = div(input.get(Field::Revenue)?, dec!(12))?;
    let tied_up = div(input.get(Field::AccountsReceivable)?, monthly_revenue)?;
    Ok(AnalysisValue::Percent(
        (rust_decimal::Decimal::ONE - tied_up) * dec!(100),
    ))
}

/// Revenue over operating assets (total assets net of cash and securities).
pub fn operating_asset_turnover(input: &ComputeInput) -> CalcResult {
    let operating_assets = input.get(Field::TotalAssets)?
        - input.get(Field::Cash)?
        - input.get(Field::MarketableSecurities)?;
    ratio(input.get(Field::Revenue)?, operating_assets)
}

/// Activity catalog entries.
pub(crate) fn units() -> Vec<RegisteredUnit> {
    use Category::Activity;
    use Direction::{Balanced, HigherBetter, LowerBetter};
    use Tier::Basic;
    use UnitOfMeasure::{Days, Percent, Times};

    vec![
        RegisteredUnit::new(
            "inventory_turnover",
            ("Inventory Turnover", "معدل دوران المخزون"),
            Basic, Activity, HigherBetter, dec!(6), Times,
            &[Field::CostOfRevenue, Field::Inventory],
            inventory_turnover,
        ),
        RegisteredUnit::new(
            "days_inventory_outstanding",
            ("Days Inventory Outstanding", "أيام المخزون"),
            Basic, Activity, LowerBetter, dec!(60), Days,
            &[Field::Inventory, Field::CostOfRevenue],
            days_inventory_outstanding,
        ),
        RegisteredUnit::new(
            "receivables_turnover",
            ("Receivables Turnover", "معدل دوران المدينين"),
            Basic, Activity, HigherBetter, dec!(8), Times,
            &[Field::Revenue, Field::AccountsReceivable],
            receivables_turnover,
        ),
        RegisteredUnit::new(
            "days_sales_outstanding",
            ("Days Sales Outstanding", "فترة التحصيل"),
            Basic, Activity, LowerBetter, dec!(45), Days,
            &[Field::AccountsReceivable, Field::Revenue],
            days_sales_outstanding,
        ),
        RegisteredUnit::new(
            "payables_turnover",
            ("Payables Turnover", "معدل دوران الدائنين"),
            Basic, Activity, Balanced, dec!(8), Times,
            &[Field::CostOfRevenue, Field::AccountsPayable],
            payables_turnover,
        ),
        RegisteredUnit::new(
            "days_payables_outstanding",
            ("Days Payables Outstanding", "فترة السداد"),
            Basic, Activity, Balanced, dec!(45), Days,
            &[Field::AccountsPayable, Field::CostOfRevenue],
            days_payables_outstanding,
        ),
        RegisteredUnit::new(
            "operating_cycle",
            ("Operating Cycle", "الدورة التشغيلية"),
            Basic, Activity, LowerBetter, dec!(105), Days,
            &[
                Field::Inventory,
                Field::AccountsReceivable,
                Field::CostOfRevenue,
                Field::Revenue,
            ],
            operating_cycle,
        ),
        RegisteredUnit::new(
            "asset_turnover",
            ("Asset Turnover", "معدل دوران الأصول"),
            Basic, Activity, HigherBetter, dec!(1.0), Times,
            &[Field::Revenue, Field::TotalAssets],
            asset_turnover,
        ),
        RegisteredUnit::new(
            "fixed_asset_turnover",
            ("Fixed Asset Turnover", "معدل دوران الأصول الثابتة"),
            Basic, Activity, HigherBetter, dec!(3), Times,
            &[
                Field::Revenue,
                Field::PropertyPlantEquipment,
                Field::AccumulatedDepreciation,
            ],
            fixed_asset_turnover,
        ),
        RegisteredUnit::new(
            "current_asset_turnover",
            ("Current Asset Turnover", "معدل دوران الأصول المتداولة"),
            Basic, Activity, HigherBetter, dec!(2), Times,
            &[Field::Revenue, Field::CurrentAssets],
            current_asset_turnover,
        ),
        RegisteredUnit::new(
            "working_capital_turnover",
            ("Working Capital Turnover", "معدل دوران رأس المال العامل"),
            Basic, Activity, HigherBetter, dec!(5), Times,
            &[Field::Revenue, Field::CurrentAssets, Field::CurrentLiabilities],
            working_capital_turnover,
        ),
        RegisteredUnit::new(
            "cash_management_efficiency",
            ("Cash Management Efficiency", "كفاءة إدارة النقدية"),
            Basic, Activity, HigherBetter, dec!(12), Percent,
            &[Field::OperatingCashFlow, Field::Revenue],
            cash_management_efficiency,
        ),
        RegisteredUnit::new(
            "asset_efficiency_ratio",
            ("Asset Efficiency Ratio", "نسبة كفاءة الأصول"),
            Basic, Activity, HigherBetter, dec!(20), Percent,
            &[Field::GrossProfit, Field::TotalAssets],
            asset_efficiency_ratio,
        ),
        RegisteredUnit::new(
            "equity_turnover",
            ("Equity Turnover", "معدل دوران حقوق الملكية"),
            Basic, Activity, HigherBetter, dec!(2), Times,
            &[Field::Revenue, Field::ShareholdersEquity],
            equity_turnover,
        ),
        RegisteredUnit::new(
            "asset_utilization",
            ("Asset Utilization", "معدل استخدام الأصول"),
            Basic, Activity, HigherBetter, dec!(8), Percent,
            &[Field::OperatingIncome, Field::TotalAssets],
            asset_utilization,
        ),
        RegisteredUnit::new(
            "capital_employed_efficiency",
            ("Capital Employed Efficiency", "كفاءة رأس المال المستثمر"),
            Basic, Activity, HigherBetter, dec!(1.5), Times,
            &[Field::Revenue, Field::TotalAssets, Field::CurrentLiabilities],
            capital_employed_efficiency,
        ),
        RegisteredUnit::new(
            "intangible_asset_turnover",
            ("Intangible Asset Turnover", "معدل دوران الأصول غير الملموسة"),
            Basic, Activity, HigherBetter, dec!(20), Times,
            &[Field::Revenue, Field::IntangibleAssets],
            intangible_asset_turnover,
        ),
        RegisteredUnit::new(
            "collection_efficiency",
            ("Collection Efficiency", "كفاءة التحصيل"),
            Basic, Activity, HigherBetter, dec!(0), Percent,
            &[Field::AccountsReceivable, Field::Revenue],
            collection_efficiency,
        ),
        RegisteredUnit::new(
            "operating_asset_turnover",
            ("Operating Asset Turnover", "معدل دوران الأصول التشغيلية"),
            Basic, Activity, HigherBetter, dec!(1.2), Times,
            &[
                Field::Revenue,
                Field::TotalAssets,
                Field::Cash,
                Field::MarketableSecurities,
            ],
            operating_asset_turnover,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tahlil_core::types::{
        BalanceSheet, CompanyContext, Currency as Ccy, IncomeStatement, Sector, Statement,
        StatementSeries,
    };

    fn input_fixture() -> (StatementSeries, CompanyContext) {
        let statement = Statement::new(2024, Ccy::SAR)
            .with_balance_sheet(BalanceSheet {
                inventory: Some(dec!(60_000)),
                accounts_receivable: Some(dec!(40_000)),
                accounts_payable: Some(dec!(30_000)),
                total_assets: Some(dec!(500_000)),
                current_assets: Some(dec!(200_000)),
                current_liabilities: Some(dec!(100_000)),
                shareholders_equity: Some(dec!(250_000)),
                ..BalanceSheet::default()
            })
            .with_income_statement(IncomeStatement {
                revenue: Some(dec!(400_000)),
                cost_of_revenue: Some(dec!(240_000)),
                ..IncomeStatement::default()
            });
        let mut series = StatementSeries::new("ACME");
        series.push(statement).unwrap();
        (series, CompanyContext::new("ACME", Sector::Industrial))
    }

    #[test]
    fn test_inventory_turnover() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        assert_eq!(inventory_turnover(&input), Ok(AnalysisValue::Ratio(dec!(4))));
    }

    #[test]
    fn test_operating_cycle_is_dio_plus_dso() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        // DIO 91.25 + DSO 36.5
        assert_eq!(operating_cycle(&input), Ok(AnalysisValue::Days(dec!(127.75))));
    }

    #[test]
    fn test_collection_efficiency() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        // monthly revenue 33333.33.., AR 40000 -> 1.2 months tied up -> -20%
        match collection_efficiency(&input).unwrap() {
            AnalysisValue::Percent(p) => {
                assert!((p - dec!(-20)).abs() < dec!(0.001));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_units_count() {
        assert_eq!(units().len(), 19);
    }
}
