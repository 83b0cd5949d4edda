//! Market and valuation ratios.
//!
//! These units need the market snapshot (price, market cap); for unlisted
//! companies they resolve to missing-field outcomes, never errors.

use crate::input::ComputeInput;
use crate::registry::RegisteredUnit;
use crate::support::{div, pct_change, percent, ratio, CalcResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tahlil_core::types::{AnalysisValue, Category, Direction, Field, Reason, Tier, UnitOfMeasure};

/// Basic earnings per share.
pub fn earnings_per_share(input: &ComputeInput) -> CalcResult {
    if let Some(eps) = input.statement.field(Field::EarningsPerShare) {
        return Ok(AnalysisValue::Amount(eps));
    }
    div(input.get(Field::NetIncome)?, input.get(Field::Shares)?).map(AnalysisValue::Amount)
}

fn eps_value(input: &ComputeInput) -> Result<Decimal, Reason> {
    match earnings_per_share(input)? {
        AnalysisValue::Amount(v) => Ok(v),
        _ => Err(Reason::DivisionByZero),
    }
}

/// Share price over earnings per share.
pub fn price_to_earnings_ratio(input: &ComputeInput) -> CalcResult {
    ratio(input.get(Field::SharePrice)?, eps_value(input)?)
}

/// Share price over book value per share.
pub fn price_to_book_ratio(input: &ComputeInput) -> CalcResult {
    let book_per_share = div(
        input.get(Field::ShareholdersEquity)?,
        input.get(Field::Shares)?,
    )?;
    ratio(input.get(Field::SharePrice)?, book_per_share)
}

/// Share price over revenue per share.
pub fn price_to_sales_ratio(input: &ComputeInput) -> CalcResult {
    let sales_per_share = div(input.get(Field::Revenue)?, input.get(Field::Shares)?)?;
    ratio(input.get(Field::SharePrice)?, sales_per_share)
}

/// Dividend per share as a share of price.
pub fn dividend_yield(input: &ComputeInput) -> CalcResult {
    let dividend_per_share = div(input.get(Field::DividendsPaid)?, input.get(Field::Shares)?)?;
    percent(dividend_per_share, input.get(Field::SharePrice)?)
}

/// Dividends as a share of net income.
pub fn payout_ratio(input: &ComputeInput) -> CalcResult {
    percent(input.get(Field::DividendsPaid)?, input.get(Field::NetIncome)?)
}

fn enterprise_value(input: &ComputeInput) -> Result<Decimal, Reason> {
    Ok(input.get(Field::MarketCap)? + input.get(Field::TotalLiabilities)?
        - input.get(Field::Cash)?)
}

/// Enterprise value over EBITDA.
pub fn ev_to_ebitda(input: &ComputeInput) -> CalcResult {
    ratio(enterprise_value(input)?, input.ebitda()?)
}

/// Shareholders' equity per share.
pub fn book_value_per_share(input: &ComputeInput) -> CalcResult {
    div(
        input.get(Field::ShareholdersEquity)?,
        input.get(Field::Shares)?,
    )
    .map(AnalysisValue::Amount)
}

/// Price/earnings over year-over-year earnings growth.
pub fn peg_ratio(input: &ComputeInput) -> CalcResult {
    let pe = div(input.get(Field::SharePrice)?, eps_value(input)?)?;
    let growth = match pct_change(
        input.prior_get(Field::NetIncome)?,
        input.get(Field::NetIncome)?,
    )? {
        AnalysisValue::Percent(g) => g,
        AnalysisValue::GrowthFromZero => dec!(100),
        _ => return Err(Reason::DivisionByZero),
    };
    ratio(pe, growth)
}

/// Earnings per share as a share of price.
pub fn earnings_yield(input: &ComputeInput) -> CalcResult {
    percent(eps_value(input)?, input.get(Field::SharePrice)?)
}

/// Share price over operating cash flow per share.
pub fn price_to_cash_flow(input: &ComputeInput) -> CalcResult {
    let ocf_per_share = div(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::Shares)?,
    )?;
    ratio(input.get(Field::SharePrice)?, ocf_per_share)
}

/// Enterprise value over revenue.
pub fn ev_to_sales(input: &ComputeInput) -> CalcResult {
    ratio(enterprise_value(input)?, input.get(Field::Revenue)?)
}

/// Year-over-year dividend growth.
pub fn dividend_growth_rate(input: &ComputeInput) -> CalcResult {
    pct_change(
        input.prior_get(Field::DividendsPaid)?,
        input.get(Field::DividendsPaid)?,
    )
}

/// Free cash flow per share.
pub fn free_cash_flow_per_share(input: &ComputeInput) -> CalcResult {
    div(input.free_cash_flow()?, input.get(Field::Shares)?).map(AnalysisValue::Amount)
}

/// Earnings retained after dividends, as a share of net income.
pub fn retention_ratio(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::NetIncome)? - input.get(Field::DividendsPaid)?,
        input.get(Field::NetIncome)?,
    )
}

/// Market value of assets over their book value (Tobin's Q proxy).
pub fn tobin_q(input: &ComputeInput) -> CalcResult {
    ratio(
        input.get(Field::MarketCap)? + input.get(Field::TotalLiabilities)?,
        input.get(Field::TotalAssets)?,
    )
}

/// Market catalog entries.
pub(crate) fn units() -> Vec<RegisteredUnit> {
    use Category::Market;
    use Direction::{Balanced, HigherBetter, LowerBetter};
    use Tier::Applied;
    use UnitOfMeasure::{Currency, Percent, Times};

    vec![
        RegisteredUnit::new(
            "earnings_per_share",
            ("Earnings per Share", "ربحية السهم"),
            Applied, Market, HigherBetter, dec!(1), Currency,
            &[Field::NetIncome, Field::Shares],
            earnings_per_share,
        ),
        RegisteredUnit::new(
            "price_to_earnings_ratio",
            ("Price to Earnings Ratio", "مكرر الربحية"),
            Applied, Market, Balanced, dec!(15), Times,
            &[Field::SharePrice, Field::NetIncome, Field::Shares],
            price_to_earnings_ratio,
        ),
        RegisteredUnit::new(
            "price_to_book_ratio",
            ("Price to Book Ratio", "السعر إلى القيمة الدفترية"),
            Applied, Market, Balanced, dec!(1.5), Times,
            &[Field::SharePrice, Field::ShareholdersEquity, Field::Shares],
            price_to_book_ratio,
        ),
        RegisteredUnit::new(
            "price_to_sales_ratio",
            ("Price to Sales Ratio", "السعر إلى المبيعات"),
            Applied, Market, Balanced, dec!(2), Times,
            &[Field::SharePrice, Field::Revenue, Field::Shares],
            price_to_sales_ratio,
        ),
        RegisteredUnit::new(
            "dividend_yield",
            ("Dividend Yield", "عائد التوزيعات"),
            Applied, Market, HigherBetter, dec!(3), Percent,
            &[Field::DividendsPaid, Field::Shares, Field::SharePrice],
            dividend_yield,
        ),
        RegisteredUnit::new(
            "payout_ratio",
            ("Payout Ratio", "نسبة توزيع الأرباح"),
            Applied, Market, Balanced, dec!(40), Percent,
            &[Field::DividendsPaid, Field::NetIncome],
            payout_ratio,
        ),
        RegisteredUnit::new(
            "ev_to_ebitda",
            ("EV to EBITDA", "قيمة المنشأة إلى الأرباح التشغيلية"),
            Applied, Market, LowerBetter, dec!(10), Times,
            &[
                Field::MarketCap,
                Field::TotalLiabilities,
                Field::Cash,
                Field::OperatingIncome,
                Field::DepreciationAmortization,
            ],
            ev_to_ebitda,
        ),
        RegisteredUnit::new(
            "book_value_per_share",
            ("Book Value per Share", "القيمة الدفترية للسهم"),
            Applied, Market, HigherBetter, dec!(0), Currency,
            &[Field::ShareholdersEquity, Field::Shares],
            book_value_per_share,
        ),
        RegisteredUnit::new(
            "peg_ratio",
            ("PEG Ratio", "مكرر الربحية إلى النمو"),
            Applied, Market, LowerBetter, dec!(1), Times,
            &[Field::SharePrice, Field::NetIncome, Field::Shares],
            peg_ratio,
        ),
        RegisteredUnit::new(
            "earnings_yield",
            ("Earnings Yield", "عائد الأرباح"),
            Applied, Market, HigherBetter, dec!(6), Percent,
            &[Field::NetIncome, Field::Shares, Field::SharePrice],
            earnings_yield,
        ),
        RegisteredUnit::new(
            "price_to_cash_flow",
            ("Price to Cash Flow", "السعر إلى التدفق النقدي"),
            Applied, Market, LowerBetter, dec!(12), Times,
            &[Field::SharePrice, Field::OperatingCashFlow, Field::Shares],
            price_to_cash_flow,
        ),
        RegisteredUnit::new(
            "ev_to_sales",
            ("EV to Sales", "قيمة المنشأة إلى المبيعات"),
            Applied, Market, LowerBetter, dec!(3), Times,
            &[Field::MarketCap, Field::TotalLiabilities, Field::Cash, Field::Revenue],
            ev_to_sales,
        ),
        RegisteredUnit::new(
            "dividend_growth_rate",
            ("Dividend Growth Rate", "معدل نمو التوزيعات"),
            Applied, Market, HigherBetter, dec!(5), Percent,
            &[Field::DividendsPaid],
            dividend_growth_rate,
        ),
        RegisteredUnit::new(
            "free_cash_flow_per_share",
            ("Free Cash Flow per Share", "التدفق النقدي الحر للسهم"),
            Applied, Market, HigherBetter, dec!(0), Currency,
            &[Field::OperatingCashFlow, Field::CapitalExpenditures, Field::Shares],
            free_cash_flow_per_share,
        ),
        RegisteredUnit::new(
            "retention_ratio",
            ("Retention Ratio", "نسبة الاحتجاز"),
            Applied, Market, Balanced, dec!(60), Percent,
            &[Field::NetIncome, Field::DividendsPaid],
            retention_ratio,
        ),
        RegisteredUnit::new(
            "tobin_q",
            ("Tobin's Q", "مؤشر توبين"),
            Applied, Market, Balanced, dec!(1), Times,
            &[Field::MarketCap, Field::TotalLiabilities, Field::TotalAssets],
            tobin_q,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tahlil_core::types::{
        BalanceSheet, CashFlowStatement, CompanyContext, Currency as Ccy, IncomeStatement,
        MarketSnapshot, Sector, Statement, StatementSeries,
    };

    fn input_fixture() -> (StatementSeries, CompanyContext) {
        let statement = Statement::new(2024, Ccy::SAR)
            .with_income_statement(IncomeStatement {
                revenue: Some(dec!(400_000)),
                net_income: Some(dec!(40_000)),
                earnings_per_share: Some(dec!(4)),
                shares: Some(dec!(10_000)),
                operating_income: Some(dec!(60_000)),
                depreciation_amortization: Some(dec!(12_000)),
                ..IncomeStatement::default()
            })
            .with_balance_sheet(BalanceSheet {
                shareholders_equity: Some(dec!(250_000)),
                total_liabilities: Some(dec!(250_000)),
                total_assets: Some(dec!(500_000)),
                cash: Some(dec!(50_000)),
                ..BalanceSheet::default()
            })
            .with_cash_flow(CashFlowStatement {
                dividends_paid: Some(dec!(16_000)),
                operating_cash_flow: Some(dec!(55_000)),
                ..CashFlowStatement::default()
            })
            .with_market(MarketSnapshot {
                market_cap: Some(dec!(600_000)),
                share_price: Some(dec!(60)),
            });
        let mut series = StatementSeries::new("ACME");
        series.push(statement).unwrap();
        (series, CompanyContext::new("ACME", Sector::Industrial))
    }

    #[test]
    fn test_pe_uses_reported_eps() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        assert_eq!(
            price_to_earnings_ratio(&input),
            Ok(AnalysisValue::Ratio(dec!(15)))
        );
    }

    #[test]
    fn test_eps_derived_when_not_reported() {
        let (series, context) = input_fixture();
        // rebuild without reported EPS
        let mut statement = series.statements()[0].clone();
        statement.income.earnings_per_share = None;
        let series = StatementSeries::from_statements("ACME", vec![statement]).unwrap();
        let input = ComputeInput::latest(&series, &context).unwrap();
        assert_eq!(
            earnings_per_share(&input),
            Ok(AnalysisValue::Amount(dec!(4)))
        );
    }

    #[test]
    fn test_dividend_yield() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        // DPS = 1.6, price 60 -> 2.666..%
        match dividend_yield(&input).unwrap() {
            AnalysisValue::Percent(p) => assert!((p - dec!(2.6667)).abs() < dec!(0.001)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_ev_to_ebitda() {
        let (series, context) = input_fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        // EV = 600k + 250k - 50k = 800k; EBITDA = 72k
        match ev_to_ebitda(&input).unwrap() {
            AnalysisValue::Ratio(r) => assert!((r - dec!(11.1111)).abs() < dec!(0.001)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_units_count() {
        assert_eq!(units().len(), 16);
    }
}
