//! Comparative analysis: horizontal (year-over-year) growth, multi-year
//! trends and peer gaps.
//!
//! Growth units need at least two periods and resolve to
//! `InsufficientHistory` on shorter series; peer gaps resolve to
//! `InsufficientPeerData` when the context carries no peer observations.

use crate::input::ComputeInput;
use crate::registry::RegisteredUnit;
use crate::support::{cagr, div, pct_change, CalcResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tahlil_core::types::{AnalysisValue, Category, Direction, Field, Reason, Tier, UnitOfMeasure};

fn growth(input: &ComputeInput, field: Field) -> CalcResult {
    pct_change(input.prior_get(field)?, input.get(field)?)
}

/// Year-over-year revenue growth.
pub fn revenue_growth(input: &ComputeInput) -> CalcResult {
    growth(input, Field::Revenue)
}

/// Year-over-year total asset growth.
pub fn asset_growth(input: &ComputeInput) -> CalcResult {
    growth(input, Field::TotalAssets)
}

/// Year-over-year equity growth.
pub fn equity_growth(input: &ComputeInput) -> CalcResult {
    growth(input, Field::ShareholdersEquity)
}

/// Year-over-year total liability growth.
pub fn liability_growth(input: &ComputeInput) -> CalcResult {
    growth(input, Field::TotalLiabilities)
}

/// Year-over-year operating income growth.
pub fn operating_income_growth(input: &ComputeInput) -> CalcResult {
    growth(input, Field::OperatingIncome)
}

/// Year-over-year operating cash flow growth.
pub fn operating_cash_flow_growth(input: &ComputeInput) -> CalcResult {
    growth(input, Field::OperatingCashFlow)
}

/// Year-over-year EPS growth.
pub fn eps_growth(input: &ComputeInput) -> CalcResult {
    growth(input, Field::EarningsPerShare)
}

/// Year-over-year capex growth.
pub fn capex_growth(input: &ComputeInput) -> CalcResult {
    growth(input, Field::CapitalExpenditures)
}

/// Year-over-year free cash flow growth.
pub fn free_cash_flow_growth(input: &ComputeInput) -> CalcResult {
    let prior = input.back(1)?;
    let prior_fcf = ComputeInput::for_statement(input.series, prior, input.context)
        .free_cash_flow()?;
    pct_change(prior_fcf, input.free_cash_flow()?)
}

fn margin(statement_revenue: Decimal, numerator: Decimal) -> Result<Decimal, Reason> {
    div(numerator * dec!(100), statement_revenue)
}

/// Gross margin change versus the prior year, in percentage points.
pub fn gross_margin_trend(input: &ComputeInput) -> CalcResult {
    let current = margin(input.get(Field::Revenue)?, input.get(Field::GrossProfit)?)?;
    let prior = margin(
        input.prior_get(Field::Revenue)?,
        input.prior_get(Field::GrossProfit)?,
    )?;
    Ok(AnalysisValue::Percent(current - prior))
}

/// Net margin change versus the prior year, in percentage points.
pub fn net_margin_trend(input: &ComputeInput) -> CalcResult {
    let current = margin(input.get(Field::Revenue)?, input.get(Field::NetIncome)?)?;
    let prior = margin(
        input.prior_get(Field::Revenue)?,
        input.prior_get(Field::NetIncome)?,
    )?;
    Ok(AnalysisValue::Percent(current - prior))
}

/// Three-year compound annual revenue growth.
pub fn revenue_cagr_3y(input: &ComputeInput) -> CalcResult {
    cagr(input.back_get(3, Field::Revenue)?, input.get(Field::Revenue)?, 3)
}

/// Three-year compound annual net income growth.
pub fn net_income_cagr_3y(input: &ComputeInput) -> CalcResult {
    cagr(
        input.back_get(3, Field::NetIncome)?,
        input.get(Field::NetIncome)?,
        3,
    )
}

/// Three-year compound annual asset growth.
pub fn asset_cagr_3y(input: &ComputeInput) -> CalcResult {
    cagr(
        input.back_get(3, Field::TotalAssets)?,
        input.get(Field::TotalAssets)?,
        3,
    )
}

fn peer_median(values: &mut Vec<Decimal>) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / dec!(2)
    } else {
        values[mid]
    })
}

fn peer_gap(input: &ComputeInput, unit_id: &str, company_value: Decimal) -> CalcResult {
    let mut values = input.context.peer_values(unit_id);
    let median = peer_median(&mut values).ok_or(Reason::InsufficientPeerData)?;
    Ok(AnalysisValue::Percent(company_value - median))
}

/// Company ROE less the peer median ROE, in percentage points.
pub fn peer_roe_gap(input: &ComputeInput) -> CalcResult {
    let roe = margin(
        input.get(Field::ShareholdersEquity)?,
        input.get(Field::NetIncome)?,
    )?;
    peer_gap(input, "return_on_equity", roe)
}

/// Company current ratio less the peer median, in points.
pub fn peer_current_ratio_gap(input: &ComputeInput) -> CalcResult {
    let current = div(
        input.get(Field::CurrentAssets)?,
        input.get(Field::CurrentLiabilities)?,
    )?;
    let mut values = input.context.peer_values("current_ratio");
    let median = peer_median(&mut values).ok_or(Reason::InsufficientPeerData)?;
    Ok(AnalysisValue::Ratio(current - median))
}

/// Comparative catalog entries.
pub(crate) fn units() -> Vec<RegisteredUnit> {
    use Category::Comparative;
    use Direction::{Balanced, HigherBetter, LowerBetter};
    use Tier::Applied;
    use UnitOfMeasure::{Percent, Times};

    vec![
        RegisteredUnit::new(
            "revenue_growth",
            ("Revenue Growth", "نمو الإيرادات"),
            Applied, Comparative, HigherBetter, dec!(8), Percent,
            &[Field::Revenue],
            revenue_growth,
        ),
        RegisteredUnit::new(
            "asset_growth",
            ("Asset Growth", "نمو الأصول"),
            Applied, Comparative, HigherBetter, dec!(5), Percent,
            &[Field::TotalAssets],
            asset_growth,
        ),
        RegisteredUnit::new(
            "equity_growth",
            ("Equity Growth", "نمو حقوق الملكية"),
            Applied, Comparative, HigherBetter, dec!(6), Percent,
            &[Field::ShareholdersEquity],
            equity_growth,
        ),
        RegisteredUnit::new(
            "liability_growth",
            ("Liability Growth", "نمو الالتزامات"),
            Applied, Comparative, LowerBetter, dec!(5), Percent,
            &[Field::TotalLiabilities],
            liability_growth,
        ),
        RegisteredUnit::new(
            "operating_income_growth",
            ("Operating Income Growth", "نمو الربح التشغيلي"),
            Applied, Comparative, HigherBetter, dec!(8), Percent,
            &[Field::OperatingIncome],
            operating_income_growth,
        ),
        RegisteredUnit::new(
            "operating_cash_flow_growth",
            ("Operating Cash Flow Growth", "نمو التدفق النقدي التشغيلي"),
            Applied, Comparative, HigherBetter, dec!(8), Percent,
            &[Field::OperatingCashFlow],
            operating_cash_flow_growth,
        ),
        RegisteredUnit::new(
            "eps_growth",
            ("EPS Growth", "نمو ربحية السهم"),
            Applied, Comparative, HigherBetter, dec!(10), Percent,
            &[Field::EarningsPerShare],
            eps_growth,
        ),
        RegisteredUnit::new(
            "capex_growth",
            ("Capex Growth", "نمو الإنفاق الرأسمالي"),
            Applied, Comparative, Balanced, dec!(5), Percent,
            &[Field::CapitalExpenditures],
            capex_growth,
        ),
        RegisteredUnit::new(
            "free_cash_flow_growth",
            ("Free Cash Flow Growth", "نمو التدفق النقدي الحر"),
            Applied, Comparative, HigherBetter, dec!(8), Percent,
            &[Field::OperatingCashFlow, Field::CapitalExpenditures],
            free_cash_flow_growth,
        ),
        RegisteredUnit::new(
            "gross_margin_trend",
            ("Gross Margin Trend", "اتجاه هامش الربح الإجمالي"),
            Applied, Comparative, HigherBetter, dec!(0), Percent,
            &[Field::GrossProfit, Field::Revenue],
            gross_margin_trend,
        ),
        RegisteredUnit::new(
            "net_margin_trend",
            ("Net Margin Trend", "اتجاه هامش الربح الصافي"),
            Applied, Comparative, HigherBetter, dec!(0), Percent,
            &[Field::NetIncome, Field::Revenue],
            net_margin_trend,
        ),
        RegisteredUnit::new(
            "revenue_cagr_3y",
            ("Revenue CAGR (3Y)", "النمو السنوي المركب للإيرادات"),
            Applied, Comparative, HigherBetter, dec!(8), Percent,
            &[Field::Revenue],
            revenue_cagr_3y,
        ),
        RegisteredUnit::new(
            "net_income_cagr_3y",
            ("Net Income CAGR (3Y)", "النمو السنوي المركب لصافي الربح"),
            Applied, Comparative, HigherBetter, dec!(10), Percent,
            &[Field::NetIncome],
            net_income_cagr_3y,
        ),
        RegisteredUnit::new(
            "asset_cagr_3y",
            ("Asset CAGR (3Y)", "النمو السنوي المركب للأصول"),
            Applied, Comparative, HigherBetter, dec!(5), Percent,
            &[Field::TotalAssets],
            asset_cagr_3y,
        ),
        RegisteredUnit::new(
            "peer_roe_gap",
            ("Peer ROE Gap", "فجوة العائد على حقوق الملكية عن النظراء"),
            Applied, Comparative, HigherBetter, dec!(0), Percent,
            &[Field::NetIncome, Field::ShareholdersEquity],
            peer_roe_gap,
        ),
        RegisteredUnit::new(
            "peer_current_ratio_gap",
            ("Peer Current Ratio Gap", "فجوة النسبة الجارية عن النظراء"),
            Applied, Comparative, HigherBetter, dec!(0), Times,
            &[Field::CurrentAssets, Field::CurrentLiabilities],
            peer_current_ratio_gap,
        ),
    ]
}
