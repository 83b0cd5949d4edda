//! Advanced modeling analyses: DuPont, Altman Z-Score, EVA, break-even,
//! growth capacity and composite indices.
//!
//! The AI-assisted tier layers deterministic composites over the same
//! formulas; like every other unit they are pure functions of their inputs.

use crate::input::ComputeInput;
use crate::registry::RegisteredUnit;
use crate::support::{div, pct_change, percent, CalcResult};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tahlil_core::types::{
    AnalysisValue, Category, Direction, Field, LineShare, Reason, Tier, UnitOfMeasure,
};

/// Cost of capital assumed by EVA-style units when no explicit rate is
/// supplied by the caller.
pub const DEFAULT_WACC: Decimal = dec!(0.10);

/// Three-step DuPont decomposition of ROE.
///
/// Headline is ROE; the lines carry net margin, asset turnover and the
/// equity multiplier.
pub fn dupont_roe(input: &ComputeInput) -> CalcResult {
    let net_margin = div(input.get(Field::NetIncome)?, input.get(Field::Revenue)?)?;
    let asset_turnover = div(input.get(Field::Revenue)?, input.get(Field::TotalAssets)?)?;
    let equity_multiplier = div(
        input.get(Field::TotalAssets)?,
        input.get(Field::ShareholdersEquity)?,
    )?;
    let roe = net_margin * asset_turnover * equity_multiplier * dec!(100);
    Ok(AnalysisValue::Breakdown {
        headline: roe,
        lines: vec![
            LineShare::new("net_profit_margin", net_margin * dec!(100)),
            LineShare::new("asset_turnover", asset_turnover * dec!(100)),
            LineShare::new("equity_multiplier", equity_multiplier * dec!(100)),
        ],
    })
}

/// Altman Z-Score, public-company coefficients.
///
/// `1.2·X1 + 1.4·X2 + 3.3·X3 + 0.6·X4 + 1.0·X5` with the classic zone
/// boundaries at 1.81 (distress) and 2.99 (safe).
pub fn altman_z_score(input: &ComputeInput) -> CalcResult {
    let total_assets = input.get(Field::TotalAssets)?;
    let x1 = div(input.working_capital()?, total_assets)?;
    let x2 = div(input.get(Field::RetainedEarnings)?, total_assets)?;
    let x3 = div(input.get(Field::OperatingIncome)?, total_assets)?;
    let x4 = div(
        input.get(Field::MarketCap)?,
        input.get(Field::TotalLiabilities)?,
    )?;
    let x5 = div(input.get(Field::Revenue)?, total_assets)?;
    Ok(AnalysisValue::Score(
        dec!(1.2) * x1 + dec!(1.4) * x2 + dec!(3.3) * x3 + dec!(0.6) * x4 + x5,
    ))
}

/// Altman Z''-Score for private companies (book equity in X4, no sales
/// term).
pub fn altman_z_private(input: &ComputeInput) -> CalcResult {
    let total_assets = input.get(Field::TotalAssets)?;
    let x1 = div(input.working_capital()?, total_assets)?;
    let x2 = div(input.get(Field::RetainedEarnings)?, total_assets)?;
    let x3 = div(input.get(Field::OperatingIncome)?, total_assets)?;
    let x4 = div(
        input.get(Field::ShareholdersEquity)?,
        input.get(Field::TotalLiabilities)?,
    )?;
    Ok(AnalysisValue::Score(
        dec!(6.56) * x1 + dec!(3.26) * x2 + dec!(6.72) * x3 + dec!(1.05) * x4,
    ))
}

/// Economic value added: NOPAT less a capital charge at [`DEFAULT_WACC`].
pub fn economic_value_added(input: &ComputeInput) -> CalcResult {
    let invested = input.invested_capital()?;
    Ok(AnalysisValue::Amount(
        input.nopat()? - DEFAULT_WACC * invested,
    ))
}

/// Spread between return on invested capital and the cost of capital.
pub fn value_creation_rate(input: &ComputeInput) -> CalcResult {
    let invested = input.invested_capital()?;
    let roic = div(input.nopat()?, invested)?;
    Ok(AnalysisValue::Percent((roic - DEFAULT_WACC) * dec!(100)))
}

fn breakeven_revenue(input: &ComputeInput) -> Result<Decimal, Reason> {
    // Fixed-cost share of operating expenses is an estimate carried over
    // from the source model.
    let fixed_costs = input.get(Field::OperatingExpenses)? * dec!(0.4);
    let revenue = input.get(Field::Revenue)?;
    let contribution_ratio = div(revenue - input.get(Field::CostOfRevenue)?, revenue)?;
    if contribution_ratio <= Decimal::ZERO {
        return Err(Reason::DivisionByZero);
    }
    div(fixed_costs, contribution_ratio)
}

/// Revenue over break-even revenue.
pub fn breakeven_coverage(input: &ComputeInput) -> CalcResult {
    div(input.get(Field::Revenue)?, breakeven_revenue(input)?).map(AnalysisValue::Ratio)
}

/// Share of revenue above the break-even point.
pub fn margin_of_safety(input: &ComputeInput) -> CalcResult {
    let revenue = input.get(Field::Revenue)?;
    percent(revenue - breakeven_revenue(input)?, revenue)
}

/// ROE times the retention ratio: growth fundable without new equity or
/// added leverage.
pub fn sustainable_growth_rate(input: &ComputeInput) -> CalcResult {
    let net_income = input.get(Field::NetIncome)?;
    if net_income.is_zero() {
        return Err(Reason::DivisionByZero);
    }
    let roe = div(net_income, input.get(Field::ShareholdersEquity)?)?;
    let retention = Decimal::ONE - div(input.get(Field::DividendsPaid)?, net_income)?;
    Ok(AnalysisValue::Percent(roe * retention * dec!(100)))
}

/// Growth fundable from retained earnings alone.
pub fn internal_growth_rate(input: &ComputeInput) -> CalcResult {
    let net_income = input.get(Field::NetIncome)?;
    if net_income.is_zero() {
        return Err(Reason::DivisionByZero);
    }
    let roa = div(net_income, input.get(Field::TotalAssets)?)?;
    let retention = Decimal::ONE - div(input.get(Field::DividendsPaid)?, net_income)?;
    let product = roa * retention;
    div(product * dec!(100), Decimal::ONE - product).map(AnalysisValue::Percent)
}

fn strength_components(input: &ComputeInput) -> Result<[Decimal; 4], Reason> {
    use crate::support::component_score;
    let current = div(
        input.get(Field::CurrentAssets)?,
        input.get(Field::CurrentLiabilities)?,
    )?;
    let roe = div(
        input.get(Field::NetIncome)? * dec!(100),
        input.get(Field::ShareholdersEquity)?,
    )?;
    let debt_to_equity = div(
        input.get(Field::TotalLiabilities)?,
        input.get(Field::ShareholdersEquity)?,
    )?;
    let turnover = div(input.get(Field::Revenue)?, input.get(Field::TotalAssets)?)?;

    let liquidity = component_score(current, dec!(2), dec!(25));
    let profitability = component_score(roe, dec!(20), dec!(25));
    let leverage = component_score(dec!(2) - debt_to_equity, dec!(2), dec!(25));
    let efficiency = component_score(turnover, dec!(1.5), dec!(25));
    Ok([liquidity, profitability, leverage, efficiency])
}

/// Composite 0-100 index of liquidity, profitability, leverage and
/// efficiency strength.
pub fn financial_strength_index(input: &ComputeInput) -> CalcResult {
    let [liquidity, profitability, leverage, efficiency] = strength_components(input)?;
    Ok(AnalysisValue::Score(
        liquidity + profitability + leverage + efficiency,
    ))
}

/// Tangible net worth as a share of tangible assets.
pub fn tangible_value_ratio(input: &ComputeInput) -> CalcResult {
    let intangibles = input.get(Field::IntangibleAssets)? + input.get(Field::Goodwill)?;
    let tangible_net_worth = input.get(Field::ShareholdersEquity)? - intangibles;
    percent(tangible_net_worth, input.tangible_assets()?)
}

/// Working capital requirement (receivables + inventory - payables) as a
/// share of revenue.
pub fn wcr_to_revenue(input: &ComputeInput) -> CalcResult {
    let wcr = input.get(Field::AccountsReceivable)? + input.get(Field::Inventory)?
        - input.get(Field::AccountsPayable)?;
    percent(wcr, input.get(Field::Revenue)?)
}

/// Five-component 0-100 health composite: the strength index plus a cash
/// flow quality component.
pub fn composite_health_score(input: &ComputeInput) -> CalcResult {
    use crate::support::component_score;
    let [liquidity, profitability, leverage, efficiency] = strength_components(input)?;
    let quality = div(
        input.get(Field::OperatingCashFlow)?,
        input.get(Field::NetIncome)?,
    )
    .map(|q| component_score(q, dec!(1.2), dec!(25)))
    .unwrap_or(Decimal::ZERO);
    let base = liquidity + profitability + leverage + efficiency;
    Ok(AnalysisValue::Score(base * dec!(0.8) + quality))
}

/// Z-Score mapped onto a 0-100 distress scale (100 = deep distress).
pub fn bankruptcy_risk_indicator(input: &ComputeInput) -> CalcResult {
    let z = match altman_z_score(input)? {
        AnalysisValue::Score(z) => z,
        _ => return Err(Reason::DivisionByZero),
    };
    // Linear ramp: z >= 2.99 -> 0, z <= 0 -> 100.
    let risk = (dec!(2.99) - z) / dec!(2.99) * dec!(100);
    Ok(AnalysisValue::Score(
        risk.clamp(Decimal::ZERO, dec!(100)),
    ))
}

/// Average of revenue, earnings and operating cash flow growth.
pub fn trend_momentum(input: &ComputeInput) -> CalcResult {
    let mut total = Decimal::ZERO;
    let mut count = Decimal::ZERO;
    for field in [Field::Revenue, Field::NetIncome, Field::OperatingCashFlow] {
        let change = pct_change(input.prior_get(field)?, input.get(field)?)?;
        total += change.scalar();
        count += Decimal::ONE;
    }
    div(total, count).map(AnalysisValue::Percent)
}

/// Coefficient of variation of net income across the series, in percent.
///
/// Needs at least three periods to say anything about stability.
pub fn earnings_stability(input: &ComputeInput) -> CalcResult {
    let statements = input.series.statements();
    if statements.len() < 3 {
        return Err(Reason::InsufficientHistory {
            needed: 3,
            available: statements.len(),
        });
    }
    let incomes: Vec<f64> = statements
        .iter()
        .filter_map(|s| s.field(Field::NetIncome))
        .filter_map(|d| d.to_f64())
        .collect();
    if incomes.len() < 3 {
        return Err(Reason::MissingField {
            field: Field::NetIncome,
        });
    }
    let n = incomes.len() as f64;
    let mean = incomes.iter().sum::<f64>() / n;
    if mean.abs() < f64::EPSILON {
        return Err(Reason::DivisionByZero);
    }
    let variance = incomes.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let cv = variance.sqrt() / mean.abs() * 100.0;
    Decimal::from_f64(cv)
        .map(AnalysisValue::Score)
        .ok_or(Reason::DivisionByZero)
}

/// Modeling catalog entries.
pub(crate) fn units() -> Vec<RegisteredUnit> {
    use Category::Modeling;
    use Direction::{HigherBetter, LowerBetter};
    use Tier::{Advanced, AiAssisted};
    use UnitOfMeasure::{Currency, Percent, Score, Times};

    vec![
        RegisteredUnit::new(
            "dupont_roe",
            ("DuPont ROE Decomposition", "تحليل دوبونت للعائد على حقوق الملكية"),
            Advanced, Modeling, HigherBetter, dec!(15), Percent,
            &[
                Field::NetIncome,
                Field::Revenue,
                Field::TotalAssets,
                Field::ShareholdersEquity,
            ],
            dupont_roe,
        ),
        RegisteredUnit::new(
            "altman_z_score",
            ("Altman Z-Score", "مؤشر ألتمان للتعثر المالي"),
            Advanced, Modeling, HigherBetter, dec!(2.99), Score,
            &[
                Field::CurrentAssets,
                Field::CurrentLiabilities,
                Field::RetainedEarnings,
                Field::OperatingIncome,
                Field::MarketCap,
                Field::TotalLiabilities,
                Field::Revenue,
                Field::TotalAssets,
            ],
            altman_z_score,
        ),
        RegisteredUnit::new(
            "altman_z_private",
            ("Altman Z''-Score (Private)", "مؤشر ألتمان للشركات الخاصة"),
            Advanced, Modeling, HigherBetter, dec!(2.6), Score,
            &[
                Field::CurrentAssets,
                Field::CurrentLiabilities,
                Field::RetainedEarnings,
                Field::OperatingIncome,
                Field::ShareholdersEquity,
                Field::TotalLiabilities,
                Field::TotalAssets,
            ],
            altman_z_private,
        ),
        RegisteredUnit::new(
            "economic_value_added",
            ("Economic Value Added", "القيمة الاقتصادية المضافة"),
            Advanced, Modeling, HigherBetter, dec!(0), Currency,
            &[
                Field::OperatingIncome,
                Field::IncomeTax,
                Field::IncomeBeforeTax,
                Field::TotalAssets,
                Field::Cash,
                Field::CurrentLiabilities,
            ],
            economic_value_added,
        ),
        RegisteredUnit::new(
            "value_creation_rate",
            ("Value Creation Rate", "معدل خلق القيمة"),
            Advanced, Modeling, HigherBetter, dec!(0), Percent,
            &[
                Field::OperatingIncome,
                Field::IncomeTax,
                Field::IncomeBeforeTax,
                Field::TotalAssets,
                Field::Cash,
                Field::CurrentLiabilities,
            ],
            value_creation_rate,
        ),
        RegisteredUnit::new(
            "breakeven_coverage",
            ("Break-even Coverage", "تغطية نقطة التعادل"),
            Advanced, Modeling, HigherBetter, dec!(1.3), Times,
            &[Field::Revenue, Field::CostOfRevenue, Field::OperatingExpenses],
            breakeven_coverage,
        ),
        RegisteredUnit::new(
            "margin_of_safety",
            ("Margin of Safety", "هامش الأمان"),
            Advanced, Modeling, HigherBetter, dec!(25), Percent,
            &[Field::Revenue, Field::CostOfRevenue, Field::OperatingExpenses],
            margin_of_safety,
        ),
        RegisteredUnit::new(
            "sustainable_growth_rate",
            ("Sustainable Growth Rate", "معدل النمو المستدام"),
            Advanced, Modeling, HigherBetter, dec!(8), Percent,
            &[Field::NetIncome, Field::ShareholdersEquity, Field::DividendsPaid],
            sustainable_growth_rate,
        ),
        RegisteredUnit::new(
            "internal_growth_rate",
            ("Internal Growth Rate", "معدل النمو الداخلي"),
            Advanced, Modeling, HigherBetter, dec!(5), Percent,
            &[Field::NetIncome, Field::TotalAssets, Field::DividendsPaid],
            internal_growth_rate,
        ),
        RegisteredUnit::new(
            "financial_strength_index",
            ("Financial Strength Index", "مؤشر القوة المالية"),
            Advanced, Modeling, HigherBetter, dec!(60), Score,
            &[
                Field::CurrentAssets,
                Field::CurrentLiabilities,
                Field::NetIncome,
                Field::ShareholdersEquity,
                Field::TotalLiabilities,
                Field::Revenue,
                Field::TotalAssets,
            ],
            financial_strength_index,
        ),
        RegisteredUnit::new(
            "tangible_value_ratio",
            ("Tangible Value Ratio", "نسبة القيمة الملموسة"),
            Advanced, Modeling, HigherBetter, dec!(40), Percent,
            &[
                Field::ShareholdersEquity,
                Field::IntangibleAssets,
                Field::Goodwill,
                Field::TotalAssets,
            ],
            tangible_value_ratio,
        ),
        RegisteredUnit::new(
            "wcr_to_revenue",
            ("Working Capital Requirement to Revenue", "متطلبات رأس المال العامل إلى الإيرادات"),
            Advanced, Modeling, LowerBetter, dec!(15), Percent,
            &[
                Field::AccountsReceivable,
                Field::Inventory,
                Field::AccountsPayable,
                Field::Revenue,
            ],
            wcr_to_revenue,
        ),
        RegisteredUnit::new(
            "composite_health_score",
            ("Composite Health Score", "مؤشر الصحة المالية المركب"),
            AiAssisted, Modeling, HigherBetter, dec!(60), Score,
            &[
                Field::CurrentAssets,
                Field::CurrentLiabilities,
                Field::NetIncome,
                Field::ShareholdersEquity,
                Field::TotalLiabilities,
                Field::Revenue,
                Field::TotalAssets,
            ],
            composite_health_score,
        ),
        RegisteredUnit::new(
            "bankruptcy_risk_indicator",
            ("Bankruptcy Risk Indicator", "مؤشر مخاطر التعثر"),
            AiAssisted, Modeling, LowerBetter, dec!(30), Score,
            &[
                Field::CurrentAssets,
                Field::CurrentLiabilities,
                Field::RetainedEarnings,
                Field::OperatingIncome,
                Field::MarketCap,
                Field::TotalLiabilities,
                Field::Revenue,
                Field::TotalAssets,
            ],
            bankruptcy_risk_indicator,
        ),
        RegisteredUnit::new(
            "trend_momentum",
            ("Trend Momentum", "زخم الاتجاه"),
            AiAssisted, Modeling, HigherBetter, dec!(5), Percent,
            &[Field::Revenue, Field::NetIncome, Field::OperatingCashFlow],
            trend_momentum,
        ),
        RegisteredUnit::new(
            "earnings_stability",
            ("Earnings Stability", "استقرار الأرباح"),
            AiAssisted, Modeling, LowerBetter, dec!(25), Score,
            &[Field::NetIncome],
            earnings_stability,
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

    fn full_statement(year: i32) -> Statement {
        Statement::new(year, Ccy::SAR)
            .with_income_statement(IncomeStatement {
                revenue: Some(dec!(400_000)),
                cost_of_revenue: Some(dec!(240_000)),
                operating_expenses: Some(dec!(100_000)),
                operating_income: Some(dec!(60_000)),
                income_before_tax: Some(dec!(52_000)),
                income_tax: Some(dec!(13_000)),
                net_income: Some(dec!(39_000)),
                ..IncomeStatement::default()
            })
            .with_balance_sheet(BalanceSheet {
                current_assets: Some(dec!(200_000)),
                current_liabilities: Some(dec!(100_000)),
                total_assets: Some(dec!(500_000)),
                total_liabilities: Some(dec!(250_000)),
                shareholders_equity: Some(dec!(250_000)),
                retained_earnings: Some(dec!(120_000)),
                cash: Some(dec!(50_000)),
                ..BalanceSheet::default()
            })
            .with_cash_flow(CashFlowStatement {
                operating_cash_flow: Some(dec!(55_000)),
                dividends_paid: Some(dec!(15_600)),
                ..CashFlowStatement::default()
            })
            .with_market(MarketSnapshot {
                market_cap: Some(dec!(600_000)),
                share_price: Some(dec!(60)),
            })
    }

    fn fixture() -> (StatementSeries, CompanyContext) {
        let mut series = StatementSeries::new("ACME");
        series.push(full_statement(2024)).unwrap();
        (series, CompanyContext::new("ACME", Sector::Industrial))
    }

    #[test]
    fn test_dupont_decomposition_consistent_with_roe() {
        let (series, context) = fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        match dupont_roe(&input).unwrap() {
            AnalysisValue::Breakdown { headline, lines } => {
                // ROE = 39000/250000 = 15.6%
                assert_eq!(headline, dec!(15.6));
                assert_eq!(lines.len(), 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_altman_z_score() {
        let (series, context) = fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        // X1 = 0.2, X2 = 0.24, X3 = 0.12, X4 = 2.4, X5 = 0.8
        // Z = 1.2*0.2 + 1.4*0.24 + 3.3*0.12 + 0.6*2.4 + 0.8 = 3.212
        match altman_z_score(&input).unwrap() {
            AnalysisValue::Score(z) => assert_eq!(z, dec!(3.212)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_eva_positive_when_nopat_beats_capital_charge() {
        let (series, context) = fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        // NOPAT = 60000 * (1 - 0.25) = 45000; invested = 350000; charge = 35000
        assert_eq!(
            economic_value_added(&input),
            Ok(AnalysisValue::Amount(dec!(10_000)))
        );
    }

    #[test]
    fn test_sustainable_growth() {
        let (series, context) = fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        // ROE 15.6%, retention = 1 - 0.4 = 0.6 -> 9.36%
        match sustainable_growth_rate(&input).unwrap() {
            AnalysisValue::Percent(p) => assert_eq!(p, dec!(9.36)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_strength_index_in_range() {
        let (series, context) = fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        match financial_strength_index(&input).unwrap() {
            AnalysisValue::Score(s) => {
                assert!(s >= Decimal::ZERO && s <= dec!(100), "score {s} out of range");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_earnings_stability_needs_three_periods() {
        let (series, context) = fixture();
        let input = ComputeInput::latest(&series, &context).unwrap();
        assert!(matches!(
            earnings_stability(&input),
            Err(Reason::InsufficientHistory { needed: 3, .. })
        ));
    }

    #[test]
    fn test_units_count() {
        assert_eq!(units().len(), 16);
    }
}
