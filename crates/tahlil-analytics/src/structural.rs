//! Structural (vertical) analysis: composition of assets, financing,
//! income and expenses.
//!
//! Breakdown units carry every line's share plus a headline share used for
//! rating; missing component lines contribute zero, but the structure base
//! itself is required.

use crate::input::ComputeInput;
use crate::registry::RegisteredUnit;
use crate::support::{div, percent, CalcResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tahlil_core::types::{
    AnalysisValue, Category, Direction, Field, LineShare, Tier, UnitOfMeasure,
};

fn share(part: Decimal, base: Decimal) -> Result<Decimal, tahlil_core::types::Reason> {
    div(part * dec!(100), base)
}

fn breakdown(
    input: &ComputeInput,
    base: Field,
    lines: &[(&str, Decimal)],
) -> CalcResult {
    let base_value = input.get(base)?;
    let mut shares = Vec::with_capacity(lines.len());
    for (item, part) in lines {
        shares.push(LineShare::new(*item, share(*part, base_value)?));
    }
    let headline = shares
        .first()
        .map(|l| l.percent)
        .unwrap_or(Decimal::ZERO);
    Ok(AnalysisValue::Breakdown {
        headline,
        lines: shares,
    })
}

/// Asset structure: current, fixed, intangible and other asset shares.
pub fn asset_structure(input: &ComputeInput) -> CalcResult {
    let current = input.get(Field::CurrentAssets)?;
    let fixed = input.get_or(Field::PropertyPlantEquipment, Decimal::ZERO)
        - input.get_or(Field::AccumulatedDepreciation, Decimal::ZERO);
    let intangible = input.get_or(Field::IntangibleAssets, Decimal::ZERO)
        + input.get_or(Field::Goodwill, Decimal::ZERO);
    let other = input.get(Field::TotalAssets)? - current - fixed - intangible;
    breakdown(
        input,
        Field::TotalAssets,
        &[
            ("current_assets", current),
            ("net_fixed_assets", fixed),
            ("intangible_assets", intangible),
            ("other_assets", other),
        ],
    )
}

/// Liability structure: current, long-term and other liability shares of
/// total assets.
pub fn liability_structure(input: &ComputeInput) -> CalcResult {
    let current = input.get(Field::CurrentLiabilities)?;
    let long_term_debt = input.get_or(Field::LongTermDebt, Decimal::ZERO);
    let other = input.get(Field::TotalLiabilities)? - current - long_term_debt;
    breakdown(
        input,
        Field::TotalAssets,
        &[
            ("current_liabilities", current),
            ("long_term_debt", long_term_debt),
            ("other_liabilities", other),
        ],
    )
}

/// Capital structure: equity versus liabilities share of total financing.
pub fn capital_structure(input: &ComputeInput) -> CalcResult {
    let equity = input.get(Field::ShareholdersEquity)?;
    let liabilities = input.get(Field::TotalLiabilities)?;
    let financing = equity + liabilities;
    if financing.is_zero() {
        return Err(tahlil_core::types::Reason::DivisionByZero);
    }
    let lines = vec![
        LineShare::new("equity", share(equity, financing)?),
        LineShare::new("liabilities", share(liabilities, financing)?),
    ];
    Ok(AnalysisValue::Breakdown {
        headline: lines[0].percent,
        lines,
    })
}

/// Income statement structure relative to revenue.
pub fn income_structure(input: &ComputeInput) -> CalcResult {
    let lines = [
        ("cost_of_revenue", input.get(Field::CostOfRevenue)?),
        (
            "operating_expenses",
            input.get_or(Field::OperatingExpenses, Decimal::ZERO),
        ),
        (
            "depreciation_amortization",
            input.get_or(Field::DepreciationAmortization, Decimal::ZERO),
        ),
        (
            "interest_expense",
            input.get_or(Field::InterestExpense, Decimal::ZERO),
        ),
        ("income_tax", input.get_or(Field::IncomeTax, Decimal::ZERO)),
        ("net_income", input.get_or(Field::NetIncome, Decimal::ZERO)),
    ];
    breakdown(input, Field::Revenue, &lines)
}

/// Composition of current assets.
pub fn current_asset_composition(input: &ComputeInput) -> CalcResult {
    let cash = input.get(Field::Cash)?;
    let securities = input.get_or(Field::MarketableSecurities, Decimal::ZERO);
    let receivables = input.get_or(Field::AccountsReceivable, Decimal::ZERO);
    let inventory = input.get_or(Field::Inventory, Decimal::ZERO);
    let prepaid = input.get_or(Field::PrepaidExpenses, Decimal::ZERO);
    let other =
        input.get(Field::CurrentAssets)? - cash - securities - receivables - inventory - prepaid;
    breakdown(
        input,
        Field::CurrentAssets,
        &[
            ("cash", cash),
            ("marketable_securities", securities),
            ("accounts_receivable", receivables),
            ("inventory", inventory),
            ("prepaid_expenses", prepaid),
            ("other_current_assets", other),
        ],
    )
}

/// Net fixed assets as a share of total assets.
pub fn fixed_asset_intensity(input: &ComputeInput) -> CalcResult {
    percent(input.net_fixed_assets()?, input.get(Field::TotalAssets)?)
}

/// Intangibles and goodwill as a share of total assets.
pub fn intangible_intensity(input: &ComputeInput) -> CalcResult {
    percent(
        input.get(Field::IntangibleAssets)? + input.get(Field::Goodwill)?,
        input.get(Field::TotalAssets)?,
    )
}

/// Short-term share of interest-bearing debt.
pub fn debt_composition(input: &ComputeInput) -> CalcResult {
    let short = input.get(Field::ShortTermDebt)?;
    percent(short, input.financial_debt()?)
}

/// Overhead structure: SG&A, R&D and remaining operating expenses relative
/// to revenue.
pub fn expense_structure(input: &ComputeInput) -> CalcResult {
    let sga = input.get(Field::SellingGeneralAdministrative)?;
    let rd = input.get_or(Field::ResearchDevelopment, Decimal::ZERO);
    let other = input.get(Field::OperatingExpenses)? - sga - rd;
    breakdown(
        input,
        Field::Revenue,
        &[
            ("selling_general_administrative", sga),
            ("research_development", rd),
            ("other_operating_expenses", other),
        ],
    )
}

/// Structural catalog entries.
pub(crate) fn units() -> Vec<RegisteredUnit> {
    use Category::Structural;
    use Direction::{Balanced, LowerBetter};
    use Tier::Applied;
    use UnitOfMeasure::Percent;

    vec![
        RegisteredUnit::new(
            "asset_structure",
            ("Asset Structure", "هيكل الأصول"),
            Applied, Structural, Balanced, dec!(40), Percent,
            &[Field::CurrentAssets, Field::TotalAssets],
            asset_structure,
        ),
        RegisteredUnit::new(
            "liability_structure",
            ("Liability Structure", "هيكل الالتزامات"),
            Applied, Structural, Balanced, dec!(25), Percent,
            &[Field::CurrentLiabilities, Field::TotalLiabilities, Field::TotalAssets],
            liability_structure,
        ),
        RegisteredUnit::new(
            "capital_structure",
            ("Capital Structure", "هيكل رأس المال"),
            Applied, Structural, Balanced, dec!(50), Percent,
            &[Field::ShareholdersEquity, Field::TotalLiabilities],
            capital_structure,
        ),
        RegisteredUnit::new(
            "income_structure",
            ("Income Statement Structure", "الهيكل الرأسي لقائمة الدخل"),
            Applied, Structural, LowerBetter, dec!(65), Percent,
            &[Field::CostOfRevenue, Field::Revenue],
            income_structure,
        ),
        RegisteredUnit::new(
            "current_asset_composition",
            ("Current Asset Composition", "تكوين الأصول المتداولة"),
            Applied, Structural, Balanced, dec!(20), Percent,
            &[Field::Cash, Field::CurrentAssets],
            current_asset_composition,
        ),
        RegisteredUnit::new(
            "fixed_asset_intensity",
            ("Fixed Asset Intensity", "كثافة الأصول الثابتة"),
            Applied, Structural, Balanced, dec!(35), Percent,
            &[
                Field::PropertyPlantEquipment,
                Field::AccumulatedDepreciation,
                Field::TotalAssets,
            ],
            fixed_asset_intensity,
        ),
        RegisteredUnit::new(
            "intangible_intensity",
            ("Intangible Intensity", "كثافة الأصول غير الملموسة"),
            Applied, Structural, Balanced, dec!(10), Percent,
            &[Field::IntangibleAssets, Field::Goodwill, Field::TotalAssets],
            intangible_intensity,
        ),
        RegisteredUnit::new(
            "debt_composition",
            ("Debt Composition", "تكوين الدين"),
            Applied, Structural, Balanced, dec!(30), Percent,
            &[Field::ShortTermDebt, Field::LongTermDebt],
            debt_composition,
        ),
        RegisteredUnit::new(
            "expense_structure",
            ("Expense Structure", "هيكل المصروفات"),
            Applied, Structural, LowerBetter, dec!(20), Percent,
            &[Field::SellingGeneralAdministrative, Field::OperatingExpenses, Field::Revenue],
            expense_structure,
        ),
    ]
}
