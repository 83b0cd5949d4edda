//! Statement line item identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one line item across the three statement sections.
///
/// Unit descriptors declare their required inputs as a list of fields, and
/// the computation core reads data exclusively through
/// [`Statement::field`](super::Statement::field), so a unit's data
/// dependencies are fully described by its descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)] // variant names mirror the statement struct fields
pub enum Field {
    // Income statement
    Revenue,
    CostOfRevenue,
    GrossProfit,
    OperatingExpenses,
    SellingGeneralAdministrative,
    ResearchDevelopment,
    DepreciationAmortization,
    OperatingIncome,
    InterestExpense,
    OtherIncomeExpense,
    IncomeBeforeTax,
    IncomeTax,
    NetIncome,
    EarningsPerShare,
    Shares,
    // Balance sheet
    Cash,
    MarketableSecurities,
    AccountsReceivable,
    Inventory,
    PrepaidExpenses,
    CurrentAssets,
    PropertyPlantEquipment,
    AccumulatedDepreciation,
    IntangibleAssets,
    Goodwill,
    LongTermInvestments,
    NonCurrentAssets,
    TotalAssets,
    AccountsPayable,
    ShortTermDebt,
    CurrentPortionLongTermDebt,
    AccruedLiabilities,
    DeferredRevenue,
    CurrentLiabilities,
    LongTermDebt,
    NonCurrentLiabilities,
    TotalLiabilities,
    ShareholdersEquity,
    RetainedEarnings,
    MinorityInterest,
    // Cash flow
    OperatingCashFlow,
    InvestingCashFlow,
    FinancingCashFlow,
    CapitalExpenditures,
    FreeCashFlow,
    DividendsPaid,
    DebtIssuance,
    DebtRepayment,
    StockRepurchased,
    // Market
    MarketCap,
    SharePrice,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
