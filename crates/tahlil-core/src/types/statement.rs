//! Normalized financial statement records.
//!
//! A [`Statement`] is one reporting period's data as produced by the
//! document-extraction pipeline. Every line item is optional: extraction may
//! fail to locate a figure, and downstream computations must treat absence as
//! an enumerated outcome rather than a zero.

use super::{Currency, Field};
use crate::error::{ModelError, ModelResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income statement line items for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Total revenue / net sales.
    pub revenue: Option<Decimal>,
    /// Cost of revenue / cost of goods sold.
    pub cost_of_revenue: Option<Decimal>,
    /// Gross profit.
    pub gross_profit: Option<Decimal>,
    /// Total operating expenses.
    pub operating_expenses: Option<Decimal>,
    /// Selling, general and administrative expense.
    pub selling_general_administrative: Option<Decimal>,
    /// Research and development expense.
    pub research_development: Option<Decimal>,
    /// Depreciation and amortization.
    pub depreciation_amortization: Option<Decimal>,
    /// Operating income (EBIT proxy).
    pub operating_income: Option<Decimal>,
    /// Interest expense.
    pub interest_expense: Option<Decimal>,
    /// Other non-operating income/(expense).
    pub other_income_expense: Option<Decimal>,
    /// Income before tax.
    pub income_before_tax: Option<Decimal>,
    /// Income tax expense.
    pub income_tax: Option<Decimal>,
    /// Net income.
    pub net_income: Option<Decimal>,
    /// Basic earnings per share.
    pub earnings_per_share: Option<Decimal>,
    /// Weighted average shares outstanding.
    pub shares: Option<Decimal>,
}

/// Balance sheet line items for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Cash and cash equivalents.
    pub cash: Option<Decimal>,
    /// Short-term marketable securities.
    pub marketable_securities: Option<Decimal>,
    /// Accounts receivable, net.
    pub accounts_receivable: Option<Decimal>,
    /// Inventory.
    pub inventory: Option<Decimal>,
    /// Prepaid expenses.
    pub prepaid_expenses: Option<Decimal>,
    /// Total current assets.
    pub current_assets: Option<Decimal>,
    /// Property, plant and equipment, gross.
    pub property_plant_equipment: Option<Decimal>,
    /// Accumulated depreciation (stored positive).
    pub accumulated_depreciation: Option<Decimal>,
    /// Intangible assets other than goodwill.
    pub intangible_assets: Option<Decimal>,
    /// Goodwill.
    pub goodwill: Option<Decimal>,
    /// Long-term investments.
    pub long_term_investments: Option<Decimal>,
    /// Total non-current assets.
    pub non_current_assets: Option<Decimal>,
    /// Total assets.
    pub total_assets: Option<Decimal>,
    /// Accounts payable.
    pub accounts_payable: Option<Decimal>,
    /// Short-term borrowings.
    pub short_term_debt: Option<Decimal>,
    /// Current portion of long-term debt.
    pub current_portion_long_term_debt: Option<Decimal>,
    /// Accrued liabilities.
    pub accrued_liabilities: Option<Decimal>,
    /// Deferred revenue.
    pub deferred_revenue: Option<Decimal>,
    /// Total current liabilities.
    pub current_liabilities: Option<Decimal>,
    /// Long-term debt.
    pub long_term_debt: Option<Decimal>,
    /// Total non-current liabilities.
    pub non_current_liabilities: Option<Decimal>,
    /// Total liabilities.
    pub total_liabilities: Option<Decimal>,
    /// Total shareholders' equity.
    pub shareholders_equity: Option<Decimal>,
    /// Retained earnings.
    pub retained_earnings: Option<Decimal>,
    /// Minority (non-controlling) interest.
    pub minority_interest: Option<Decimal>,
}

/// Cash flow statement line items for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    /// Net cash from operating activities.
    pub operating_cash_flow: Option<Decimal>,
    /// Net cash from investing activities.
    pub investing_cash_flow: Option<Decimal>,
    /// Net cash from financing activities.
    pub financing_cash_flow: Option<Decimal>,
    /// Capital expenditures (stored positive).
    pub capital_expenditures: Option<Decimal>,
    /// Free cash flow, if reported; otherwise derived as OCF - capex.
    pub free_cash_flow: Option<Decimal>,
    /// Dividends paid (stored positive).
    pub dividends_paid: Option<Decimal>,
    /// Proceeds from debt issuance.
    pub debt_issuance: Option<Decimal>,
    /// Debt repayments (stored positive).
    pub debt_repayment: Option<Decimal>,
    /// Share repurchases (stored positive).
    pub stock_repurchased: Option<Decimal>,
}

/// Point-in-time market context accompanying a statement, when listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Market capitalization.
    pub market_cap: Option<Decimal>,
    /// Share price at period end.
    pub share_price: Option<Decimal>,
}

/// One reporting period's normalized financial data.
///
/// Immutable once produced by the extraction pipeline; `year` and `currency`
/// tag it uniquely within a company's series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Fiscal year.
    pub year: i32,
    /// Reporting currency.
    pub currency: Currency,
    /// Income statement section.
    pub income: IncomeStatement,
    /// Balance sheet section.
    pub balance: BalanceSheet,
    /// Cash flow statement section.
    pub cash_flow: CashFlowStatement,
    /// Market context, when the company is listed.
    pub market: MarketSnapshot,
}

impl Statement {
    /// Creates an empty statement for the given period.
    #[must_use]
    pub fn new(year: i32, currency: Currency) -> Self {
        Self {
            year,
            currency,
            ..Self::default()
        }
    }

    /// Replaces the income statement section.
    #[must_use]
    pub fn with_income_statement(mut self, income: IncomeStatement) -> Self {
        self.income = income;
        self
    }

    /// Replaces the balance sheet section.
    #[must_use]
    pub fn with_balance_sheet(mut self, balance: BalanceSheet) -> Self {
        self.balance = balance;
        self
    }

    /// Replaces the cash flow section.
    #[must_use]
    pub fn with_cash_flow(mut self, cash_flow: CashFlowStatement) -> Self {
        self.cash_flow = cash_flow;
        self
    }

    /// Replaces the market snapshot.
    #[must_use]
    pub fn with_market(mut self, market: MarketSnapshot) -> Self {
        self.market = market;
        self
    }

    /// Reads one line item by field identifier.
    ///
    /// This is the single data access path used by descriptor required-field
    /// checks and by every computation helper.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<Decimal> {
        use Field::*;
        match field {
            Revenue => self.income.revenue,
            CostOfRevenue => self.income.cost_of_revenue,
            GrossProfit => self.income.gross_profit,
            OperatingExpenses => self.income.operating_expenses,
            SellingGeneralAdministrative => self.income.selling_general_administrative,
            ResearchDevelopment => self.income.research_development,
            DepreciationAmortization => self.income.depreciation_amortization,
            OperatingIncome => self.income.operating_income,
            InterestExpense => self.income.interest_expense,
            OtherIncomeExpense => self.income.other_income_expense,
            IncomeBeforeTax => self.income.income_before_tax,
            IncomeTax => self.income.income_tax,
            NetIncome => self.income.net_income,
            EarningsPerShare => self.income.earnings_per_share,
            Shares => self.income.shares,
            Cash => self.balance.cash,
            MarketableSecurities => self.balance.marketable_securities,
            AccountsReceivable => self.balance.accounts_receivable,
            Inventory => self.balance.inventory,
            PrepaidExpenses => self.balance.prepaid_expenses,
            CurrentAssets => self.balance.current_assets,
            PropertyPlantEquipment => self.balance.property_plant_equipment,
            AccumulatedDepreciation => self.balance.accumulated_depreciation,
            IntangibleAssets => self.balance.intangible_assets,
            Goodwill => self.balance.goodwill,
            LongTermInvestments => self.balance.long_term_investments,
            NonCurrentAssets => self.balance.non_current_assets,
            TotalAssets => self.balance.total_assets,
            AccountsPayable => self.balance.accounts_payable,
            ShortTermDebt => self.balance.short_term_debt,
            CurrentPortionLongTermDebt => self.balance.current_portion_long_term_debt,
            AccruedLiabilities => self.balance.accrued_liabilities,
            DeferredRevenue => self.balance.deferred_revenue,
            CurrentLiabilities => self.balance.current_liabilities,
            LongTermDebt => self.balance.long_term_debt,
            NonCurrentLiabilities => self.balance.non_current_liabilities,
            TotalLiabilities => self.balance.total_liabilities,
            ShareholdersEquity => self.balance.shareholders_equity,
            RetainedEarnings => self.balance.retained_earnings,
            MinorityInterest => self.balance.minority_interest,
            OperatingCashFlow => self.cash_flow.operating_cash_flow,
            InvestingCashFlow => self.cash_flow.investing_cash_flow,
            FinancingCashFlow => self.cash_flow.financing_cash_flow,
            CapitalExpenditures => self.cash_flow.capital_expenditures,
            FreeCashFlow => self.cash_flow.free_cash_flow,
            DividendsPaid => self.cash_flow.dividends_paid,
            DebtIssuance => self.cash_flow.debt_issuance,
            DebtRepayment => self.cash_flow.debt_repayment,
            StockRepurchased => self.cash_flow.stock_repurchased,
            MarketCap => self.market.market_cap,
            SharePrice => self.market.share_price,
        }
    }

    /// Returns the first missing field among `required`, if any.
    #[must_use]
    pub fn first_missing(&self, required: &[Field]) -> Option<Field> {
        required.iter().copied().find(|f| self.field(*f).is_none())
    }
}

/// Ordered sequence of statements for one company.
///
/// Insertion order is chronological; at most one statement per fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementSeries {
    /// Company identifier (as assigned by the upload pipeline).
    pub company: String,
    statements: Vec<Statement>,
}

impl StatementSeries {
    /// Creates an empty series for a company.
    #[must_use]
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            statements: Vec::new(),
        }
    }

    /// Appends a statement, enforcing one statement per fiscal year and a
    /// consistent reporting currency.
    pub fn push(&mut self, statement: Statement) -> ModelResult<()> {
        if self.statements.iter().any(|s| s.year == statement.year) {
            return Err(ModelError::duplicate_period(&self.company, statement.year));
        }
        if let Some(first) = self.statements.first() {
            if first.currency != statement.currency {
                return Err(ModelError::CurrencyMismatch {
                    expected: first.currency.code().to_string(),
                    found: statement.currency.code().to_string(),
                    year: statement.year,
                });
            }
        }
        self.statements.push(statement);
        Ok(())
    }

    /// Builds a series from statements, failing on duplicate years.
    pub fn from_statements(
        company: impl Into<String>,
        statements: impl IntoIterator<Item = Statement>,
    ) -> ModelResult<Self> {
        let mut series = Self::new(company);
        for s in statements {
            series.push(s)?;
        }
        Ok(series)
    }

    /// All statements in chronological (insertion) order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// The most recent statement.
    #[must_use]
    pub fn latest(&self) -> Option<&Statement> {
        self.statements.last()
    }

    /// The statement immediately preceding the latest.
    #[must_use]
    pub fn prior(&self) -> Option<&Statement> {
        let n = self.statements.len();
        if n >= 2 {
            self.statements.get(n - 2)
        } else {
            None
        }
    }

    /// Number of periods available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// True when the series holds no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
