//! Computation input: the statement under analysis plus its history and
//! company context.

use rust_decimal::Decimal;
use tahlil_core::types::{CompanyContext, Field, Reason, Statement, StatementSeries};

/// Everything a unit formula may read.
///
/// `statement` is the period being analyzed; normally the latest in the
/// series, but the scenario engine evaluates projected periods through the
/// same path. History lookups are relative to `statement`'s year, so a
/// formula never sees "the future" of the period it analyzes.
#[derive(Debug, Clone, Copy)]
pub struct ComputeInput<'a> {
    /// Full chronological series for the company.
    pub series: &'a StatementSeries,
    /// The period under analysis.
    pub statement: &'a Statement,
    /// Company and benchmark context.
    pub context: &'a CompanyContext,
}

impl<'a> ComputeInput<'a> {
    /// Builds an input for the latest period of a series.
    ///
    /// Returns `None` when the series is empty.
    #[must_use]
    pub fn latest(series: &'a StatementSeries, context: &'a CompanyContext) -> Option<Self> {
        series.latest().map(|statement| Self {
            series,
            statement,
            context,
        })
    }

    /// Builds an input for an explicit period of a series.
    #[must_use]
    pub fn for_statement(
        series: &'a StatementSeries,
        statement: &'a Statement,
        context: &'a CompanyContext,
    ) -> Self {
        Self {
            series,
            statement,
            context,
        }
    }

    /// Reads a required field from the current period.
    pub fn get(&self, field: Field) -> Result<Decimal, Reason> {
        self.statement
            .field(field)
            .ok_or(Reason::MissingField { field })
    }

    /// Reads an optional field, defaulting when absent.
    #[must_use]
    pub fn get_or(&self, field: Field, default: Decimal) -> Decimal {
        self.statement.field(field).unwrap_or(default)
    }

    /// Index of the current period within the series.
    fn position(&self) -> usize {
        self.series
            .statements()
            .iter()
            .position(|s| s.year == self.statement.year)
            .unwrap_or(self.series.len().saturating_sub(1))
    }

    /// The statement `n` periods before the current one.
    ///
    /// `back(1)` is the immediately prior year. Fails with
    /// `InsufficientHistory` when the series is too short.
    pub fn back(&self, n: usize) -> Result<&'a Statement, Reason> {
        let pos = self.position();
        let available = pos + 1;
        if n > pos {
            return Err(Reason::InsufficientHistory {
                needed: n + 1,
                available,
            });
        }
        self.series
            .statements()
            .get(pos - n)
            .ok_or(Reason::InsufficientHistory {
                needed: n + 1,
                available,
            })
    }

    /// Reads a required field from the prior period.
    pub fn prior_get(&self, field: Field) -> Result<Decimal, Reason> {
        self.back(1)?
            .field(field)
            .ok_or(Reason::MissingField { field })
    }

    /// Reads a required field from `n` periods back.
    pub fn back_get(&self, n: usize, field: Field) -> Result<Decimal, Reason> {
        self.back(n)?
            .field(field)
            .ok_or(Reason::MissingField { field })
    }

    // ---- Derived figures shared across formulas ----

    /// EBITDA proxy: operating income plus depreciation & amortization.
    pub fn ebitda(&self) -> Result<Decimal, Reason> {
        Ok(self.get(Field::OperatingIncome)? + self.get(Field::DepreciationAmortization)?)
    }

    /// Free cash flow: reported figure, or derived as OCF minus capex.
    pub fn free_cash_flow(&self) -> Result<Decimal, Reason> {
        if let Some(fcf) = self.statement.field(Field::FreeCashFlow) {
            return Ok(fcf);
        }
        Ok(self.get(Field::OperatingCashFlow)? - self.get(Field::CapitalExpenditures)?)
    }

    /// Net fixed assets: gross PP&E less accumulated depreciation.
    pub fn net_fixed_assets(&self) -> Result<Decimal, Reason> {
        Ok(self.get(Field::PropertyPlantEquipment)? - self.get(Field::AccumulatedDepreciation)?)
    }

    /// Net debt: total liabilities less cash.
    pub fn net_debt(&self) -> Result<Decimal, Reason> {
        Ok(self.get(Field::TotalLiabilities)? - self.get(Field::Cash)?)
    }

    /// Interest-bearing financial debt: short-term plus long-term borrowings.
    pub fn financial_debt(&self) -> Result<Decimal, Reason> {
        Ok(self.get(Field::ShortTermDebt)? + self.get(Field::LongTermDebt)?)
    }

    /// Capital employed: total assets less current liabilities.
    pub fn capital_employed(&self) -> Result<Decimal, Reason> {
        Ok(self.get(Field::TotalAssets)? - self.get(Field::CurrentLiabilities)?)
    }

    /// Invested capital: total assets less cash and current liabilities.
    pub fn invested_capital(&self) -> Result<Decimal, Reason> {
        Ok(self.get(Field::TotalAssets)?
            - self.get(Field::Cash)?
            - self.get(Field::CurrentLiabilities)?)
    }

    /// NOPAT: operating income after the effective tax rate.
    pub fn nopat(&self) -> Result<Decimal, Reason> {
        let operating_income = self.get(Field::OperatingIncome)?;
        let tax = self.get(Field::IncomeTax)?;
        let pretax = self.get(Field::IncomeBeforeTax)?;
        if pretax.is_zero() {
            return Err(Reason::DivisionByZero);
        }
        let effective_rate = tax / pretax;
        Ok(operating_income * (Decimal::ONE - effective_rate))
    }

    /// Working capital: current assets less current liabilities.
    pub fn working_capital(&self) -> Result<Decimal, Reason> {
        Ok(self.get(Field::CurrentAssets)? - self.get(Field::CurrentLiabilities)?)
    }

    /// Tangible assets: total assets less intangibles and goodwill.
    pub fn tangible_assets(&self) -> Result<Decimal, Reason> {
        Ok(self.get(Field::TotalAssets)?
            - self.get(Field::IntangibleAssets)?
            - self.get(Field::Goodwill)?)
    }
}
