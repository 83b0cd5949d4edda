//! Sensitivity sweeps: NPV response to small assumption perturbations.

use crate::assumptions::Assumptions;
use crate::error::ScenarioResult;
use crate::projection::{net_present_value, project};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tahlil_core::types::StatementSeries;

/// Default perturbation grid: -1%, 0, +1%.
pub const DEFAULT_DELTAS: [f64; 3] = [-0.01, 0.0, 0.01];

/// One grid point of the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCell {
    /// Growth-rate shift applied, as a decimal.
    pub growth_delta: f64,
    /// Discount-rate shift applied, as a decimal.
    pub discount_delta: f64,
    /// NPV under the perturbed assumptions.
    pub npv: Decimal,
    /// NPV change versus the base case.
    pub delta_vs_base: Decimal,
}

/// The full delta table of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityTable {
    /// NPV under the unperturbed assumptions.
    pub base_npv: Decimal,
    /// Grid cells in row-major (growth, then discount) order.
    pub cells: Vec<SensitivityCell>,
}

impl SensitivityTable {
    /// The cell for an exact delta pair, if the grid contains it.
    #[must_use]
    pub fn cell(&self, growth_delta: f64, discount_delta: f64) -> Option<&SensitivityCell> {
        self.cells
            .iter()
            .find(|c| c.growth_delta == growth_delta && c.discount_delta == discount_delta)
    }
}

/// Re-runs projection and NPV for a small grid of perturbed assumptions.
///
/// Perturbed sets that leave the plausible bounds are skipped rather than
/// failing the sweep; the base case itself must be valid.
pub fn sensitivity_sweep(
    series: &StatementSeries,
    assumptions: &Assumptions,
    deltas: &[f64],
) -> ScenarioResult<SensitivityTable> {
    assumptions.validate()?;
    let base_projections = project(series, assumptions)?;
    let base_npv = net_present_value(&base_projections, assumptions)?;

    let mut cells = Vec::with_capacity(deltas.len() * deltas.len());
    for growth_delta in deltas {
        for discount_delta in deltas {
            let perturbed = assumptions
                .with_growth_delta(*growth_delta)
                .with_discount_delta(*discount_delta);
            if perturbed.validate().is_err() {
                continue;
            }
            let projections = project(series, &perturbed)?;
            let npv = net_present_value(&projections, &perturbed)?;
            cells.push(SensitivityCell {
                growth_delta: *growth_delta,
                discount_delta: *discount_delta,
                npv,
                delta_vs_base: npv - base_npv,
            });
        }
    }

    Ok(SensitivityTable { base_npv, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tahlil_core::types::{Currency, IncomeStatement, Statement};

    fn series() -> StatementSeries {
        let mut series = StatementSeries::new("ACME");
        series
            .push(
                Statement::new(2024, Currency::SAR).with_income_statement(IncomeStatement {
                    revenue: Some(dec!(100_000)),
                    depreciation_amortization: Some(dec!(4_000)),
                    ..IncomeStatement::default()
                }),
            )
            .unwrap();
        series
    }

    #[test]
    fn test_default_grid_is_nine_cells() {
        let table = sensitivity_sweep(&series(), &Assumptions::base(), &DEFAULT_DELTAS).unwrap();
        assert_eq!(table.cells.len(), 9);
    }

    #[test]
    fn test_zero_cell_matches_base() {
        let table = sensitivity_sweep(&series(), &Assumptions::base(), &DEFAULT_DELTAS).unwrap();
        let center = table.cell(0.0, 0.0).unwrap();
        assert_eq!(center.npv, table.base_npv);
        assert_eq!(center.delta_vs_base, Decimal::ZERO);
    }

    #[test]
    fn test_higher_growth_raises_npv() {
        let table = sensitivity_sweep(&series(), &Assumptions::base(), &DEFAULT_DELTAS).unwrap();
        let up = table.cell(0.01, 0.0).unwrap();
        let down = table.cell(-0.01, 0.0).unwrap();
        assert!(up.npv > table.base_npv);
        assert!(down.npv < table.base_npv);
    }

    #[test]
    fn test_higher_discount_lowers_npv() {
        let table = sensitivity_sweep(&series(), &Assumptions::base(), &DEFAULT_DELTAS).unwrap();
        let up = table.cell(0.0, 0.01).unwrap();
        assert!(up.npv < table.base_npv);
    }
}
