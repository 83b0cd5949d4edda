//! Scenario assumption sets and their plausibility bounds.

use crate::error::{ScenarioError, ScenarioResult};
use serde::{Deserialize, Serialize};

/// Forward-looking assumptions driving one scenario.
///
/// Rates are decimals (0.06 = 6%). Validation happens at definition time;
/// a set outside the plausible bounds fails the scenario before any
/// projection runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    /// Annual revenue growth rate.
    pub revenue_growth: f64,
    /// Target operating margin (operating income over revenue).
    pub operating_margin: f64,
    /// Capital expenditure as a share of revenue.
    pub capex_to_revenue: f64,
    /// Discount rate for present-value calculations.
    pub discount_rate: f64,
    /// Effective tax rate applied to pre-tax income.
    pub tax_rate: f64,
    /// Projection horizon in years.
    pub horizon_years: usize,
}

impl Assumptions {
    /// Creates an assumption set; bounds are checked by
    /// [`Assumptions::validate`] when the scenario is defined.
    #[must_use]
    pub fn new(
        revenue_growth: f64,
        operating_margin: f64,
        capex_to_revenue: f64,
        discount_rate: f64,
        tax_rate: f64,
        horizon_years: usize,
    ) -> Self {
        Self {
            revenue_growth,
            operating_margin,
            capex_to_revenue,
            discount_rate,
            tax_rate,
            horizon_years,
        }
    }

    /// A moderate baseline: 5% growth, 15% margin, 5% capex, 10% discount,
    /// 20% tax over five years.
    #[must_use]
    pub fn base() -> Self {
        Self::new(0.05, 0.15, 0.05, 0.10, 0.20, 5)
    }

    /// Checks every assumption against its plausible bounds.
    pub fn validate(&self) -> ScenarioResult<()> {
        check(
            "revenue_growth",
            self.revenue_growth,
            -0.5,
            1.0,
            "annual growth must be within -50%..100%",
        )?;
        check(
            "operating_margin",
            self.operating_margin,
            -0.5,
            0.8,
            "operating margin must be within -50%..80%",
        )?;
        check(
            "capex_to_revenue",
            self.capex_to_revenue,
            0.0,
            0.5,
            "capex share must be within 0%..50%",
        )?;
        check(
            "discount_rate",
            self.discount_rate,
            0.001,
            0.5,
            "discount rate must be within 0.1%..50%",
        )?;
        check(
            "tax_rate",
            self.tax_rate,
            0.0,
            0.6,
            "tax rate must be within 0%..60%",
        )?;
        if self.horizon_years == 0 || self.horizon_years > 15 {
            return Err(ScenarioError::invalid_assumption(
                "horizon_years",
                self.horizon_years as f64,
                "horizon must be 1..=15 years",
            ));
        }
        Ok(())
    }

    /// Returns a copy with the growth rate shifted by `delta`.
    #[must_use]
    pub fn with_growth_delta(mut self, delta: f64) -> Self {
        self.revenue_growth += delta;
        self
    }

    /// Returns a copy with the discount rate shifted by `delta`.
    #[must_use]
    pub fn with_discount_delta(mut self, delta: f64) -> Self {
        self.discount_rate += delta;
        self
    }
}

fn check(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    reason: &str,
) -> ScenarioResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(ScenarioError::invalid_assumption(field, value, reason));
    }
    Ok(())
}
