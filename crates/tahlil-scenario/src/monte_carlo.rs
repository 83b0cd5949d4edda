//! Seed-deterministic Monte Carlo sampling over assumption distributions.
//!
//! Assumption vectors are drawn sequentially from a seeded RNG before any
//! evaluation starts, then evaluated in parallel batches; outcome statistics
//! are computed over the sorted outcome array. Identical seed and inputs
//! therefore reproduce identical aggregate statistics bit-for-bit,
//! regardless of worker pool size.

use crate::assumptions::Assumptions;
use crate::error::{ScenarioError, ScenarioResult};
use crate::projection::{net_present_value, project};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Normal, Uniform};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tahlil_core::types::StatementSeries;

/// Per-factor sampling distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FactorDistribution {
    /// Fixed at the base assumption (no sampling).
    Fixed,
    /// Normal around `mean` with standard deviation `std_dev`.
    Normal {
        /// Distribution mean.
        mean: f64,
        /// Standard deviation; must be positive.
        std_dev: f64,
    },
    /// Uniform over `min..=max`.
    Uniform {
        /// Lower bound.
        min: f64,
        /// Upper bound; must exceed `min`.
        max: f64,
    },
    /// Discrete outcomes with probabilities summing to one.
    Discrete {
        /// `(value, probability)` pairs.
        outcomes: Vec<(f64, f64)>,
    },
}

impl FactorDistribution {
    /// Normal distribution shorthand.
    #[must_use]
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        Self::Normal { mean, std_dev }
    }

    /// Uniform distribution shorthand.
    #[must_use]
    pub fn uniform(min: f64, max: f64) -> Self {
        Self::Uniform { min, max }
    }

    fn validate(&self, field: &'static str) -> ScenarioResult<()> {
        match self {
            FactorDistribution::Fixed => Ok(()),
            FactorDistribution::Normal { std_dev, mean } => {
                if !std_dev.is_finite() || *std_dev <= 0.0 {
                    return Err(ScenarioError::invalid_assumption(
                        field,
                        *std_dev,
                        "standard deviation must be positive",
                    ));
                }
                if !mean.is_finite() {
                    return Err(ScenarioError::invalid_assumption(
                        field,
                        *mean,
                        "mean must be finite",
                    ));
                }
                Ok(())
            }
            FactorDistribution::Uniform { min, max } => {
                if !(min.is_finite() && max.is_finite()) || min >= max {
                    return Err(ScenarioError::invalid_assumption(
                        field,
                        *min,
                        "uniform bounds must satisfy min < max",
                    ));
                }
                Ok(())
            }
            FactorDistribution::Discrete { outcomes } => {
                if outcomes.is_empty() {
                    return Err(ScenarioError::invalid_assumption(
                        field,
                        0.0,
                        "discrete distribution needs at least one outcome",
                    ));
                }
                let total: f64 = outcomes.iter().map(|(_, p)| p).sum();
                if (total - 1.0).abs() > 1e-9 {
                    return Err(ScenarioError::invalid_assumption(
                        field,
                        total,
                        "discrete probabilities must sum to 1",
                    ));
                }
                Ok(())
            }
        }
    }

    fn sample(&self, base: f64, rng: &mut StdRng) -> f64 {
        match self {
            FactorDistribution::Fixed => base,
            FactorDistribution::Normal { mean, std_dev } => {
                // Parameters validated at spec construction.
                use rand::distributions::Distribution;
                Normal::new(*mean, *std_dev)
                    .map(|n| n.sample(rng))
                    .unwrap_or(*mean)
            }
            FactorDistribution::Uniform { min, max } => {
                use rand::distributions::Distribution;
                Uniform::new(*min, *max)
                    .map(|u| u.sample(rng))
                    .unwrap_or(*min)
            }
            FactorDistribution::Discrete { outcomes } => {
                let draw: f64 = rng.gen();
                let mut cumulative = 0.0;
                for (value, probability) in outcomes {
                    cumulative += probability;
                    if draw <= cumulative {
                        return *value;
                    }
                }
                outcomes.last().map(|(v, _)| *v).unwrap_or(base)
            }
        }
    }
}

/// Monte Carlo run specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloSpec {
    /// Number of samples to draw.
    pub iterations: usize,
    /// RNG seed; identical seeds reproduce identical statistics.
    pub seed: u64,
    /// Revenue growth distribution.
    pub revenue_growth: FactorDistribution,
    /// Operating margin distribution.
    pub operating_margin: FactorDistribution,
    /// Discount rate distribution.
    pub discount_rate: FactorDistribution,
    /// Confidence levels for value-at-risk, e.g. 0.95 and 0.99.
    pub var_confidence: Vec<f64>,
}

impl MonteCarloSpec {
    /// Creates a spec with all factors fixed; combine with the builder
    /// methods to open up factors for sampling.
    #[must_use]
    pub fn new(iterations: usize, seed: u64) -> Self {
        Self {
            iterations,
            seed,
            revenue_growth: FactorDistribution::Fixed,
            operating_margin: FactorDistribution::Fixed,
            discount_rate: FactorDistribution::Fixed,
            var_confidence: vec![0.95, 0.99],
        }
    }

    /// Sets the growth distribution.
    #[must_use]
    pub fn with_growth(mut self, distribution: FactorDistribution) -> Self {
        self.revenue_growth = distribution;
        self
    }

    /// Sets the margin distribution.
    #[must_use]
    pub fn with_margin(mut self, distribution: FactorDistribution) -> Self {
        self.operating_margin = distribution;
        self
    }

    /// Sets the discount rate distribution.
    #[must_use]
    pub fn with_discount(mut self, distribution: FactorDistribution) -> Self {
        self.discount_rate = distribution;
        self
    }

    /// Sets the VaR confidence levels.
    #[must_use]
    pub fn with_var_confidence(mut self, confidence: Vec<f64>) -> Self {
        self.var_confidence = confidence;
        self
    }

    fn validate(&self) -> ScenarioResult<()> {
        if self.iterations == 0 {
            return Err(ScenarioError::invalid_assumption(
                "iterations",
                0.0,
                "at least one iteration required",
            ));
        }
        self.revenue_growth.validate("revenue_growth")?;
        self.operating_margin.validate("operating_margin")?;
        self.discount_rate.validate("discount_rate")?;
        for confidence in &self.var_confidence {
            if !(*confidence > 0.0 && *confidence < 1.0) {
                return Err(ScenarioError::invalid_assumption(
                    "var_confidence",
                    *confidence,
                    "confidence must be between 0 and 1",
                ));
            }
        }
        Ok(())
    }
}

/// Caller-initiated cancellation for a running sampling pass.
///
/// Cancelling stops the issuing of new sample batches; in-flight samples
/// finish and the summary over completed samples is returned with
/// `partial = true`.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a fresh token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Value-at-risk at one confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAtRisk {
    /// Confidence level (0..1).
    pub confidence: f64,
    /// Shortfall of the matching lower quantile below the mean outcome.
    pub value: f64,
}

/// Outcome percentiles of the sampled distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomePercentiles {
    /// 5th percentile.
    pub p5: f64,
    /// 25th percentile.
    pub p25: f64,
    /// Median.
    pub p50: f64,
    /// 75th percentile.
    pub p75: f64,
    /// 95th percentile.
    pub p95: f64,
}

/// Aggregate statistics over the sampled NPV outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloSummary {
    /// Samples requested.
    pub iterations_requested: usize,
    /// Samples actually evaluated.
    pub iterations_run: usize,
    /// True when the run was cancelled before completing.
    pub partial: bool,
    /// Mean outcome.
    pub mean: f64,
    /// Outcome standard deviation.
    pub std_dev: f64,
    /// Outcome percentiles.
    pub percentiles: OutcomePercentiles,
    /// Value-at-risk at the requested confidence levels.
    pub value_at_risk: Vec<ValueAtRisk>,
}

/// Samples evaluated per cancellation check.
const BATCH_SIZE: usize = 512;

/// Runs the Monte Carlo pass: draw, evaluate, aggregate.
pub fn monte_carlo(
    series: &StatementSeries,
    base: &Assumptions,
    spec: &MonteCarloSpec,
    token: Option<&CancellationToken>,
) -> ScenarioResult<MonteCarloSummary> {
    base.validate()?;
    spec.validate()?;
    // Fail on an unusable baseline before burning samples.
    project(series, base)?;

    // Draws are sequential from the seed so results never depend on
    // evaluation order or pool size.
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let samples: Vec<Assumptions> = (0..spec.iterations)
        .map(|_| Assumptions {
            revenue_growth: clamp(
                spec.revenue_growth.sample(base.revenue_growth, &mut rng),
                -0.5,
                1.0,
            ),
            operating_margin: clamp(
                spec.operating_margin.sample(base.operating_margin, &mut rng),
                -0.5,
                0.8,
            ),
            discount_rate: clamp(
                spec.discount_rate.sample(base.discount_rate, &mut rng),
                0.001,
                0.5,
            ),
            ..*base
        })
        .collect();

    let mut outcomes: Vec<f64> = Vec::with_capacity(spec.iterations);
    let mut cancelled = false;
    for batch in samples.chunks(BATCH_SIZE) {
        if token.map_or(false, CancellationToken::is_cancelled) {
            cancelled = true;
            break;
        }
        let batch_outcomes: Vec<f64> = batch
            .par_iter()
            .map(|assumptions| sample_npv(series, assumptions))
            .collect();
        outcomes.extend(batch_outcomes);
    }

    let iterations_run = outcomes.len();
    if iterations_run == 0 {
        return Err(ScenarioError::invalid_assumption(
            "iterations",
            0.0,
            "cancelled before any sample completed",
        ));
    }

    // Sorting fixes the summation order, making the statistics
    // reproducible bit-for-bit for a given seed.
    outcomes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = iterations_run as f64;
    let mean = outcomes.iter().sum::<f64>() / n;
    let variance = outcomes.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let percentiles = OutcomePercentiles {
        p5: percentile(&outcomes, 5.0),
        p25: percentile(&outcomes, 25.0),
        p50: percentile(&outcomes, 50.0),
        p75: percentile(&outcomes, 75.0),
        p95: percentile(&outcomes, 95.0),
    };

    let value_at_risk = spec
        .var_confidence
        .iter()
        .map(|confidence| {
            let tail = percentile(&outcomes, (1.0 - confidence) * 100.0);
            ValueAtRisk {
                confidence: *confidence,
                value: (mean - tail).max(0.0),
            }
        })
        .collect();

    Ok(MonteCarloSummary {
        iterations_requested: spec.iterations,
        iterations_run,
        partial: cancelled,
        mean,
        std_dev,
        percentiles,
        value_at_risk,
    })
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

/// NPV of one sampled assumption vector; evaluation failures count as a
/// zero-value outcome rather than aborting the pass.
fn sample_npv(series: &StatementSeries, assumptions: &Assumptions) -> f64 {
    project(series, assumptions)
        .and_then(|projections| net_present_value(&projections, assumptions))
        .ok()
        .and_then(|npv| npv.to_f64())
        .unwrap_or(0.0)
}

/// Nearest-rank percentile over a sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (p / 100.0 * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
