//! Shared arithmetic helpers enforcing the numeric policy.
//!
//! Every division goes through [`div`], so a zero or overflowing denominator
//! always resolves to `NotComputable(DivisionByZero)` and `NaN`/`Infinity`
//! can never appear in a result. Percentage changes against a zero prior use
//! the from-zero sentinel instead of an undefined rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tahlil_core::types::{AnalysisValue, Reason};

/// Result of one formula evaluation.
pub type CalcResult = Result<AnalysisValue, Reason>;

/// Days in the analysis year, as used by turnover-to-days conversions.
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Checked division.
pub fn div(numerator: Decimal, denominator: Decimal) -> Result<Decimal, Reason> {
    if denominator.is_zero() {
        return Err(Reason::DivisionByZero);
    }
    numerator
        .checked_div(denominator)
        .ok_or(Reason::DivisionByZero)
}

/// A dimensionless multiple.
pub fn ratio(numerator: Decimal, denominator: Decimal) -> CalcResult {
    div(numerator, denominator).map(AnalysisValue::Ratio)
}

/// A percentage: numerator over denominator, times 100.
pub fn percent(numerator: Decimal, denominator: Decimal) -> CalcResult {
    div(numerator, denominator).map(|v| AnalysisValue::Percent(v * dec!(100)))
}

/// Days outstanding: balance times 365 over the annual flow.
pub fn days_outstanding(balance: Decimal, annual_flow: Decimal) -> CalcResult {
    div(balance * DAYS_PER_YEAR, annual_flow).map(AnalysisValue::Days)
}

/// Year-over-year percentage change with from-zero sentinel semantics.
///
/// - prior 0, current > 0: the `100%-from-zero` flag
/// - prior 0, current 0: 0%
/// - prior 0, current < 0: not computable (no meaningful base)
/// - otherwise: `(current - prior) / |prior| * 100`
pub fn pct_change(prior: Decimal, current: Decimal) -> CalcResult {
    if prior.is_zero() {
        return if current.is_zero() {
            Ok(AnalysisValue::Percent(Decimal::ZERO))
        } else if current > Decimal::ZERO {
            Ok(AnalysisValue::GrowthFromZero)
        } else {
            Err(Reason::DivisionByZero)
        };
    }
    div(current - prior, prior.abs()).map(|v| AnalysisValue::Percent(v * dec!(100)))
}

/// Compound annual growth rate over `years` periods, in percent.
///
/// Falls back to not-computable when the endpoints do not admit a real root
/// (non-positive start or end).
pub fn cagr(start: Decimal, end: Decimal, years: u32) -> CalcResult {
    use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

    if years == 0 || start <= Decimal::ZERO || end <= Decimal::ZERO {
        return Err(Reason::DivisionByZero);
    }
    // Growth-rate root, not a monetary aggregation; computed through f64.
    let growth = (end.to_f64().unwrap_or(0.0) / start.to_f64().unwrap_or(1.0))
        .powf(1.0 / f64::from(years))
        - 1.0;
    Decimal::from_f64(growth * 100.0)
        .map(AnalysisValue::Percent)
        .ok_or(Reason::DivisionByZero)
}

/// Clamps a component score into `0..=cap` for composite indices.
pub fn component_score(value: Decimal, target: Decimal, cap: Decimal) -> Decimal {
    if target.is_zero() {
        return Decimal::ZERO;
    }
    let score = value / target * cap;
    score.clamp(Decimal::ZERO, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_by_zero() {
        assert_eq!(div(dec!(1), Decimal::ZERO), Err(Reason::DivisionByZero));
        assert_eq!(div(dec!(10), dec!(4)), Ok(dec!(2.5)));
    }

    #[test]
    fn test_pct_change_spec_cases() {
        // prior=0, current=150 => flagged from zero
        assert_eq!(pct_change(dec!(0), dec!(150)), Ok(AnalysisValue::GrowthFromZero));
        // prior=150, current=0 => -100%
        assert_eq!(
            pct_change(dec!(150), dec!(0)),
            Ok(AnalysisValue::Percent(dec!(-100)))
        );
        // prior=100, current=120 => +20%
        assert_eq!(
            pct_change(dec!(100), dec!(120)),
            Ok(AnalysisValue::Percent(dec!(20)))
        );
    }

    #[test]
    fn test_pct_change_zero_to_zero() {
        assert_eq!(
            pct_change(Decimal::ZERO, Decimal::ZERO),
            Ok(AnalysisValue::Percent(Decimal::ZERO))
        );
    }

    #[test]
    fn test_pct_change_negative_base_uses_magnitude() {
        // Loss narrowing from -200 to -100 is a +50% improvement.
        assert_eq!(
            pct_change(dec!(-200), dec!(-100)),
            Ok(AnalysisValue::Percent(dec!(50)))
        );
    }

    #[test]
    fn test_cagr() {
        // 100 -> 121 over 2 years is 10% a year.
        use rust_decimal::prelude::ToPrimitive;
        match cagr(dec!(100), dec!(121), 2) {
            Ok(AnalysisValue::Percent(p)) => {
                let p = p.to_f64().unwrap();
                assert!((p - 10.0).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_component_score_clamps() {
        assert_eq!(component_score(dec!(4), dec!(2), dec!(25)), dec!(25));
        assert_eq!(component_score(dec!(1), dec!(2), dec!(25)), dec!(12.5));
        assert_eq!(component_score(dec!(-1), dec!(2), dec!(25)), Decimal::ZERO);
    }
}
