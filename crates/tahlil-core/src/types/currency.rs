//! Currency type with ISO 4217 codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency codes.
///
/// Covers the reporting currencies the extraction pipeline currently emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum Currency {
    /// Saudi Riyal
    #[default]
    SAR,
    /// United States Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// UAE Dirham
    AED,
    /// Kuwaiti Dinar
    KWD,
    /// Qatari Riyal
    QAR,
    /// Egyptian Pound
    EGP,
    /// Jordanian Dinar
    JOD,
    /// Japanese Yen
    JPY,
}

impl Currency {
    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::SAR => "SAR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::AED => "AED",
            Currency::KWD => "KWD",
            Currency::QAR => "QAR",
            Currency::EGP => "EGP",
            Currency::JOD => "JOD",
            Currency::JPY => "JPY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        assert_eq!(Currency::SAR.code(), "SAR");
        assert_eq!(Currency::USD.to_string(), "USD");
    }

    #[test]
    fn test_default_is_sar() {
        assert_eq!(Currency::default(), Currency::SAR);
    }
}
