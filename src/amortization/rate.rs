//! Annual-to-periodic interest rate conversion

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monthly payment frequency used by scenario evaluation
pub const PERIODS_PER_YEAR: u32 = 12;

/// Method for converting an annual nominal rate to a periodic rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateConversion {
    /// Compounding-consistent: i = (1 + r)^(1/m) - 1
    #[default]
    Compounded,
    /// Simple division: i = r / m
    Flat,
}

impl RateConversion {
    /// Convert an annual rate to the rate for one of `periods_per_year` periods
    pub fn periodic_rate(&self, annual_rate: f64, periods_per_year: u32) -> f64 {
        let m = periods_per_year.max(1) as f64;
        match self {
            RateConversion::Compounded => (1.0 + annual_rate).powf(1.0 / m) - 1.0,
            RateConversion::Flat => annual_rate / m,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RateConversion::Compounded => "compounded",
            RateConversion::Flat => "flat",
        }
    }
}

impl fmt::Display for RateConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateConversion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compounded" | "compound" | "effective" => Ok(RateConversion::Compounded),
            "flat" | "simple" | "nominal" => Ok(RateConversion::Flat),
            other => Err(format!("Unknown rate conversion: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_compounded_round_trips_to_annual() {
        let monthly = RateConversion::Compounded.periodic_rate(0.05, 12);
        let annual = (1.0 + monthly).powi(12) - 1.0;
        assert_abs_diff_eq!(annual, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_divides() {
        let monthly = RateConversion::Flat.periodic_rate(0.06, 12);
        assert_abs_diff_eq!(monthly, 0.005, epsilon = 1e-15);
    }

    #[test]
    fn test_compounded_below_flat() {
        // Effective monthly rate is always a little lower than nominal / 12
        let c = RateConversion::Compounded.periodic_rate(0.023, 12);
        let f = RateConversion::Flat.periodic_rate(0.023, 12);
        assert!(c < f);
        assert_abs_diff_eq!(c, 0.0019, epsilon = 0.0001);
    }

    #[test]
    fn test_zero_rate_is_zero_in_both_modes() {
        assert_eq!(RateConversion::Compounded.periodic_rate(0.0, 12), 0.0);
        assert_eq!(RateConversion::Flat.periodic_rate(0.0, 12), 0.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Flat".parse::<RateConversion>(), Ok(RateConversion::Flat));
        assert_eq!(" compounded ".parse::<RateConversion>(), Ok(RateConversion::Compounded));
        assert!("monthly".parse::<RateConversion>().is_err());
    }
}
