//! Scenario data structures

use serde::{Deserialize, Serialize};
use crate::error::{MortgageError, Result};

/// One pricing window within a loan's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Nominal annual interest rate (0.023 = 2.3%)
    pub annual_rate: f64,

    /// Remaining full amortization horizon at the start of this segment, in years.
    /// The payment is sized against this horizon.
    pub maturity_years: u32,

    /// Years this rate applies before the next segment takes over
    pub fixed_term_years: u32,
}

impl Segment {
    pub fn new(annual_rate: f64, maturity_years: u32, fixed_term_years: u32) -> Self {
        Self {
            annual_rate,
            maturity_years,
            fixed_term_years,
        }
    }

    /// Rate fixed for the whole remaining maturity
    pub fn to_maturity(annual_rate: f64, maturity_years: u32) -> Self {
        Self::new(annual_rate, maturity_years, maturity_years)
    }
}

/// A loan under evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageScenario {
    /// Label used in reports and error messages
    pub name: String,

    /// Initial loan amount
    pub principal: f64,

    /// Ordered rate/term windows; the last one must run to maturity
    pub segments: Vec<Segment>,
}

impl MortgageScenario {
    pub fn new(name: impl Into<String>, principal: f64, segments: Vec<Segment>) -> Self {
        Self {
            name: name.into(),
            principal,
            segments,
        }
    }

    /// Single-rate loan: a one-element segment list
    pub fn fixed_rate(name: impl Into<String>, principal: f64, annual_rate: f64, maturity_years: u32) -> Self {
        Self::new(name, principal, vec![Segment::to_maturity(annual_rate, maturity_years)])
    }

    /// Total loan life in years, assuming consecutive segments hand over cleanly
    pub fn total_years(&self) -> u32 {
        self.segments.iter().map(|s| s.fixed_term_years).sum()
    }

    /// Structural checks run before any numeric work
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| -> Result<()> { Err(MortgageError::configuration(&self.name, reason)) };

        if !self.principal.is_finite() || self.principal <= 0.0 {
            return fail(format!("principal must be positive, got {}", self.principal));
        }

        let last = match self.segments.last() {
            Some(last) => last,
            None => return fail("segment list is empty".to_string()),
        };

        for (idx, segment) in self.segments.iter().enumerate() {
            if !segment.annual_rate.is_finite() || segment.annual_rate < 0.0 {
                return fail(format!(
                    "segment {}: annual rate must be non-negative, got {}",
                    idx + 1,
                    segment.annual_rate
                ));
            }
            if segment.maturity_years == 0 || segment.fixed_term_years == 0 {
                return fail(format!("segment {}: maturity and fixed term must be positive", idx + 1));
            }
            if segment.fixed_term_years > segment.maturity_years {
                return fail(format!(
                    "segment {}: fixed term {} exceeds maturity {}",
                    idx + 1,
                    segment.fixed_term_years,
                    segment.maturity_years
                ));
            }
        }

        if last.maturity_years != last.fixed_term_years {
            return fail(format!(
                "final segment must run to maturity (maturity {} years, fixed term {} years)",
                last.maturity_years, last.fixed_term_years
            ));
        }

        Ok(())
    }

    /// Index pairs of consecutive segments whose maturities do not step down by the
    /// earlier segment's fixed term
    pub fn maturity_gaps(&self) -> Vec<usize> {
        self.segments
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].maturity_years.checked_sub(pair[0].fixed_term_years) != Some(pair[1].maturity_years))
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stepped() -> MortgageScenario {
        MortgageScenario::new(
            "stepped",
            300_000.0,
            vec![Segment::new(0.023, 35, 3), Segment::new(0.0195, 32, 32)],
        )
    }

    #[test]
    fn test_valid_scenarios() {
        stepped().validate().unwrap();
        MortgageScenario::fixed_rate("fixed", 150_000.0, 0.023, 35).validate().unwrap();
        MortgageScenario::fixed_rate("zero", 150_000.0, 0.0, 10).validate().unwrap();
    }

    #[test]
    fn test_final_segment_must_run_to_maturity() {
        let scenario = MortgageScenario::new("short", 100_000.0, vec![Segment::new(0.02, 30, 10)]);
        let err = scenario.validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("short"));
    }

    #[test]
    fn test_empty_segments_rejected() {
        let scenario = MortgageScenario::new("empty", 100_000.0, Vec::new());
        assert!(scenario.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_structural_checks() {
        let bad = [
            MortgageScenario::fixed_rate("neg principal", -1.0, 0.02, 30),
            MortgageScenario::fixed_rate("nan principal", f64::NAN, 0.02, 30),
            MortgageScenario::fixed_rate("neg rate", 100_000.0, -0.01, 30),
            MortgageScenario::fixed_rate("zero maturity", 100_000.0, 0.02, 0),
            MortgageScenario::new("term > maturity", 100_000.0, vec![Segment::new(0.02, 5, 10), Segment::to_maturity(0.02, 25)]),
        ];
        for scenario in &bad {
            assert!(scenario.validate().unwrap_err().is_configuration(), "{}", scenario.name);
        }
    }

    #[test]
    fn test_maturity_gaps() {
        assert!(stepped().maturity_gaps().is_empty());
        assert_eq!(stepped().total_years(), 35);

        let gapped = MortgageScenario::new(
            "gapped",
            300_000.0,
            vec![Segment::new(0.023, 35, 3), Segment::to_maturity(0.0195, 30)],
        );
        assert_eq!(gapped.maturity_gaps(), vec![0]);
    }
}
