//! Evaluation output structures

use serde::{Deserialize, Serialize};
use crate::amortization::{RateConversion, ScheduleRow};
use crate::scenario::MortgageScenario;

/// Outcome of one segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentResult {
    /// Position in the scenario (1-indexed)
    pub segment: usize,

    pub annual_rate: f64,
    pub periodic_rate: f64,
    pub maturity_years: u32,
    pub fixed_term_years: u32,
    pub maturity_periods: u32,
    pub fixed_term_periods: u32,

    /// Balance entering the segment
    pub opening_balance: f64,

    /// Level payment sized to amortize the opening balance over the full maturity
    pub payment: f64,

    pub interest_paid: f64,
    pub principal_repaid: f64,

    /// Balance carried into the next segment
    pub remaining_balance: f64,

    /// Per-period rows, only populated with detailed output
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<ScheduleRow>,
}

/// Complete evaluation of one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub principal: f64,
    pub rate_conversion: RateConversion,

    /// Per-segment results in segment order
    pub segments: Vec<SegmentResult>,

    pub total_interest: f64,
    pub total_paid: f64,

    /// Balance left after the final segment; expected to be ~0
    pub final_balance: f64,

    /// Set when the final balance missed the residual tolerance
    pub residual_warning: bool,
}

impl ScenarioResult {
    pub fn new(scenario: &MortgageScenario, rate_conversion: RateConversion) -> Self {
        Self {
            name: scenario.name.clone(),
            principal: scenario.principal,
            rate_conversion,
            segments: Vec::with_capacity(scenario.segments.len()),
            total_interest: 0.0,
            total_paid: 0.0,
            final_balance: scenario.principal,
            residual_warning: false,
        }
    }

    pub fn add_segment(&mut self, segment: SegmentResult) {
        self.segments.push(segment);
    }

    /// Principal plus all interest: the figure scenarios are compared on
    pub fn total_cost(&self) -> f64 {
        self.principal + self.total_interest
    }

    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            name: self.name.clone(),
            principal: self.principal,
            segment_count: self.segments.len(),
            first_payment: self.segments.first().map(|s| s.payment).unwrap_or(0.0),
            last_payment: self.segments.last().map(|s| s.payment).unwrap_or(0.0),
            total_interest: self.total_interest,
            total_cost: self.total_cost(),
            final_balance: self.final_balance,
        }
    }
}

/// Headline figures for a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub principal: f64,
    pub segment_count: usize,
    pub first_payment: f64,
    pub last_payment: f64,
    pub total_interest: f64,
    pub total_cost: f64,
    pub final_balance: f64,
}
