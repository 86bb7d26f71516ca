//! Scenario evaluator: re-amortizes the running balance at each segment's rate

use std::env;

use crate::amortization::{
    project, schedule, solve_payment, IterativeSolver, RateConversion, PERIODS_PER_YEAR,
};
use crate::error::{MortgageError, Result};
use crate::scenario::{MortgageScenario, Segment};
use super::results::{ScenarioResult, SegmentResult};
use super::state::EvaluationState;

/// Largest final balance (currency units) accepted without a warning
pub const DEFAULT_RESIDUAL_TOLERANCE: f64 = 1.0;

/// Payment disagreement between the closed form and the iterative oracle that gets logged
const CROSS_CHECK_TOLERANCE: f64 = 0.01;

/// Configuration for scenario evaluation
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// How annual rates become periodic rates
    pub rate_conversion: RateConversion,

    /// Payment periods per year
    pub periods_per_year: u32,

    /// Final-balance sanity bound
    pub residual_tolerance: f64,

    /// Attach per-period schedules to each segment result
    pub detailed_output: bool,

    /// If Some, every payment is re-solved iteratively and disagreements are logged
    pub cross_check: Option<IterativeSolver>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            rate_conversion: RateConversion::Compounded,
            periods_per_year: PERIODS_PER_YEAR,
            residual_tolerance: DEFAULT_RESIDUAL_TOLERANCE,
            detailed_output: false,
            cross_check: None,
        }
    }
}

impl EvaluatorConfig {
    /// Defaults overlaid with MORTGAGE_* environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`; unparsable values are skipped
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup("MORTGAGE_RATE_CONVERSION") {
            match value.parse() {
                Ok(conversion) => config.rate_conversion = conversion,
                Err(e) => log::warn!("ignoring MORTGAGE_RATE_CONVERSION: {}", e),
            }
        }
        if let Some(value) = lookup("MORTGAGE_PERIODS_PER_YEAR") {
            match value.trim().parse::<u32>() {
                Ok(periods) if periods > 0 => config.periods_per_year = periods,
                _ => log::warn!("ignoring MORTGAGE_PERIODS_PER_YEAR={}", value),
            }
        }
        if let Some(value) = lookup("MORTGAGE_RESIDUAL_TOLERANCE") {
            match value.trim().parse::<f64>() {
                Ok(tolerance) if tolerance >= 0.0 => config.residual_tolerance = tolerance,
                _ => log::warn!("ignoring MORTGAGE_RESIDUAL_TOLERANCE={}", value),
            }
        }
        if let Some(value) = lookup("MORTGAGE_DETAILED_OUTPUT") {
            match parse_flag(&value) {
                Some(flag) => config.detailed_output = flag,
                None => log::warn!("ignoring MORTGAGE_DETAILED_OUTPUT={}", value),
            }
        }
        if let Some(value) = lookup("MORTGAGE_CROSS_CHECK") {
            match parse_flag(&value) {
                Some(true) => config.cross_check = Some(IterativeSolver::default()),
                Some(false) => config.cross_check = None,
                None => log::warn!("ignoring MORTGAGE_CROSS_CHECK={}", value),
            }
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Evaluates scenarios one segment at a time
#[derive(Debug, Clone, Default)]
pub struct ScenarioEvaluator {
    config: EvaluatorConfig,
}

impl ScenarioEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate a scenario. Structural checks run before any math.
    pub fn evaluate(&self, scenario: &MortgageScenario) -> Result<ScenarioResult> {
        scenario.validate()?;

        for idx in scenario.maturity_gaps() {
            log::warn!(
                "scenario '{}': segment {} maturity does not follow segment {} ({} - {} != {})",
                scenario.name,
                idx + 2,
                idx + 1,
                scenario.segments[idx].maturity_years,
                scenario.segments[idx].fixed_term_years,
                scenario.segments[idx + 1].maturity_years,
            );
        }

        let mut state = EvaluationState::new(scenario.principal);
        let mut result = ScenarioResult::new(scenario, self.config.rate_conversion);

        for segment in &scenario.segments {
            let row = self.evaluate_segment(scenario, segment, &mut state)?;
            result.add_segment(row);
        }

        result.total_interest = state.total_interest_paid;
        result.total_paid = state.total_paid;
        result.final_balance = state.remaining_principal;

        if !(result.final_balance.abs() < self.config.residual_tolerance) {
            log::warn!(
                "scenario '{}': final balance {:.4} exceeds tolerance {}",
                scenario.name,
                result.final_balance,
                self.config.residual_tolerance
            );
            result.residual_warning = true;
        }

        Ok(result)
    }

    fn evaluate_segment(
        &self,
        scenario: &MortgageScenario,
        segment: &Segment,
        state: &mut EvaluationState,
    ) -> Result<SegmentResult> {
        let periodic_rate = self
            .config
            .rate_conversion
            .periodic_rate(segment.annual_rate, self.config.periods_per_year);
        let maturity_periods = self.periods(scenario, segment.maturity_years)?;
        let fixed_term_periods = self.periods(scenario, segment.fixed_term_years)?;
        let opening_balance = state.remaining_principal;

        // Payment always amortizes over the full remaining maturity, not the fixed term
        let payment = solve_payment(periodic_rate, maturity_periods, opening_balance)?;

        if let Some(solver) = &self.config.cross_check {
            let reference = solver.solve(periodic_rate, maturity_periods, opening_balance)?;
            if (reference - payment).abs() >= CROSS_CHECK_TOLERANCE {
                log::warn!(
                    "scenario '{}' segment {}: closed-form payment {:.4} differs from iterative {:.4}",
                    scenario.name,
                    state.segment_index + 1,
                    payment,
                    reference
                );
            }
        }

        let outcome = project(periodic_rate, fixed_term_periods, opening_balance, payment);
        let rows = if self.config.detailed_output {
            schedule(periodic_rate, fixed_term_periods, opening_balance, payment)
        } else {
            Vec::new()
        };

        state.advance(&outcome, payment, fixed_term_periods);

        log::debug!(
            "scenario '{}' segment {}: rate {:.6}, payment {:.2}, interest {:.2}, remaining {:.2}",
            scenario.name,
            state.segment_index,
            periodic_rate,
            payment,
            outcome.interest_paid,
            outcome.remaining_balance
        );

        Ok(SegmentResult {
            segment: state.segment_index,
            annual_rate: segment.annual_rate,
            periodic_rate,
            maturity_years: segment.maturity_years,
            fixed_term_years: segment.fixed_term_years,
            maturity_periods,
            fixed_term_periods,
            opening_balance,
            payment,
            interest_paid: outcome.interest_paid,
            principal_repaid: opening_balance - outcome.remaining_balance,
            remaining_balance: outcome.remaining_balance,
            schedule: rows,
        })
    }

    fn periods(&self, scenario: &MortgageScenario, years: u32) -> Result<u32> {
        years
            .checked_mul(self.config.periods_per_year)
            .filter(|&periods| periods > 0)
            .ok_or_else(|| {
                MortgageError::configuration(
                    &scenario.name,
                    format!("{} years at {} periods per year is out of range", years, self.config.periods_per_year),
                )
            })
    }
}
