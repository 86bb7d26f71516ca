//! Scenario runner for batch evaluation
//!
//! Scenarios are independent, so batches run in parallel. Output order always
//! follows input order.

use rayon::prelude::*;

use crate::amortization::RateConversion;
use crate::error::Result;
use crate::evaluation::{EvaluatorConfig, ScenarioEvaluator, ScenarioResult};
use crate::scenario::MortgageScenario;

/// Evaluation outcome for one scenario in a batch
#[derive(Debug)]
pub struct BatchOutcome {
    /// Name of the scenario this outcome belongs to
    pub scenario: String,
    pub result: Result<ScenarioResult>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Batch runner around a shared evaluator configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(EvaluatorConfig::default());
/// let outcomes = runner.run_batch(&default_scenarios());
/// if let Some(best) = ScenarioRunner::cheapest(&outcomes) {
///     println!("{} costs {:.0}", best.name, best.total_cost());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    evaluator: ScenarioEvaluator,
}

impl ScenarioRunner {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            evaluator: ScenarioEvaluator::new(config),
        }
    }

    /// Evaluate a single scenario
    pub fn run(&self, scenario: &MortgageScenario) -> Result<ScenarioResult> {
        self.evaluator.evaluate(scenario)
    }

    /// Evaluate scenarios in parallel; a failing scenario does not stop the others
    pub fn run_batch(&self, scenarios: &[MortgageScenario]) -> Vec<BatchOutcome> {
        scenarios
            .par_iter()
            .map(|scenario| self.outcome(scenario))
            .collect()
    }

    /// Evaluate scenarios one after another on the calling thread
    pub fn run_sequential(&self, scenarios: &[MortgageScenario]) -> Vec<BatchOutcome> {
        scenarios.iter().map(|scenario| self.outcome(scenario)).collect()
    }

    /// Evaluate one scenario under each rate conversion mode
    pub fn run_conversions(
        &self,
        scenario: &MortgageScenario,
        conversions: &[RateConversion],
    ) -> Vec<Result<ScenarioResult>> {
        conversions
            .iter()
            .map(|&rate_conversion| {
                let config = EvaluatorConfig {
                    rate_conversion,
                    ..self.evaluator.config().clone()
                };
                ScenarioEvaluator::new(config).evaluate(scenario)
            })
            .collect()
    }

    /// Successful result with the lowest total interest
    pub fn cheapest(outcomes: &[BatchOutcome]) -> Option<&ScenarioResult> {
        outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
            .min_by(|a, b| a.total_interest.total_cmp(&b.total_interest))
    }

    pub fn config(&self) -> &EvaluatorConfig {
        self.evaluator.config()
    }

    fn outcome(&self, scenario: &MortgageScenario) -> BatchOutcome {
        let result = self.evaluator.evaluate(scenario);
        if let Err(e) = &result {
            log::error!("{}", e);
        }
        BatchOutcome {
            scenario: scenario.name.clone(),
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{default_scenarios, Segment};
    use approx::assert_abs_diff_eq;

    fn mixed_batch() -> Vec<MortgageScenario> {
        let mut scenarios = Vec::new();
        for i in 0..40 {
            let rate = 0.01 + 0.001 * i as f64;
            scenarios.push(MortgageScenario::fixed_rate(format!("s{}", i), 100_000.0 + 1_000.0 * i as f64, rate, 25));
        }
        scenarios.insert(7, MortgageScenario::new("broken", 100_000.0, vec![Segment::new(0.02, 30, 10)]));
        scenarios
    }

    #[test]
    fn test_batch_preserves_order() {
        let scenarios = mixed_batch();
        let outcomes = ScenarioRunner::default().run_batch(&scenarios);

        assert_eq!(outcomes.len(), scenarios.len());
        for (scenario, outcome) in scenarios.iter().zip(&outcomes) {
            assert_eq!(scenario.name, outcome.scenario);
            if let Ok(result) = &outcome.result {
                assert_eq!(result.name, scenario.name);
                assert_eq!(result.principal, scenario.principal);
            }
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let outcomes = ScenarioRunner::default().run_batch(&mixed_batch());
        let failures: Vec<_> = outcomes.iter().filter(|o| !o.is_ok()).collect();

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].scenario, "broken");
        assert!(matches!(&failures[0].result, Err(e) if e.is_configuration()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scenarios = mixed_batch();
        let runner = ScenarioRunner::default();
        let parallel = runner.run_batch(&scenarios);
        let sequential = runner.run_sequential(&scenarios);

        for (p, s) in parallel.iter().zip(&sequential) {
            match (&p.result, &s.result) {
                (Ok(p), Ok(s)) => assert_eq!(p.total_interest, s.total_interest),
                (Err(_), Err(_)) => {}
                _ => panic!("parallel and sequential disagree on {}", p.scenario),
            }
        }
    }

    #[test]
    fn test_cheapest_is_lowest_rate() {
        let outcomes = ScenarioRunner::default().run_batch(&default_scenarios());
        let best = ScenarioRunner::cheapest(&outcomes).unwrap();
        // 2.5% over 30 years beats 2.5% over 35 years
        assert_eq!(best.name, "30y @ 2.50%");
    }

    #[test]
    fn test_run_conversions() {
        let scenario = MortgageScenario::fixed_rate("fixed", 150_000.0, 0.023, 35);
        let results = ScenarioRunner::default()
            .run_conversions(&scenario, &[RateConversion::Compounded, RateConversion::Flat]);

        assert_eq!(results.len(), 2);
        let compounded = results[0].as_ref().unwrap();
        let flat = results[1].as_ref().unwrap();
        assert_eq!(compounded.rate_conversion, RateConversion::Compounded);
        assert_eq!(flat.rate_conversion, RateConversion::Flat);
        assert!(flat.segments[0].payment > compounded.segments[0].payment);
        assert_abs_diff_eq!(flat.final_balance, 0.0, epsilon = 0.01);
    }
}
