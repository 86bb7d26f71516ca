//! Mortgage Calculator - amortization engine for fixed and stepped-rate mortgages
//!
//! This library provides:
//! - Level payment solving (closed form, with an iterative cross-check solver)
//! - Balance and interest projection over full or partial terms
//! - Stepped-rate scenario evaluation with re-amortization at each rate reset
//! - Parallel batch evaluation and reporting for scenario comparison

pub mod error;
pub mod amortization;
pub mod scenario;
pub mod evaluation;
pub mod runner;
pub mod report;

// Re-export commonly used types
pub use error::MortgageError;
pub use amortization::{solve_payment, project, IterativeSolver, RateConversion, StepOutcome};
pub use scenario::{MortgageScenario, Segment, default_scenarios};
pub use evaluation::{ScenarioEvaluator, EvaluatorConfig, ScenarioResult, SegmentResult};
pub use runner::{ScenarioRunner, BatchOutcome};
