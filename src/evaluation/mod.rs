//! Scenario evaluation: folds a scenario's segments into per-segment results

mod state;
mod engine;
mod results;

pub use state::EvaluationState;
pub use engine::{ScenarioEvaluator, EvaluatorConfig, DEFAULT_RESIDUAL_TOLERANCE};
pub use results::{SegmentResult, ScenarioResult, ScenarioSummary};
