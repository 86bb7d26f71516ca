//! Error types shared across the amortization engine

use thiserror::Error;

/// Errors produced while loading, validating, or evaluating mortgage scenarios.
#[derive(Debug, Error)]
pub enum MortgageError {
    /// Structural problem in a scenario definition. Detected before any math runs.
    #[error("configuration error in scenario '{scenario}': {reason}")]
    Configuration { scenario: String, reason: String },

    /// The iterative payment solver hit its iteration cap without reaching tolerance.
    #[error(
        "payment solver did not converge after {iterations} iterations \
         (rate {periodic_rate}, {period_count} periods, present value {present_value}, residual {residual})"
    )]
    NonConvergence {
        periodic_rate: f64,
        period_count: u32,
        present_value: f64,
        iterations: u32,
        residual: f64,
    },

    /// Annuity factor collapsed to zero or overflowed.
    #[error("numeric degeneracy in {context}")]
    NumericDegeneracy { context: String },

    #[error("invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MortgageError {
    pub(crate) fn configuration(scenario: &str, reason: impl Into<String>) -> Self {
        MortgageError::Configuration {
            scenario: scenario.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the scenario definition rather than the numerics.
    pub fn is_configuration(&self) -> bool {
        matches!(self, MortgageError::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
