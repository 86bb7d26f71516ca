//! Amortization math: payment solving and balance projection

mod rate;
mod payment;
mod projection;

pub use rate::{RateConversion, PERIODS_PER_YEAR};
pub use payment::{solve_payment, IterativeSolver};
pub use projection::{project, project_iterative, schedule, ScheduleRow, StepOutcome};

/// Rates closer to zero than this take the zero-rate branch of the annuity formulas.
pub(crate) const ZERO_RATE_THRESHOLD: f64 = 1e-12;
