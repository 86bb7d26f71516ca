//! Level payment solving
//!
//! The closed-form annuity identity is authoritative. `IterativeSolver` finds the
//! same payment by simulating the loan and correcting the guess, and is kept as a
//! cross-check oracle for the closed form.

use crate::error::{MortgageError, Result};
use super::ZERO_RATE_THRESHOLD;

/// Payment that amortizes `present_value` to zero over `period_count` periods.
///
/// `A = P * i * (1+i)^n / ((1+i)^n - 1)`, with `P / n` when the rate is zero.
pub fn solve_payment(periodic_rate: f64, period_count: u32, present_value: f64) -> Result<f64> {
    if period_count == 0 {
        return Err(MortgageError::InvalidInput {
            field: "period_count".into(),
            reason: "number of periods must be > 0".into(),
        });
    }
    if !periodic_rate.is_finite() || periodic_rate <= -1.0 {
        return Err(MortgageError::InvalidInput {
            field: "periodic_rate".into(),
            reason: format!("rate {} must be finite and greater than -1", periodic_rate),
        });
    }

    let n = period_count as f64;
    if periodic_rate.abs() < ZERO_RATE_THRESHOLD {
        return Ok(present_value / n);
    }

    let growth = (1.0 + periodic_rate).powf(n);
    let annuity_factor = (growth - 1.0) / periodic_rate;
    if !annuity_factor.is_finite() || annuity_factor == 0.0 {
        return Err(MortgageError::NumericDegeneracy {
            context: format!("annuity factor at rate {} over {} periods", periodic_rate, period_count),
        });
    }

    let payment = present_value * growth / annuity_factor;
    if !payment.is_finite() {
        return Err(MortgageError::NumericDegeneracy {
            context: format!("payment at rate {} over {} periods", periodic_rate, period_count),
        });
    }
    Ok(payment)
}

/// Root-finding payment solver that simulates the loan period by period
#[derive(Debug, Clone, Copy)]
pub struct IterativeSolver {
    /// Absolute tolerance on the residual balance (currency units)
    pub tolerance: f64,
    /// Tolerance as a fraction of present value; the looser of the two applies
    pub relative_tolerance: f64,
    /// Hard cap on correction steps
    pub max_iterations: u32,
}

impl Default for IterativeSolver {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            relative_tolerance: 1e-10,
            max_iterations: 1000,
        }
    }
}

impl IterativeSolver {
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Default::default()
        }
    }

    /// Solve for the level payment.
    ///
    /// Starts from the straight-line payment and corrects it by the residual balance
    /// divided by the simulated sensitivity of the final balance to the payment.
    pub fn solve(&self, periodic_rate: f64, period_count: u32, present_value: f64) -> Result<f64> {
        if period_count == 0 {
            return Err(MortgageError::InvalidInput {
                field: "period_count".into(),
                reason: "number of periods must be > 0".into(),
            });
        }

        let tolerance = self.tolerance.max(self.relative_tolerance * present_value.abs());
        let mut payment = present_value / period_count as f64;
        let mut residual = f64::NAN;

        for iteration in 1..=self.max_iterations {
            let (balance, sensitivity) = simulate(periodic_rate, period_count, present_value, payment);
            residual = balance;

            if !residual.is_finite() || !sensitivity.is_finite() {
                return Err(non_convergence(periodic_rate, period_count, present_value, iteration, residual));
            }
            if residual.abs() < tolerance {
                log::trace!("iterative solver converged in {} iterations", iteration);
                return Ok(payment);
            }

            payment += residual / sensitivity;
        }

        Err(non_convergence(periodic_rate, period_count, present_value, self.max_iterations, residual))
    }
}

fn non_convergence(
    periodic_rate: f64,
    period_count: u32,
    present_value: f64,
    iterations: u32,
    residual: f64,
) -> MortgageError {
    MortgageError::NonConvergence {
        periodic_rate,
        period_count,
        present_value,
        iterations,
        residual,
    }
}

/// Run the loan forward at a fixed payment.
/// Returns the final balance and how much one extra unit of payment would lower it.
fn simulate(rate: f64, periods: u32, principal: f64, payment: f64) -> (f64, f64) {
    let mut balance = principal;
    let mut sensitivity = 0.0;
    for _ in 0..periods {
        balance += balance * rate - payment;
        sensitivity = sensitivity * (1.0 + rate) + 1.0;
    }
    (balance, sensitivity)
}
