//! Balance projection under a level payment

use serde::{Deserialize, Serialize};
use super::ZERO_RATE_THRESHOLD;

/// Loan position after a number of payment periods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Balance still owed after the last period
    pub remaining_balance: f64,
    /// Interest accrued over the projected periods
    pub interest_paid: f64,
}

/// One period of an amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Period number within the projection (1-indexed)
    pub period: u32,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal_repaid: f64,
    pub closing_balance: f64,
}

/// Closed-form projection of `principal` over `period_count` periods of `payment`.
///
/// `B = P(1+i)^n - A((1+i)^n - 1)/i` and `I = (Pi - A)((1+i)^n - 1)/i + An`.
/// At a zero rate the balance falls linearly and no interest accrues.
pub fn project(periodic_rate: f64, period_count: u32, principal: f64, payment: f64) -> StepOutcome {
    if period_count == 0 {
        return StepOutcome {
            remaining_balance: principal,
            interest_paid: 0.0,
        };
    }

    let n = period_count as f64;
    if periodic_rate.abs() < ZERO_RATE_THRESHOLD {
        return StepOutcome {
            remaining_balance: principal - payment * n,
            interest_paid: 0.0,
        };
    }

    let growth = (1.0 + periodic_rate).powf(n);
    let annuity_factor = (growth - 1.0) / periodic_rate;

    StepOutcome {
        remaining_balance: principal * growth - payment * annuity_factor,
        interest_paid: (principal * periodic_rate - payment) * annuity_factor + payment * n,
    }
}

/// Period-by-period projection; reference oracle for [`project`]
pub fn project_iterative(periodic_rate: f64, period_count: u32, principal: f64, payment: f64) -> StepOutcome {
    let mut balance = principal;
    let mut interest_paid = 0.0;

    for _ in 0..period_count {
        let interest = balance * periodic_rate;
        interest_paid += interest;
        balance = balance + interest - payment;
    }

    StepOutcome {
        remaining_balance: balance,
        interest_paid,
    }
}

/// Full per-period schedule for the projection
pub fn schedule(periodic_rate: f64, period_count: u32, principal: f64, payment: f64) -> Vec<ScheduleRow> {
    let mut rows = Vec::with_capacity(period_count as usize);
    let mut balance = principal;

    for period in 1..=period_count {
        let interest = balance * periodic_rate;
        let closing = balance + interest - payment;
        rows.push(ScheduleRow {
            period,
            opening_balance: balance,
            payment,
            interest,
            principal_repaid: payment - interest,
            closing_balance: closing,
        });
        balance = closing;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::solve_payment;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_periods_is_identity() {
        for &rate in &[0.0, 0.001, 0.005, 0.02] {
            for &(principal, payment) in &[(100_000.0, 500.0), (1.0, 0.0), (250_000.0, 99_999.0)] {
                let outcome = project(rate, 0, principal, payment);
                assert_eq!(outcome.remaining_balance, principal);
                assert_eq!(outcome.interest_paid, 0.0);

                let outcome = project_iterative(rate, 0, principal, payment);
                assert_eq!(outcome.remaining_balance, principal);
                assert_eq!(outcome.interest_paid, 0.0);
            }
        }
    }

    #[test]
    fn test_zero_rate_linear_paydown() {
        let outcome = project(0.0, 24, 12_000.0, 250.0);
        assert_abs_diff_eq!(outcome.remaining_balance, 6_000.0, epsilon = 1e-9);
        assert_eq!(outcome.interest_paid, 0.0);
    }

    #[test]
    fn test_full_term_pays_off() {
        for &rate in &[0.001, 0.0025, 0.004, 0.0075, 0.01] {
            for &periods in &[12, 50, 120, 360, 480] {
                let payment = solve_payment(rate, periods, 200_000.0).unwrap();
                let outcome = project(rate, periods, 200_000.0, payment);
                assert!(
                    outcome.remaining_balance.abs() < 0.01,
                    "rate={} periods={} remaining={}",
                    rate, periods, outcome.remaining_balance
                );
                assert!(outcome.interest_paid > 0.0);
            }
        }
    }

    #[test]
    fn test_closed_form_matches_iterative() {
        let cases = [(0.004, 50, 100_000.0), (0.002, 30, 200_000.0), (0.0019, 420, 150_000.0)];
        for (rate, periods, principal) in cases {
            let payment = solve_payment(rate, periods, principal).unwrap();
            // Full term and a partial window
            for n in [periods, periods / 3] {
                let closed = project(rate, n, principal, payment);
                let iterative = project_iterative(rate, n, principal, payment);
                assert_abs_diff_eq!(closed.remaining_balance, iterative.remaining_balance, epsilon = 0.01);
                assert_abs_diff_eq!(closed.interest_paid, iterative.interest_paid, epsilon = 0.01);
            }
        }
    }

    #[test]
    fn test_interest_identity() {
        // Payments made = principal repaid + interest
        let (rate, n, principal) = (0.003, 36, 300_000.0);
        let payment = solve_payment(rate, 420, principal).unwrap();
        let outcome = project(rate, n, principal, payment);
        let repaid = principal - outcome.remaining_balance;
        assert_abs_diff_eq!(payment * n as f64, repaid + outcome.interest_paid, epsilon = 1e-6);
    }

    #[test]
    fn test_schedule_rows() {
        let payment = solve_payment(0.005, 12, 10_000.0).unwrap();
        let rows = schedule(0.005, 12, 10_000.0, payment);

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].period, 1);
        assert_abs_diff_eq!(rows[0].interest, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rows[11].closing_balance, 0.0, epsilon = 0.01);

        // Interest share shrinks as the balance is paid down
        assert!(rows[11].interest < rows[0].interest);
        assert!(rows[11].principal_repaid > rows[0].principal_repaid);

        let total_interest: f64 = rows.iter().map(|r| r.interest).sum();
        let outcome = project(0.005, 12, 10_000.0, payment);
        assert_abs_diff_eq!(total_interest, outcome.interest_paid, epsilon = 1e-6);
    }
}
