//! Cross-check the closed-form payment and projection formulas against the
//! iterative solver over a grid of rates, terms and principals.
//!
//! Usage: cargo run --bin verify_solvers
//!
//! Exits non-zero if any case disagrees by a cent or more.

use mortgage_calculator::amortization::{project, project_iterative, solve_payment, IterativeSolver};
use mortgage_calculator::MortgageError;
use rayon::prelude::*;

const TOLERANCE: f64 = 0.01;

/// Worst disagreement found for one grid point
#[derive(Debug, Clone)]
struct CaseResult {
    rate: f64,
    periods: u32,
    principal: f64,
    payment_diff: f64,
    balance_diff: f64,
    interest_diff: f64,
}

impl CaseResult {
    fn worst(&self) -> f64 {
        self.payment_diff.max(self.balance_diff).max(self.interest_diff)
    }
}

fn check_case(solver: &IterativeSolver, rate: f64, periods: u32, principal: f64) -> Result<CaseResult, MortgageError> {
    let payment = solve_payment(rate, periods, principal)?;
    let reference = solver.solve(rate, periods, principal)?;

    // Compare projections over a partial window as well as the full term
    let mut balance_diff: f64 = 0.0;
    let mut interest_diff: f64 = 0.0;
    for window in [periods / 4, periods / 2, periods] {
        let closed = project(rate, window, principal, payment);
        let iterative = project_iterative(rate, window, principal, payment);
        balance_diff = balance_diff.max((closed.remaining_balance - iterative.remaining_balance).abs());
        interest_diff = interest_diff.max((closed.interest_paid - iterative.interest_paid).abs());
    }

    Ok(CaseResult {
        rate,
        periods,
        principal,
        payment_diff: (payment - reference).abs(),
        balance_diff,
        interest_diff,
    })
}

fn main() {
    env_logger::init();

    let rates = [0.0, 0.001, 0.002, 0.0025, 0.004, 0.005, 0.0075, 0.01];
    let periods = [12, 36, 60, 120, 240, 360, 420, 480];
    let principals = [10_000.0, 150_000.0, 300_000.0, 491_750.0, 2_000_000.0];

    let mut grid: Vec<(f64, u32, f64)> = Vec::new();
    for &rate in &rates {
        for &n in &periods {
            for &principal in &principals {
                grid.push((rate, n, principal));
            }
        }
    }

    println!("Checking {} cases...", grid.len());

    let solver = IterativeSolver::default();
    let results: Vec<Result<CaseResult, MortgageError>> = grid
        .par_iter()
        .map(|&(rate, n, principal)| check_case(&solver, rate, n, principal))
        .collect();

    let mut failures = 0;
    let mut worst: Option<CaseResult> = None;

    for result in results {
        match result {
            Ok(case) => {
                if case.worst() >= TOLERANCE {
                    failures += 1;
                    println!(
                        "  MISMATCH rate={} periods={} principal={:.0}: payment {:.6} balance {:.6} interest {:.6}",
                        case.rate, case.periods, case.principal, case.payment_diff, case.balance_diff, case.interest_diff
                    );
                }
                if worst.as_ref().map(|w| case.worst() > w.worst()).unwrap_or(true) {
                    worst = Some(case);
                }
            }
            Err(e) => {
                failures += 1;
                println!("  ERROR {}", e);
            }
        }
    }

    if let Some(w) = &worst {
        println!(
            "Largest difference {:.2e} at rate={} periods={} principal={:.0}",
            w.worst(), w.rate, w.periods, w.principal
        );
    }

    if failures > 0 {
        println!("{} cases failed", failures);
        std::process::exit(1);
    }
    println!("All cases agree within {}", TOLERANCE);
}
