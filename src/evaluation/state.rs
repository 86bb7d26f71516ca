//! Running state carried across a scenario's segments

use crate::amortization::StepOutcome;

/// Loan position between segments
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationState {
    /// Balance entering the next segment
    pub remaining_principal: f64,

    /// Interest accumulated over all completed segments
    pub total_interest_paid: f64,

    /// Sum of all payments made so far
    pub total_paid: f64,

    /// Index of the next segment to evaluate (0-indexed)
    pub segment_index: usize,
}

impl EvaluationState {
    /// Initial state before the first segment
    pub fn new(principal: f64) -> Self {
        Self {
            remaining_principal: principal,
            total_interest_paid: 0.0,
            total_paid: 0.0,
            segment_index: 0,
        }
    }

    /// Carry a segment's outcome forward
    pub fn advance(&mut self, outcome: &StepOutcome, payment: f64, periods: u32) {
        self.total_interest_paid += outcome.interest_paid;
        self.total_paid += payment * periods as f64;
        self.remaining_principal = outcome.remaining_balance;
        self.segment_index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut state = EvaluationState::new(1_000.0);
        state.advance(&StepOutcome { remaining_balance: 600.0, interest_paid: 20.0 }, 35.0, 12);
        state.advance(&StepOutcome { remaining_balance: 0.0, interest_paid: 10.0 }, 50.0, 12);

        assert_eq!(state.segment_index, 2);
        assert_eq!(state.remaining_principal, 0.0);
        assert_eq!(state.total_interest_paid, 30.0);
        assert_eq!(state.total_paid, 1_020.0);
    }
}
