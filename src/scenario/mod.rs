//! Mortgage scenario definitions and loading

mod data;
pub mod loader;

pub use data::{MortgageScenario, Segment};
pub use loader::{load_scenarios, load_scenarios_from_csv_reader, load_scenarios_from_json_reader};

/// Principal used by the built-in comparison table
pub const DEFAULT_PRINCIPAL: f64 = 491_750.0;

/// Built-in comparison set: three rates over 35 and 30 years, plus a one-year
/// introductory rate stepping up for the remaining 34 years.
pub fn default_scenarios() -> Vec<MortgageScenario> {
    let mut scenarios = Vec::new();

    for &years in &[35, 30] {
        for &rate in &[0.025, 0.029, 0.035] {
            scenarios.push(MortgageScenario::fixed_rate(
                format!("{}y @ {:.2}%", years, rate * 100.0),
                DEFAULT_PRINCIPAL,
                rate,
                years,
            ));
        }
    }

    scenarios.push(MortgageScenario::new(
        "1y @ 2.50% then 34y @ 2.90%",
        DEFAULT_PRINCIPAL,
        vec![Segment::new(0.025, 35, 1), Segment::new(0.029, 34, 34)],
    ));

    scenarios
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenarios_are_valid() {
        let scenarios = default_scenarios();
        assert_eq!(scenarios.len(), 7);
        for scenario in &scenarios {
            scenario.validate().unwrap();
        }
        assert_eq!(scenarios[0].name, "35y @ 2.50%");
        assert_eq!(scenarios[6].segments.len(), 2);
    }
}
