//! Load scenarios from CSV or JSON files
//!
//! CSV layout is one row per segment, in segment order:
//!
//! ```text
//! Scenario,Principal,AnnualRate,MaturityYears,FixedTermYears
//! reset,300000,0.023,35,3
//! reset,300000,0.0195,32,32
//! ```
//!
//! JSON is an array of `MortgageScenario` objects.

use super::{MortgageScenario, Segment};
use crate::error::{MortgageError, Result};
use csv::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Scenario")]
    scenario: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "AnnualRate")]
    annual_rate: f64,
    #[serde(rename = "MaturityYears")]
    maturity_years: u32,
    #[serde(rename = "FixedTermYears")]
    fixed_term_years: u32,
}

/// Load scenarios from a file, choosing the format by extension (`.json` or CSV)
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<MortgageScenario>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let scenarios = if is_json {
        load_scenarios_from_json_reader(BufReader::new(file))?
    } else {
        load_scenarios_from_csv_reader(file)?
    };

    log::info!("loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from CSV rows; rows sharing a scenario name become its segments
pub fn load_scenarios_from_csv_reader<R: Read>(reader: R) -> Result<Vec<MortgageScenario>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios: Vec<MortgageScenario> = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let segment = Segment::new(row.annual_rate, row.maturity_years, row.fixed_term_years);

        match scenarios.iter_mut().find(|s| s.name == row.scenario) {
            Some(existing) => {
                if existing.principal != row.principal {
                    return Err(MortgageError::configuration(
                        &row.scenario,
                        format!(
                            "conflicting principal across rows ({} vs {})",
                            existing.principal, row.principal
                        ),
                    ));
                }
                existing.segments.push(segment);
            }
            None => scenarios.push(MortgageScenario::new(row.scenario, row.principal, vec![segment])),
        }
    }

    Ok(scenarios)
}

/// Load scenarios from a JSON array
pub fn load_scenarios_from_json_reader<R: Read>(reader: R) -> Result<Vec<MortgageScenario>> {
    Ok(serde_json::from_reader(reader)?)
}
