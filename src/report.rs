//! Reporting of evaluation results: console table, CSV and JSON
//!
//! Currency figures are rounded to whole units and rates shown as percentages
//! with two decimals. The evaluator itself never rounds.

use std::io::{self, Write};

use serde::Serialize;

use crate::error::Result;
use crate::evaluation::ScenarioResult;
use crate::runner::BatchOutcome;

/// One CSV output row per segment
#[derive(Debug, Serialize)]
struct SegmentCsvRow<'a> {
    #[serde(rename = "Scenario")]
    scenario: &'a str,
    #[serde(rename = "Segment")]
    segment: usize,
    #[serde(rename = "AnnualRatePct")]
    annual_rate_pct: String,
    #[serde(rename = "MaturityMonths")]
    maturity_periods: u32,
    #[serde(rename = "FixedTermMonths")]
    fixed_term_periods: u32,
    #[serde(rename = "OpeningBalance")]
    opening_balance: String,
    #[serde(rename = "Payment")]
    payment: String,
    #[serde(rename = "Interest")]
    interest: String,
    #[serde(rename = "Remaining")]
    remaining: String,
    #[serde(rename = "TotalInterest")]
    total_interest: String,
}

#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    scenario: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a ScenarioResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn currency(value: f64) -> String {
    format!("{:.0}", value)
}

fn percent(rate: f64) -> String {
    format!("{:.2}", rate * 100.0)
}

/// Human-readable table for each scenario, in batch order
pub fn write_table<W: Write>(out: &mut W, outcomes: &[BatchOutcome]) -> io::Result<()> {
    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => write_scenario_table(out, result)?,
            Err(e) => {
                writeln!(out, "{}", outcome.scenario)?;
                writeln!(out, "  FAILED: {}", e)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_scenario_table<W: Write>(out: &mut W, result: &ScenarioResult) -> io::Result<()> {
    writeln!(out, "{} (principal {}, {} rates)", result.name, currency(result.principal), result.rate_conversion)?;
    writeln!(
        out,
        "{:>4} {:>7} {:>6} {:>6} {:>12} {:>10} {:>12} {:>12}",
        "Seg", "Rate%", "Years", "Fixed", "Opening", "Payment", "Interest", "Remaining"
    )?;
    writeln!(out, "{}", "-".repeat(76))?;

    for seg in &result.segments {
        writeln!(
            out,
            "{:>4} {:>7} {:>6} {:>6} {:>12} {:>10} {:>12} {:>12}",
            seg.segment,
            percent(seg.annual_rate),
            seg.maturity_years,
            seg.fixed_term_years,
            currency(seg.opening_balance),
            currency(seg.payment),
            currency(seg.interest_paid),
            currency(seg.remaining_balance),
        )?;
    }

    writeln!(
        out,
        "  Total interest: {}  Total cost: {}",
        currency(result.total_interest),
        currency(result.total_cost())
    )?;
    if result.residual_warning {
        writeln!(out, "  WARNING: final balance {:.2} did not reach zero", result.final_balance)?;
    }
    Ok(())
}

/// CSV rows for every segment of every successful scenario
pub fn write_csv<W: Write>(out: W, outcomes: &[BatchOutcome]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    for result in outcomes.iter().filter_map(|o| o.result.as_ref().ok()) {
        for seg in &result.segments {
            writer.serialize(SegmentCsvRow {
                scenario: &result.name,
                segment: seg.segment,
                annual_rate_pct: percent(seg.annual_rate),
                maturity_periods: seg.maturity_periods,
                fixed_term_periods: seg.fixed_term_periods,
                opening_balance: currency(seg.opening_balance),
                payment: currency(seg.payment),
                interest: currency(seg.interest_paid),
                remaining: currency(seg.remaining_balance),
                total_interest: currency(result.total_interest),
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Full-precision JSON array; failed scenarios carry an `error` field
pub fn write_json<W: Write>(out: W, outcomes: &[BatchOutcome]) -> Result<()> {
    let entries: Vec<JsonEntry> = outcomes
        .iter()
        .map(|outcome| JsonEntry {
            scenario: &outcome.scenario,
            result: outcome.result.as_ref().ok(),
            error: outcome.result.as_ref().err().map(|e| e.to_string()),
        })
        .collect();

    serde_json::to_writer_pretty(out, &entries)?;
    Ok(())
}
