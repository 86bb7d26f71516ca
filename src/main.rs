//! Mortgage Calculator CLI
//!
//! Evaluates mortgage scenarios and prints the per-segment breakdown and total cost.
//! Exit codes: 0 on success, 1 when the scenario file cannot be loaded,
//! 2 when any scenario failed to evaluate.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use mortgage_calculator::{
    default_scenarios, report, scenario::load_scenarios, EvaluatorConfig, RateConversion,
    ScenarioRunner,
};

/// Compare fixed and stepped-rate mortgage scenarios
#[derive(Parser)]
#[command(name = "mortgage_calculator", version, about)]
struct Cli {
    /// Scenario file (.csv or .json); the built-in table is used when omitted
    #[arg(long, short)]
    scenarios: Option<PathBuf>,

    /// Annual-to-monthly rate conversion (compounded or flat)
    #[arg(long)]
    rate_conversion: Option<RateConversion>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Include the month-by-month schedule (JSON output only)
    #[arg(long)]
    schedule: bool,

    /// Re-solve every payment with the iterative solver and log disagreements
    #[arg(long)]
    cross_check: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let scenarios = match &cli.scenarios {
        Some(path) => load_scenarios(path)
            .with_context(|| format!("failed to load scenarios from {}", path.display()))?,
        None => default_scenarios(),
    };

    let mut config = EvaluatorConfig::from_env();
    if let Some(conversion) = cli.rate_conversion {
        config.rate_conversion = conversion;
    }
    if cli.schedule {
        config.detailed_output = true;
    }
    if cli.cross_check {
        config.cross_check = Some(Default::default());
    }

    log::info!(
        "evaluating {} scenarios with {} rate conversion",
        scenarios.len(),
        config.rate_conversion
    );

    let runner = ScenarioRunner::new(config);
    let outcomes = runner.run_batch(&scenarios);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.output {
        OutputFormat::Table => {
            report::write_table(&mut out, &outcomes)?;
            if let Some(best) = ScenarioRunner::cheapest(&outcomes) {
                writeln!(out, "Cheapest: {} (total interest {:.0})", best.name, best.total_interest)?;
            }
        }
        OutputFormat::Json => {
            report::write_json(&mut out, &outcomes)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => report::write_csv(&mut out, &outcomes)?,
    }
    out.flush()?;

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        eprintln!("{} of {} scenarios failed", failed, outcomes.len());
        return Ok(2);
    }
    Ok(0)
}
