//! Command-line interface for planning a truck's daily loads.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;
mod report;

pub use error::CliError;
pub use report::OutputFormat;

const ARG_FILE: &str = "file";
const ARG_HOURS: &str = "hours";
const ARG_PALLETS: &str = "pallets";
const ARG_FUEL_COST: &str = "fuel-cost";
const ARG_DRIVER_COST: &str = "driver-cost";
const ARG_MAX_DEADHEAD: &str = "max-deadhead";
const ARG_MAX_TOTAL_MILES: &str = "max-total-miles";
const ARG_MIN_PROFIT_PER_JOB: &str = "min-profit-per-job";
const ARG_INCLUDE_PICKUP: &str = "include-pickup";
const ARG_EXCLUDE_DROPOFF: &str = "exclude-dropoff";
const ARG_EXCLUDE_WEEKENDS: &str = "exclude-weekends";
const ARG_OUTPUT: &str = "output";
const ARG_MAP_OUTPUT: &str = "map-output";
const ARG_FORMAT: &str = "format";
const ARG_NODE_LIMIT: &str = "node-limit";
const ARG_TIME_LIMIT: &str = "time-limit";
const ARG_PARALLEL_DEPTH: &str = "parallel-depth";
const ENV_FILE: &str = "HAULPLAN_CMDS_PLAN_FILE";

/// Run the haulplan CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "haulplan",
    about = "Pick the most profitable set of jobs for one truck and one day",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Select jobs from a CSV file and export the plan.
    Plan(plan::PlanArgs),
}

#[cfg(test)]
mod tests;
