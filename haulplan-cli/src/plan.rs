//! Plan command implementation for the haulplan CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use haulplan_core::{CostConfig, PlanResult, plan_jobs};
use haulplan_data::{JobFilter, load_jobs, map_points, save_map_points, save_plan};
use haulplan_solver_bnb::{BnbConfig, BranchAndBoundSelector};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::report::{OutputFormat, write_report};
use crate::{
    ARG_DRIVER_COST, ARG_EXCLUDE_DROPOFF, ARG_EXCLUDE_WEEKENDS, ARG_FILE, ARG_FORMAT,
    ARG_FUEL_COST, ARG_HOURS, ARG_INCLUDE_PICKUP, ARG_MAP_OUTPUT, ARG_MAX_DEADHEAD,
    ARG_MAX_TOTAL_MILES, ARG_MIN_PROFIT_PER_JOB, ARG_NODE_LIMIT, ARG_OUTPUT, ARG_PALLETS,
    ARG_PARALLEL_DEPTH, ARG_TIME_LIMIT, CliError, ENV_FILE,
};

pub(crate) const DEFAULT_MAX_HOURS: f64 = 11.0;
pub(crate) const DEFAULT_MAX_PALLETS: f64 = 6.0;
pub(crate) const DEFAULT_FUEL_COST: f64 = 0.7;
pub(crate) const DEFAULT_DRIVER_COST: f64 = 25.0;
pub(crate) const DEFAULT_OUTPUT: &str = "output/optimized_plan.csv";

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Select the most profitable set of jobs one truck can haul \
                 within its driving hours, pallet capacity and optional \
                 mileage limits. Settings can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Plan the most profitable load set"
)]
#[ortho_config(prefix = "HAULPLAN")]
pub(crate) struct PlanArgs {
    /// CSV file of candidate jobs.
    #[arg(long = ARG_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) file: Option<Utf8PathBuf>,
    /// Driving hours available (default 11).
    #[arg(long = ARG_HOURS, value_name = "hours", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) max_hours: Option<f64>,
    /// Pallet capacity (default 6).
    #[arg(long = ARG_PALLETS, value_name = "pallets", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) max_pallets: Option<f64>,
    /// Fuel cost per mile (default 0.7).
    #[arg(long = ARG_FUEL_COST, value_name = "cost")]
    #[serde(default)]
    pub(crate) fuel_cost_per_mile: Option<f64>,
    /// Driver cost per hour (default 25).
    #[arg(long = ARG_DRIVER_COST, value_name = "cost")]
    #[serde(default)]
    pub(crate) driver_cost_per_hour: Option<f64>,
    /// Limit on summed deadhead miles.
    #[arg(long = ARG_MAX_DEADHEAD, value_name = "miles", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) max_deadhead_miles: Option<f64>,
    /// Limit on summed loaded plus deadhead miles.
    #[arg(long = ARG_MAX_TOTAL_MILES, value_name = "miles", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) max_total_miles: Option<f64>,
    /// Ignore jobs whose own profit is below this value.
    #[arg(long = ARG_MIN_PROFIT_PER_JOB, value_name = "profit", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) min_profit_per_job: Option<f64>,
    /// Keep only jobs picked up in these cities (comma separated).
    #[arg(long = ARG_INCLUDE_PICKUP, value_name = "city", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) include_pickup: Option<Vec<String>>,
    /// Drop jobs delivered to these cities (comma separated).
    #[arg(long = ARG_EXCLUDE_DROPOFF, value_name = "city", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) exclude_dropoff: Option<Vec<String>>,
    /// Drop jobs dated on a weekend, or without a readable date.
    #[arg(
        long = ARG_EXCLUDE_WEEKENDS,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) exclude_weekends: Option<bool>,
    /// Where to write the plan CSV (default `output/optimized_plan.csv`).
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Also write pickup and dropoff points of the plan as JSON.
    #[arg(long = ARG_MAP_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) map_output: Option<Utf8PathBuf>,
    /// Report format printed to standard output.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Stop the search after this many nodes.
    #[arg(long = ARG_NODE_LIMIT, value_name = "nodes")]
    #[serde(default)]
    pub(crate) node_limit: Option<u64>,
    /// Stop the search after this many seconds.
    #[arg(long = ARG_TIME_LIMIT, value_name = "seconds")]
    #[serde(default)]
    pub(crate) time_limit_secs: Option<f64>,
    /// Split the search across workers below this many decisions.
    #[arg(long = ARG_PARALLEL_DEPTH, value_name = "depth")]
    #[serde(default)]
    pub(crate) parallel_depth: Option<u8>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// CSV file of candidate jobs.
    pub(crate) file: Utf8PathBuf,
    /// Budgets and cost rates.
    pub(crate) costs: CostConfig,
    /// Pre-planning filters.
    pub(crate) filter: JobFilter,
    /// Plan CSV destination.
    pub(crate) output: Utf8PathBuf,
    /// Optional map points destination.
    pub(crate) map_output: Option<Utf8PathBuf>,
    /// Report format.
    pub(crate) format: OutputFormat,
    /// Search limits.
    pub(crate) solver: BnbConfig,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.file, ARG_FILE)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let file = args.file.ok_or(CliError::MissingArgument {
            field: ARG_FILE,
            env: ENV_FILE,
        })?;

        let costs = CostConfig {
            max_hours: args.max_hours.unwrap_or(DEFAULT_MAX_HOURS),
            max_pallets: args.max_pallets.unwrap_or(DEFAULT_MAX_PALLETS),
            fuel_cost_per_mile: args.fuel_cost_per_mile.unwrap_or(DEFAULT_FUEL_COST),
            driver_cost_per_hour: args.driver_cost_per_hour.unwrap_or(DEFAULT_DRIVER_COST),
            max_deadhead_miles: args.max_deadhead_miles,
            max_total_miles: args.max_total_miles,
            min_profit_per_job: args.min_profit_per_job,
        };

        let filter = JobFilter {
            include_pickup: args.include_pickup.unwrap_or_default(),
            exclude_dropoff: args.exclude_dropoff.unwrap_or_default(),
            exclude_weekends: args.exclude_weekends.unwrap_or(false),
        };

        let time_limit = args
            .time_limit_secs
            .map(|secs| {
                Duration::try_from_secs_f64(secs).map_err(|_| CliError::InvalidArgument {
                    field: ARG_TIME_LIMIT,
                    value: secs.to_string(),
                    reason: "must be a finite, non-negative number of seconds",
                })
            })
            .transpose()?;

        Ok(Self {
            file,
            costs,
            filter,
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT)),
            map_output: args.map_output,
            format: args.format.unwrap_or_default(),
            solver: BnbConfig {
                node_limit: args.node_limit,
                time_limit,
                parallel_depth: args.parallel_depth.unwrap_or(0),
            },
        })
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(super) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    execute_plan(&config, writer).map(|_| ())
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Load, filter and plan the jobs, then write every requested output.
pub(super) fn execute_plan(
    config: &PlanConfig,
    writer: &mut dyn Write,
) -> Result<PlanResult, CliError> {
    let loaded = load_jobs(&config.file)?;
    let jobs = config.filter.apply(loaded);
    log::info!("planning {} jobs from {}", jobs.len(), config.file);

    let selector = BranchAndBoundSelector::with_config(config.solver.clone());
    let result = plan_jobs(&jobs, &config.costs, &selector)?;

    save_plan(&config.output, &result, &jobs)?;
    if let Some(path) = &config.map_output {
        save_map_points(path, &map_points(&result, &jobs))?;
    }
    write_report(writer, config.format, &result, &jobs)?;
    Ok(result)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
