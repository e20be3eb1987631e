//! Terminal report of a planning run.

use std::io::Write;

use clap::ValueEnum;
use haulplan_core::{Job, PlanResult};
use haulplan_data::PlanSummary;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// How the plan is printed to standard output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Pretty-printed JSON of the plan result.
    Json,
}

pub(crate) fn write_report(
    writer: &mut dyn Write,
    format: OutputFormat,
    result: &PlanResult,
    jobs: &[Job],
) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Text => render_text(result, jobs),
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).map_err(CliError::SerialiseReport)?
        }
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

fn render_text(result: &PlanResult, jobs: &[Job]) -> String {
    let summary = PlanSummary::from_plan(result, jobs);
    let mut lines = vec![
        format!("Status: {}", result.status),
        format!("Total profit: {:.2}", result.total_profit),
        format!("Total hours: {}", result.total_hours),
        format!("Total pallets: {}", result.total_pallets),
        format!("Total miles: {:.2}", summary.total_miles),
        format!("Profit per hour: {:.2}", summary.profit_per_hour),
        format!("Profit per mile: {:.2}", summary.profit_per_mile),
        String::new(),
    ];

    let chosen = result.chosen_jobs(jobs);
    if chosen.is_empty() {
        lines.push("No jobs chosen.".to_owned());
        return lines.join("\n");
    }
    lines.push("Chosen jobs:".to_owned());
    lines.extend(chosen.into_iter().map(|job| {
        let details = &job.details;
        format!(
            "  {} | {} -> {} | date {} | hours {} | pallets {} | profit {:.2}",
            job.id,
            details.pickup_city.as_deref().unwrap_or("?"),
            details.dropoff_city.as_deref().unwrap_or("?"),
            details.date.as_deref().unwrap_or("-"),
            job.hours,
            job.pallets,
            result.profit_of(&job.id).unwrap_or_default(),
        )
    }));
    lines.join("\n")
}
