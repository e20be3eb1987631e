//! CSV export of a plan.

use std::fs::{self, File};
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use haulplan_core::{Job, PlanResult};
use thiserror::Error;

use crate::PlanSummary;

/// Column names of the plan CSV, in order.
pub const PLAN_HEADER: [&str; 11] = [
    "id",
    "revenue",
    "loaded_miles",
    "deadhead_miles",
    "hours",
    "pallets",
    "pickup_city",
    "dropoff_city",
    "date",
    "notes",
    "profit",
];

/// Errors returned when exporting a plan.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}")]
    CreateDir {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
        /// Directory that could not be created.
        path: Utf8PathBuf,
    },
    /// The output file could not be created.
    #[error("failed to create plan file {path}")]
    Create {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
        /// File that could not be created.
        path: Utf8PathBuf,
    },
    /// A record could not be written.
    #[error("failed to write plan record")]
    Write {
        /// Underlying CSV error.
        #[from]
        source: csv::Error,
    },
    /// Buffered output could not be flushed.
    #[error("failed to flush plan output")]
    Flush {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Write the chosen jobs of `result` as CSV.
///
/// Rows follow [`PLAN_HEADER`]; the profit column is rounded to two
/// decimals. A `TOTAL` row carries hours, pallets and profit in their
/// columns, and a `SUMMARY` row lists the [`PlanSummary`] figures as
/// name/value pairs.
///
/// # Examples
/// ```
/// use haulplan_core::{Diagnostics, Job, PlanResult, SolveStatus};
/// use haulplan_data::write_plan;
///
/// let jobs = [Job::new("J1", 700.0, 120.0, 0.0, 3.0, 2.0)];
/// let result = PlanResult {
///     status: SolveStatus::Optimal,
///     total_profit: 541.0,
///     total_hours: 3.0,
///     total_pallets: 2.0,
///     chosen_ids: vec!["J1".into()],
///     profits: [("J1".to_owned(), 541.0)].into_iter().collect(),
///     diagnostics: Diagnostics::default(),
/// };
/// let mut out = Vec::new();
/// write_plan(&mut out, &result, &jobs).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("J1,700,120,0,3,2,,,,,541.00"));
/// assert!(text.contains("TOTAL,,,,3,2,,,,,541.00"));
/// ```
pub fn write_plan<W: Write>(
    writer: W,
    result: &PlanResult,
    jobs: &[Job],
) -> Result<(), ExportError> {
    let mut records = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    records.write_record(PLAN_HEADER)?;

    let chosen = result.chosen_jobs(jobs);
    for job in &chosen {
        let profit = result.profit_of(&job.id).unwrap_or_default();
        let details = &job.details;
        records.write_record([
            job.id.clone(),
            job.revenue.to_string(),
            job.loaded_miles.to_string(),
            job.deadhead_miles.to_string(),
            job.hours.to_string(),
            job.pallets.to_string(),
            details.pickup_city.clone().unwrap_or_default(),
            details.dropoff_city.clone().unwrap_or_default(),
            details.date.clone().unwrap_or_default(),
            details.notes.clone().unwrap_or_default(),
            money(profit),
        ])?;
    }

    records.write_record([
        "TOTAL".to_owned(),
        String::new(),
        String::new(),
        String::new(),
        result.total_hours.to_string(),
        result.total_pallets.to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        money(result.total_profit),
    ])?;

    let summary = PlanSummary::from_plan(result, jobs);
    records.write_record([
        "SUMMARY".to_owned(),
        String::new(),
        "total_miles".to_owned(),
        money(summary.total_miles),
        "profit_per_hour".to_owned(),
        money(summary.profit_per_hour),
        "profit_per_mile".to_owned(),
        money(summary.profit_per_mile),
    ])?;

    records.flush().map_err(|source| ExportError::Flush { source })?;
    log::debug!("wrote {} plan rows", chosen.len());
    Ok(())
}

/// Write the plan CSV to `path`, creating its parent directory first.
pub fn save_plan(path: &Utf8Path, result: &PlanResult, jobs: &[Job]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            source,
            path: parent.to_path_buf(),
        })?;
    }
    let file = File::create(path).map_err(|source| ExportError::Create {
        source,
        path: path.to_path_buf(),
    })?;
    write_plan(io::BufWriter::new(file), result, jobs)?;
    log::info!("saved plan to {path}");
    Ok(())
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}
