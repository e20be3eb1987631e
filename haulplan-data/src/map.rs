//! Map markers for chosen jobs.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use haulplan_core::{Job, PlanResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which end of a job a marker represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    /// Where the load is collected.
    Pickup,
    /// Where the load is delivered.
    Dropoff,
}

/// One marker in WGS84 degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// Id of the job the marker belongs to.
    pub job_id: String,
    /// Pickup or dropoff.
    pub kind: PointKind,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// Errors returned when saving map points.
#[derive(Debug, Error)]
pub enum MapError {
    /// The output file or its directory could not be created.
    #[error("failed to create map file {path}")]
    Create {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
        /// Path that could not be created.
        path: Utf8PathBuf,
    },
    /// The points could not be serialised.
    #[error("failed to write map points")]
    Json {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Pickup and dropoff markers of the chosen jobs that carry coordinates.
///
/// Jobs without a location contribute nothing; markers follow input order
/// with a job's pickup before its dropoff.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use haulplan_core::{Diagnostics, Job, JobDetails, PlanResult, SolveStatus};
/// use haulplan_data::{PointKind, map_points};
///
/// let job = Job::new("J1", 700.0, 120.0, 0.0, 3.0, 2.0).with_details(JobDetails {
///     pickup_location: Some(Coord { x: -1.55, y: 53.8 }),
///     ..JobDetails::default()
/// });
/// let result = PlanResult {
///     status: SolveStatus::Optimal,
///     total_profit: 541.0,
///     total_hours: 3.0,
///     total_pallets: 2.0,
///     chosen_ids: vec!["J1".into()],
///     profits: Default::default(),
///     diagnostics: Diagnostics::default(),
/// };
/// let points = map_points(&result, &[job]);
/// assert_eq!(points.len(), 1);
/// assert_eq!(points[0].kind, PointKind::Pickup);
/// assert_eq!(points[0].lat, 53.8);
/// ```
#[must_use]
pub fn map_points(result: &PlanResult, jobs: &[Job]) -> Vec<MapPoint> {
    result
        .chosen_jobs(jobs)
        .into_iter()
        .flat_map(|job| {
            let ends = [
                (PointKind::Pickup, job.details.pickup_location),
                (PointKind::Dropoff, job.details.dropoff_location),
            ];
            ends.into_iter().filter_map(move |(kind, location)| {
                location.map(|coord| MapPoint {
                    job_id: job.id.clone(),
                    kind,
                    lat: coord.y,
                    lon: coord.x,
                })
            })
        })
        .collect()
}

/// Write `points` as a pretty-printed JSON array.
pub fn write_map_points<W: Write>(writer: W, points: &[MapPoint]) -> Result<(), MapError> {
    serde_json::to_writer_pretty(writer, points)?;
    Ok(())
}

/// Save `points` to `path`, creating its parent directory first.
pub fn save_map_points(path: &Utf8Path, points: &[MapPoint]) -> Result<(), MapError> {
    let create_error = |source| MapError::Create {
        source,
        path: path.to_path_buf(),
    };
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(create_error)?;
    }
    let file = File::create(path).map_err(create_error)?;
    let mut writer = BufWriter::new(file);
    write_map_points(&mut writer, points)?;
    writer.flush().map_err(create_error)?;
    log::info!("saved {} map points to {path}", points.len());
    Ok(())
}
