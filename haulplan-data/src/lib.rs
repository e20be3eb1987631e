//! Job data adapters for haulplan.
//!
//! Responsibilities:
//! - Read candidate jobs from CSV and validate them.
//! - Narrow a job set with pickup, dropoff and weekday filters.
//! - Derive plan metrics, write the chosen plan as CSV and extract the
//!   points a map of the plan needs.
//!
//! Boundaries:
//! - Pricing and selection live in `haulplan-core` and the solver crates.
//! - No rendering; map output is plain data.

#![forbid(unsafe_code)]

mod export;
mod filters;
mod ingest;
mod map;
mod summary;

pub use export::{ExportError, PLAN_HEADER, save_plan, write_plan};
pub use filters::{JobFilter, parse_job_date};
pub use ingest::{IngestError, load_jobs, read_jobs};
pub use map::{MapError, MapPoint, PointKind, map_points, save_map_points, write_map_points};
pub use summary::PlanSummary;
