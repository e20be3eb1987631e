//! Facade crate for the haulplan load selector.
//!
//! This crate re-exports the core domain types and exposes the exact solver
//! and the CSV/JSON data adapters behind feature flags.

#![forbid(unsafe_code)]

pub use haulplan_core::{
    Constraint, ConstraintKind, CostConfig, Diagnostics, Fixed, Job, JobDetails, PlanResult,
    ProfitSheet, SearchStats, Selection, SelectionProblem, Selector, SolveStatus, ValidationError,
    job_profit, plan_jobs,
};

#[cfg(feature = "solver-bnb")]
pub use haulplan_solver_bnb::{BnbConfig, BranchAndBoundSelector};

#[cfg(feature = "data")]
pub use haulplan_data::{
    ExportError, IngestError, JobFilter, MapPoint, PlanSummary, load_jobs, map_points, save_plan,
};
