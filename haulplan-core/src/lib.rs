//! Core domain types for the haulplan load selector.
//!
//! The crate models candidate transport jobs, the cost configuration used to
//! price them, and the pipeline that turns both into a [`PlanResult`]:
//!
//! 1. [`ProfitSheet`] prices every job once per run.
//! 2. [`eligible_indices`] applies the optional per-job profit floor.
//! 3. [`build_constraints`] assembles the capacity constraints.
//! 4. A [`Selector`] picks the profit-maximising subset.
//! 5. [`assemble`] aggregates the chosen jobs into totals.
//!
//! [`plan_jobs`] runs all five steps. Every quantity handed to a selector is
//! quantised once to [`Fixed`] micro-units so that selectors can compare sums
//! exactly.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod constraint;
mod eligibility;
mod error;
mod job;
mod outcome;
mod plan;
mod profit;
mod quantity;
mod selector;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use config::CostConfig;
pub use constraint::{Constraint, ConstraintKind, build_constraints};
pub use eligibility::eligible_indices;
pub use error::ValidationError;
pub use job::{Job, JobDetails};
pub use outcome::{Diagnostics, PlanResult, assemble};
pub use plan::{plan_jobs, validate_jobs};
pub use profit::{ProfitSheet, job_profit};
pub use quantity::{Fixed, MAX_MAGNITUDE, MICROS_PER_UNIT};
pub use selector::{
    ProblemShapeError, SearchStats, Selection, SelectionProblem, Selector, SolveStatus,
};
