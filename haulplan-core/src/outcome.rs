//! Aggregation of a selection into a [`PlanResult`].

use std::collections::BTreeMap;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ConstraintKind, Fixed, Job, ProfitSheet, Selection, SelectionProblem, SolveStatus};

/// Run metadata for reporting and benchmarking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent in the selector.
    pub solve_time: Duration,
    /// Search nodes visited by the selector.
    pub nodes_explored: u64,
    /// Search nodes pruned by the selector.
    pub nodes_pruned: u64,
    /// Jobs handed to the selector after the profit floor.
    pub jobs_considered: usize,
    /// Jobs removed by the profit floor.
    pub jobs_filtered: usize,
}

/// Outcome of one planning run.
///
/// Totals are summed from the fixed-point quantities the selector worked
/// with, so repeated runs report identical totals even when ties pick a
/// different subset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanResult {
    /// Outcome classification.
    pub status: SolveStatus,
    /// Summed profit of the chosen jobs.
    pub total_profit: f64,
    /// Summed hours of the chosen jobs.
    pub total_hours: f64,
    /// Summed pallets of the chosen jobs.
    pub total_pallets: f64,
    /// Ids of the chosen jobs in input order.
    pub chosen_ids: Vec<String>,
    /// Profit of every input job, chosen or not.
    pub profits: BTreeMap<String, f64>,
    /// Run metadata.
    pub diagnostics: Diagnostics,
}

impl PlanResult {
    /// The chosen jobs, in input order.
    #[must_use]
    pub fn chosen_jobs<'a>(&self, jobs: &'a [Job]) -> Vec<&'a Job> {
        jobs.iter().filter(|job| self.is_chosen(&job.id)).collect()
    }

    /// Whether the job with `id` was chosen.
    #[must_use]
    pub fn is_chosen(&self, id: &str) -> bool {
        self.chosen_ids.iter().any(|chosen| chosen == id)
    }

    /// Profit computed for the job with `id`.
    #[must_use]
    pub fn profit_of(&self, id: &str) -> Option<f64> {
        self.profits.get(id).copied()
    }
}

/// Aggregate a selection over the problem built from `jobs[eligible]`.
///
/// Performs no decision logic: it maps selected items back to job ids and
/// sums their profit, hours and pallets.
#[must_use]
pub fn assemble(
    jobs: &[Job],
    profits: &ProfitSheet,
    eligible: &[usize],
    problem: &SelectionProblem,
    selection: &Selection,
    diagnostics: Diagnostics,
) -> PlanResult {
    let mut job_indices: Vec<usize> = selection
        .chosen
        .iter()
        .filter_map(|&item| eligible.get(item).copied())
        .collect();
    job_indices.sort_unstable();

    let chosen_ids = job_indices
        .iter()
        .filter_map(|&index| jobs.get(index))
        .map(|job| job.id.clone())
        .collect();

    let total_of = |kind: ConstraintKind| {
        problem
            .constraint(kind)
            .map_or(Fixed::ZERO, |constraint| constraint.load(&selection.chosen))
    };

    PlanResult {
        status: selection.status,
        total_profit: problem.objective(&selection.chosen).to_f64(),
        total_hours: total_of(ConstraintKind::Hours).to_f64(),
        total_pallets: total_of(ConstraintKind::Pallets).to_f64(),
        chosen_ids,
        profits: profits.by_id(jobs),
        diagnostics,
    }
}
