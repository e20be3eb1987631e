//! Test-only helpers: an exhaustive reference selector and the five-job
//! fixture used across the workspace's tests.

use crate::{
    CostConfig, Fixed, Job, SearchStats, Selection, SelectionProblem, Selector, SolveStatus,
};

/// Largest problem [`ExhaustiveSelector`] will enumerate.
pub const EXHAUSTIVE_LIMIT: usize = 20;

/// Reference [`Selector`] enumerating all `2^n` subsets.
///
/// Only intended for small instances; problems with more than
/// [`EXHAUSTIVE_LIMIT`] items are answered with the empty selection and
/// [`SolveStatus::OptimalUnconfirmed`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustiveSelector;

impl ExhaustiveSelector {
    /// Best objective value over all feasible subsets, or `None` when the
    /// empty set is infeasible.
    #[must_use]
    pub fn best_value(problem: &SelectionProblem) -> Option<Fixed> {
        let selection = Self.select(problem);
        match selection.status {
            SolveStatus::Infeasible => None,
            _ => Some(problem.objective(&selection.chosen)),
        }
    }
}

impl Selector for ExhaustiveSelector {
    fn select(&self, problem: &SelectionProblem) -> Selection {
        let mut stats = SearchStats::default();
        if problem.has_negative_bound() {
            return Selection::infeasible(stats);
        }
        if problem.len() > EXHAUSTIVE_LIMIT {
            return Selection {
                status: SolveStatus::OptimalUnconfirmed,
                chosen: Vec::new(),
                stats,
            };
        }

        let mut best = (Fixed::ZERO, Vec::new());
        for mask in 0_u32..(1_u32 << problem.len()) {
            stats.nodes_explored = stats.nodes_explored.saturating_add(1);
            let chosen: Vec<usize> = (0..problem.len())
                .filter(|&bit| mask & (1_u32 << bit) != 0)
                .collect();
            if !problem.is_feasible(&chosen) {
                continue;
            }
            let value = problem.objective(&chosen);
            if value > best.0 {
                best = (value, chosen);
            }
        }

        Selection {
            status: SolveStatus::Optimal,
            chosen: best.1,
            stats,
        }
    }
}

/// Construct a job without metadata.
#[must_use]
pub fn job(
    id: &str,
    revenue: f64,
    loaded_miles: f64,
    deadhead_miles: f64,
    hours: f64,
    pallets: f64,
) -> Job {
    Job::new(id, revenue, loaded_miles, deadhead_miles, hours, pallets)
}

/// Five jobs with ids `1` to `5` and no deadhead miles.
///
/// Priced with [`textbook_config`] they earn 541, 408, 661.5, 334.5 and 505.
#[must_use]
pub fn textbook_jobs() -> Vec<Job> {
    vec![
        job("1", 700.0, 120.0, 0.0, 3.0, 2.0),
        job("2", 500.0, 60.0, 0.0, 2.0, 1.0),
        job("3", 900.0, 180.0, 0.0, 4.5, 3.0),
        job("4", 400.0, 40.0, 0.0, 1.5, 1.0),
        job("5", 650.0, 100.0, 0.0, 3.0, 2.0),
    ]
}

/// Eleven hours, six pallets, 0.7 per mile and 25 per hour.
#[must_use]
pub const fn textbook_config() -> CostConfig {
    CostConfig::new(11.0, 6.0, 0.7, 25.0)
}
