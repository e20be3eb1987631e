//! `BranchAndBoundSelector`, the exact [`Selector`] implementation.

use std::time::{Duration, Instant};

use haulplan_core::{SearchStats, Selection, SelectionProblem, Selector, SolveStatus};
use rayon::prelude::*;

use crate::incumbent::{Budget, Incumbent};
use crate::instance::Instance;
use crate::search::{Prefix, SearchContext, explore, split};

/// Configuration for [`BranchAndBoundSelector`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BnbConfig {
    /// Stop after visiting this many search nodes.
    pub node_limit: Option<u64>,
    /// Stop once this much wall-clock time has passed.
    pub time_limit: Option<Duration>,
    /// Number of leading branching decisions fixed before the remaining
    /// subtrees are explored in parallel. Zero searches on the calling
    /// thread.
    pub parallel_depth: u8,
}

/// Largest accepted [`BnbConfig::parallel_depth`].
pub const MAX_PARALLEL_DEPTH: u8 = 16;

/// Exact 0/1 multi-dimensional knapsack selector.
///
/// Items with non-positive profit, or which exceed some bound on their own,
/// are discarded up front. The rest are searched depth-first, including an
/// item before excluding it, in order of profit per unit of normalised
/// resource use. A node is pruned when the tightest single-constraint
/// fractional bound cannot beat the incumbent, which is seeded by a greedy
/// pass.
///
/// Without limits the result is [`SolveStatus::Optimal`]. When a node or time
/// limit interrupts the search, the best selection found so far is returned
/// as [`SolveStatus::OptimalUnconfirmed`].
///
/// # Examples
/// ```
/// use haulplan_core::{Constraint, ConstraintKind, Fixed, SelectionProblem, Selector, SolveStatus};
/// use haulplan_solver_bnb::BranchAndBoundSelector;
///
/// let pallets = Constraint {
///     kind: ConstraintKind::Pallets,
///     coefficients: [3, 2, 2].map(Fixed::from_micros).to_vec(),
///     bound: Fixed::from_micros(4),
/// };
/// let profits = [6, 5, 5].map(Fixed::from_micros).to_vec();
/// let problem = SelectionProblem::new(profits, vec![pallets]).unwrap();
///
/// let selection = BranchAndBoundSelector::new().select(&problem);
/// assert_eq!(selection.status, SolveStatus::Optimal);
/// assert_eq!(selection.chosen, [1, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BranchAndBoundSelector {
    config: BnbConfig,
}

impl BranchAndBoundSelector {
    /// Construct a selector without limits that searches on one thread.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a selector with explicit configuration.
    #[must_use]
    pub const fn with_config(config: BnbConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &BnbConfig {
        &self.config
    }

    fn run(&self, instance: &Instance, context: &SearchContext<'_>) -> SearchStats {
        let depth = usize::from(self.config.parallel_depth.min(MAX_PARALLEL_DEPTH));
        if depth == 0 {
            return explore(context, Prefix::root(instance));
        }
        let prefixes = split(instance, depth);
        log::debug!(
            "exploring {} subtrees below depth {depth} in parallel",
            prefixes.len()
        );
        prefixes
            .into_par_iter()
            .map(|prefix| explore(context, prefix))
            .reduce(SearchStats::default, merge_stats)
    }
}

impl Selector for BranchAndBoundSelector {
    fn select(&self, problem: &SelectionProblem) -> Selection {
        let started_at = Instant::now();
        let Some(instance) = Instance::prepare(problem) else {
            log::debug!("a capacity bound is negative; no selection is feasible");
            return Selection::infeasible(SearchStats::default());
        };
        log::trace!(
            "branching over {} of {} items",
            instance.len(),
            problem.len()
        );

        let incumbent = Incumbent::empty();
        let (greedy_value, greedy_taken) = instance.greedy();
        incumbent.offer(greedy_value, || instance.chosen_items(&greedy_taken));

        let deadline = self
            .config
            .time_limit
            .and_then(|limit| started_at.checked_add(limit));
        let budget = Budget::new(self.config.node_limit, deadline);
        let context = SearchContext {
            instance: &instance,
            incumbent: &incumbent,
            budget: &budget,
        };
        let stats = self.run(&instance, &context);

        let status = if budget.exhausted() {
            log::warn!(
                "search stopped after {} nodes; returning the best selection found",
                stats.nodes_explored
            );
            SolveStatus::OptimalUnconfirmed
        } else {
            SolveStatus::Optimal
        };
        Selection {
            status,
            chosen: incumbent.into_chosen(),
            stats,
        }
    }
}

const fn merge_stats(lhs: SearchStats, rhs: SearchStats) -> SearchStats {
    SearchStats {
        nodes_explored: lhs.nodes_explored.saturating_add(rhs.nodes_explored),
        nodes_pruned: lhs.nodes_pruned.saturating_add(rhs.nodes_pruned),
    }
}
