//! Property-based tests for the branch-and-bound selector.
//!
//! These tests use `proptest` to assert invariants that must hold for every
//! well-formed selection problem, complementing the golden plan regression
//! tests and BDD behavioural tests.
//!
//! # Invariants tested
//!
//! - **Optimality:** The objective matches exhaustive enumeration.
//! - **Feasibility:** Every selection satisfies every constraint.
//! - **Infeasibility:** A negative bound yields the empty, infeasible result.
//! - **Floor monotonicity:** Removing items never raises the optimum.
//! - **Determinism:** Repeated and parallel runs agree on the objective.

mod proptest_support;

use haulplan_core::test_support::ExhaustiveSelector;
use haulplan_core::{Selector, SolveStatus};
use haulplan_solver_bnb::{BnbConfig, BranchAndBoundSelector};
use proptest::prelude::*;

use proptest_support::problem_strategy;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn objective_matches_exhaustive_search(raw in problem_strategy(14, false)) {
        let problem = raw.build();
        let selection = BranchAndBoundSelector::new().select(&problem);
        prop_assert_eq!(selection.status, SolveStatus::Optimal);
        prop_assert_eq!(
            Some(problem.objective(&selection.chosen)),
            ExhaustiveSelector::best_value(&problem)
        );
    }

    #[test]
    fn selection_respects_every_constraint(raw in problem_strategy(24, true)) {
        let problem = raw.build();
        let selection = BranchAndBoundSelector::new().select(&problem);
        prop_assert!(problem.is_feasible(&selection.chosen) || selection.chosen.is_empty());
        prop_assert!(selection.chosen.is_sorted_by(|lhs, rhs| lhs < rhs));
        prop_assert!(selection.chosen.iter().all(|&item| item < problem.len()));
    }

    #[test]
    fn negative_bounds_are_infeasible(raw in problem_strategy(10, true)) {
        let problem = raw.build();
        let selection = BranchAndBoundSelector::new().select(&problem);
        if problem.has_negative_bound() {
            prop_assert_eq!(selection.status, SolveStatus::Infeasible);
            prop_assert!(selection.chosen.is_empty());
        } else {
            prop_assert_ne!(selection.status, SolveStatus::Infeasible);
        }
    }

    #[test]
    fn raising_the_floor_never_raises_the_optimum(
        raw in problem_strategy(12, false),
        floor in 0_i64..200,
    ) {
        let full = raw.build();
        let filtered = raw.above_floor(floor).build();
        let selector = BranchAndBoundSelector::new();
        let full_value = full.objective(&selector.select(&full).chosen);
        let filtered_value = filtered.objective(&selector.select(&filtered).chosen);
        prop_assert!(filtered_value <= full_value);
    }

    #[test]
    fn runs_are_deterministic(raw in problem_strategy(20, false), depth in 1_u8..5) {
        let problem = raw.build();
        let sequential = BranchAndBoundSelector::new();
        let first = sequential.select(&problem);
        let second = sequential.select(&problem);
        prop_assert_eq!(&first.chosen, &second.chosen);

        let parallel = BranchAndBoundSelector::with_config(BnbConfig {
            parallel_depth: depth,
            ..BnbConfig::default()
        })
        .select(&problem);
        prop_assert_eq!(
            problem.objective(&parallel.chosen),
            problem.objective(&first.chosen)
        );
    }
}
