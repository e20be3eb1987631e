//! Test-only utilities for `haulplan-solver-bnb`.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use haulplan_core::{Constraint, ConstraintKind, Fixed, SelectionProblem};

const KINDS: [ConstraintKind; 4] = [
    ConstraintKind::Hours,
    ConstraintKind::Pallets,
    ConstraintKind::DeadheadMiles,
    ConstraintKind::TotalMiles,
];

/// Build a problem from raw micro-unit values.
///
/// Each row is `(coefficients, bound)`; rows are assigned the constraint
/// kinds hours, pallets, deadhead miles and total miles in turn.
///
/// # Panics
///
/// Panics if a row's coefficient count differs from the profit count or a
/// coefficient is negative.
///
/// # Examples
/// ```rust
/// use haulplan_solver_bnb::test_support::knapsack;
///
/// let problem = knapsack(&[5, 7], &[(&[2, 3], 4)]);
/// assert_eq!(problem.len(), 2);
/// assert!(!problem.is_feasible(&[0, 1]));
/// ```
#[must_use]
pub fn knapsack(profits: &[i64], rows: &[(&[i64], i64)]) -> SelectionProblem {
    let constraints = rows
        .iter()
        .zip(KINDS.iter().cycle())
        .map(|((coefficients, bound), kind)| Constraint {
            kind: *kind,
            coefficients: coefficients.iter().copied().map(Fixed::from_micros).collect(),
            bound: Fixed::from_micros(*bound),
        })
        .collect();
    let item_profits = profits.iter().copied().map(Fixed::from_micros).collect();
    SelectionProblem::new(item_profits, constraints)
        .unwrap_or_else(|err| panic!("malformed knapsack fixture: {err}"))
}
