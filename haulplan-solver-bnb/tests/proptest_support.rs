//! Proptest strategies for selector property-based tests.
//!
//! Problems are generated directly in micro-units so that every generated
//! instance is well formed: each constraint carries one coefficient per item.
//! Profits may be zero or negative and bounds may be negative, so the
//! strategies also reach the degenerate corners of the model.

use haulplan_core::{Constraint, ConstraintKind, Fixed, SelectionProblem};
use proptest::prelude::*;

/// Kinds assigned to generated constraints, in order.
const KINDS: [ConstraintKind; 4] = [
    ConstraintKind::Hours,
    ConstraintKind::Pallets,
    ConstraintKind::DeadheadMiles,
    ConstraintKind::TotalMiles,
];

/// Raw problem data: per-item profits and `(coefficients, bound)` rows.
#[derive(Debug, Clone)]
pub struct RawProblem {
    /// Per-item profits in micro-units.
    pub profits: Vec<i64>,
    /// Constraint rows in micro-units.
    pub rows: Vec<(Vec<i64>, i64)>,
}

impl RawProblem {
    /// Build the selection problem described by this data.
    ///
    /// # Panics
    ///
    /// Panics if a row's length differs from the profit count, which the
    /// strategies never produce.
    #[must_use]
    pub fn build(&self) -> SelectionProblem {
        let constraints = self
            .rows
            .iter()
            .zip(KINDS)
            .map(|((coefficients, bound), kind)| Constraint {
                kind,
                coefficients: coefficients.iter().copied().map(Fixed::from_micros).collect(),
                bound: Fixed::from_micros(*bound),
            })
            .collect();
        let profits = self.profits.iter().copied().map(Fixed::from_micros).collect();
        SelectionProblem::new(profits, constraints)
            .unwrap_or_else(|err| panic!("strategy produced a malformed problem: {err}"))
    }

    /// The same problem without the items whose profit is below `floor`.
    #[must_use]
    pub fn above_floor(&self, floor: i64) -> Self {
        let keep: Vec<bool> = self.profits.iter().map(|&profit| profit >= floor).collect();
        let retain = |values: &[i64]| -> Vec<i64> {
            values
                .iter()
                .zip(&keep)
                .filter_map(|(&value, &kept)| kept.then_some(value))
                .collect()
        };
        Self {
            profits: retain(&self.profits),
            rows: self
                .rows
                .iter()
                .map(|(coefficients, bound)| (retain(coefficients), *bound))
                .collect(),
        }
    }
}

/// Strategy for problems with up to `max_items` items and one to four
/// constraints.
///
/// Bounds are non-negative unless `allow_negative_bounds` is set.
pub fn problem_strategy(
    max_items: usize,
    allow_negative_bounds: bool,
) -> impl Strategy<Value = RawProblem> {
    let lowest_bound = if allow_negative_bounds { -10_i64 } else { 0_i64 };
    (0..=max_items, 1..=KINDS.len()).prop_flat_map(move |(items, constraints)| {
        let profits = proptest::collection::vec(-20_i64..200, items);
        let row = (
            proptest::collection::vec(0_i64..60, items),
            lowest_bound..150_i64,
        );
        let rows = proptest::collection::vec(row, constraints);
        (profits, rows).prop_map(|(profits, rows)| RawProblem { profits, rows })
    })
}
