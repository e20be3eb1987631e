//! The selection problem handed to optimisers and the [`Selector`] trait.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Constraint, ConstraintKind, Fixed};

/// Outcome classification of a selection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum SolveStatus {
    /// The selection is proven profit-maximising.
    Optimal,
    /// Not even the empty selection satisfies every constraint.
    Infeasible,
    /// The search stopped early; the selection is feasible but may not be
    /// optimal.
    OptimalUnconfirmed,
}

impl SolveStatus {
    /// Upper-case label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Infeasible => "INFEASIBLE",
            Self::OptimalUnconfirmed => "OPTIMAL_UNCONFIRMED",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constraint that does not fit the items it is built for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemShapeError {
    /// The coefficient count differs from the item count.
    #[error("{kind} constraint has {found} coefficients for {expected} items")]
    CoefficientCount {
        /// The malformed constraint.
        kind: ConstraintKind,
        /// Number of items in the problem.
        expected: usize,
        /// Number of coefficients supplied.
        found: usize,
    },
    /// An item would free capacity instead of consuming it.
    #[error("{kind} constraint has negative coefficient {value} for item {index}")]
    NegativeCoefficient {
        /// The malformed constraint.
        kind: ConstraintKind,
        /// Item the coefficient belongs to.
        index: usize,
        /// Offending coefficient.
        value: Fixed,
    },
}

/// A 0/1 multi-dimensional knapsack instance.
///
/// Item `i` earns `profits[i]` and consumes `constraint.coefficients[i]` of
/// every constraint.
///
/// # Examples
/// ```
/// use haulplan_core::{Constraint, ConstraintKind, Fixed, SelectionProblem};
///
/// let hours = Constraint {
///     kind: ConstraintKind::Hours,
///     coefficients: vec![Fixed::from_micros(2), Fixed::from_micros(3)],
///     bound: Fixed::from_micros(4),
/// };
/// let problem =
///     SelectionProblem::new(vec![Fixed::from_micros(5), Fixed::from_micros(7)], vec![hours])
///         .unwrap();
/// assert!(problem.is_feasible(&[1]));
/// assert!(!problem.is_feasible(&[0, 1]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionProblem {
    profits: Vec<Fixed>,
    constraints: Vec<Constraint>,
}

impl SelectionProblem {
    /// Validate the shape and construct a problem.
    ///
    /// Every constraint needs one non-negative coefficient per item.
    pub fn new(
        profits: Vec<Fixed>,
        constraints: Vec<Constraint>,
    ) -> Result<Self, ProblemShapeError> {
        for constraint in &constraints {
            if constraint.coefficients.len() != profits.len() {
                return Err(ProblemShapeError::CoefficientCount {
                    kind: constraint.kind,
                    expected: profits.len(),
                    found: constraint.coefficients.len(),
                });
            }
            if let Some((index, value)) = constraint
                .coefficients
                .iter()
                .enumerate()
                .find(|(_, value)| value.is_negative())
            {
                return Err(ProblemShapeError::NegativeCoefficient {
                    kind: constraint.kind,
                    index,
                    value: *value,
                });
            }
        }
        Ok(Self {
            profits,
            constraints,
        })
    }

    /// Per-item profits.
    #[must_use]
    pub fn profits(&self) -> &[Fixed] {
        &self.profits
    }

    /// Constraints every selection must satisfy.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.profits.len()
    }

    /// Whether there are no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.profits.is_empty()
    }

    /// Whether some bound is negative, which rules out every selection.
    #[must_use]
    pub fn has_negative_bound(&self) -> bool {
        self.constraints
            .iter()
            .any(|constraint| constraint.bound.is_negative())
    }

    /// Whether the items at `chosen` satisfy every constraint.
    #[must_use]
    pub fn is_feasible(&self, chosen: &[usize]) -> bool {
        self.constraints
            .iter()
            .all(|constraint| constraint.is_satisfied_by(chosen))
    }

    /// Summed profit of the items at `chosen`.
    #[must_use]
    pub fn objective(&self, chosen: &[usize]) -> Fixed {
        chosen
            .iter()
            .filter_map(|&index| self.profits.get(index).copied())
            .sum()
    }

    /// The constraint limiting `kind`, if present.
    #[must_use]
    pub fn constraint(&self, kind: ConstraintKind) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|constraint| constraint.kind == kind)
    }
}

/// Counters describing a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Search nodes visited.
    pub nodes_explored: u64,
    /// Nodes discarded because their bound could not beat the incumbent.
    pub nodes_pruned: u64,
}

/// Result of a [`Selector`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Outcome classification.
    pub status: SolveStatus,
    /// Indices of selected items in ascending order.
    pub chosen: Vec<usize>,
    /// Search counters.
    pub stats: SearchStats,
}

impl Selection {
    /// The empty selection for a problem with no feasible subset.
    #[must_use]
    pub const fn infeasible(stats: SearchStats) -> Self {
        Self {
            status: SolveStatus::Infeasible,
            chosen: Vec::new(),
            stats,
        }
    }
}

/// Choose the subset of items with the greatest total profit that satisfies
/// every constraint.
///
/// Implementations never fail: a problem without any feasible subset yields
/// [`SolveStatus::Infeasible`], and a search cut short by a budget yields
/// [`SolveStatus::OptimalUnconfirmed`] with the best feasible subset found.
/// Selectors must be `Send + Sync` to operate safely across threads.
pub trait Selector: Send + Sync {
    /// Solve `problem`.
    fn select(&self, problem: &SelectionProblem) -> Selection;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hours(coefficients: &[i64], bound: i64) -> Constraint {
        Constraint {
            kind: ConstraintKind::Hours,
            coefficients: coefficients.iter().copied().map(Fixed::from_micros).collect(),
            bound: Fixed::from_micros(bound),
        }
    }

    #[rstest]
    fn mismatched_coefficients_are_rejected() {
        let err = SelectionProblem::new(vec![Fixed::ZERO; 3], vec![hours(&[1, 2], 5)])
            .expect_err("shape mismatch");
        assert_eq!(
            err,
            ProblemShapeError::CoefficientCount {
                kind: ConstraintKind::Hours,
                expected: 3,
                found: 2,
            }
        );
    }

    #[rstest]
    fn negative_coefficients_are_rejected() {
        let profits = [5, 5, 1].into_iter().map(Fixed::from_micros).collect();
        let err = SelectionProblem::new(profits, vec![hours(&[3, -3, 2], 0)])
            .expect_err("negative coefficient");
        assert_eq!(
            err,
            ProblemShapeError::NegativeCoefficient {
                kind: ConstraintKind::Hours,
                index: 1,
                value: Fixed::from_micros(-3),
            }
        );
    }

    #[rstest]
    fn zero_coefficients_are_accepted() {
        let problem = SelectionProblem::new(vec![Fixed::ZERO; 2], vec![hours(&[0, 0], 0)])
            .expect("zero coefficients are well formed");
        assert!(problem.is_feasible(&[0, 1]));
    }

    #[rstest]
    fn objective_sums_chosen_profits() {
        let profits = [4, -1, 6].into_iter().map(Fixed::from_micros).collect();
        let problem = SelectionProblem::new(profits, vec![hours(&[1, 1, 1], 5)]).expect("shape");
        assert_eq!(problem.objective(&[0, 2]), Fixed::from_micros(10));
        assert_eq!(problem.objective(&[]), Fixed::ZERO);
    }

    #[rstest]
    #[case(5, false)]
    #[case(0, false)]
    #[case(-1, true)]
    fn negative_bounds_are_detected(#[case] bound: i64, #[case] negative: bool) {
        let problem =
            SelectionProblem::new(vec![Fixed::ZERO], vec![hours(&[1], bound)]).expect("shape");
        assert_eq!(problem.has_negative_bound(), negative);
        assert_eq!(problem.is_feasible(&[]), !negative);
    }

    #[rstest]
    fn status_labels_are_upper_case() {
        assert_eq!(SolveStatus::OptimalUnconfirmed.to_string(), "OPTIMAL_UNCONFIRMED");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(SolveStatus::Optimal, "\"OPTIMAL\"")]
    #[case(SolveStatus::Infeasible, "\"INFEASIBLE\"")]
    #[case(SolveStatus::OptimalUnconfirmed, "\"OPTIMAL_UNCONFIRMED\"")]
    fn status_serialises_as_its_report_label(#[case] status: SolveStatus, #[case] json: &str) {
        assert_eq!(serde_json::to_string(&status).expect("serialise"), json);
        assert_eq!(format!("\"{status}\""), json);
    }
}
