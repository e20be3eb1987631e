//! Preprocessed integer form of a [`SelectionProblem`].

use std::cmp::Ordering;

use haulplan_core::SelectionProblem;

/// Items that can appear in some feasible selection, in branching order.
///
/// Positions index the branching order; `items[pos]` maps a position back to
/// the item index of the originating problem. Every bound and weight is
/// non-negative; [`SelectionProblem::new`] rejects negative coefficients.
#[derive(Debug)]
pub(crate) struct Instance {
    items: Vec<usize>,
    profits: Vec<i64>,
    weights: Vec<Vec<i64>>,
    bounds: Vec<i64>,
    ratio_orders: Vec<Vec<usize>>,
}

impl Instance {
    /// Drop items that can never be chosen and fix the branching order.
    ///
    /// Returns `None` when some bound is negative.
    pub(crate) fn prepare(problem: &SelectionProblem) -> Option<Self> {
        if problem.has_negative_bound() {
            return None;
        }
        let constraints = problem.constraints();
        let bounds: Vec<i64> = constraints.iter().map(|c| c.bound.micros()).collect();

        let mut kept: Vec<(usize, i64, Vec<i64>)> = problem
            .profits()
            .iter()
            .enumerate()
            .filter(|(_, profit)| profit.is_positive())
            .filter_map(|(index, profit)| {
                let column: Vec<i64> = constraints
                    .iter()
                    .map(|c| c.coefficients.get(index).map_or(0, |w| w.micros()))
                    .collect();
                let fits = column.iter().zip(&bounds).all(|(w, b)| w <= b);
                fits.then_some((index, profit.micros(), column))
            })
            .collect();

        kept.sort_by(|(lhs, lhs_profit, lhs_column), (rhs, rhs_profit, rhs_column)| {
            density(*rhs_profit, rhs_column, &bounds)
                .total_cmp(&density(*lhs_profit, lhs_column, &bounds))
                .then_with(|| lhs.cmp(rhs))
        });

        let items = kept.iter().map(|(index, _, _)| *index).collect();
        let profits: Vec<i64> = kept.iter().map(|(_, profit, _)| *profit).collect();
        let weights: Vec<Vec<i64>> = (0..bounds.len())
            .map(|k| {
                kept.iter()
                    .map(|(_, _, column)| column.get(k).copied().unwrap_or(0))
                    .collect()
            })
            .collect();
        let ratio_orders = weights
            .iter()
            .map(|row| ratio_order(&profits, row))
            .collect();

        Some(Self {
            items,
            profits,
            weights,
            bounds,
            ratio_orders,
        })
    }

    pub(crate) const fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) const fn bounds(&self) -> &[i64] {
        self.bounds.as_slice()
    }

    pub(crate) fn profit(&self, pos: usize) -> i64 {
        self.profits.get(pos).copied().unwrap_or(0)
    }

    /// Coefficient of the item at `pos` in constraint `k`.
    pub(crate) fn weight(&self, k: usize, pos: usize) -> i64 {
        self.weights
            .get(k)
            .and_then(|row| row.get(pos))
            .copied()
            .unwrap_or(0)
    }

    /// Positions ordered by profit per unit of constraint `k`, best first.
    pub(crate) fn ratio_order(&self, k: usize) -> &[usize] {
        self.ratio_orders.get(k).map_or(&[], Vec::as_slice)
    }

    /// Whether the item at `pos` fits into `remaining`.
    pub(crate) fn fits(&self, pos: usize, remaining: &[i64]) -> bool {
        remaining
            .iter()
            .enumerate()
            .all(|(k, room)| self.weight(k, pos) <= *room)
    }

    /// Problem item indices of the positions flagged in `taken`, ascending.
    pub(crate) fn chosen_items(&self, taken: &[bool]) -> Vec<usize> {
        let mut chosen: Vec<usize> = taken
            .iter()
            .zip(&self.items)
            .filter_map(|(&take, &item)| take.then_some(item))
            .collect();
        chosen.sort_unstable();
        chosen
    }

    /// Take items greedily in branching order.
    ///
    /// Returns the profit and decision vector of the resulting selection.
    pub(crate) fn greedy(&self) -> (i64, Vec<bool>) {
        let mut remaining = self.bounds.clone();
        let mut taken = vec![false; self.len()];
        let mut profit = 0_i64;
        for (pos, take) in taken.iter_mut().enumerate() {
            if !self.fits(pos, &remaining) {
                continue;
            }
            for (k, room) in remaining.iter_mut().enumerate() {
                *room = room.saturating_sub(self.weight(k, pos));
            }
            profit = profit.saturating_add(self.profit(pos));
            *take = true;
        }
        (profit, taken)
    }
}

/// Profit per unit of normalised resource use; orders branching only.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "density is a branching heuristic; exactness comes from integer bounds"
)]
fn density(profit: i64, column: &[i64], bounds: &[i64]) -> f64 {
    let usage: f64 = column
        .iter()
        .zip(bounds)
        .filter(|(w, _)| **w > 0)
        .map(|(w, b)| *w as f64 / (*b).max(1) as f64)
        .sum();
    if usage > 0.0 {
        profit as f64 / usage
    } else {
        f64::INFINITY
    }
}

/// Positions sorted by `profit / weight` descending, compared exactly.
///
/// Zero-weight items come first. Ties keep branching order.
fn ratio_order(profits: &[i64], weights: &[i64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..profits.len()).collect();
    let ratio_of = |pos: usize| {
        (
            i128::from(profits.get(pos).copied().unwrap_or(0)),
            i128::from(weights.get(pos).copied().unwrap_or(0)),
        )
    };
    order.sort_by(|&lhs, &rhs| {
        let (lhs_profit, lhs_weight) = ratio_of(lhs);
        let (rhs_profit, rhs_weight) = ratio_of(rhs);
        compare_ratio(rhs_profit, rhs_weight, lhs_profit, lhs_weight).then_with(|| lhs.cmp(&rhs))
    });
    order
}

/// Compare `a_profit / a_weight` with `b_profit / b_weight` for non-negative
/// weights, treating a zero weight as an infinite ratio.
fn compare_ratio(a_profit: i128, a_weight: i128, b_profit: i128, b_weight: i128) -> Ordering {
    match (a_weight == 0, b_weight == 0) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // Products of two i64 values cannot overflow i128.
        (false, false) => (a_profit * b_weight).cmp(&(b_profit * a_weight)),
    }
}
