//! Fractional upper bounds on the profit reachable below a search node.

use crate::instance::Instance;

/// Upper bound on the profit of any completion of a node.
///
/// The node has fixed positions `..depth`, earned `profit` and has
/// `remaining` capacity left in every constraint. Each constraint alone
/// yields a Dantzig bound: fill it greedily by profit per unit and take a
/// fraction of the first item that overflows. The minimum over constraints
/// is returned. Items that no longer fit the remaining capacity of some
/// constraint are ignored, which keeps the bound valid and tighter.
///
/// Stops early once the bound drops to `cutoff` or below.
pub(crate) fn upper_bound(
    instance: &Instance,
    depth: usize,
    profit: i64,
    remaining: &[i64],
    cutoff: i64,
) -> i64 {
    if remaining.is_empty() {
        let rest = (depth..instance.len())
            .map(|pos| instance.profit(pos))
            .fold(0_i64, i64::saturating_add);
        return profit.saturating_add(rest);
    }

    let mut best = i64::MAX;
    for (k, &room) in remaining.iter().enumerate() {
        let relaxed = single_constraint_bound(instance, k, depth, room, remaining);
        best = best.min(profit.saturating_add(relaxed));
        if best <= cutoff {
            break;
        }
    }
    best
}

/// Dantzig bound of the undecided items against constraint `k` alone.
fn single_constraint_bound(
    instance: &Instance,
    k: usize,
    depth: usize,
    capacity: i64,
    remaining: &[i64],
) -> i64 {
    let mut room = u128::from(capacity.unsigned_abs());
    let mut value = 0_u128;
    for &pos in instance.ratio_order(k) {
        if pos < depth || !instance.fits(pos, remaining) {
            continue;
        }
        let profit = u128::from(instance.profit(pos).unsigned_abs());
        let weight = u128::from(instance.weight(k, pos).unsigned_abs());
        if weight <= room {
            room = room.saturating_sub(weight);
            value = value.saturating_add(profit);
        } else {
            // `weight > room >= 0`, so the division is well defined.
            value = value.saturating_add(profit.saturating_mul(room).div_ceil(weight));
            break;
        }
    }
    i64::try_from(value).unwrap_or(i64::MAX)
}
