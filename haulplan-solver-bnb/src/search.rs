//! Depth-first include-first search over a prepared [`Instance`].

use haulplan_core::SearchStats;

use crate::bound::upper_bound;
use crate::incumbent::{Budget, Incumbent};
use crate::instance::Instance;

/// Shared, read-only context of one solve.
#[derive(Debug)]
pub(crate) struct SearchContext<'a> {
    pub(crate) instance: &'a Instance,
    pub(crate) incumbent: &'a Incumbent,
    pub(crate) budget: &'a Budget,
}

/// Partial assignment of the first positions in branching order.
#[derive(Debug, Clone)]
pub(crate) struct Prefix {
    taken: Vec<bool>,
    remaining: Vec<i64>,
    profit: i64,
}

impl Prefix {
    /// The root: nothing decided, all capacity available.
    pub(crate) fn root(instance: &Instance) -> Self {
        Self {
            taken: Vec::with_capacity(instance.len()),
            remaining: instance.bounds().to_vec(),
            profit: 0,
        }
    }

    const fn depth(&self) -> usize {
        self.taken.len()
    }

    fn extended(&self, instance: &Instance, take: bool) -> Self {
        let mut next = self.clone();
        let pos = self.depth();
        if take {
            for (k, room) in next.remaining.iter_mut().enumerate() {
                *room = room.saturating_sub(instance.weight(k, pos));
            }
            next.profit = next.profit.saturating_add(instance.profit(pos));
        }
        next.taken.push(take);
        next
    }
}

/// Every feasible assignment of the first `depth` positions, include-first.
///
/// Workers start from these prefixes; earlier prefixes favour the items the
/// branching order ranks highest.
pub(crate) fn split(instance: &Instance, depth: usize) -> Vec<Prefix> {
    let mut frontier = vec![Prefix::root(instance)];
    for pos in 0..depth.min(instance.len()) {
        frontier = frontier
            .into_iter()
            .flat_map(|prefix| {
                let include = instance
                    .fits(pos, &prefix.remaining)
                    .then(|| prefix.extended(instance, true));
                let exclude = prefix.extended(instance, false);
                include.into_iter().chain(Some(exclude))
            })
            .collect();
    }
    frontier
}

/// Explore the subtree below `prefix`.
///
/// Decisions are kept in a single vector and undone on backtrack, so memory
/// stays linear in the number of items. Returns the local counters; the best
/// selection is published through the shared incumbent.
pub(crate) fn explore(context: &SearchContext<'_>, prefix: Prefix) -> SearchStats {
    let SearchContext {
        instance,
        incumbent,
        budget,
    } = *context;
    let start = prefix.depth();
    let n = instance.len();
    let Prefix {
        mut taken,
        mut remaining,
        mut profit,
    } = prefix;
    taken.resize(n, false);
    let mut stats = SearchStats::default();
    let mut depth = start;

    'search: loop {
        if !budget.charge_node() {
            break;
        }
        stats.nodes_explored = stats.nodes_explored.saturating_add(1);
        incumbent.offer(profit, || instance.chosen_items(taken.get(..depth).unwrap_or(&[])));

        let expand = depth < n && {
            let best = incumbent.value();
            let bound = upper_bound(instance, depth, profit, &remaining, best);
            if bound <= best {
                stats.nodes_pruned = stats.nodes_pruned.saturating_add(1);
            }
            bound > best
        };
        if expand {
            let take = instance.fits(depth, &remaining);
            if take {
                apply(instance, depth, &mut remaining, &mut profit, true);
            }
            set(&mut taken, depth, take);
            depth = depth.saturating_add(1);
            continue;
        }

        // Backtrack to the deepest inclusion and try its exclusion instead.
        while depth > start {
            depth = depth.saturating_sub(1);
            if taken.get(depth).copied().unwrap_or(false) {
                apply(instance, depth, &mut remaining, &mut profit, false);
                set(&mut taken, depth, false);
                depth = depth.saturating_add(1);
                continue 'search;
            }
        }
        break;
    }
    stats
}

/// Add (`take`) or remove the item at `pos` from the running totals.
fn apply(instance: &Instance, pos: usize, remaining: &mut [i64], profit: &mut i64, take: bool) {
    for (k, room) in remaining.iter_mut().enumerate() {
        let weight = instance.weight(k, pos);
        *room = if take {
            room.saturating_sub(weight)
        } else {
            room.saturating_add(weight)
        };
    }
    let value = instance.profit(pos);
    *profit = if take {
        profit.saturating_add(value)
    } else {
        profit.saturating_sub(value)
    };
}

fn set(taken: &mut [bool], pos: usize, take: bool) {
    if let Some(slot) = taken.get_mut(pos) {
        *slot = take;
    }
}
