//! State shared between search workers: the incumbent and the search budget.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// Best selection found so far.
///
/// The profit is readable without locking so workers can prune against it;
/// the selection itself is only touched when a strictly better one arrives.
#[derive(Debug)]
pub(crate) struct Incumbent {
    value: AtomicI64,
    chosen: Mutex<Vec<usize>>,
}

impl Incumbent {
    /// The empty selection, worth zero.
    pub(crate) const fn empty() -> Self {
        Self {
            value: AtomicI64::new(0),
            chosen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn value(&self) -> i64 {
        self.value.load(Ordering::Acquire)
    }

    /// Replace the incumbent if `value` beats it.
    ///
    /// `chosen` is only evaluated when the offer is accepted.
    pub(crate) fn offer(&self, value: i64, chosen: impl FnOnce() -> Vec<usize>) -> bool {
        if value <= self.value() {
            return false;
        }
        let mut guard = self.chosen.lock().unwrap_or_else(PoisonError::into_inner);
        if value <= self.value() {
            return false;
        }
        *guard = chosen();
        self.value.fetch_max(value, Ordering::AcqRel);
        true
    }

    pub(crate) fn into_chosen(self) -> Vec<usize> {
        self.chosen
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Node and wall-clock limits shared by all workers.
#[derive(Debug)]
pub(crate) struct Budget {
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    nodes: AtomicU64,
    stopped: AtomicBool,
}

/// Nodes between two clock reads.
const CLOCK_INTERVAL: u64 = 1024;

impl Budget {
    pub(crate) const fn new(node_limit: Option<u64>, deadline: Option<Instant>) -> Self {
        Self {
            node_limit,
            deadline,
            nodes: AtomicU64::new(0),
            stopped: AtomicBool::new(false),
        }
    }

    /// Account for one more node; `false` once the budget is exhausted.
    pub(crate) fn charge_node(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return false;
        }
        let visited = self.nodes.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        let over_nodes = self.node_limit.is_some_and(|limit| visited > limit);
        let over_time = visited.is_multiple_of(CLOCK_INTERVAL)
            && self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline);
        if over_nodes || over_time {
            self.stopped.store(true, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Whether some worker ran out of budget.
    pub(crate) fn exhausted(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    fn only_strictly_better_offers_are_accepted() {
        let incumbent = Incumbent::empty();
        assert!(!incumbent.offer(0, || vec![9]));
        assert!(incumbent.offer(5, || vec![1]));
        assert!(!incumbent.offer(5, || vec![2]));
        assert!(incumbent.offer(7, || vec![3, 4]));
        assert_eq!(incumbent.value(), 7);
        assert_eq!(incumbent.into_chosen(), vec![3, 4]);
    }

    #[rstest]
    fn node_limit_stops_after_the_limit() {
        let budget = Budget::new(Some(2), None);
        assert!(budget.charge_node());
        assert!(budget.charge_node());
        assert!(!budget.charge_node());
        assert!(budget.exhausted());
        assert!(!budget.charge_node());
    }

    #[rstest]
    fn elapsed_deadline_stops_at_the_next_clock_read() {
        let budget = Budget::new(None, Some(Instant::now()));
        let charged = (0..CLOCK_INTERVAL).filter(|_| budget.charge_node()).count();
        assert_eq!(charged, usize::try_from(CLOCK_INTERVAL - 1).expect("fits"));
        assert!(budget.exhausted());
    }

    #[rstest]
    fn unlimited_budget_never_stops() {
        let budget = Budget::new(None, Some(Instant::now() + Duration::from_secs(3600)));
        assert!((0..3 * CLOCK_INTERVAL).all(|_| budget.charge_node()));
        assert!(!budget.exhausted());
    }
}
