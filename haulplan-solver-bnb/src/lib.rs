//! Exact branch-and-bound selector for haulplan.
//!
//! This crate provides [`BranchAndBoundSelector`], the default implementation
//! of the [`Selector`](haulplan_core::Selector) trait. It solves the 0/1
//! multi-dimensional knapsack behind job selection exactly: a depth-first,
//! include-first search over items ordered by profit density, pruned by the
//! tightest single-constraint fractional bound.
//!
//! All arithmetic runs on the integer micro-units of
//! [`Fixed`](haulplan_core::Fixed), so bounds and feasibility checks are
//! exact. Subtrees can be explored in parallel with `rayon`; workers share
//! only the incumbent profit and a stop flag for node and time budgets.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod bound;
mod incumbent;
mod instance;
mod search;
mod solver;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use solver::{BnbConfig, BranchAndBoundSelector, MAX_PARALLEL_DEPTH};
