//! Benchmark support utilities for the branch-and-bound selector.
//!
//! Generates deterministic job sets whose revenue loosely tracks the time and
//! capacity they consume, which keeps many jobs competitive and the search
//! non-trivial.

use haulplan_core::{CostConfig, Job};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// A day's truck: eleven hours, a dozen pallets and two mileage limits.
#[must_use]
pub const fn benchmark_config() -> CostConfig {
    CostConfig::new(11.0, 12.0, 0.7, 25.0)
        .with_max_deadhead_miles(150.0)
        .with_max_total_miles(600.0)
}

/// Generate `count` jobs from `seed`.
#[must_use]
pub fn generate_jobs(count: usize, seed: u64) -> Vec<Job> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (1..=count)
        .map(|index| {
            let loaded_miles: f64 = rng.gen_range(20.0..200.0);
            let deadhead_miles: f64 = rng.gen_range(0.0..60.0);
            let hours: f64 = rng.gen_range(0.5..4.0);
            let pallets = f64::from(rng.gen_range(1_u8..=4));
            #[expect(
                clippy::float_arithmetic,
                reason = "revenue is derived from the sampled job dimensions"
            )]
            let revenue = rng.gen_range(0.9..1.3) * (2.2 * loaded_miles + 60.0 * hours)
                + 15.0 * pallets;
            Job::new(
                format!("J{index}"),
                revenue,
                loaded_miles,
                deadhead_miles,
                hours,
                pallets,
            )
        })
        .collect()
}
