//! Per-job profit model.

use std::collections::BTreeMap;

use crate::{CostConfig, Fixed, Job, ValidationError};

/// Revenue minus fuel cost for all miles and driver cost for all hours.
///
/// # Examples
/// ```
/// use haulplan_core::{CostConfig, Job, job_profit};
///
/// let job = Job::new("1", 700.0, 120.0, 0.0, 3.0, 2.0);
/// let config = CostConfig::new(11.0, 6.0, 0.5, 25.0);
/// assert_eq!(job_profit(&job, &config), 565.0);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "profit is priced in floating point")]
pub fn job_profit(job: &Job, config: &CostConfig) -> f64 {
    let fuel = job.total_miles() * config.fuel_cost_per_mile;
    let labour = job.hours * config.driver_cost_per_hour;
    job.revenue - fuel - labour
}

/// Profits of a job set, priced once and cached for the run.
///
/// Entries align with the job slice passed to [`ProfitSheet::compute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfitSheet {
    profits: Vec<Fixed>,
}

impl ProfitSheet {
    /// Price every job.
    ///
    /// Fails with [`ValidationError::OutOfRange`] when a profit cannot be
    /// quantised.
    pub fn compute(jobs: &[Job], config: &CostConfig) -> Result<Self, ValidationError> {
        let profits = jobs
            .iter()
            .map(|job| Fixed::quantise_field(&job.id, "profit", job_profit(job, config)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { profits })
    }

    /// Quantised profit of the job at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Fixed> {
        self.profits.get(index).copied()
    }

    /// All quantised profits in job order.
    #[must_use]
    pub fn as_slice(&self) -> &[Fixed] {
        &self.profits
    }

    /// Number of priced jobs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.profits.len()
    }

    /// Whether no jobs were priced.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.profits.is_empty()
    }

    /// Profit keyed by job id, for reporting.
    #[must_use]
    pub fn by_id(&self, jobs: &[Job]) -> BTreeMap<String, f64> {
        jobs.iter()
            .zip(&self.profits)
            .map(|(job, profit)| (job.id.clone(), profit.to_f64()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{textbook_config, textbook_jobs};
    use rstest::rstest;

    #[rstest]
    fn textbook_profits_match_hand_calculation() {
        let sheet = ProfitSheet::compute(&textbook_jobs(), &textbook_config()).expect("priced");
        let expected = [541.0, 408.0, 661.5, 334.5, 505.0];
        let actual: Vec<f64> = sheet.as_slice().iter().map(|p| p.to_f64()).collect();
        assert_eq!(actual, expected);
    }

    #[rstest]
    fn deadhead_miles_cost_fuel() {
        let config = CostConfig::new(11.0, 6.0, 1.0, 0.0);
        let loaded = Job::new("a", 100.0, 10.0, 0.0, 1.0, 1.0);
        let empty_leg = Job::new("b", 100.0, 10.0, 30.0, 1.0, 1.0);
        assert_eq!(job_profit(&loaded, &config), 90.0);
        assert_eq!(job_profit(&empty_leg, &config), 60.0);
    }

    #[rstest]
    fn profit_may_be_negative() {
        let config = CostConfig::new(11.0, 6.0, 2.0, 50.0);
        let job = Job::new("loss", 100.0, 100.0, 0.0, 2.0, 1.0);
        let sheet = ProfitSheet::compute(std::slice::from_ref(&job), &config).expect("priced");
        assert_eq!(sheet.get(0), Some(Fixed::from_micros(-200_000_000)));
    }

    #[rstest]
    fn by_id_covers_every_job() {
        let jobs = textbook_jobs();
        let sheet = ProfitSheet::compute(&jobs, &textbook_config()).expect("priced");
        let map = sheet.by_id(&jobs);
        assert_eq!(map.len(), jobs.len());
        assert_eq!(map.get("3"), Some(&661.5));
    }
}
