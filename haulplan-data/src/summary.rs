//! Derived metrics of a plan.

use haulplan_core::{Job, PlanResult};
use serde::{Deserialize, Serialize};

/// Mileage and efficiency figures for the chosen jobs.
///
/// Ratios are zero when their divisor is not positive.
///
/// # Examples
/// ```
/// use haulplan_core::{CostConfig, Job, PlanResult, plan_jobs};
/// use haulplan_data::PlanSummary;
/// # use haulplan_core::{SearchStats, Selection, SelectionProblem, Selector, SolveStatus};
/// # struct TakeAll;
/// # impl Selector for TakeAll {
/// #     fn select(&self, problem: &SelectionProblem) -> Selection {
/// #         Selection {
/// #             status: SolveStatus::Optimal,
/// #             chosen: (0..problem.len()).collect(),
/// #             stats: SearchStats::default(),
/// #         }
/// #     }
/// # }
///
/// let jobs = [Job::new("1", 700.0, 120.0, 0.0, 4.0, 2.0)];
/// let config = CostConfig::new(11.0, 6.0, 0.5, 25.0);
/// let result: PlanResult = plan_jobs(&jobs, &config, &TakeAll).unwrap();
/// let summary = PlanSummary::from_plan(&result, &jobs);
/// assert_eq!(summary.total_miles, 120.0);
/// assert_eq!(summary.profit_per_hour, 135.0);
/// assert_eq!(summary.profit_per_mile, 4.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Loaded plus deadhead miles of the chosen jobs.
    pub total_miles: f64,
    /// Total profit divided by total hours.
    pub profit_per_hour: f64,
    /// Total profit divided by total miles.
    pub profit_per_mile: f64,
}

impl PlanSummary {
    /// Summarise `result`, looking chosen jobs up in `jobs`.
    #[must_use]
    pub fn from_plan(result: &PlanResult, jobs: &[Job]) -> Self {
        let total_miles = sum_miles(&result.chosen_jobs(jobs));
        Self {
            total_miles,
            profit_per_hour: ratio(result.total_profit, result.total_hours),
            profit_per_mile: ratio(result.total_profit, total_miles),
        }
    }
}

/// Starts from `+0.0`; an empty `f64` sum is `-0.0` and prints as `-0.00`.
#[expect(clippy::float_arithmetic, reason = "mileage is summed as floats")]
fn sum_miles(chosen: &[&Job]) -> f64 {
    chosen
        .iter()
        .fold(0.0, |total, job| total + job.total_miles())
}

#[expect(clippy::float_arithmetic, reason = "ratios of float totals")]
fn ratio(numerator: f64, divisor: f64) -> f64 {
    if divisor > 0.0 {
        numerator / divisor
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haulplan_core::test_support::{ExhaustiveSelector, textbook_config, textbook_jobs};
    use haulplan_core::{CostConfig, plan_jobs};
    use rstest::rstest;

    #[rstest]
    #[expect(clippy::float_cmp, reason = "both sides sum the same values in order")]
    fn summarises_the_textbook_plan() {
        let jobs = textbook_jobs();
        let result = plan_jobs(&jobs, &textbook_config(), &ExhaustiveSelector).expect("planned");
        let summary = PlanSummary::from_plan(&result, &jobs);
        let expected_miles: f64 = result
            .chosen_jobs(&jobs)
            .into_iter()
            .map(Job::total_miles)
            .sum();
        assert_eq!(summary.total_miles, expected_miles);
        assert!(summary.profit_per_hour > 0.0);
        assert!(summary.profit_per_mile > 0.0);
    }

    #[rstest]
    fn empty_plan_has_zero_ratios() {
        let jobs = textbook_jobs();
        let config = CostConfig::new(-1.0, 6.0, 0.7, 25.0);
        let result = plan_jobs(&jobs, &config, &ExhaustiveSelector).expect("planned");
        assert_eq!(PlanSummary::from_plan(&result, &jobs), PlanSummary::default());
    }

    #[rstest]
    fn empty_plan_miles_are_positive_zero() {
        let jobs = textbook_jobs();
        let config = textbook_config().with_min_profit_per_job(10_000.0);
        let result = plan_jobs(&jobs, &config, &ExhaustiveSelector).expect("planned");
        assert!(result.chosen_ids.is_empty());

        let summary = PlanSummary::from_plan(&result, &jobs);
        assert_eq!(summary.total_miles.to_bits(), 0.0_f64.to_bits());
        assert_eq!(format!("{:.2}", summary.total_miles), "0.00");
    }

    #[rstest]
    #[case(10.0, 4.0, 2.5)]
    #[case(10.0, 0.0, 0.0)]
    #[case(10.0, -2.0, 0.0)]
    #[expect(clippy::float_cmp, reason = "cases divide exactly")]
    fn ratio_guards_non_positive_divisors(
        #[case] numerator: f64,
        #[case] divisor: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(ratio(numerator, divisor), expected);
    }
}
