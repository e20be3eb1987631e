//! End-to-end planning pipeline.

use std::collections::HashSet;
use std::time::Instant;

use crate::{
    CostConfig, Diagnostics, Fixed, Job, PlanResult, ProfitSheet, SelectionProblem, Selector,
    ValidationError, assemble, build_constraints, eligible_indices,
};

/// Validate every job and reject duplicate ids.
pub fn validate_jobs(jobs: &[Job]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(jobs.len());
    for job in jobs {
        job.validate()?;
        if !seen.insert(job.id.as_str()) {
            return Err(ValidationError::DuplicateId { id: job.id.clone() });
        }
    }
    Ok(())
}

/// Price, filter, constrain and select jobs, then aggregate the outcome.
///
/// Validation failures are reported before the selector runs. The selector
/// itself cannot fail; its status is carried into the [`PlanResult`].
///
/// # Examples
/// ```
/// use haulplan_core::{
///     CostConfig, Job, SearchStats, Selection, SelectionProblem, Selector, SolveStatus, plan_jobs,
/// };
///
/// /// Takes every item, whatever the constraints say.
/// struct TakeAll;
///
/// impl Selector for TakeAll {
///     fn select(&self, problem: &SelectionProblem) -> Selection {
///         Selection {
///             status: SolveStatus::Optimal,
///             chosen: (0..problem.len()).collect(),
///             stats: SearchStats::default(),
///         }
///     }
/// }
///
/// let jobs = [Job::new("1", 700.0, 120.0, 0.0, 3.0, 2.0)];
/// let config = CostConfig::new(11.0, 6.0, 0.7, 25.0);
/// let result = plan_jobs(&jobs, &config, &TakeAll).unwrap();
/// assert_eq!(result.chosen_ids, ["1"]);
/// assert_eq!(result.total_profit, 541.0);
/// ```
pub fn plan_jobs(
    jobs: &[Job],
    config: &CostConfig,
    selector: &dyn Selector,
) -> Result<PlanResult, ValidationError> {
    config.validate()?;
    validate_jobs(jobs)?;

    let profits = ProfitSheet::compute(jobs, config)?;
    let floor = config
        .min_profit_per_job
        .map(|floor| {
            Fixed::from_f64(floor).ok_or(ValidationError::InvalidConfig {
                field: "min_profit_per_job",
                value: floor,
                reason: "out of range",
            })
        })
        .transpose()?;
    let eligible = eligible_indices(&profits, floor);
    let jobs_filtered = jobs.len().saturating_sub(eligible.len());
    if jobs_filtered > 0 {
        log::debug!("profit floor removed {jobs_filtered} of {} jobs", jobs.len());
    }

    let constraints = build_constraints(jobs, &eligible, config)?;
    let item_profits = eligible
        .iter()
        .filter_map(|&index| profits.get(index))
        .collect();
    let problem = SelectionProblem::new(item_profits, constraints)?;

    let started_at = Instant::now();
    let selection = selector.select(&problem);
    let diagnostics = Diagnostics {
        solve_time: started_at.elapsed(),
        nodes_explored: selection.stats.nodes_explored,
        nodes_pruned: selection.stats.nodes_pruned,
        jobs_considered: problem.len(),
        jobs_filtered,
    };
    log::debug!(
        "selector finished with {} after {} nodes in {:?}",
        selection.status,
        diagnostics.nodes_explored,
        diagnostics.solve_time
    );

    Ok(assemble(
        jobs,
        &profits,
        &eligible,
        &problem,
        &selection,
        diagnostics,
    ))
}
