//! Linear capacity constraints over eligible jobs.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CostConfig, Fixed, Job, ValidationError};

/// The resource a [`Constraint`] limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ConstraintKind {
    /// Summed driving hours.
    Hours,
    /// Summed pallet capacity.
    Pallets,
    /// Summed deadhead miles.
    DeadheadMiles,
    /// Summed loaded plus deadhead miles.
    TotalMiles,
}

impl ConstraintKind {
    /// Stable snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Pallets => "pallets",
            Self::DeadheadMiles => "deadhead_miles",
            Self::TotalMiles => "total_miles",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Σ coefficients[i] · x[i] ≤ bound` with binary `x`.
///
/// Coefficients align with the items of the
/// [`SelectionProblem`](crate::SelectionProblem) the constraint belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Limited resource.
    pub kind: ConstraintKind,
    /// Consumption per item.
    pub coefficients: Vec<Fixed>,
    /// Upper limit on total consumption.
    pub bound: Fixed,
}

impl Constraint {
    /// Total consumption of the items at `chosen`.
    ///
    /// Indices without a coefficient contribute nothing.
    #[must_use]
    pub fn load(&self, chosen: &[usize]) -> Fixed {
        chosen
            .iter()
            .filter_map(|&index| self.coefficients.get(index).copied())
            .sum()
    }

    /// Whether the items at `chosen` respect the bound.
    #[must_use]
    pub fn is_satisfied_by(&self, chosen: &[usize]) -> bool {
        self.load(chosen) <= self.bound
    }
}

/// Build the capacity constraints for the jobs at `eligible`.
///
/// Hours and pallets are always constrained; deadhead and total miles only
/// when the configuration sets a limit. Coefficient `i` of every constraint
/// belongs to `jobs[eligible[i]]`.
///
/// # Examples
/// ```
/// use haulplan_core::{ConstraintKind, CostConfig, Job, build_constraints};
///
/// let jobs = [Job::new("a", 100.0, 50.0, 10.0, 2.0, 1.0)];
/// let config = CostConfig::new(11.0, 6.0, 0.7, 25.0).with_max_deadhead_miles(40.0);
/// let constraints = build_constraints(&jobs, &[0], &config).unwrap();
/// let kinds: Vec<_> = constraints.iter().map(|c| c.kind).collect();
/// assert_eq!(
///     kinds,
///     [ConstraintKind::Hours, ConstraintKind::Pallets, ConstraintKind::DeadheadMiles]
/// );
/// ```
pub fn build_constraints(
    jobs: &[Job],
    eligible: &[usize],
    config: &CostConfig,
) -> Result<Vec<Constraint>, ValidationError> {
    let mandatory = [
        (ConstraintKind::Hours, Some(config.max_hours)),
        (ConstraintKind::Pallets, Some(config.max_pallets)),
    ];
    let optional = [
        (ConstraintKind::DeadheadMiles, config.max_deadhead_miles),
        (ConstraintKind::TotalMiles, config.max_total_miles),
    ];

    mandatory
        .into_iter()
        .chain(optional)
        .filter_map(|(kind, bound)| bound.map(|value| (kind, value)))
        .map(|(kind, bound)| build_constraint(jobs, eligible, kind, bound))
        .collect()
}

fn build_constraint(
    jobs: &[Job],
    eligible: &[usize],
    kind: ConstraintKind,
    limit: f64,
) -> Result<Constraint, ValidationError> {
    let coefficients = eligible
        .iter()
        .filter_map(|&index| jobs.get(index))
        .map(|job| Fixed::quantise_field(&job.id, kind.as_str(), coefficient(job, kind)))
        .collect::<Result<Vec<_>, _>>()?;
    let bound = Fixed::from_f64(limit).ok_or(ValidationError::InvalidConfig {
        field: bound_field(kind),
        value: limit,
        reason: "out of range",
    })?;
    Ok(Constraint {
        kind,
        coefficients,
        bound,
    })
}

fn coefficient(job: &Job, kind: ConstraintKind) -> f64 {
    match kind {
        ConstraintKind::Hours => job.hours,
        ConstraintKind::Pallets => job.pallets,
        ConstraintKind::DeadheadMiles => job.deadhead_miles,
        ConstraintKind::TotalMiles => job.total_miles(),
    }
}

const fn bound_field(kind: ConstraintKind) -> &'static str {
    match kind {
        ConstraintKind::Hours => "max_hours",
        ConstraintKind::Pallets => "max_pallets",
        ConstraintKind::DeadheadMiles => "max_deadhead_miles",
        ConstraintKind::TotalMiles => "max_total_miles",
    }
}
