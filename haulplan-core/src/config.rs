//! Cost and capacity parameters for a planning run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Budgets, operating costs and optional limits for one planning run.
///
/// Mandatory budgets may be negative: a negative budget leaves no feasible
/// selection and the run reports [`SolveStatus::Infeasible`](crate::SolveStatus)
/// rather than failing. Each optional limit imposes nothing when `None`.
///
/// # Examples
/// ```
/// use haulplan_core::CostConfig;
///
/// let config = CostConfig::new(11.0, 6.0, 0.7, 25.0).with_max_total_miles(400.0);
/// assert_eq!(config.max_total_miles, Some(400.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostConfig {
    /// Driving hours available.
    pub max_hours: f64,
    /// Pallet capacity available.
    pub max_pallets: f64,
    /// Fuel cost charged per mile, loaded or empty.
    pub fuel_cost_per_mile: f64,
    /// Driver cost charged per hour.
    pub driver_cost_per_hour: f64,
    /// Limit on summed deadhead miles.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_deadhead_miles: Option<f64>,
    /// Limit on summed loaded plus deadhead miles.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_total_miles: Option<f64>,
    /// Jobs priced below this floor are never selected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_profit_per_job: Option<f64>,
}

impl CostConfig {
    /// Construct a configuration without optional limits.
    #[must_use]
    pub const fn new(
        max_hours: f64,
        max_pallets: f64,
        fuel_cost_per_mile: f64,
        driver_cost_per_hour: f64,
    ) -> Self {
        Self {
            max_hours,
            max_pallets,
            fuel_cost_per_mile,
            driver_cost_per_hour,
            max_deadhead_miles: None,
            max_total_miles: None,
            min_profit_per_job: None,
        }
    }

    /// Limit summed deadhead miles.
    #[must_use]
    pub const fn with_max_deadhead_miles(mut self, miles: f64) -> Self {
        self.max_deadhead_miles = Some(miles);
        self
    }

    /// Limit summed loaded plus deadhead miles.
    #[must_use]
    pub const fn with_max_total_miles(mut self, miles: f64) -> Self {
        self.max_total_miles = Some(miles);
        self
    }

    /// Drop jobs whose individual profit is below `floor`.
    #[must_use]
    pub const fn with_min_profit_per_job(mut self, floor: f64) -> Self {
        self.min_profit_per_job = Some(floor);
        self
    }

    /// Reject non-finite values and negative cost rates.
    ///
    /// Negative budgets are accepted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let budgets = [
            ("max_hours", Some(self.max_hours)),
            ("max_pallets", Some(self.max_pallets)),
            ("max_deadhead_miles", self.max_deadhead_miles),
            ("max_total_miles", self.max_total_miles),
            ("min_profit_per_job", self.min_profit_per_job),
        ];
        for (field, limit) in budgets {
            if let Some(value) = limit
                && !value.is_finite()
            {
                return Err(ValidationError::InvalidConfig {
                    field,
                    value,
                    reason: "must be finite",
                });
            }
        }
        for (field, value) in [
            ("fuel_cost_per_mile", self.fuel_cost_per_mile),
            ("driver_cost_per_hour", self.driver_cost_per_hour),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidConfig {
                    field,
                    value,
                    reason: "must be finite and non-negative",
                });
            }
        }
        Ok(())
    }
}
