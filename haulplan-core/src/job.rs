//! Candidate transport jobs.

use geo::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Descriptive metadata carried through planning unchanged.
///
/// None of these fields influence optimisation. Coordinates are WGS84 with
/// `x = longitude` and `y = latitude`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JobDetails {
    /// City the load is collected from.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pickup_city: Option<String>,
    /// City the load is delivered to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dropoff_city: Option<String>,
    /// Free-form date of the job, usually `YYYY-MM-DD`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub date: Option<String>,
    /// Free-text note.
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: Option<String>,
    /// Pickup position, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pickup_location: Option<Coord<f64>>,
    /// Dropoff position, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dropoff_location: Option<Coord<f64>>,
}

/// One prospective job.
///
/// Distances are in miles, `hours` is the driving time the job consumes and
/// `pallets` the cargo capacity it occupies.
///
/// # Examples
/// ```
/// use haulplan_core::Job;
///
/// let job = Job::new("J1", 700.0, 120.0, 15.0, 3.0, 2.0);
/// assert_eq!(job.total_miles(), 135.0);
/// assert!(job.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Job {
    /// Unique identifier within a job set.
    pub id: String,
    /// Payment received for the job.
    pub revenue: f64,
    /// Miles driven with cargo.
    pub loaded_miles: f64,
    /// Miles driven empty to reach the pickup.
    pub deadhead_miles: f64,
    /// Driving hours consumed.
    pub hours: f64,
    /// Pallet capacity occupied.
    pub pallets: f64,
    /// Metadata not used by optimisation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub details: JobDetails,
}

impl Job {
    /// Construct a job without metadata.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        revenue: f64,
        loaded_miles: f64,
        deadhead_miles: f64,
        hours: f64,
        pallets: f64,
    ) -> Self {
        Self {
            id: id.into(),
            revenue,
            loaded_miles,
            deadhead_miles,
            hours,
            pallets,
            details: JobDetails::default(),
        }
    }

    /// Attach metadata.
    #[must_use]
    pub fn with_details(mut self, details: JobDetails) -> Self {
        self.details = details;
        self
    }

    /// Loaded plus deadhead miles.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "distances are summed as floats")]
    pub fn total_miles(&self) -> f64 {
        self.loaded_miles + self.deadhead_miles
    }

    /// Numeric fields paired with their names, in column order.
    #[must_use]
    pub const fn numeric_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("revenue", self.revenue),
            ("loaded_miles", self.loaded_miles),
            ("deadhead_miles", self.deadhead_miles),
            ("hours", self.hours),
            ("pallets", self.pallets),
        ]
    }

    /// Check that the id is present and every numeric field is finite and
    /// non-negative.
    ///
    /// Reports the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField {
                record: self.id.clone(),
                field: "id",
            });
        }
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    record: self.id.clone(),
                    field,
                });
            }
            if value < 0.0 {
                return Err(ValidationError::Negative {
                    record: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn job() -> Job {
        Job::new("J1", 700.0, 120.0, 0.0, 3.0, 2.0)
    }

    #[rstest]
    fn valid_job_passes(job: Job) {
        assert_eq!(job.validate(), Ok(()));
    }

    #[rstest]
    fn blank_id_is_missing(mut job: Job) {
        job.id = "  ".into();
        assert!(matches!(
            job.validate(),
            Err(ValidationError::MissingField { field: "id", .. })
        ));
    }

    #[rstest]
    #[case::revenue("revenue")]
    #[case::hours("hours")]
    #[case::pallets("pallets")]
    fn negative_field_is_named(mut job: Job, #[case] field: &'static str) {
        match field {
            "revenue" => job.revenue = -1.0,
            "hours" => job.hours = -1.0,
            _ => job.pallets = -1.0,
        }
        let err = job.validate().expect_err("negative value");
        assert_eq!(
            err,
            ValidationError::Negative {
                record: "J1".into(),
                field,
                value: -1.0,
            }
        );
    }

    #[rstest]
    fn non_finite_distance_is_rejected(mut job: Job) {
        job.deadhead_miles = f64::INFINITY;
        assert!(matches!(
            job.validate(),
            Err(ValidationError::NonFinite { field: "deadhead_miles", .. })
        ));
    }

    #[rstest]
    fn details_are_carried(job: Job) {
        let details = JobDetails {
            pickup_city: Some("Leeds".into()),
            notes: Some("tail lift".into()),
            ..JobDetails::default()
        };
        let detailed = job.with_details(details.clone());
        assert_eq!(detailed.details, details);
    }
}
