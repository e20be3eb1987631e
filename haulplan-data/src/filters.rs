//! Pre-planning job filters on pickup city, dropoff city and weekday.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};
use haulplan_core::Job;

/// Narrows a job set before planning.
///
/// An empty filter keeps every job.
///
/// # Examples
/// ```
/// use haulplan_core::{Job, JobDetails};
/// use haulplan_data::JobFilter;
///
/// let saturday = Job::new("1", 500.0, 60.0, 0.0, 2.0, 1.0).with_details(JobDetails {
///     date: Some("2024-03-02".into()),
///     ..JobDetails::default()
/// });
/// let filter = JobFilter {
///     exclude_weekends: true,
///     ..JobFilter::default()
/// };
/// assert!(!filter.accepts(&saturday));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Keep only jobs picked up in one of these cities. Ignored when empty.
    pub include_pickup: Vec<String>,
    /// Drop jobs delivered to any of these cities.
    pub exclude_dropoff: Vec<String>,
    /// Drop jobs dated on a Saturday or Sunday, and jobs whose date is
    /// missing or unreadable.
    pub exclude_weekends: bool,
}

impl JobFilter {
    /// Whether the filter keeps every job.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include_pickup.is_empty() && self.exclude_dropoff.is_empty() && !self.exclude_weekends
    }

    /// Whether `job` passes every configured condition.
    #[must_use]
    pub fn accepts(&self, job: &Job) -> bool {
        let details = &job.details;
        let pickup_ok = self.include_pickup.is_empty()
            || details
                .pickup_city
                .as_ref()
                .is_some_and(|city| self.include_pickup.contains(city));
        let dropoff_ok = details
            .dropoff_city
            .as_ref()
            .is_none_or(|city| !self.exclude_dropoff.contains(city));
        let weekday_ok = !self.exclude_weekends
            || details
                .date
                .as_deref()
                .and_then(parse_job_date)
                .is_some_and(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun));
        pickup_ok && dropoff_ok && weekday_ok
    }

    /// Keep the jobs [`accepts`](Self::accepts) admits, in input order.
    #[must_use]
    pub fn apply(&self, mut jobs: Vec<Job>) -> Vec<Job> {
        if self.is_empty() {
            return jobs;
        }
        let before = jobs.len();
        jobs.retain(|job| self.accepts(job));
        let removed = before.saturating_sub(jobs.len());
        if removed > 0 {
            log::info!("filters removed {removed} of {before} jobs");
        }
        jobs
    }
}

/// Parse a job date written as `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or
/// RFC 3339.
#[must_use]
pub fn parse_job_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use haulplan_core::JobDetails;
    use rstest::{fixture, rstest};

    fn dated(id: &str, pickup: Option<&str>, dropoff: Option<&str>, date: Option<&str>) -> Job {
        Job::new(id, 500.0, 60.0, 0.0, 2.0, 1.0).with_details(JobDetails {
            pickup_city: pickup.map(str::to_owned),
            dropoff_city: dropoff.map(str::to_owned),
            date: date.map(str::to_owned),
            ..JobDetails::default()
        })
    }

    #[fixture]
    fn jobs() -> Vec<Job> {
        vec![
            dated("mon", Some("Leeds"), Some("York"), Some("2024-03-04")),
            dated("sat", Some("Hull"), Some("Leeds"), Some("2024-03-02")),
            dated("sun", Some("Leeds"), None, Some("2024-03-03T08:00:00Z")),
            dated("undated", None, Some("Hull"), None),
            dated("garbled", Some("York"), Some("York"), Some("next tuesday")),
        ]
    }

    fn ids(jobs: &[Job]) -> Vec<&str> {
        jobs.iter().map(|job| job.id.as_str()).collect()
    }

    #[rstest]
    fn empty_filter_keeps_everything(jobs: Vec<Job>) {
        let filter = JobFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(jobs.clone()), jobs);
    }

    #[rstest]
    fn pickup_whitelist_drops_unknown_pickups(jobs: Vec<Job>) {
        let filter = JobFilter {
            include_pickup: vec!["Leeds".into()],
            ..JobFilter::default()
        };
        assert_eq!(ids(&filter.apply(jobs)), ["mon", "sun"]);
    }

    #[rstest]
    fn dropoff_blacklist_keeps_jobs_without_dropoff(jobs: Vec<Job>) {
        let filter = JobFilter {
            exclude_dropoff: vec!["York".into(), "Hull".into()],
            ..JobFilter::default()
        };
        assert_eq!(ids(&filter.apply(jobs)), ["sat", "sun"]);
    }

    #[rstest]
    fn weekend_exclusion_drops_weekends_and_unreadable_dates(jobs: Vec<Job>) {
        let filter = JobFilter {
            exclude_weekends: true,
            ..JobFilter::default()
        };
        assert_eq!(ids(&filter.apply(jobs)), ["mon"]);
    }

    #[rstest]
    #[case("2024-03-04", Some((2024, 3, 4)))]
    #[case(" 2024-03-04 17:30:00 ", Some((2024, 3, 4)))]
    #[case("2024-03-04T23:30:00-02:00", Some((2024, 3, 4)))]
    #[case("04/03/2024", None)]
    #[case("", None)]
    fn parses_supported_date_formats(#[case] raw: &str, #[case] ymd: Option<(i32, u32, u32)>) {
        let expected = ymd.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parse_job_date(raw), expected);
    }
}
