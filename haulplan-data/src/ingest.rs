//! CSV ingestion of candidate jobs.

use std::fs::File;
use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use haulplan_core::{Job, JobDetails, ValidationError, validate_jobs};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Errors returned when reading jobs.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The job file could not be opened.
    #[error("failed to open job file at {path}")]
    Open {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Path that failed to open.
        path: Utf8PathBuf,
    },
    /// The CSV structure could not be decoded.
    #[error("malformed job CSV at row {row}")]
    Csv {
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
        /// One-based data row, excluding the header.
        row: usize,
    },
    /// A record decoded but failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Read and validate jobs from CSV data with a header row.
///
/// Required columns are `id`, `revenue`, `loaded_miles`, `deadhead_miles`,
/// `hours` and `pallets`. The optional `pickup_city`, `dropoff_city`,
/// `date`, `notes`, `pickup_lat`, `pickup_lon`, `dropoff_lat` and
/// `dropoff_lon` columns fill [`JobDetails`]. Fields are trimmed and blank
/// fields count as absent. A point is attached only when both of its
/// coordinates are present.
///
/// Records without an id are named `row N` in errors, counting data rows
/// from one.
///
/// # Examples
/// ```
/// use haulplan_data::read_jobs;
///
/// let csv = "id,revenue,loaded_miles,deadhead_miles,hours,pallets,pickup_city\n\
///            J1,700,120,15,3,2,Leeds\n";
/// let jobs = read_jobs(csv.as_bytes()).unwrap();
/// assert_eq!(jobs[0].id, "J1");
/// assert_eq!(jobs[0].details.pickup_city.as_deref(), Some("Leeds"));
/// ```
pub fn read_jobs<R: Read>(reader: R) -> Result<Vec<Job>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut jobs = Vec::new();

    for (index, record) in csv_reader.deserialize::<JobRow>().enumerate() {
        let row = index.saturating_add(1);
        let raw = record.map_err(|source| IngestError::Csv { source, row })?;
        jobs.push(raw.into_job(row)?);
    }

    validate_jobs(&jobs)?;
    log::debug!("read {} jobs", jobs.len());
    Ok(jobs)
}

/// Open `path` and read jobs from it with [`read_jobs`].
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use haulplan_data::load_jobs;
///
/// # fn main() -> Result<(), haulplan_data::IngestError> {
/// let jobs = load_jobs(Utf8Path::new("loads.csv"))?;
/// println!("{} candidate jobs", jobs.len());
/// # Ok(())
/// # }
/// ```
pub fn load_jobs(path: &Utf8Path) -> Result<Vec<Job>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    read_jobs(file)
}

#[derive(Debug, Deserialize)]
struct JobRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    revenue: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    loaded_miles: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    deadhead_miles: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    hours: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pallets: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pickup_city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    dropoff_city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pickup_lat: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pickup_lon: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    dropoff_lat: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    dropoff_lon: Option<String>,
}

impl JobRow {
    fn into_job(self, row: usize) -> Result<Job, ValidationError> {
        let Some(id) = self.id else {
            return Err(ValidationError::MissingField {
                record: format!("row {row}"),
                field: "id",
            });
        };
        let field = |name: &'static str, raw: Option<String>| required(&id, name, raw);
        let revenue = field("revenue", self.revenue)?;
        let loaded_miles = field("loaded_miles", self.loaded_miles)?;
        let deadhead_miles = field("deadhead_miles", self.deadhead_miles)?;
        let hours = field("hours", self.hours)?;
        let pallets = field("pallets", self.pallets)?;

        let details = JobDetails {
            pickup_city: self.pickup_city,
            dropoff_city: self.dropoff_city,
            date: self.date,
            notes: self.notes,
            pickup_location: point(
                &id,
                ("pickup_lat", self.pickup_lat),
                ("pickup_lon", self.pickup_lon),
            )?,
            dropoff_location: point(
                &id,
                ("dropoff_lat", self.dropoff_lat),
                ("dropoff_lon", self.dropoff_lon),
            )?,
        };
        let job = Job::new(id, revenue, loaded_miles, deadhead_miles, hours, pallets)
            .with_details(details);
        job.validate()?;
        Ok(job)
    }
}

fn required(
    record: &str,
    field: &'static str,
    raw: Option<String>,
) -> Result<f64, ValidationError> {
    optional(record, field, raw)?.ok_or_else(|| ValidationError::MissingField {
        record: record.to_owned(),
        field,
    })
}

fn optional(
    record: &str,
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<f64>, ValidationError> {
    raw.map(|value| {
        value
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidNumber {
                record: record.to_owned(),
                field,
                value,
            })
    })
    .transpose()
}

type CoordinateField = (&'static str, Option<String>);

fn point(
    record: &str,
    (lat_field, lat): CoordinateField,
    (lon_field, lon): CoordinateField,
) -> Result<Option<Coord<f64>>, ValidationError> {
    let latitude = optional(record, lat_field, lat)?;
    let longitude = optional(record, lon_field, lon)?;
    let (Some(y), Some(x)) = (latitude, longitude) else {
        return Ok(None);
    };
    for (field, value, limit) in [(lat_field, y, 90.0), (lon_field, x, 180.0)] {
        if !value.is_finite() || value.abs() > limit {
            return Err(ValidationError::OutOfRange {
                record: record.to_owned(),
                field,
                value,
            });
        }
    }
    Ok(Some(Coord { x, y }))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    const HEADER: &str = "id,revenue,loaded_miles,deadhead_miles,hours,pallets";

    fn parse(rows: &str) -> Result<Vec<Job>, IngestError> {
        read_jobs(format!("{HEADER}\n{rows}").as_bytes())
    }

    #[rstest]
    fn reads_required_columns() {
        let jobs = parse("1,700,120,0,3,2\n2,500,60,0,2,1\n").expect("valid CSV");
        assert_eq!(jobs.len(), 2);
        let first = jobs.first().expect("first job");
        assert_eq!(first, &Job::new("1", 700.0, 120.0, 0.0, 3.0, 2.0));
    }

    #[rstest]
    fn trims_fields_and_reads_metadata() {
        let csv = "id, revenue, loaded_miles, deadhead_miles, hours, pallets, pickup_city, notes, date\n\
                   J7 , 650 , 100 , 5 , 3 , 2 , York , , 2024-03-02\n";
        let jobs = read_jobs(csv.as_bytes()).expect("valid CSV");
        let job = jobs.first().expect("one job");
        assert_eq!(job.id, "J7");
        assert_eq!(job.deadhead_miles, 5.0);
        assert_eq!(job.details.pickup_city.as_deref(), Some("York"));
        assert_eq!(job.details.notes, None);
        assert_eq!(job.details.date.as_deref(), Some("2024-03-02"));
    }

    #[rstest]
    #[case("1,700,,0,3,2", ValidationError::MissingField { record: "1".into(), field: "loaded_miles" })]
    #[case(",700,120,0,3,2", ValidationError::MissingField { record: "row 1".into(), field: "id" })]
    #[case(
        "1,seven,120,0,3,2",
        ValidationError::InvalidNumber { record: "1".into(), field: "revenue", value: "seven".into() }
    )]
    #[case("1,700,120,-4,3,2", ValidationError::Negative { record: "1".into(), field: "deadhead_miles", value: -4.0 })]
    #[case("1,700,120,0,NaN,2", ValidationError::NonFinite { record: "1".into(), field: "hours" })]
    fn rejects_invalid_records(#[case] row: &str, #[case] expected: ValidationError) {
        let err = parse(&format!("{row}\n")).expect_err("invalid record");
        match err {
            IngestError::Invalid(actual) => assert_eq!(actual, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[rstest]
    fn rejects_duplicate_ids() {
        let err = parse("1,700,120,0,3,2\n1,500,60,0,2,1\n").expect_err("duplicate");
        assert!(matches!(
            err,
            IngestError::Invalid(ValidationError::DuplicateId { .. })
        ));
    }

    #[rstest]
    fn attaches_points_only_when_complete() {
        let csv = format!(
            "{HEADER},pickup_lat,pickup_lon,dropoff_lat,dropoff_lon\n\
             1,700,120,0,3,2,53.8,-1.55,51.5,\n"
        );
        let jobs = read_jobs(csv.as_bytes()).expect("valid CSV");
        let details = &jobs.first().expect("one job").details;
        assert_eq!(details.pickup_location, Some(Coord { x: -1.55, y: 53.8 }));
        assert_eq!(details.dropoff_location, None);
    }

    #[rstest]
    #[case("north", "0")]
    #[case("95", "0")]
    fn rejects_bad_coordinates(#[case] lat: &str, #[case] lon: &str) {
        let csv = format!("{HEADER},pickup_lat,pickup_lon\n1,700,120,0,3,2,{lat},{lon}\n");
        let err = read_jobs(csv.as_bytes()).expect_err("bad coordinate");
        assert!(matches!(
            err,
            IngestError::Invalid(
                ValidationError::InvalidNumber { field: "pickup_lat", .. }
                    | ValidationError::OutOfRange { field: "pickup_lat", .. }
            )
        ));
    }

    #[rstest]
    fn ragged_rows_are_csv_errors() {
        let err = parse("1,700,120,0,3,2\n2,500\n").expect_err("ragged row");
        assert!(matches!(err, IngestError::Csv { row: 2, .. }));
    }

    #[rstest]
    fn loads_from_disk_and_reports_missing_files() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "{HEADER}\n1,700,120,0,3,2").expect("write CSV");
        let path = Utf8Path::from_path(file.path()).expect("UTF-8 temp path");
        assert_eq!(load_jobs(path).expect("loaded").len(), 1);

        let missing = path.with_extension("missing");
        let err = load_jobs(&missing).expect_err("missing file");
        assert!(matches!(err, IngestError::Open { path, .. } if path == missing));
    }
}
