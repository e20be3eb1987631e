//! Validation errors raised before optimisation starts.

use thiserror::Error;

use crate::ProblemShapeError;

/// A job record or cost configuration that cannot be planned.
///
/// `record` names the offending job: its id when known, otherwise a
/// positional label such as `row 3` supplied by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field was absent or empty.
    #[error("record {record}: missing required field `{field}`")]
    MissingField {
        /// Offending record.
        record: String,
        /// Name of the missing field.
        field: &'static str,
    },
    /// A numeric field did not parse as a number.
    #[error("record {record}: field `{field}` is not a number: {value:?}")]
    InvalidNumber {
        /// Offending record.
        record: String,
        /// Name of the field.
        field: &'static str,
        /// Raw text found in the field.
        value: String,
    },
    /// A numeric field was NaN or infinite.
    #[error("record {record}: field `{field}` must be finite")]
    NonFinite {
        /// Offending record.
        record: String,
        /// Name of the field.
        field: &'static str,
    },
    /// A numeric field that must be non-negative was negative.
    #[error("record {record}: field `{field}` must be non-negative, found {value}")]
    Negative {
        /// Offending record.
        record: String,
        /// Name of the field.
        field: &'static str,
        /// Value found in the field.
        value: f64,
    },
    /// A value cannot be represented as a fixed-point quantity.
    #[error("record {record}: field `{field}` is out of range: {value}")]
    OutOfRange {
        /// Offending record.
        record: String,
        /// Name of the field.
        field: &'static str,
        /// Value found in the field.
        value: f64,
    },
    /// Two jobs share an identifier.
    #[error("duplicate job id {id:?}")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },
    /// A cost configuration parameter is unusable.
    #[error("configuration field `{field}` is invalid: {value} ({reason})")]
    InvalidConfig {
        /// Name of the configuration field.
        field: &'static str,
        /// Value supplied.
        value: f64,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// Constraint coefficients did not line up with the priced jobs.
    #[error(transparent)]
    ProblemShape(#[from] ProblemShapeError),
}
