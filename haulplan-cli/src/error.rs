//! Error types emitted by the haulplan CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use haulplan_core::ValidationError;
use haulplan_data::{ExportError, IngestError, MapError};
use thiserror::Error;

/// Errors emitted by the haulplan CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// An option merged to a value the planner cannot use.
    #[error("invalid --{field} value {value}: {reason}")]
    InvalidArgument {
        /// Flag name of the option.
        field: &'static str,
        /// Offending value.
        value: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name of the option.
        field: &'static str,
        /// Path that was not found.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name of the option.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name of the option.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading the job file failed.
    #[error("failed to read jobs: {0}")]
    Ingest(#[from] IngestError),
    /// The job set or cost configuration failed validation.
    #[error("cannot plan: {0}")]
    Plan(#[from] ValidationError),
    /// Writing the plan CSV failed.
    #[error("failed to export plan: {0}")]
    Export(#[from] ExportError),
    /// Writing the map points failed.
    #[error("failed to export map points: {0}")]
    Map(#[from] MapError),
    /// Serialising the JSON report failed.
    #[error("failed to serialise plan report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the report failed.
    #[error("failed to write plan report: {0}")]
    WriteReport(#[source] std::io::Error),
}
