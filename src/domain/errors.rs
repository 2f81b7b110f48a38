use crate::domain::types::CategoryField;
use std::path::PathBuf;
use thiserror::Error;

/// Per-request errors. All of these are reported back to the caller as a
/// structured response; none of them terminate the serving process.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Unknown {field} value: '{value}'")]
    UnknownCategory { field: CategoryField, value: String },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid temperature '{value}': expected a number")]
    InvalidTemperature { value: String },

    #[error("Prediction failed: {reason}")]
    PredictionFailed { reason: String },
}

/// Startup-only artifact failures. Any of these is fatal: the process must
/// not serve requests with a missing or corrupt model, encoder registry, or
/// reference dataset.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read {artifact} from {path:?}: {source}")]
    Io {
        artifact: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to deserialize {artifact} from {path:?}: {source}")]
    Corrupt {
        artifact: &'static str,
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse reference dataset at {path:?}: {source}")]
    Dataset { path: PathBuf, source: csv::Error },

    #[error("Reference dataset at {path:?} contains no usable rows")]
    EmptyDataset { path: PathBuf },
}
