//! Configuration module for agripredict.
//!
//! Artifact locations are loaded from environment variables with sensible
//! defaults, so a checkout with artifacts in the working directory runs
//! without any configuration.

use std::env;
use std::path::PathBuf;

/// Paths of the three startup artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub encoders_path: PathBuf,
    pub dataset_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.json"),
            encoders_path: PathBuf::from("encoders.json"),
            dataset_path: PathBuf::from("dataset.csv"),
        }
    }
}

impl ArtifactConfig {
    /// Reads `MODEL_PATH`, `ENCODERS_PATH`, and `DATASET_PATH`, falling
    /// back to the defaults for any that are unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            encoders_path: env::var("ENCODERS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.encoders_path),
            dataset_path: env::var("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
        }
    }
}
