use crate::application::encoder::EncoderRegistry;
use crate::application::smartcore_predictor::ForestModel;
use crate::config::ArtifactConfig;
use crate::domain::errors::ArtifactError;
use crate::domain::types::CategoryField;
use crate::infrastructure::dataset::ReferenceDataset;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// The three serialized inputs the serving process depends on. All of them
/// are loaded eagerly at startup; any failure is fatal before the first
/// request is accepted.
pub struct Artifacts {
    pub model: ForestModel,
    pub registry: EncoderRegistry,
    pub dataset: ReferenceDataset,
}

impl Artifacts {
    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactError> {
        let model: ForestModel = load_json("model", &config.model_path)?;
        info!("Loaded model from {:?}", config.model_path);

        let registry: EncoderRegistry = load_json("encoder registry", &config.encoders_path)?;
        info!("Loaded encoder registry from {:?}", config.encoders_path);

        let dataset = load_dataset(&config.dataset_path)?;
        info!(
            "Loaded reference dataset from {:?} ({} rows)",
            config.dataset_path,
            dataset.len()
        );

        check_vocabulary_consistency(&registry, &dataset);

        Ok(Self {
            model,
            registry,
            dataset,
        })
    }
}

fn load_json<T: DeserializeOwned>(artifact: &'static str, path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Corrupt {
        artifact,
        path: path.to_path_buf(),
        source,
    })
}

fn load_dataset(path: &Path) -> Result<ReferenceDataset, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        artifact: "reference dataset",
        path: path.to_path_buf(),
        source,
    })?;

    let dataset =
        ReferenceDataset::from_reader(BufReader::new(file)).map_err(|source| {
            ArtifactError::Dataset {
                path: path.to_path_buf(),
                source,
            }
        })?;

    if dataset.is_empty() {
        return Err(ArtifactError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    Ok(dataset)
}

/// The registry must have been fit on the same categorical domain the
/// dataset now shows, or encoder codes and dropdown contents silently
/// disagree. A mismatch is loud but not fatal: the registry stays the
/// source of truth for the model's vocabulary.
fn check_vocabulary_consistency(registry: &EncoderRegistry, dataset: &ReferenceDataset) {
    for field in CategoryField::ALL {
        let known = registry.known_values(field);
        let observed = dataset.distinct_values(field);

        if known != observed.as_slice() {
            warn!(
                "Vocabulary mismatch for {}: registry has {} labels, dataset has {}. \
                 Re-run fit-encoders against the current dataset.",
                field,
                known.len(),
                observed.len()
            );
        }
    }
}
