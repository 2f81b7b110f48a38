use crate::domain::errors::PredictionError;
use crate::domain::types::CategoryField;
use crate::infrastructure::dataset::ReferenceDataset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// A frozen bijection between the known labels of one categorical field and
/// dense integer codes. Codes are assigned by lexicographic label order at
/// fit time, starting at 0, matching how the model's training pipeline
/// encoded the same columns. Never mutated after construction.
///
/// The serialized form is just the sorted label list; the reverse map is
/// rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryEncoder {
    labels: Vec<String>,
    codes: HashMap<String, u32>,
}

impl CategoryEncoder {
    pub fn from_labels(mut labels: Vec<String>) -> Self {
        labels.sort();
        labels.dedup();

        let codes = labels
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code as u32))
            .collect();

        Self { labels, codes }
    }

    /// Exact-match lookup; `None` for labels absent from the fit vocabulary.
    pub fn encode(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    pub fn decode(&self, code: u32) -> Option<&str> {
        self.labels.get(code as usize).map(String::as_str)
    }

    /// Known labels, sorted ascending. Index position equals code.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<Vec<String>> for CategoryEncoder {
    fn from(labels: Vec<String>) -> Self {
        Self::from_labels(labels)
    }
}

impl From<CategoryEncoder> for Vec<String> {
    fn from(encoder: CategoryEncoder) -> Self {
        encoder.labels
    }
}

/// One [`CategoryEncoder`] per categorical field. Fit once from the
/// reference dataset, serialized alongside the model, and read-only at
/// serve time, so concurrent requests need no locking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderRegistry {
    encoders: BTreeMap<CategoryField, CategoryEncoder>,
}

impl EncoderRegistry {
    /// Builds the registry from the distinct non-missing values of each
    /// categorical column. This is the single source of truth for category
    /// vocabularies: the same dataset must have been used to train the
    /// model, or codes will silently disagree.
    pub fn fit(dataset: &ReferenceDataset) -> Self {
        let encoders = CategoryField::ALL
            .into_iter()
            .map(|field| {
                let encoder = CategoryEncoder::from_labels(dataset.distinct_values(field));
                info!(
                    "Fit encoder for {}: {} distinct labels",
                    field,
                    encoder.len()
                );
                (field, encoder)
            })
            .collect();

        Self { encoders }
    }

    pub fn encode(&self, field: CategoryField, label: &str) -> Result<u32, PredictionError> {
        self.encoders
            .get(&field)
            .and_then(|encoder| encoder.encode(label))
            .ok_or_else(|| PredictionError::UnknownCategory {
                field,
                value: label.to_string(),
            })
    }

    /// Inverse of [`encode`](Self::encode). Diagnostics only, not used by
    /// the prediction path.
    pub fn decode(&self, field: CategoryField, code: u32) -> Option<&str> {
        self.encoders.get(&field).and_then(|e| e.decode(code))
    }

    /// Sorted vocabulary for one field, for populating dropdown lists.
    pub fn known_values(&self, field: CategoryField) -> &[String] {
        self.encoders
            .get(&field)
            .map(CategoryEncoder::labels)
            .unwrap_or(&[])
    }
}
