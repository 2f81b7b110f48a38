use crate::domain::types::CategoryField;
use crate::infrastructure::dataset::ReferenceDataset;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Answers "which values of field B co-occur with this value of field A"
/// for cascading dropdowns, plus whole-combination existence checks.
///
/// The pairwise index is precomputed once from the reference dataset at
/// load time; serving requests only read it. Rows are also kept as compact
/// categorical tuples for multi-field combination checks, which the
/// pairwise index cannot answer.
pub struct OptionResolver {
    index: HashMap<CategoryField, HashMap<String, BTreeMap<CategoryField, BTreeSet<String>>>>,
    rows: Vec<[Option<String>; CategoryField::ALL.len()]>,
}

impl OptionResolver {
    pub fn from_dataset(dataset: &ReferenceDataset) -> Self {
        let mut index: HashMap<
            CategoryField,
            HashMap<String, BTreeMap<CategoryField, BTreeSet<String>>>,
        > = HashMap::new();
        let mut rows = Vec::with_capacity(dataset.len());

        for record in dataset.records() {
            let tuple: [Option<String>; CategoryField::ALL.len()] =
                CategoryField::ALL.map(|field| record.category(field).map(str::to_string));

            for parent in CategoryField::ALL {
                let Some(parent_value) = record.category(parent) else {
                    continue;
                };

                let children = index
                    .entry(parent)
                    .or_default()
                    .entry(parent_value.to_string())
                    .or_default();

                for child in CategoryField::ALL {
                    if child == parent {
                        continue;
                    }
                    if let Some(child_value) = record.category(child) {
                        children
                            .entry(child)
                            .or_default()
                            .insert(child_value.to_string());
                    }
                }
            }

            rows.push(tuple);
        }

        Self { index, rows }
    }

    /// Distinct values of `child_field` across the dataset rows whose
    /// `parent_field` equals `parent_value`, sorted ascending. Empty when
    /// no row matches; an unknown parent value is not an error here.
    pub fn resolve_dependent(
        &self,
        parent_field: CategoryField,
        parent_value: &str,
        child_field: CategoryField,
    ) -> Vec<String> {
        self.index
            .get(&parent_field)
            .and_then(|by_value| by_value.get(parent_value))
            .and_then(|children| children.get(&child_field))
            .map(|values| values.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// True iff some dataset row carries all the given (field, value) pairs
    /// at once. Used to flag label combinations the model never saw
    /// together, e.g. a commodity/variety/grade triple.
    pub fn combination_exists(&self, pairs: &[(CategoryField, &str)]) -> bool {
        self.rows.iter().any(|row| {
            pairs
                .iter()
                .all(|(field, value)| row[field.index()].as_deref() == Some(*value))
        })
    }
}
