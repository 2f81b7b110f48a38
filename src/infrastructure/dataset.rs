use crate::domain::types::CategoryField;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io;
use tracing::warn;

/// One historical market observation from the reference dataset CSV.
/// Categorical cells may be blank; such cells are carried as `None` and
/// excluded from vocabularies and co-occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRecord {
    #[serde(rename = "District Name")]
    pub district: Option<String>,
    #[serde(rename = "Market Name")]
    pub market: Option<String>,
    #[serde(rename = "Commodity")]
    pub commodity: Option<String>,
    #[serde(rename = "Variety")]
    pub variety: Option<String>,
    #[serde(rename = "Grade")]
    pub grade: Option<String>,
    #[serde(rename = "Price Date")]
    pub price_date: Option<NaiveDate>,
    #[serde(rename = "Temperature")]
    pub temperature: Option<f64>,
    #[serde(rename = "Modal Price (Rs./Quintal)")]
    pub modal_price: Option<f64>,
}

impl MarketRecord {
    /// The value of one categorical column, if present.
    pub fn category(&self, field: CategoryField) -> Option<&str> {
        match field {
            CategoryField::District => self.district.as_deref(),
            CategoryField::Market => self.market.as_deref(),
            CategoryField::Commodity => self.commodity.as_deref(),
            CategoryField::Variety => self.variety.as_deref(),
            CategoryField::Grade => self.grade.as_deref(),
        }
    }
}

/// The historical tabular data behind dropdown vocabularies and
/// co-occurrence constraints. Loaded once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    records: Vec<MarketRecord>,
}

impl ReferenceDataset {
    pub fn from_records(records: Vec<MarketRecord>) -> Self {
        Self { records }
    }

    /// Reads CSV rows, dropping any row that fails to parse (bad date,
    /// non-numeric temperature, ragged line) as the training pipeline did.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        let mut dropped = 0usize;

        for row in csv_reader.deserialize::<MarketRecord>() {
            match row {
                Ok(record) => records.push(record),
                Err(_) => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!("Dropped {} unparseable reference dataset rows", dropped);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[MarketRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-missing values of one categorical column, sorted
    /// ascending.
    pub fn distinct_values(&self, field: CategoryField) -> Vec<String> {
        let distinct: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|record| record.category(field))
            .collect();

        distinct.into_iter().map(str::to_string).collect()
    }
}
