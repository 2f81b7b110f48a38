use crate::domain::errors::PredictionError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five categorical fields of a market record, in the canonical order
/// used throughout the crate (matching the first five feature columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryField {
    District,
    Market,
    Commodity,
    Variety,
    Grade,
}

impl CategoryField {
    pub const ALL: [CategoryField; 5] = [
        CategoryField::District,
        CategoryField::Market,
        CategoryField::Commodity,
        CategoryField::Variety,
        CategoryField::Grade,
    ];

    /// The dataset/API column header for this field.
    pub fn column_name(&self) -> &'static str {
        match self {
            CategoryField::District => "District Name",
            CategoryField::Market => "Market Name",
            CategoryField::Commodity => "Commodity",
            CategoryField::Variety => "Variety",
            CategoryField::Grade => "Grade",
        }
    }

    /// Position of this field in [`CategoryField::ALL`].
    pub fn index(self) -> usize {
        match self {
            CategoryField::District => 0,
            CategoryField::Market => 1,
            CategoryField::Commodity => 2,
            CategoryField::Variety => 3,
            CategoryField::Grade => 4,
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for CategoryField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "district" | "district name" => Ok(CategoryField::District),
            "market" | "market name" => Ok(CategoryField::Market),
            "commodity" => Ok(CategoryField::Commodity),
            "variety" => Ok(CategoryField::Variety),
            "grade" => Ok(CategoryField::Grade),
            _ => anyhow::bail!(
                "Invalid field: {}. Must be one of 'District Name', 'Market Name', \
                 'Commodity', 'Variety', or 'Grade'",
                s
            ),
        }
    }
}

/// The wire shape of a prediction request, keyed exactly as the public API
/// expects. Every field is optional so that a missing key surfaces as a
/// typed `MissingField` error rather than a deserialization failure.
/// Temperature arrives as a raw JSON value because callers send both
/// numbers and numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPredictionRequest {
    #[serde(rename = "Commodity")]
    pub commodity: Option<String>,
    #[serde(rename = "Variety")]
    pub variety: Option<String>,
    #[serde(rename = "Grade")]
    pub grade: Option<String>,
    #[serde(rename = "District Name")]
    pub district: Option<String>,
    #[serde(rename = "Market Name")]
    pub market: Option<String>,
    #[serde(rename = "Price Date")]
    pub price_date: Option<String>,
    #[serde(rename = "Temperature")]
    pub temperature: Option<serde_json::Value>,
}

impl RawPredictionRequest {
    /// Validates presence and syntax of every field, producing a well-formed
    /// [`PredictionRequest`]. Categorical values are passed through verbatim
    /// (no trimming or case folding); vocabulary membership is checked later
    /// by the encoder registry.
    pub fn validate(self) -> Result<PredictionRequest, PredictionError> {
        let commodity = require(self.commodity, "Commodity")?;
        let variety = require(self.variety, "Variety")?;
        let grade = require(self.grade, "Grade")?;
        let district = require(self.district, "District Name")?;
        let market = require(self.market, "Market Name")?;
        let date_str = require(self.price_date, "Price Date")?;
        let temp_value = require(self.temperature, "Temperature")?;

        let price_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
            PredictionError::InvalidDate {
                value: date_str.clone(),
            }
        })?;

        let temperature = parse_temperature(&temp_value)?;

        Ok(PredictionRequest {
            commodity,
            variety,
            grade,
            district,
            market,
            price_date,
            temperature,
        })
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, PredictionError> {
    value.ok_or_else(|| PredictionError::MissingField {
        field: field.to_string(),
    })
}

fn parse_temperature(value: &serde_json::Value) -> Result<f64, PredictionError> {
    let invalid = || PredictionError::InvalidTemperature {
        value: value.to_string(),
    };

    match value {
        serde_json::Value::Number(n) => n.as_f64().ok_or_else(invalid),
        serde_json::Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// A validated prediction request: syntax checked, not yet encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub commodity: String,
    pub variety: String,
    pub grade: String,
    pub district: String,
    pub market: String,
    pub price_date: NaiveDate,
    pub temperature: f64,
}

impl PredictionRequest {
    /// The raw label for one categorical field of this request.
    pub fn category(&self, field: CategoryField) -> &str {
        match field {
            CategoryField::District => &self.district,
            CategoryField::Market => &self.market,
            CategoryField::Commodity => &self.commodity,
            CategoryField::Variety => &self.variety,
            CategoryField::Grade => &self.grade,
        }
    }
}

/// A predicted modal price in Rs./Quintal. The model may emit any real
/// number; no clamping is applied here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PredictedPrice(pub f64);

impl PredictedPrice {
    pub fn value(&self) -> f64 {
        self.0
    }
}
