use crate::application::encoder::EncoderRegistry;
use crate::domain::errors::PredictionError;
use crate::domain::feature_order::FeatureVector;
use crate::domain::types::PredictionRequest;
use chrono::Datelike;
use std::sync::Arc;

/// Turns a validated request into the numeric feature vector the predictor
/// was trained on: encode the five categorical labels, split the date into
/// year and month, keep temperature as-is. The output order is fixed by
/// [`crate::domain::feature_order::FEATURE_NAMES`].
pub struct FeatureAssembler {
    registry: Arc<EncoderRegistry>,
}

impl FeatureAssembler {
    pub fn new(registry: Arc<EncoderRegistry>) -> Self {
        Self { registry }
    }

    pub fn assemble(&self, request: &PredictionRequest) -> Result<FeatureVector, PredictionError> {
        use crate::domain::types::CategoryField::*;

        let district = self.registry.encode(District, &request.district)?;
        let market = self.registry.encode(Market, &request.market)?;
        let commodity = self.registry.encode(Commodity, &request.commodity)?;
        let variety = self.registry.encode(Variety, &request.variety)?;
        let grade = self.registry.encode(Grade, &request.grade)?;

        // Naive calendar date, no timezone involved.
        let year = request.price_date.year() as f64;
        let month = request.price_date.month() as f64;

        Ok(FeatureVector::new([
            district as f64,
            market as f64,
            commodity as f64,
            variety as f64,
            grade as f64,
            year,
            month,
            request.temperature,
        ]))
    }
}
