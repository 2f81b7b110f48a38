use crate::application::assembler::FeatureAssembler;
use crate::application::encoder::EncoderRegistry;
use crate::application::options::OptionResolver;
use crate::application::predictor::PricePredictor;
use crate::domain::errors::PredictionError;
use crate::domain::types::{CategoryField, PredictedPrice, RawPredictionRequest};
use std::sync::Arc;
use tracing::{debug, info};

/// The request boundary of the predictive core: validate, assemble,
/// predict. Stateless per request over read-only collaborators, so one
/// instance serves any number of threads.
pub struct PredictionService {
    registry: Arc<EncoderRegistry>,
    assembler: FeatureAssembler,
    predictor: Box<dyn PricePredictor>,
    options: OptionResolver,
}

impl PredictionService {
    pub fn new(
        registry: Arc<EncoderRegistry>,
        predictor: Box<dyn PricePredictor>,
        options: OptionResolver,
    ) -> Self {
        info!(
            "Prediction service ready: {} {}",
            predictor.name(),
            predictor.version()
        );

        Self {
            assembler: FeatureAssembler::new(registry.clone()),
            registry,
            predictor,
            options,
        }
    }

    /// Runs one raw request through the full pipeline. Every failure comes
    /// back as a typed [`PredictionError`]; nothing here panics on bad
    /// input.
    pub fn predict(&self, raw: RawPredictionRequest) -> Result<PredictedPrice, PredictionError> {
        let request = raw.validate()?;
        let features = self.assembler.assemble(&request)?;
        let price = self.predictor.predict(&features)?;

        debug!(
            "Predicted {:.2} for {} / {} on {}",
            price, request.commodity, request.market, request.price_date
        );

        Ok(PredictedPrice(price))
    }

    /// Full sorted vocabulary of one field, for dropdown initialization.
    pub fn known_values(&self, field: CategoryField) -> &[String] {
        self.registry.known_values(field)
    }

    /// Cascading dropdown filter; see [`OptionResolver::resolve_dependent`].
    pub fn resolve_dependent(
        &self,
        parent_field: CategoryField,
        parent_value: &str,
        child_field: CategoryField,
    ) -> Vec<String> {
        self.options
            .resolve_dependent(parent_field, parent_value, child_field)
    }

    /// True iff the given (field, value) pairs appear together on some
    /// reference dataset row.
    pub fn combination_exists(&self, pairs: &[(CategoryField, &str)]) -> bool {
        self.options.combination_exists(pairs)
    }
}
