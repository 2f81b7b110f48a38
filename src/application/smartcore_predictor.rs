use super::predictor::PricePredictor;
use crate::domain::errors::PredictionError;
use crate::domain::feature_order::FeatureVector;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

/// The concrete random forest type all artifacts serialize to.
pub type ForestModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Price predictor backed by a pre-trained smartcore random forest.
/// The model is loaded by the artifact layer before construction; an
/// unloadable model is a startup failure, never a degraded predictor.
pub struct SmartCorePredictor {
    model: ForestModel,
}

impl SmartCorePredictor {
    pub fn new(model: ForestModel) -> Self {
        Self { model }
    }
}

impl PricePredictor for SmartCorePredictor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let input_matrix = DenseMatrix::from_2d_vec(&vec![features.to_vec()]).map_err(|e| {
            PredictionError::PredictionFailed {
                reason: format!("Matrix creation failed: {}", e),
            }
        })?;

        let predictions =
            self.model
                .predict(&input_matrix)
                .map_err(|e| PredictionError::PredictionFailed {
                    reason: e.to_string(),
                })?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| PredictionError::PredictionFailed {
                reason: "No prediction returned".to_string(),
            })
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}
