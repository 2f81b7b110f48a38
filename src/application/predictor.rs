use crate::domain::errors::PredictionError;
use crate::domain::feature_order::FeatureVector;

/// Interface for trained regression models.
pub trait PricePredictor: Send + Sync {
    /// Predict the modal price for one assembled feature vector.
    /// Must be deterministic: the same loaded model and the same vector
    /// always produce the same output.
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}
