/// Ordered list of feature column names.
/// This order MUST match exactly the order the regression model was trained
/// with. Any change here is a breaking change for serialized models: the
/// predictor gives no error for a reordered vector, it just returns wrong
/// prices.
pub const FEATURE_NAMES: &[&str] = &[
    "District Name",
    "Market Name",
    "Commodity",
    "Variety",
    "Grade",
    "year",
    "month",
    "Temperature",
];

/// The numeric input row fed to the predictor: five category codes, then
/// year, month, and temperature, in [`FEATURE_NAMES`] order. Built per
/// request by the feature assembler and consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FeatureVector::LEN]);

impl FeatureVector {
    pub const LEN: usize = 8;

    pub(crate) fn new(values: [f64; Self::LEN]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_length_matches_names() {
        assert_eq!(FeatureVector::LEN, FEATURE_NAMES.len());
    }

    #[test]
    fn test_training_column_order_is_pinned() {
        // Categorical codes first, then date parts, temperature last.
        assert_eq!(
            FEATURE_NAMES,
            &[
                "District Name",
                "Market Name",
                "Commodity",
                "Variety",
                "Grade",
                "year",
                "month",
                "Temperature",
            ]
        );
    }
}
