//! End-to-end tests of the predictive core over in-memory artifacts:
//! a small reference dataset, a registry fit from it, and either a fake
//! predictor or a freshly trained smartcore forest.

use agripredict::application::assembler::FeatureAssembler;
use agripredict::application::encoder::EncoderRegistry;
use agripredict::application::options::OptionResolver;
use agripredict::application::predictor::PricePredictor;
use agripredict::application::service::PredictionService;
use agripredict::application::smartcore_predictor::SmartCorePredictor;
use agripredict::domain::errors::PredictionError;
use agripredict::domain::feature_order::FeatureVector;
use agripredict::domain::types::{CategoryField, RawPredictionRequest};
use agripredict::infrastructure::dataset::ReferenceDataset;
use serde_json::json;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::sync::Arc;

const SAMPLE_CSV: &str = "\
District Name,Market Name,Commodity,Variety,Grade,Price Date,Temperature,Modal Price (Rs./Quintal)
Srinagar,Ganderbal,Apple,American,Medium,2024-03-18,5.6,4200
Srinagar,Ganderbal,Apple,Delicious,Large,2024-03-19,6.1,5100
Srinagar,Parimpora,Apple,American,Small,2024-03-22,7.2,3950
Jammu,Narwal,Banana,Robusta,Medium,2024-04-02,21.3,2750
Jammu,Narwal,Banana,Robusta,Small,2024-04-03,22.0,2600
Srinagar,Parimpora,Cherry,Mishri,Large,2024-05-11,14.5,9800
";

struct FixedPredictor(f64);

impl PricePredictor for FixedPredictor {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictionError> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "Fixed"
    }

    fn version(&self) -> &str {
        "test"
    }
}

fn sample_dataset() -> ReferenceDataset {
    ReferenceDataset::from_reader(SAMPLE_CSV.as_bytes()).unwrap()
}

fn service_with(predictor: Box<dyn PricePredictor>) -> PredictionService {
    let dataset = sample_dataset();
    let registry = Arc::new(EncoderRegistry::fit(&dataset));
    let options = OptionResolver::from_dataset(&dataset);
    PredictionService::new(registry, predictor, options)
}

fn apple_request() -> RawPredictionRequest {
    serde_json::from_value(json!({
        "Commodity": "Apple",
        "Variety": "American",
        "Grade": "Medium",
        "District Name": "Srinagar",
        "Market Name": "Ganderbal",
        "Price Date": "2024-03-18",
        "Temperature": 5.6,
    }))
    .unwrap()
}

#[test]
fn predict_runs_full_pipeline_to_model_output() {
    let service = service_with(Box::new(FixedPredictor(4321.5)));

    let price = service.predict(apple_request()).unwrap();
    assert_eq!(price.value(), 4321.5);
}

#[test]
fn predict_reports_missing_field() {
    let service = service_with(Box::new(FixedPredictor(0.0)));
    let mut raw = apple_request();
    raw.price_date = None;

    let err = service.predict(raw).unwrap_err();
    assert!(matches!(
        err,
        PredictionError::MissingField { ref field } if field == "Price Date"
    ));
}

#[test]
fn predict_reports_unknown_category() {
    let service = service_with(Box::new(FixedPredictor(0.0)));
    let mut raw = apple_request();
    raw.commodity = Some("UnknownFruitXYZ".to_string());

    let err = service.predict(raw).unwrap_err();
    assert!(matches!(
        err,
        PredictionError::UnknownCategory {
            field: CategoryField::Commodity,
            ref value,
        } if value == "UnknownFruitXYZ"
    ));
}

#[test]
fn predict_reports_invalid_date() {
    let service = service_with(Box::new(FixedPredictor(0.0)));
    let mut raw = apple_request();
    raw.price_date = Some("not-a-date".to_string());

    let err = service.predict(raw).unwrap_err();
    assert!(matches!(err, PredictionError::InvalidDate { .. }));
}

#[test]
fn predict_reports_invalid_temperature() {
    let service = service_with(Box::new(FixedPredictor(0.0)));
    let mut raw = apple_request();
    raw.temperature = Some(json!("warm"));

    let err = service.predict(raw).unwrap_err();
    assert!(matches!(err, PredictionError::InvalidTemperature { .. }));
}

#[test]
fn known_values_are_sorted_and_match_dataset() {
    let service = service_with(Box::new(FixedPredictor(0.0)));
    let dataset = sample_dataset();

    for field in CategoryField::ALL {
        let known = service.known_values(field);
        assert_eq!(known, dataset.distinct_values(field).as_slice());

        let mut sorted = known.to_vec();
        sorted.sort();
        assert_eq!(known, sorted.as_slice());
    }
}

#[test]
fn encode_decode_round_trips_every_known_label() {
    let registry = EncoderRegistry::fit(&sample_dataset());

    for field in CategoryField::ALL {
        for label in registry.known_values(field).to_vec() {
            let code = registry.encode(field, &label).unwrap();
            assert_eq!(registry.decode(field, code), Some(label.as_str()));
        }
    }
}

#[test]
fn resolve_dependent_returns_cooccurring_values_only() {
    let service = service_with(Box::new(FixedPredictor(0.0)));

    let varieties =
        service.resolve_dependent(CategoryField::Commodity, "Apple", CategoryField::Variety);
    assert_eq!(
        varieties,
        vec!["American".to_string(), "Delicious".to_string()]
    );

    // Every returned value really co-occurs with Apple on some row.
    for variety in &varieties {
        assert!(service.combination_exists(&[
            (CategoryField::Commodity, "Apple"),
            (CategoryField::Variety, variety),
        ]));
    }

    // Zero matching rows means an empty list, not an error.
    let none = service.resolve_dependent(CategoryField::Commodity, "Mango", CategoryField::Variety);
    assert!(none.is_empty());
}

/// Trains a small seeded forest on synthetic rows shaped like real feature
/// vectors, so inference runs against an actual smartcore model.
fn trained_forest_predictor() -> SmartCorePredictor {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut targets: Vec<f64> = Vec::new();

    for i in 0..40 {
        let district = (i % 2) as f64;
        let market = (i % 3) as f64;
        let commodity = (i % 3) as f64;
        let variety = (i % 4) as f64;
        let grade = (i % 3) as f64;
        let year = 2023.0 + (i % 2) as f64;
        let month = 1.0 + (i % 12) as f64;
        let temperature = 4.0 + (i as f64) * 0.7;

        rows.push(vec![
            district,
            market,
            commodity,
            variety,
            grade,
            year,
            month,
            temperature,
        ]);
        targets.push(2500.0 + 900.0 * commodity + 40.0 * temperature - 25.0 * month);
    }

    let x = DenseMatrix::from_2d_vec(&rows).unwrap();
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(16)
        .with_seed(42);
    let model = RandomForestRegressor::fit(&x, &targets, params).unwrap();

    SmartCorePredictor::new(model)
}

#[test]
fn smartcore_prediction_is_deterministic() {
    let dataset = sample_dataset();
    let registry = Arc::new(EncoderRegistry::fit(&dataset));
    let assembler = FeatureAssembler::new(registry);
    let predictor = trained_forest_predictor();

    let request = apple_request().validate().unwrap();
    let features = assembler.assemble(&request).unwrap();

    let first = predictor.predict(&features).unwrap();
    let second = predictor.predict(&features).unwrap();
    assert_eq!(first, second);
    assert!(first.is_finite());
}

#[test]
fn service_predictions_repeat_for_identical_requests() {
    let dataset = sample_dataset();
    let registry = Arc::new(EncoderRegistry::fit(&dataset));
    let options = OptionResolver::from_dataset(&dataset);
    let service =
        PredictionService::new(registry, Box::new(trained_forest_predictor()), options);

    let first = service.predict(apple_request()).unwrap();
    let second = service.predict(apple_request()).unwrap();
    assert_eq!(first.value(), second.value());
}
