//! agripredict - Commodity price prediction core
//!
//! Loads the trained model, the category encoder registry, and the
//! reference dataset at startup, then serves predictions and dropdown
//! queries over the command line. A missing or corrupt artifact aborts
//! startup; per-request errors come back as structured JSON.
//!
//! # Usage
//! ```sh
//! agripredict predict --input request.json
//! agripredict values --field "Commodity"
//! agripredict options --parent-field "Commodity" --parent-value "Apple" --child-field "Variety"
//! agripredict fit-encoders --output encoders.json
//! ```
//!
//! # Environment Variables
//! - `MODEL_PATH` - Serialized smartcore model (default: model.json)
//! - `ENCODERS_PATH` - Serialized encoder registry (default: encoders.json)
//! - `DATASET_PATH` - Reference dataset CSV (default: dataset.csv)

use agripredict::application::encoder::EncoderRegistry;
use agripredict::application::options::OptionResolver;
use agripredict::application::service::PredictionService;
use agripredict::application::smartcore_predictor::SmartCorePredictor;
use agripredict::config::ArtifactConfig;
use agripredict::domain::types::{CategoryField, RawPredictionRequest};
use agripredict::infrastructure::artifacts::Artifacts;
use agripredict::infrastructure::dataset::ReferenceDataset;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "agripredict", version, about = "Commodity price prediction core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict a modal price from a JSON request (file or stdin)
    Predict {
        /// Path to the request JSON; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// List the known values of one categorical field
    Values {
        /// Field name, e.g. "Commodity" or "District Name"
        #[arg(long)]
        field: String,
    },
    /// List the values of a dependent field compatible with a selection
    Options {
        #[arg(long)]
        parent_field: String,
        #[arg(long)]
        parent_value: String,
        #[arg(long)]
        child_field: String,
    },
    /// Fit the encoder registry from the reference dataset and write it out
    FitEncoders {
        /// Output path for the serialized registry
        #[arg(long, default_value = "encoders.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();
    let config = ArtifactConfig::from_env();

    match cli.command {
        Command::FitEncoders { output } => fit_encoders(&config, &output),
        Command::Predict { input } => {
            let service = build_service(&config)?;
            predict(&service, input)
        }
        Command::Values { field } => {
            let service = build_service(&config)?;
            let field: CategoryField = field.parse()?;
            print_json(&json!(service.known_values(field)))
        }
        Command::Options {
            parent_field,
            parent_value,
            child_field,
        } => {
            let service = build_service(&config)?;
            let parent: CategoryField = parent_field.parse()?;
            let child: CategoryField = child_field.parse()?;
            print_json(&json!(service.resolve_dependent(parent, &parent_value, child)))
        }
    }
}

/// Eager, fail-fast wiring: every artifact must load before any request is
/// answered.
fn build_service(config: &ArtifactConfig) -> Result<PredictionService> {
    info!("agripredict {} starting...", env!("CARGO_PKG_VERSION"));

    let artifacts = Artifacts::load(config).context("artifact loading failed")?;

    let registry = std::sync::Arc::new(artifacts.registry);
    let predictor = Box::new(SmartCorePredictor::new(artifacts.model));
    let options = OptionResolver::from_dataset(&artifacts.dataset);

    Ok(PredictionService::new(registry, predictor, options))
}

fn predict(service: &PredictionService, input: Option<PathBuf>) -> Result<()> {
    let raw = read_request(input)?;

    // Advisory check in the manner of the original strict validator: warn
    // when the commodity/variety/grade triple never co-occurred, but still
    // let the model extrapolate.
    if let (Some(commodity), Some(variety), Some(grade)) =
        (&raw.commodity, &raw.variety, &raw.grade)
    {
        let triple = [
            (CategoryField::Commodity, commodity.as_str()),
            (CategoryField::Variety, variety.as_str()),
            (CategoryField::Grade, grade.as_str()),
        ];
        if !service.combination_exists(&triple) {
            warn!(
                "Combination of Commodity '{}', Variety '{}', Grade '{}' \
                 does not occur in the reference dataset",
                commodity, variety, grade
            );
        }
    }

    match service.predict(raw) {
        Ok(price) => print_json(&json!({ "Predicted Modal Price": price.value() })),
        Err(e) => {
            print_json(&json!({ "error": e.to_string() }))?;
            std::process::exit(1);
        }
    }
}

fn read_request(input: Option<PathBuf>) -> Result<RawPredictionRequest> {
    let raw = match input {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open request file {:?}", path))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse request JSON in {:?}", path))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read request from stdin")?;
            serde_json::from_str(&buffer).context("failed to parse request JSON from stdin")?
        }
    };

    Ok(raw)
}

fn fit_encoders(config: &ArtifactConfig, output: &Path) -> Result<()> {
    let file = File::open(&config.dataset_path).with_context(|| {
        format!(
            "failed to open reference dataset {:?}",
            config.dataset_path
        )
    })?;
    let dataset = ReferenceDataset::from_reader(BufReader::new(file))
        .context("failed to parse reference dataset")?;
    anyhow::ensure!(!dataset.is_empty(), "reference dataset contains no usable rows");

    let registry = EncoderRegistry::fit(&dataset);

    let out = File::create(output)
        .with_context(|| format!("failed to create encoder output {:?}", output))?;
    serde_json::to_writer_pretty(BufWriter::new(out), &registry)
        .context("failed to serialize encoder registry")?;

    info!("Wrote encoder registry to {:?}", output);
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
