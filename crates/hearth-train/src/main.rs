use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hearth_config::{
    TrainConfig, DATASET_SOURCE_ENV, DEFAULT_DATASET_SOURCE, DEFAULT_MODEL_PATH, DEFAULT_SEED,
    DEFAULT_TEST_FRACTION, MODEL_PATH_ENV, TEST_FRACTION_ENV, TRAIN_SEED_ENV,
};
use tracing::info;

/// Fit the house-price model and write the artifact the server loads.
#[derive(Parser, Debug)]
#[command(name = "hearth-train", version, about)]
struct Cli {
    /// Dataset URL (http/https) or local CSV path
    #[arg(long, env = DATASET_SOURCE_ENV, default_value = DEFAULT_DATASET_SOURCE)]
    source: String,

    /// Where to write the model artifact
    #[arg(long, env = MODEL_PATH_ENV, default_value = DEFAULT_MODEL_PATH)]
    output: PathBuf,

    /// Shuffle seed for the train/test split
    #[arg(long, env = TRAIN_SEED_ENV, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Fraction of rows held out for evaluation
    #[arg(long, env = TEST_FRACTION_ENV, default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f64,
}

impl From<Cli> for TrainConfig {
    fn from(cli: Cli) -> Self {
        TrainConfig {
            source: cli.source,
            output: cli.output,
            seed: cli.seed,
            test_fraction: cli.test_fraction,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config: TrainConfig = Cli::parse().into();
    info!(
        "Training with source={} seed={} test_fraction={}",
        config.source, config.seed, config.test_fraction
    );

    let report = hearth_train::run(&config)
        .await
        .with_context(|| format!("training from {} failed", config.source))?;

    let artifact = &report.artifact;
    info!(
        "Model trained and saved to {} ({} features, intercept {:.4})",
        report.output.display(),
        artifact.features.len(),
        artifact.intercept
    );
    for (name, coef) in artifact.features.iter().zip(&artifact.coefficients) {
        info!("  {:<10} {:>12.6}", name, coef);
    }

    Ok(())
}
