//! Trains on a local CSV and prices the example house offline.
//!
//! Run with: cargo run --example train_and_predict -- path/to/housing.csv

use hearth::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = std::env::args()
        .nth(1)
        .unwrap_or_else(|| hearth::config::DEFAULT_DATASET_SOURCE.to_string());

    let config = TrainConfig {
        source,
        output: std::env::temp_dir().join("hearth-example/model.json"),
        ..TrainConfig::default()
    };

    let report = hearth::train::run(&config).await?;
    println!("Artifact: {}", report.output.display());
    if let Some(training) = &report.artifact.training {
        let eval = training.evaluation;
        println!(
            "Held-out R² {:.4}, RMSE {:.4}, MAE {:.4} ({} rows)",
            eval.r2, eval.rmse, eval.mae, training.test_rows
        );
    }

    let model = report.artifact.model();
    let house = HouseFeatures {
        med_inc: 8.3252,
        house_age: 41.0,
        ave_rooms: 6.98,
        ave_bedrms: 1.02,
        population: 322.0,
        ave_occup: 2.55,
        latitude: 37.88,
        longitude: -122.23,
    };

    let price = round_price(model.predict(&house)?);
    println!("\nFeatures:");
    for feature in Feature::ALL {
        println!("  {:<10} {:>10.4}", feature.name(), house.get(feature));
    }
    println!("Predicted price: {price} (${:.2})", price * 100_000.0);

    Ok(())
}
