//! Inference for a single validated house.

use hearth_core::{round_price, HouseFeatures, Regressor};
use tracing::{debug, error};

use crate::error::AppError;

/// Validates `features`, evaluates `model` and rounds the result to cents.
pub fn predict_price(model: &dyn Regressor, features: &HouseFeatures) -> Result<f64, AppError> {
    features.validate().map_err(AppError::from)?;

    let raw = model.predict(features).map_err(|e| {
        error!("Prediction failed: {}", e);
        AppError::Inference(e.to_string())
    })?;

    let price = round_price(raw);
    debug!(raw, price, "prediction");
    Ok(price)
}
