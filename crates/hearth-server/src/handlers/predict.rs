use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use hearth_core::HouseFeatures;
use tracing::warn;

use crate::dto::PredictResponse;
use crate::error::AppError;
use crate::services::predict::predict_price;
use crate::state::AppState;

/// POST /predict - price one house.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<HouseFeatures>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(features) = payload.map_err(|rejection| {
        warn!("Rejected predict request: {}", rejection.body_text());
        AppError::from(rejection)
    })?;

    let predicted_price = predict_price(state.model.as_ref(), &features)?;
    Ok(Json(PredictResponse { predicted_price }))
}
