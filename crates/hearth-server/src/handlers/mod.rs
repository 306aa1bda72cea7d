//! HTTP route handlers for the prediction server.

pub mod diagnostics;
pub mod predict;

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::dto::HealthResponse;
use crate::state::AppState;

/// GET /health - liveness plus a summary of the serving model.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_type: state.model.model_type().to_string(),
        model_loaded: true,
        n_features: state.model.n_features(),
        schema_fingerprint: state.info.schema_fingerprint.clone(),
    })
}
