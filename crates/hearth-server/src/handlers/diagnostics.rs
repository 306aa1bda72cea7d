//! Diagnostic endpoints, mounted only when diagnostics are enabled.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::State;
use axum::Json;

use crate::dto::{DiagnoseResponse, EnvironmentInfo, FilesInfo, ModelSummary, TestResponse};
use crate::state::AppState;

/// GET /diagnose - runtime environment, embedded assets and model parameters.
pub async fn diagnose(State(state): State<Arc<AppState>>) -> Json<DiagnoseResponse> {
    let info = &state.info;

    let environment = EnvironmentInfo {
        version: env!("CARGO_PKG_VERSION"),
        working_directory: std::env::current_dir()
            .ok()
            .map(|p| p.display().to_string()),
        model_path: state.config.model_path.display().to_string(),
        model_sha256: info.sha256.clone(),
        model_size_bytes: info.size_bytes,
        config: state.config.clone(),
    };

    let files = FilesInfo {
        embedded: hearth_web::asset_names(),
        expected: hearth_web::asset_status(),
    };

    let model = ModelSummary {
        model_type: info.model_type.clone(),
        features: info.features.clone(),
        coefficients: info.coefficients.clone(),
        intercept: info.intercept,
        schema_fingerprint: info.schema_fingerprint.clone(),
        trained_at: info.trained_at,
        training: info.training.clone(),
    };

    Json(DiagnoseResponse {
        environment,
        files,
        model,
    })
}

/// GET /test
pub async fn test() -> Json<TestResponse> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);

    Json(TestResponse {
        status: "ok",
        timestamp,
    })
}
