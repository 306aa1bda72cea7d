use hearth_config::ServerConfig;
use hearth_core::TrainingSummary;
use hearth_web::AssetStatus;
use serde::Serialize;

// === Prediction ===

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_price: f64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_type: String,
    pub model_loaded: bool,
    pub n_features: usize,
    pub schema_fingerprint: String,
}

// === Diagnostics ===

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub status: &'static str,
    pub timestamp: f64,
}

#[derive(Debug, Serialize)]
pub struct DiagnoseResponse {
    pub environment: EnvironmentInfo,
    pub files: FilesInfo,
    pub model: ModelSummary,
}

#[derive(Debug, Serialize)]
pub struct EnvironmentInfo {
    pub version: &'static str,
    pub working_directory: Option<String>,
    pub model_path: String,
    pub model_sha256: Option<String>,
    pub model_size_bytes: Option<u64>,
    pub config: ServerConfig,
}

#[derive(Debug, Serialize)]
pub struct FilesInfo {
    pub embedded: Vec<String>,
    pub expected: Vec<AssetStatus>,
}

#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub model_type: String,
    pub features: Vec<String>,
    pub coefficients: Option<Vec<f64>>,
    pub intercept: Option<f64>,
    pub schema_fingerprint: String,
    pub trained_at: Option<i64>,
    pub training: Option<TrainingSummary>,
}
