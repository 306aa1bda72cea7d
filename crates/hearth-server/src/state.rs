use std::sync::Arc;

use hearth_config::ServerConfig;
use hearth_core::{
    feature_names, schema_fingerprint, LoadedArtifact, ModelArtifact, ModelError, Regressor,
    TrainingSummary,
};
use tracing::info;

/// Facts about the serving model, captured once at startup.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub model_type: String,
    pub features: Vec<String>,
    /// Known only for models loaded from an artifact.
    pub coefficients: Option<Vec<f64>>,
    pub intercept: Option<f64>,
    pub schema_fingerprint: String,
    pub trained_at: Option<i64>,
    pub training: Option<TrainingSummary>,
    pub sha256: Option<String>,
    pub size_bytes: Option<u64>,
}

impl ModelInfo {
    fn from_loaded(loaded: &LoadedArtifact) -> Self {
        let artifact = &loaded.artifact;
        Self {
            model_type: artifact.model_type.clone(),
            features: artifact.features.clone(),
            coefficients: Some(artifact.coefficients.clone()),
            intercept: Some(artifact.intercept),
            schema_fingerprint: artifact.schema_fingerprint.clone(),
            trained_at: Some(artifact.trained_at),
            training: artifact.training.clone(),
            sha256: Some(loaded.sha256.clone()),
            size_bytes: Some(loaded.size_bytes),
        }
    }

    /// Metadata for a model that did not come from an artifact file.
    fn for_regressor(model: &dyn Regressor) -> Self {
        Self {
            model_type: model.model_type().to_string(),
            features: feature_names().into_iter().map(String::from).collect(),
            coefficients: None,
            intercept: None,
            schema_fingerprint: schema_fingerprint(),
            trained_at: None,
            training: None,
            sha256: None,
            size_bytes: None,
        }
    }
}

/// Shared, read-only state handed to every request handler.
pub struct AppState {
    pub model: Arc<dyn Regressor>,
    pub info: ModelInfo,
    pub config: ServerConfig,
}

impl AppState {
    /// Loads and validates the artifact named by `config`.
    pub fn load(config: ServerConfig) -> Result<Self, ModelError> {
        let loaded = ModelArtifact::load(&config.model_path, config.model_sha256.as_deref())?;
        info!(
            "Loaded {} model from {} (sha256 {})",
            loaded.artifact.model_type,
            loaded.path.display(),
            loaded.sha256
        );

        Ok(Self {
            model: Arc::new(loaded.artifact.model()),
            info: ModelInfo::from_loaded(&loaded),
            config,
        })
    }

    /// Builds state around an already constructed model.
    pub fn from_model(model: Arc<dyn Regressor>, config: ServerConfig) -> Self {
        let info = ModelInfo::for_regressor(model.as_ref());
        Self {
            model,
            info,
            config,
        }
    }
}
