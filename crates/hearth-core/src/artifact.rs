//! Persisted model artifact: versioned JSON with schema and training metadata.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::feature::{feature_names, schema_fingerprint, schema_fingerprint_of};
use crate::model::LinearModel;
use crate::ModelError;

/// Artifact format written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Model family stored in artifacts.
pub const MODEL_TYPE: &str = "linear_regression";

/// Held-out metrics computed by the trainer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub r2: f64,
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
}

/// How the stored model was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Dataset URL or path.
    pub source: String,
    pub seed: u64,
    pub test_fraction: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    pub evaluation: Evaluation,
}

/// On-disk representation of a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub model_type: String,
    pub features: Vec<String>,
    pub schema_fingerprint: String,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Unix timestamp (milliseconds) when the artifact was built.
    pub trained_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<TrainingSummary>,
}

impl ModelArtifact {
    /// Wraps a fitted model with the canonical schema.
    pub fn new(model: &LinearModel, training: Option<TrainingSummary>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            model_type: MODEL_TYPE.to_string(),
            features: feature_names().into_iter().map(String::from).collect(),
            schema_fingerprint: schema_fingerprint(),
            coefficients: model.coefficients.clone(),
            intercept: model.intercept,
            trained_at: now_ms(),
            training,
        }
    }

    pub fn model(&self) -> LinearModel {
        LinearModel::new(self.coefficients.clone(), self.intercept)
    }

    /// Checks the artifact against the canonical schema.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion(self.format_version));
        }

        if self.model_type != MODEL_TYPE {
            return Err(ModelError::UnsupportedModelType(self.model_type.clone()));
        }

        let expected: Vec<String> = feature_names().into_iter().map(String::from).collect();
        if self.features != expected {
            return Err(ModelError::SchemaMismatch {
                expected,
                found: self.features.clone(),
            });
        }

        let fingerprint = schema_fingerprint_of(&self.features);
        if !self.schema_fingerprint.eq_ignore_ascii_case(&fingerprint) {
            return Err(ModelError::FingerprintMismatch {
                expected: fingerprint,
                found: self.schema_fingerprint.clone(),
            });
        }

        if self.coefficients.len() != self.features.len() {
            return Err(ModelError::WidthMismatch {
                expected: self.features.len(),
                found: self.coefficients.len(),
            });
        }

        if !self.model().is_finite() {
            return Err(ModelError::NonFinite("model parameters".into()));
        }

        Ok(())
    }

    /// Parses and validates an artifact from raw JSON bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the artifact, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        let io_err = |source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(io_err)?;
        Ok(())
    }

    /// Reads, digest-checks and validates an artifact file.
    ///
    /// `expected_sha256` pins the exact file contents when set.
    pub fn load(
        path: impl AsRef<Path>,
        expected_sha256: Option<&str>,
    ) -> Result<LoadedArtifact, ModelError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let digest = sha256_hex(&bytes);
        if let Some(expected) = expected_sha256.map(str::trim).filter(|e| !e.is_empty()) {
            if !expected.eq_ignore_ascii_case(&digest) {
                return Err(ModelError::DigestMismatch {
                    expected: expected.to_string(),
                    found: digest,
                });
            }
        }

        let artifact = Self::from_json_bytes(&bytes)?;
        Ok(LoadedArtifact {
            artifact,
            path: path.to_path_buf(),
            sha256: digest,
            size_bytes: bytes.len() as u64,
        })
    }
}

/// A validated artifact together with facts about the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub artifact: ModelArtifact,
    pub path: PathBuf,
    pub sha256: String,
    pub size_bytes: u64,
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
