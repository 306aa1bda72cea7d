//! Core domain types and error definitions for hearth.
//!
//! This crate provides the types shared by the trainer and the prediction
//! service:
//!
//! - [`Feature`] and [`HouseFeatures`] - the canonical, ordered feature schema
//! - [`LinearModel`] and the [`Regressor`] trait - inference over one row
//! - [`ModelArtifact`] - the persisted, versioned model file
//! - [`ModelError`] - error type for loading, validating and evaluating models
//!
//! # Example
//!
//! ```rust
//! use hearth_core::{HouseFeatures, LinearModel, Regressor};
//!
//! let model = LinearModel::new(vec![0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 1.0);
//! let house = HouseFeatures {
//!     med_inc: 8.3252,
//!     house_age: 41.0,
//!     ave_rooms: 6.98,
//!     ave_bedrms: 1.02,
//!     population: 322.0,
//!     ave_occup: 2.55,
//!     latitude: 37.88,
//!     longitude: -122.23,
//! };
//!
//! let price = model.predict(&house).unwrap();
//! assert!((price - 5.1626).abs() < 1e-9);
//! ```

mod artifact;
mod feature;
mod model;

pub use artifact::{
    sha256_hex, Evaluation, LoadedArtifact, ModelArtifact, TrainingSummary, FORMAT_VERSION,
    MODEL_TYPE,
};
pub use feature::{feature_names, schema_fingerprint, schema_fingerprint_of, Feature, HouseFeatures, N_FEATURES};
pub use model::{round_price, LinearModel, Regressor};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, validating or evaluating a model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Reading or writing the artifact file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON or does not have the artifact shape.
    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    /// The artifact file does not match the pinned SHA-256 digest.
    #[error("Model artifact digest mismatch: expected {expected}, found {found}")]
    DigestMismatch { expected: String, found: String },

    /// The artifact was written by an unknown format version.
    #[error("Unsupported artifact format version {0} (supported: {FORMAT_VERSION})")]
    UnsupportedVersion(u32),

    /// The artifact holds a model family this build cannot evaluate.
    #[error("Unsupported model type: {0}")]
    UnsupportedModelType(String),

    /// Feature names or their order differ from the canonical schema.
    #[error("Feature schema mismatch: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The stored schema fingerprint does not match the stored feature names.
    #[error("Schema fingerprint mismatch: expected {expected}, found {found}")]
    FingerprintMismatch { expected: String, found: String },

    /// Input width does not match the model's coefficient count.
    #[error("Feature width mismatch: expected {expected} values, found {found}")]
    WidthMismatch { expected: usize, found: usize },

    /// A parameter, input or output value is NaN or infinite.
    #[error("Non-finite value in {0}")]
    NonFinite(String),
}
