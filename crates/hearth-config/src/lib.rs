//! Configuration for the hearth trainer and prediction server.
//!
//! Both programs read their settings from the process environment (after
//! `.env` loading in the binaries). Parsing goes through a lookup function so
//! it can be exercised without touching the real environment.

use serde::Serialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Keys and defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const BIND_ADDR_ENV: &str = "HEARTH_BIND_ADDR";
pub const MODEL_PATH_ENV: &str = "HEARTH_MODEL_PATH";
pub const MODEL_SHA256_ENV: &str = "HEARTH_MODEL_SHA256";
pub const DIAGNOSTICS_ENV: &str = "HEARTH_DIAGNOSTICS";
pub const DATASET_SOURCE_ENV: &str = "HEARTH_DATASET_SOURCE";
pub const TRAIN_SEED_ENV: &str = "HEARTH_TRAIN_SEED";
pub const TEST_FRACTION_ENV: &str = "HEARTH_TEST_FRACTION";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MODEL_PATH: &str = "model.json";
pub const DEFAULT_DATASET_SOURCE: &str =
    "https://raw.githubusercontent.com/ageron/handson-ml2/master/datasets/housing/housing.csv";
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

// ─────────────────────────────────────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub model_path: PathBuf,
    /// Expected SHA-256 of the artifact file, hex.
    pub model_sha256: Option<String>,
    /// Enables the diagnostic endpoints and verbose logging.
    pub diagnostics: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_sha256: None,
            diagnostics: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let diagnostics = match get(DIAGNOSTICS_ENV) {
            Some(raw) => parse_bool(DIAGNOSTICS_ENV, &raw)?,
            None => defaults.diagnostics,
        };

        let model_sha256 = match get(MODEL_SHA256_ENV) {
            Some(raw) if !is_sha256_hex(&raw) => {
                return Err(ConfigError::InvalidValue {
                    key: MODEL_SHA256_ENV,
                    value: raw,
                    reason: "expected 64 hex characters",
                });
            }
            other => other,
        };

        Ok(Self {
            bind_addr: get(BIND_ADDR_ENV).unwrap_or(defaults.bind_addr),
            model_path: get(MODEL_PATH_ENV).map(PathBuf::from).unwrap_or(defaults.model_path),
            model_sha256,
            diagnostics,
        })
    }

    /// Default tracing filter for this configuration.
    pub fn log_filter(&self) -> &'static str {
        if self.diagnostics {
            "debug"
        } else {
            "info"
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Trainer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Dataset URL (`http(s)://`) or local CSV path.
    pub source: String,
    pub output: PathBuf,
    pub seed: u64,
    pub test_fraction: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_DATASET_SOURCE.to_string(),
            output: PathBuf::from(DEFAULT_MODEL_PATH),
            seed: DEFAULT_SEED,
            test_fraction: DEFAULT_TEST_FRACTION,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: DATASET_SOURCE_ENV,
                value: self.source.clone(),
                reason: "must not be empty",
            });
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ConfigError::InvalidValue {
                key: TEST_FRACTION_ENV,
                value: self.test_fraction.to_string(),
                reason: "must be strictly between 0 and 1",
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: "expected a boolean",
        }),
    }
}

fn is_sha256_hex(raw: &str) -> bool {
    raw.len() == 64 && raw.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.model_path, PathBuf::from("model.json"));
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_server_overrides() {
        let digest = "a".repeat(64);
        let config = ServerConfig::from_lookup(lookup(&[
            (BIND_ADDR_ENV, "127.0.0.1:9000"),
            (MODEL_PATH_ENV, "/srv/models/house.json"),
            (MODEL_SHA256_ENV, &digest),
            (DIAGNOSTICS_ENV, "Yes"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.model_path, PathBuf::from("/srv/models/house.json"));
        assert_eq!(config.model_sha256.as_deref(), Some(digest.as_str()));
        assert!(config.diagnostics);
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[(MODEL_PATH_ENV, "  "), (DIAGNOSTICS_ENV, "")]))
                .unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        let err = ServerConfig::from_lookup(lookup(&[(DIAGNOSTICS_ENV, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: DIAGNOSTICS_ENV, .. }));

        let err = ServerConfig::from_lookup(lookup(&[(MODEL_SHA256_ENV, "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: MODEL_SHA256_ENV, .. }));
    }

    #[test]
    fn test_train_config_validation() {
        assert!(TrainConfig::default().validate().is_ok());

        let bad = TrainConfig {
            test_fraction: 1.0,
            ..TrainConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = TrainConfig {
            source: " ".into(),
            ..TrainConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
