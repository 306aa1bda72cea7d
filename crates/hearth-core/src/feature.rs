//! Canonical feature schema and the request-side feature vector.

use serde::{Deserialize, Serialize};

use crate::artifact::sha256_hex;
use crate::ModelError;

/// Number of features in the canonical schema.
pub const N_FEATURES: usize = 8;

/// One input column of the model.
///
/// The declaration order is the column order used for training and
/// inference. [`Feature::ALL`] is the only place that order is spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    MedInc,
    HouseAge,
    AveRooms,
    AveBedrms,
    Population,
    AveOccup,
    Latitude,
    Longitude,
}

impl Feature {
    pub const ALL: [Feature; N_FEATURES] = [
        Feature::MedInc,
        Feature::HouseAge,
        Feature::AveRooms,
        Feature::AveBedrms,
        Feature::Population,
        Feature::AveOccup,
        Feature::Latitude,
        Feature::Longitude,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::MedInc => "MedInc",
            Feature::HouseAge => "HouseAge",
            Feature::AveRooms => "AveRooms",
            Feature::AveBedrms => "AveBedrms",
            Feature::Population => "Population",
            Feature::AveOccup => "AveOccup",
            Feature::Latitude => "Latitude",
            Feature::Longitude => "Longitude",
        }
    }

    /// Column index of this feature in a model row.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Feature names in canonical order.
pub fn feature_names() -> Vec<&'static str> {
    Feature::ALL.iter().map(|f| f.name()).collect()
}

/// SHA-256 (hex) of the given names joined with `,`.
pub fn schema_fingerprint_of<S: AsRef<str>>(names: &[S]) -> String {
    let joined = names.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(",");
    sha256_hex(joined.as_bytes())
}

/// Fingerprint of the canonical schema.
pub fn schema_fingerprint() -> String {
    schema_fingerprint_of(&feature_names())
}

/// A single house described by the eight canonical features.
///
/// Field names on the wire are the dataset column names (`MedInc`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HouseFeatures {
    pub med_inc: f64,
    pub house_age: f64,
    pub ave_rooms: f64,
    pub ave_bedrms: f64,
    pub population: f64,
    pub ave_occup: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl HouseFeatures {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::MedInc => self.med_inc,
            Feature::HouseAge => self.house_age,
            Feature::AveRooms => self.ave_rooms,
            Feature::AveBedrms => self.ave_bedrms,
            Feature::Population => self.population,
            Feature::AveOccup => self.ave_occup,
            Feature::Latitude => self.latitude,
            Feature::Longitude => self.longitude,
        }
    }

    /// Builds the model input row in canonical column order.
    pub fn to_row(&self) -> [f64; N_FEATURES] {
        Feature::ALL.map(|f| self.get(f))
    }

    pub fn from_row(row: [f64; N_FEATURES]) -> Self {
        let at = |f: Feature| row[f.index()];
        Self {
            med_inc: at(Feature::MedInc),
            house_age: at(Feature::HouseAge),
            ave_rooms: at(Feature::AveRooms),
            ave_bedrms: at(Feature::AveBedrms),
            population: at(Feature::Population),
            ave_occup: at(Feature::AveOccup),
            latitude: at(Feature::Latitude),
            longitude: at(Feature::Longitude),
        }
    }

    /// Rejects NaN and infinite inputs, naming the first offending field.
    pub fn validate(&self) -> Result<(), ModelError> {
        match Feature::ALL.into_iter().find(|f| !self.get(*f).is_finite()) {
            Some(f) => Err(ModelError::NonFinite(f.name().to_string())),
            None => Ok(()),
        }
    }
}
