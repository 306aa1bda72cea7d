//! # hearth
//!
//! Linear-regression house-price model for the California housing data: an
//! offline trainer that writes a versioned JSON artifact, and an HTTP service
//! that loads it and prices one house per request.
//!
//! ```rust,no_run
//! use hearth::prelude::*;
//!
//! # fn main() -> Result<(), ModelError> {
//! let loaded = ModelArtifact::load("model.json", None)?;
//! let model = loaded.artifact.model();
//!
//! let house = HouseFeatures::from_row([8.3252, 41.0, 6.98, 1.02, 322.0, 2.55, 37.88, -122.23]);
//! println!("{:.2}", round_price(model.predict(&house)?));
//! # Ok(())
//! # }
//! ```
//!
//! Enable the `server` feature to embed the prediction service.

pub use hearth_config as config;
pub use hearth_core as model;
pub use hearth_train as train;

#[cfg(feature = "server")]
pub use hearth_server as server;

pub mod prelude {
    pub use hearth_config::{ConfigError, ServerConfig, TrainConfig};
    pub use hearth_core::{
        round_price, Evaluation, Feature, HouseFeatures, LinearModel, ModelArtifact, ModelError,
        Regressor, N_FEATURES,
    };
    pub use hearth_train::{HousingDataset, TrainError, TrainReport};

    #[cfg(feature = "server")]
    pub use hearth_server::{app, AppState};
}
