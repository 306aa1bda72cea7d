//! Linear regression model and the inference trait.

use crate::feature::HouseFeatures;
use crate::ModelError;

/// A fitted model that maps one feature row to a scalar.
///
/// Implementations are immutable after construction and safe to share
/// across request handlers.
pub trait Regressor: Send + Sync {
    /// Short identifier of the model family, e.g. `"linear_regression"`.
    fn model_type(&self) -> &str;

    /// Expected row width.
    fn n_features(&self) -> usize;

    /// Evaluates the model on a row in canonical column order.
    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError>;

    fn predict(&self, features: &HouseFeatures) -> Result<f64, ModelError> {
        self.predict_row(&features.to_row())
    }
}

/// Ordinary least squares parameters: `y = intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.coefficients.iter().all(|c| c.is_finite())
    }
}

impl Regressor for LinearModel {
    fn model_type(&self) -> &str {
        crate::MODEL_TYPE
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.coefficients.len() {
            return Err(ModelError::WidthMismatch {
                expected: self.coefficients.len(),
                found: row.len(),
            });
        }

        let value = self
            .coefficients
            .iter()
            .zip(row)
            .fold(self.intercept, |acc, (c, x)| acc + c * x);

        if !value.is_finite() {
            return Err(ModelError::NonFinite("prediction".into()));
        }
        Ok(value)
    }
}

/// Rounds a prediction to two decimals for presentation.
///
/// Finite inputs always give finite outputs. Values too large to scale by 100
/// have no fractional digits and are returned unchanged.
pub fn round_price(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Feature, N_FEATURES};

    fn model() -> LinearModel {
        LinearModel::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], 0.5)
    }

    #[test]
    fn test_predict_row() {
        let row = [1.0; N_FEATURES];
        let y = model().predict_row(&row).unwrap();
        assert_eq!(y, 36.5);
    }

    #[test]
    fn test_swapping_inputs_changes_prediction() {
        let row = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let mut swapped = row;
        swapped.swap(Feature::MedInc.index(), Feature::HouseAge.index());

        let m = model();
        assert_ne!(m.predict_row(&row).unwrap(), m.predict_row(&swapped).unwrap());
    }

    #[test]
    fn test_width_mismatch() {
        let err = model().predict_row(&[1.0; 5]).unwrap_err();
        match err {
            ModelError::WidthMismatch { expected, found } => {
                assert_eq!(expected, 8);
                assert_eq!(found, 5);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_output() {
        let m = LinearModel::new(vec![f64::MAX; N_FEATURES], 0.0);
        let err = m.predict_row(&[f64::MAX; N_FEATURES]).unwrap_err();
        assert!(matches!(err, ModelError::NonFinite(_)));
    }

    #[test]
    fn test_round_price() {
        assert_eq!(round_price(4.131), 4.13);
        assert_eq!(round_price(4.136), 4.14);
        assert_eq!(round_price(-0.004), -0.0);
        assert_eq!(round_price(2.0), 2.0);
    }

    #[test]
    fn test_round_price_near_max_stays_finite() {
        assert_eq!(round_price(4.4e307), 4.4e307);
        assert_eq!(round_price(-f64::MAX), -f64::MAX);
        assert!(round_price(f64::MAX / 2.0).is_finite());
    }
}
