//! Ordinary least squares with intercept.
//!
//! Columns are centred and scaled to unit norm before the normal equations
//! are formed, so the Gram matrix is a correlation matrix and the Cholesky
//! factorisation stays well conditioned for features on very different
//! scales (population vs. average rooms).

use hearth_core::{LinearModel, N_FEATURES};
use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::TrainError;

/// Pivots smaller than this fraction of the diagonal are treated as zero.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Fits `y = intercept + β · x` by least squares.
pub fn fit(rows: &[[f64; N_FEATURES]], targets: &[f64]) -> Result<LinearModel, TrainError> {
    let n = rows.len();
    if n != targets.len() {
        return Err(TrainError::ShapeMismatch {
            rows: n,
            targets: targets.len(),
        });
    }
    let required = N_FEATURES + 2;
    if n < required {
        return Err(TrainError::TooFewRows { found: n, required });
    }

    let x = Array2::from_shape_fn((n, N_FEATURES), |(i, j)| rows[i][j]);
    let y = ArrayView1::from(targets);

    let x_mean = x
        .mean_axis(Axis(0))
        .ok_or(TrainError::TooFewRows { found: n, required })?;
    let y_mean = y.mean().ok_or(TrainError::TooFewRows { found: n, required })?;

    let xc = &x - &x_mean;
    let yc = &y - y_mean;

    let norms = xc.map_axis(Axis(0), |col| col.dot(&col).sqrt());
    if norms.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return Err(TrainError::SingularDesign);
    }
    let z = &xc / &norms;

    let gram = z.t().dot(&z);
    let rhs = z.t().dot(&yc);
    let gamma = solve_cholesky(&gram, &rhs)?;

    let beta = &gamma / &norms;
    let intercept = y_mean - x_mean.dot(&beta);

    let model = LinearModel::new(beta.to_vec(), intercept);
    if !model.is_finite() {
        return Err(TrainError::SingularDesign);
    }
    Ok(model)
}

/// Solves `a · x = b` for symmetric positive definite `a`.
fn solve_cholesky(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, TrainError> {
    let p = a.nrows();
    let mut l = Array2::<f64>::zeros((p, p));

    for j in 0..p {
        let mut diag = a[(j, j)];
        for k in 0..j {
            diag -= l[(j, k)] * l[(j, k)];
        }
        if diag.is_nan() || diag <= a[(j, j)] * PIVOT_TOLERANCE {
            return Err(TrainError::SingularDesign);
        }
        let pivot = diag.sqrt();
        l[(j, j)] = pivot;

        for i in (j + 1)..p {
            let mut sum = a[(i, j)];
            for k in 0..j {
                sum -= l[(i, k)] * l[(j, k)];
            }
            l[(i, j)] = sum / pivot;
        }
    }

    // L z = b
    let mut z = Array1::<f64>::zeros(p);
    for i in 0..p {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[(i, k)] * z[k];
        }
        z[i] = sum / l[(i, i)];
    }

    // Lᵀ x = z
    let mut x = Array1::<f64>::zeros(p);
    for i in (0..p).rev() {
        let mut sum = z[i];
        for k in (i + 1)..p {
            sum -= l[(k, i)] * x[k];
        }
        x[i] = sum / l[(i, i)];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::Regressor;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const COEFS: [f64; N_FEATURES] = [0.45, 0.01, -0.12, 0.78, -0.00002, -0.004, -0.42, -0.43];
    const INTERCEPT: f64 = -36.9;

    fn synthetic(n: usize, seed: u64) -> (Vec<[f64; N_FEATURES]>, Vec<f64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows: Vec<[f64; N_FEATURES]> = (0..n)
            .map(|_| {
                [
                    rng.gen_range(0.5..15.0),
                    rng.gen_range(1.0..52.0),
                    rng.gen_range(2.0..10.0),
                    rng.gen_range(0.8..2.0),
                    rng.gen_range(3.0..35000.0),
                    rng.gen_range(1.0..6.0),
                    rng.gen_range(32.5..42.0),
                    rng.gen_range(-124.3..-114.3),
                ]
            })
            .collect();
        let targets = rows
            .iter()
            .map(|r| INTERCEPT + r.iter().zip(COEFS).map(|(x, c)| x * c).sum::<f64>())
            .collect();
        (rows, targets)
    }

    #[test]
    fn test_recovers_exact_coefficients() {
        let (rows, targets) = synthetic(400, 1);
        let model = fit(&rows, &targets).unwrap();

        for (got, want) in model.coefficients.iter().zip(COEFS) {
            assert!((got - want).abs() < 1e-8, "got {got}, want {want}");
        }
        assert!((model.intercept - INTERCEPT).abs() < 1e-6);

        let pred = model.predict_row(&rows[0]).unwrap();
        assert!((pred - targets[0]).abs() < 1e-8);
    }

    #[test]
    fn test_collinear_columns_are_rejected() {
        let (mut rows, targets) = synthetic(50, 2);
        for row in rows.iter_mut() {
            row[3] = 2.0 * row[2];
        }
        assert!(matches!(fit(&rows, &targets), Err(TrainError::SingularDesign)));
    }

    #[test]
    fn test_constant_column_is_rejected() {
        let (mut rows, targets) = synthetic(50, 3);
        for row in rows.iter_mut() {
            row[1] = 10.0;
        }
        assert!(matches!(fit(&rows, &targets), Err(TrainError::SingularDesign)));
    }

    #[test]
    fn test_too_few_rows() {
        let (rows, targets) = synthetic(5, 4);
        assert!(matches!(
            fit(&rows, &targets),
            Err(TrainError::TooFewRows { found: 5, required: 10 })
        ));
    }

    #[test]
    fn test_solve_cholesky() {
        let a = ndarray::arr2(&[[4.0, 2.0], [2.0, 3.0]]);
        let b = ndarray::arr1(&[2.0, 1.0]);
        let x = solve_cholesky(&a, &b).unwrap();
        assert!((x[0] - 0.5).abs() < 1e-12);
        assert!(x[1].abs() < 1e-12);
    }
}
