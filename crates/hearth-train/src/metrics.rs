//! Held-out regression metrics.

use hearth_core::{Evaluation, Regressor, N_FEATURES};

use crate::TrainError;

/// Scores `model` on the given rows: R², MSE, RMSE and MAE.
pub fn evaluate(
    model: &dyn Regressor,
    rows: &[[f64; N_FEATURES]],
    targets: &[f64],
) -> Result<Evaluation, TrainError> {
    if rows.len() != targets.len() {
        return Err(TrainError::ShapeMismatch {
            rows: rows.len(),
            targets: targets.len(),
        });
    }
    if rows.is_empty() {
        return Err(TrainError::TooFewRows {
            found: 0,
            required: 1,
        });
    }

    let n = rows.len() as f64;
    let mean = targets.iter().sum::<f64>() / n;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    let mut abs_err = 0.0;
    for (row, &y) in rows.iter().zip(targets) {
        let residual = y - model.predict_row(row)?;
        ss_res += residual * residual;
        abs_err += residual.abs();
        ss_tot += (y - mean) * (y - mean);
    }

    // Constant targets: perfect fit scores 1, anything else 0.
    let r2 = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else if ss_res == 0.0 {
        1.0
    } else {
        0.0
    };
    let mse = ss_res / n;

    Ok(Evaluation {
        r2,
        mse,
        rmse: mse.sqrt(),
        mae: abs_err / n,
    })
}
