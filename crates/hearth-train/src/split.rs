//! Seeded train/test split over row indices.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices assigned to each side of the split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffles `0..n` with a seeded RNG and holds out `ceil(n * test_fraction)`
/// rows for testing.
///
/// The same `(n, test_fraction, seed)` always yields the same split.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Split {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n as f64) * test_fraction).ceil() as usize;
    let n_test = n_test.min(n);
    let train = indices.split_off(n_test);

    tracing::debug!(
        "Dataset split: {} training, {} test (seed {})",
        train.len(),
        indices.len(),
        seed
    );

    Split {
        train,
        test: indices,
    }
}
