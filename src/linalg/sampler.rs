use rand::{
    Rng, SeedableRng,
    distr::{Distribution, Uniform},
};
use rand_chacha::ChaCha8Rng;

use crate::{
    foundation::error::{DetwallError, DetwallResult},
    linalg::matrix::{MAX_MATRIX_DIM, MIN_MATRIX_DIM, Matrix},
};

/// Request-scoped random stream. ChaCha keeps streams portable across platforms and
/// lets every block own an independent stream of the same seed.
pub type BlockRng = ChaCha8Rng;

/// Stream `stream` of the generator seeded with `seed`.
pub fn block_rng(seed: u64, stream: u64) -> BlockRng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

pub(crate) fn validate_entry_range(low: f64, high: f64) -> DetwallResult<()> {
    if !low.is_finite() || !high.is_finite() {
        return Err(DetwallError::invalid_range(format!(
            "bounds must be finite (low={low}, high={high})"
        )));
    }
    if low >= high {
        return Err(DetwallError::invalid_range(format!(
            "low must be < high (low={low}, high={high})"
        )));
    }
    Ok(())
}

pub(crate) fn validate_dim(n: usize) -> DetwallResult<()> {
    if !(MIN_MATRIX_DIM..=MAX_MATRIX_DIM).contains(&n) {
        return Err(DetwallError::invalid_parameter(format!(
            "matrix dimension must be in {MIN_MATRIX_DIM}..={MAX_MATRIX_DIM}, got {n}"
        )));
    }
    Ok(())
}

/// Validated sampling setup for one dimension and entry range.
#[derive(Clone, Debug)]
pub(crate) struct MatrixSampler {
    n: usize,
    entries: Uniform<f64>,
}

impl MatrixSampler {
    pub(crate) fn new(n: usize, low: f64, high: f64) -> DetwallResult<Self> {
        validate_dim(n)?;
        validate_entry_range(low, high)?;
        let entries = Uniform::new_inclusive(low, high)
            .map_err(|e| DetwallError::invalid_range(format!("entry distribution: {e}")))?;
        Ok(Self { n, entries })
    }

    /// Draws entries in row-major order and scores the result.
    pub(crate) fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> (Matrix, f64) {
        let entries: Vec<f64> = (0..self.n * self.n)
            .map(|_| self.entries.sample(rng))
            .collect();
        let matrix = Matrix {
            n: self.n,
            entries,
        };
        let det = matrix.determinant();
        (matrix, det)
    }
}

/// Draw one `n x n` matrix with entries uniform in `[low, high]` and its determinant.
pub fn sample_and_score<R: Rng + ?Sized>(
    n: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> DetwallResult<(Matrix, f64)> {
    Ok(MatrixSampler::new(n, low, high)?.draw(rng))
}

#[cfg(test)]
#[path = "../../tests/unit/linalg/sampler.rs"]
mod tests;
