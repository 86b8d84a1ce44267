use rand::Rng;

use crate::{
    foundation::error::{DetwallError, DetwallResult},
    linalg::{matrix::Matrix, sampler::MatrixSampler},
};

/// Upper bound on trials per block; keeps worst-case cost at `O(MAX_BUDGET * n^3)`.
pub const MAX_BUDGET: u32 = 4096;

/// What the search keeps for a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Objective {
    /// Draw `budget` samples, keep the greatest `|det|` (first one wins ties).
    MaximizeAbsDeterminant,
    /// Draw exactly one sample.
    SampleOnce,
}

impl Objective {
    pub fn from_use_max(use_max: bool) -> Self {
        if use_max {
            Self::MaximizeAbsDeterminant
        } else {
            Self::SampleOnce
        }
    }

    /// Number of samples this objective draws for a given budget.
    pub fn trials(self, budget: u32) -> u32 {
        match self {
            Self::MaximizeAbsDeterminant => budget,
            Self::SampleOnce => 1,
        }
    }
}

pub(crate) fn validate_budget(budget: u32) -> DetwallResult<()> {
    if budget == 0 || budget > MAX_BUDGET {
        return Err(DetwallError::invalid_parameter(format!(
            "budget must be in 1..={MAX_BUDGET}, got {budget}"
        )));
    }
    Ok(())
}

/// Bounded random search for one block's matrix.
///
/// The result is a pure function of the RNG stream position and the budget.
pub fn search_block<R: Rng + ?Sized>(
    n: usize,
    low: f64,
    high: f64,
    objective: Objective,
    budget: u32,
    rng: &mut R,
) -> DetwallResult<(Matrix, f64)> {
    validate_budget(budget)?;
    let sampler = MatrixSampler::new(n, low, high)?;

    let (mut best, mut best_det) = sampler.draw(rng);
    for _ in 1..objective.trials(budget) {
        let (candidate, det) = sampler.draw(rng);
        if det.abs() > best_det.abs() {
            best = candidate;
            best_det = det;
        }
    }
    Ok((best, best_det))
}

#[cfg(test)]
#[path = "../../tests/unit/search/engine.rs"]
mod tests;
