use std::{fmt, str::FromStr};

use crate::{
    foundation::core::{CanvasConfig, PixelRect},
    foundation::error::{DetwallError, DetwallResult},
    foundation::math::{Fnv1a64, mix64, unit_from_hash},
    linalg::matrix::{MAX_MATRIX_DIM, MIN_MATRIX_DIM},
    linalg::sampler::validate_dim,
};

/// Relative frequency of sizes `2..=5` under [`Pattern::Mixed`].
const MIXED_WEIGHTS: [f64; MAX_MATRIX_DIM - MIN_MATRIX_DIM + 1] = [0.25, 0.30, 0.20, 0.08];

/// Spatial rule assigning a matrix dimension to every cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// Weighted pseudo-random size per cell, keyed by seed and grid position.
    #[default]
    Mixed,
    /// Every cell uses `max_n`.
    Uniform,
    /// Size rises from 2 on the left edge to `max_n` on the right edge.
    Gradient,
}

impl Pattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mixed => "mixed",
            Self::Uniform => "uniform",
            Self::Gradient => "gradient",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pattern {
    type Err = DetwallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mixed" => Ok(Self::Mixed),
            "uniform" => Ok(Self::Uniform),
            "gradient" => Ok(Self::Gradient),
            other => Err(DetwallError::invalid_parameter(format!(
                "unknown pattern '{other}' (expected mixed, uniform or gradient)"
            ))),
        }
    }
}

/// One planned cell: grid coordinates plus its pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u32,
    pub row: u32,
    pub rect: PixelRect,
}

/// Partition the canvas into cells, row-major.
///
/// Cell origins sit on a `stride` pitch; cells on the right and bottom edges are clipped
/// to the canvas. Everything not covered by a cell is gap.
pub fn plan_grid(canvas: &CanvasConfig) -> DetwallResult<Vec<CellRect>> {
    canvas.validate()?;

    let stride = canvas.stride();
    let (cols, rows) = canvas.grid_dims();
    let mut cells = Vec::with_capacity(cols as usize * rows as usize);
    for row in 0..rows {
        let y = row * stride;
        let height = canvas.cell_size.min(canvas.height - y);
        for col in 0..cols {
            let x = col * stride;
            let width = canvas.cell_size.min(canvas.width - x);
            cells.push(CellRect {
                col,
                row,
                rect: PixelRect {
                    x,
                    y,
                    width,
                    height,
                },
            });
        }
    }
    Ok(cells)
}

/// `true` when the pixel falls in a gap rather than in a cell.
pub fn is_gap_pixel(canvas: &CanvasConfig, x: u32, y: u32) -> bool {
    let stride = canvas.stride();
    x % stride >= canvas.cell_size || y % stride >= canvas.cell_size
}

/// Matrix dimension for the cell at `(col, row)` of a `cols x rows` grid.
pub fn assign_dimension(
    pattern: Pattern,
    col: u32,
    row: u32,
    grid: (u32, u32),
    max_n: usize,
    seed: u64,
) -> DetwallResult<usize> {
    validate_dim(max_n)?;
    let (cols, _) = grid;

    let n = match pattern {
        Pattern::Uniform => max_n,
        Pattern::Gradient => {
            let levels = (max_n - MIN_MATRIX_DIM + 1) as u64;
            let step = u64::from(col) * levels / u64::from(cols.max(1));
            MIN_MATRIX_DIM + (step as usize).min(max_n - MIN_MATRIX_DIM)
        }
        Pattern::Mixed => {
            let mut h = Fnv1a64::new_default();
            h.write_u64(seed);
            h.write_u32(col);
            h.write_u32(row);
            pick_weighted(unit_from_hash(mix64(h.finish())), max_n)
        }
    };
    Ok(n)
}

fn pick_weighted(u: f64, max_n: usize) -> usize {
    let weights = &MIXED_WEIGHTS[..=max_n - MIN_MATRIX_DIM];
    let total: f64 = weights.iter().sum();
    let target = u * total;
    let mut acc = 0.0;
    for (i, w) in weights.iter().enumerate() {
        acc += w;
        if target < acc {
            return MIN_MATRIX_DIM + i;
        }
    }
    max_n
}

#[cfg(test)]
#[path = "../../tests/unit/layout/planner.rs"]
mod tests;
