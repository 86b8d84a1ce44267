use rayon::prelude::*;

use crate::{
    color::mapper::{DeterminantRange, determinant_to_color},
    config::visual::VisualParameters,
    foundation::core::{CanvasConfig, PixelRect, Rgb8},
    foundation::error::{DetwallError, DetwallResult},
    layout::planner::{CellRect, Pattern, assign_dimension, plan_grid},
    linalg::matrix::Matrix,
    linalg::sampler::{block_rng, validate_dim},
    search::engine::{Objective, search_block, validate_budget},
};

/// One grid cell of a generated wallpaper.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub matrix: Matrix,
    pub determinant: f64,
    pub size: usize,
}

impl Block {
    pub fn rect(&self) -> PixelRect {
        PixelRect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Output of one generation pass, shared by the raster and render-spec paths.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationPass {
    pub canvas: CanvasConfig,
    pub visual: VisualParameters,
    pub range: DeterminantRange,
    pub blocks: Vec<Block>,
}

impl GenerationPass {
    /// Base color of every block, in block order.
    pub fn block_colors(&self) -> Vec<Rgb8> {
        self.blocks
            .iter()
            .map(|b| determinant_to_color(b.determinant, &b.matrix, &self.range, &self.visual))
            .collect()
    }
}

/// Caps on per-request work.
#[derive(Clone, Debug)]
pub struct GenerationLimits {
    /// Upper bound on `trials * sum(n^3)` over all blocks.
    pub work_limit: u64,
    /// Upper bound on the number of planned cells, checked before planning.
    pub max_blocks: u64,
    /// Search blocks on the rayon pool. Output is identical either way.
    pub parallel: bool,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            work_limit: 2_000_000_000,
            max_blocks: 1 << 20,
            parallel: true,
        }
    }
}

/// Knobs of a generation pass beyond canvas and look.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassSettings {
    pub pattern: Pattern,
    pub max_n: usize,
    pub budget: u32,
    pub seed: u64,
}

/// Estimated determinant work for a planned grid.
pub fn estimate_work(dims: &[usize], objective: Objective, budget: u32) -> u64 {
    let per_trial: u64 = dims.iter().map(|&n| (n as u64).pow(3)).sum();
    per_trial.saturating_mul(u64::from(objective.trials(budget)))
}

/// Plan, search and score every block of the canvas.
///
/// Block `i` draws from RNG stream `i` of `settings.seed`, so the result does not
/// depend on scheduling. Fails atomically: no partial pass is returned.
#[tracing::instrument(skip(visual, limits), fields(width = canvas.width, height = canvas.height))]
pub fn generate_pass(
    canvas: &CanvasConfig,
    visual: &VisualParameters,
    settings: PassSettings,
    limits: &GenerationLimits,
) -> DetwallResult<GenerationPass> {
    canvas.validate()?;
    visual.validate()?;
    validate_dim(settings.max_n)?;
    validate_budget(settings.budget)?;

    let grid = canvas.grid_dims();
    let block_count = u64::from(grid.0) * u64::from(grid.1);
    if block_count > limits.max_blocks {
        return Err(DetwallError::invalid_parameter(format!(
            "canvas plans {block_count} blocks, limit is {}",
            limits.max_blocks
        )));
    }

    let cells = plan_grid(canvas)?;
    let dims = cells
        .iter()
        .map(|c| {
            assign_dimension(
                settings.pattern,
                c.col,
                c.row,
                grid,
                settings.max_n,
                settings.seed,
            )
        })
        .collect::<DetwallResult<Vec<usize>>>()?;

    let objective = Objective::from_use_max(visual.use_max);
    let work = estimate_work(&dims, objective, settings.budget);
    if work > limits.work_limit {
        return Err(DetwallError::invalid_parameter(format!(
            "request needs {work} determinant work units, limit is {}",
            limits.work_limit
        )));
    }

    let search = |(idx, (cell, &n)): (usize, (&CellRect, &usize))| -> DetwallResult<Block> {
        let mut rng = block_rng(settings.seed, idx as u64);
        let (matrix, determinant) = search_block(
            n,
            visual.low,
            visual.high,
            objective,
            settings.budget,
            &mut rng,
        )?;
        Ok(Block {
            x: cell.rect.x,
            y: cell.rect.y,
            width: cell.rect.width,
            height: cell.rect.height,
            matrix,
            determinant,
            size: n,
        })
    };

    let blocks = if limits.parallel {
        cells
            .par_iter()
            .zip(dims.par_iter())
            .enumerate()
            .map(search)
            .collect::<DetwallResult<Vec<Block>>>()?
    } else {
        cells
            .iter()
            .zip(dims.iter())
            .enumerate()
            .map(search)
            .collect::<DetwallResult<Vec<Block>>>()?
    };

    let range = DeterminantRange::from_determinants(blocks.iter().map(|b| b.determinant))
        .ok_or_else(|| DetwallError::invalid_parameter("canvas produced no blocks"))?;

    tracing::debug!(
        blocks = blocks.len(),
        work,
        det_min = range.min,
        det_max = range.max,
        "generation pass complete"
    );

    Ok(GenerationPass {
        canvas: *canvas,
        visual: visual.clone(),
        range,
        blocks,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/generate/pass.rs"]
mod tests;
