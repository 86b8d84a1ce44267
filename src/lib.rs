//! detwall generates procedural wallpapers from random matrices.
//!
//! The canvas is cut into a grid of blocks. Each block gets a small square matrix,
//! chosen by sampling entries in `[low, high]` and keeping the one with the greatest
//! `|determinant|` (or a single sample). The determinant, normalized across the whole
//! canvas, sets the block's brightness within a fixed hue.
//!
//! # Pipeline overview
//!
//! 1. **Generate**: `GenerationRequest -> GenerationPass` (grid plan, per-block search, range)
//! 2. **Raster**: `GenerationPass -> RasterImage` (fill, blur, vignette, feather)
//! 3. **Spec**: `GenerationPass -> RenderSpec` (versioned JSON for a client to draw)
//! 4. **Client**: `RenderSpec -> Surface`, stepped incrementally and cancellable
//!
//! Both render paths compute block colors with the same pure function, so base colors
//! agree exactly; effects agree within a [`ParityTolerance`].
//!
//! Generation is deterministic for a given seed: block `i` always draws from RNG stream
//! `i`, whether or not blocks are searched in parallel.
#![forbid(unsafe_code)]

mod client;
mod color;
mod config;
mod foundation;
mod generate;
mod layout;
mod linalg;
mod render;
mod search;
mod spec;

pub use client::fallback::{box_blur_rgba8, box_radius_for_sigma, gaussian_approx_rgba8};
pub use client::host::{PresentOutcome, RenderHost, RenderTicket};
pub use client::renderer::{ClientOptions, ClientRender, EffectStage, RenderState, StepOutcome};
pub use client::surface::{SoftwareSurface, SoftwareSurfaceFactory, Surface, SurfaceFactory};
pub use color::mapper::{
    DEGENERATE_BRIGHTNESS, DeterminantRange, apply_normalizer, block_brightness,
    determinant_to_color, hsl_to_rgb8, metric_value,
};
pub use color::palette::Hue;
pub use config::request::{
    DEFAULT_SEED, GenerationRequest, OutputFormat, describe_parameters,
};
pub use config::visual::{MAX_BLUR_SIGMA, SecondaryMetric, VisualParameters};
pub use foundation::core::{
    CanvasConfig, MAX_CANVAS_SIDE, MAX_CELL_SIZE, MAX_GAP_CELLS, PixelRect, Rgb8,
};
pub use foundation::error::{DetwallError, DetwallResult};
pub use generate::output::{
    GenerationOutput, generate, generate_request_pass, generate_with_limits,
};
pub use generate::pass::{
    Block, GenerationLimits, GenerationPass, PassSettings, estimate_work, generate_pass,
};
pub use layout::planner::{CellRect, Pattern, assign_dimension, is_gap_pixel, plan_grid};
pub use linalg::matrix::{MAX_MATRIX_DIM, MIN_MATRIX_DIM, Matrix};
pub use linalg::sampler::{BlockRng, block_rng, sample_and_score};
pub use render::alpha::{AlphaMode, apply_alpha_mode};
pub use render::blur::{blur_rgba8, radius_for_sigma};
pub use render::compare::{ParityReport, ParityTolerance, compare_rgba};
pub use render::effects::{
    feather_band, feather_blocks, feather_mask, nearest_edge_mirror, vignette_factor,
    vignette_in_place,
};
pub use render::raster::{RasterImage, paint_blocks, render_raster, render_raster_with_alpha};
pub use search::engine::{MAX_BUDGET, Objective, search_block};
pub use spec::model::{RenderSpec, SpecBlock};
pub use spec::version::RENDER_SPEC_VERSION;
