use serde_json::json;

use crate::{
    color::palette::Hue,
    config::visual::{MAX_BLUR_SIGMA, SecondaryMetric, VisualParameters},
    foundation::core::{CanvasConfig, MAX_CANVAS_SIDE, MAX_CELL_SIZE, MAX_GAP_CELLS},
    foundation::error::{DetwallError, DetwallResult},
    generate::pass::PassSettings,
    layout::planner::Pattern,
    linalg::matrix::{MAX_MATRIX_DIM, MIN_MATRIX_DIM},
    linalg::sampler::validate_dim,
    render::alpha::AlphaMode,
    search::engine::{MAX_BUDGET, validate_budget},
};

/// Seed used when a request does not carry one.
pub const DEFAULT_SEED: u64 = 42;

/// What [`generate`](crate::generate::output::generate) hands back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered RGBA8 image.
    #[default]
    Raster,
    /// Declarative render spec for client-side drawing.
    Spec,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raster => "raster",
            Self::Spec => "spec",
        }
    }
}

/// One wallpaper request. Every field is optional on the wire.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationRequest {
    pub canvas: CanvasConfig,
    pub visual: VisualParameters,
    pub pattern: Pattern,
    /// Largest matrix dimension any block may get.
    pub max_n: usize,
    /// Samples drawn per block when maximizing.
    pub budget: u32,
    pub seed: Option<u64>,
    pub output: OutputFormat,
    pub alpha: AlphaMode,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig {
                width: 1920,
                height: 1080,
                cell_size: 12,
                gap_cells: 1,
            },
            visual: VisualParameters::default(),
            pattern: Pattern::Mixed,
            max_n: 4,
            budget: 16,
            seed: None,
            output: OutputFormat::Raster,
            alpha: AlphaMode::Opaque,
        }
    }
}

impl GenerationRequest {
    pub fn from_json(s: &str) -> DetwallResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn validate(&self) -> DetwallResult<()> {
        self.canvas.validate()?;
        self.visual.validate()?;
        validate_dim(self.max_n)?;
        validate_budget(self.budget)?;
        if self.output == OutputFormat::Spec && self.alpha != AlphaMode::Opaque {
            return Err(DetwallError::invalid_parameter(
                "alpha mode only applies to raster output",
            ));
        }
        Ok(())
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    pub fn pass_settings(&self) -> PassSettings {
        PassSettings {
            pattern: self.pattern,
            max_n: self.max_n,
            budget: self.budget,
            seed: self.effective_seed(),
        }
    }
}

/// Catalogue of request parameters: type, default, bounds and options.
pub fn describe_parameters() -> serde_json::Value {
    let d = GenerationRequest::default();
    let v = &d.visual;
    json!({
        "render_spec_version": crate::spec::version::RENDER_SPEC_VERSION,
        "parameters": {
            "canvas.width": {"type": "int", "default": d.canvas.width, "min": 1, "max": MAX_CANVAS_SIDE},
            "canvas.height": {"type": "int", "default": d.canvas.height, "min": 1, "max": MAX_CANVAS_SIDE},
            "canvas.cell_size": {"type": "int", "default": d.canvas.cell_size, "min": 1, "max": MAX_CELL_SIZE},
            "canvas.gap_cells": {"type": "int", "default": d.canvas.gap_cells, "min": 0, "max": MAX_GAP_CELLS},
            "visual.hue": {"type": "str", "default": v.hue.as_str(), "options": Hue::names()},
            "visual.normalizer": {"type": "float", "default": v.normalizer, "min": 0.0, "max": 1.0},
            "visual.low": {"type": "float", "default": v.low, "description": "minimum matrix entry and brightness"},
            "visual.high": {"type": "float", "default": v.high, "description": "maximum matrix entry and brightness"},
            "visual.blur_sigma": {"type": "float", "default": v.blur_sigma, "min": 0.0, "max": MAX_BLUR_SIGMA},
            "visual.vignette_strength": {"type": "float", "default": v.vignette_strength, "min": 0.0, "max": 1.0},
            "visual.feather_strength": {"type": "float", "default": v.feather_strength, "min": 0.0, "max": 1.0},
            "visual.use_determinant": {"type": "bool", "default": v.use_determinant},
            "visual.use_max": {"type": "bool", "default": v.use_max},
            "visual.secondary_metric": {
                "type": "str",
                "default": v.secondary_metric.as_str(),
                "options": [SecondaryMetric::MeanEntry.as_str(), SecondaryMetric::MeanDiagonal.as_str()],
            },
            "pattern": {
                "type": "str",
                "default": d.pattern.as_str(),
                "options": [Pattern::Mixed.as_str(), Pattern::Uniform.as_str(), Pattern::Gradient.as_str()],
            },
            "max_n": {"type": "int", "default": d.max_n, "min": MIN_MATRIX_DIM, "max": MAX_MATRIX_DIM},
            "budget": {"type": "int", "default": d.budget, "min": 1, "max": MAX_BUDGET},
            "seed": {"type": "int", "default": DEFAULT_SEED},
            "output": {"type": "str", "default": d.output.as_str(), "options": [OutputFormat::Raster.as_str(), OutputFormat::Spec.as_str()]},
            "alpha": {"type": "str", "default": d.alpha.as_str(), "options": [AlphaMode::Opaque.as_str(), AlphaMode::Chroma.as_str()]},
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/config/request.rs"]
mod tests;
