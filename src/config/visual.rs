use crate::{
    color::palette::Hue,
    foundation::error::{DetwallError, DetwallResult},
    linalg::sampler::validate_entry_range,
};

/// Largest accepted Gaussian blur sigma, in pixels.
pub const MAX_BLUR_SIGMA: f64 = 64.0;

/// Brightness source used when `use_determinant` is off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryMetric {
    /// Mean of all entries, normalized by `[low, high]`.
    #[default]
    MeanEntry,
    /// Trace divided by dimension, normalized by `[low, high]`.
    MeanDiagonal,
}

impl SecondaryMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MeanEntry => "mean_entry",
            Self::MeanDiagonal => "mean_diagonal",
        }
    }
}

/// Per-request look of the wallpaper. Validated once at entry; out-of-range values are
/// rejected, never clamped.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualParameters {
    pub hue: Hue,
    /// Pull toward mid-gray, `0..=1`.
    pub normalizer: f64,
    /// Lower bound of matrix entries and of brightness.
    pub low: f64,
    /// Upper bound of matrix entries and of brightness.
    pub high: f64,
    pub blur_sigma: f64,
    pub vignette_strength: f64,
    pub feather_strength: f64,
    pub use_determinant: bool,
    pub use_max: bool,
    #[serde(default)]
    pub secondary_metric: SecondaryMetric,
}

impl Default for VisualParameters {
    fn default() -> Self {
        Self {
            hue: Hue::Purple,
            normalizer: 0.5,
            low: 0.0,
            high: 1.0,
            blur_sigma: 1.5,
            vignette_strength: 0.25,
            feather_strength: 0.0,
            use_determinant: true,
            use_max: true,
            secondary_metric: SecondaryMetric::MeanEntry,
        }
    }
}

impl VisualParameters {
    pub fn validate(&self) -> DetwallResult<()> {
        validate_entry_range(self.low, self.high)?;
        unit_interval("normalizer", self.normalizer)?;
        unit_interval("vignette_strength", self.vignette_strength)?;
        unit_interval("feather_strength", self.feather_strength)?;
        if !self.blur_sigma.is_finite() || !(0.0..=MAX_BLUR_SIGMA).contains(&self.blur_sigma) {
            return Err(DetwallError::invalid_parameter(format!(
                "blur_sigma must be in 0..={MAX_BLUR_SIGMA}, got {}",
                self.blur_sigma
            )));
        }
        Ok(())
    }
}

fn unit_interval(name: &str, v: f64) -> DetwallResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(DetwallError::invalid_parameter(format!(
            "{name} must be in 0..=1, got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/visual.rs"]
mod tests;
