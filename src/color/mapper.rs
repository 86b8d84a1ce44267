//! Determinant-to-color mapping.
//!
//! This is the one formula both render paths must agree on bit-for-bit. Every step is
//! plain `f64` arithmetic in a fixed order, and quantization is `floor(v * 255 + 0.5)`.
//! External client implementations are pinned by `tests/data/color_corpus.json`.

use crate::{
    config::visual::{SecondaryMetric, VisualParameters},
    foundation::core::Rgb8,
    foundation::math::round_half_up_u8,
    linalg::matrix::Matrix,
};

/// Brightness used when every block shares one determinant magnitude.
pub const DEGENERATE_BRIGHTNESS: f64 = 0.5;

/// Extrema of `|determinant|` over one generation pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeterminantRange {
    pub min: f64,
    pub max: f64,
}

impl DeterminantRange {
    /// True extrema of the magnitudes; `None` for an empty input.
    pub fn from_determinants(dets: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut iter = dets.into_iter().map(f64::abs);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self { min, max })
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.max > self.min)
    }

    /// `clamp((|det| - min) / (max - min), 0, 1)`, or the midpoint when degenerate.
    pub fn normalize(&self, det: f64) -> f64 {
        if self.is_degenerate() {
            return DEGENERATE_BRIGHTNESS;
        }
        ((det.abs() - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Step 1: the raw metric in `[0, 1]`.
pub fn metric_value(
    det: f64,
    matrix: &Matrix,
    range: &DeterminantRange,
    params: &VisualParameters,
) -> f64 {
    if params.use_determinant {
        return range.normalize(det);
    }
    let v = match params.secondary_metric {
        SecondaryMetric::MeanEntry => matrix.mean_entry(),
        SecondaryMetric::MeanDiagonal => matrix.trace() / matrix.dim() as f64,
    };
    ((v - params.low) / (params.high - params.low)).clamp(0.0, 1.0)
}

/// Step 2: pull toward mid-gray by `normalizer`, then clamp into the brightness bounds.
pub fn apply_normalizer(t: f64, params: &VisualParameters) -> f64 {
    let s = (1.0 - params.normalizer) * t + params.normalizer * 0.5;
    let lo = params.low.clamp(0.0, 1.0);
    let hi = params.high.clamp(0.0, 1.0);
    s.clamp(lo, hi)
}

/// HSL to 8-bit RGB with round-half-up quantization.
pub fn hsl_to_rgb8(hue_deg: f64, saturation: f64, lightness: f64) -> Rgb8 {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    Rgb8::new(
        round_half_up_u8((r1 + m) * 255.0),
        round_half_up_u8((g1 + m) * 255.0),
        round_half_up_u8((b1 + m) * 255.0),
    )
}

/// Final brightness for one block.
pub fn block_brightness(
    det: f64,
    matrix: &Matrix,
    range: &DeterminantRange,
    params: &VisualParameters,
) -> f64 {
    apply_normalizer(metric_value(det, matrix, range, params), params)
}

/// Color of one block.
pub fn determinant_to_color(
    det: f64,
    matrix: &Matrix,
    range: &DeterminantRange,
    params: &VisualParameters,
) -> Rgb8 {
    let (hue_deg, saturation) = params.hue.base();
    hsl_to_rgb8(
        hue_deg,
        saturation,
        block_brightness(det, matrix, range, params),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/color/mapper.rs"]
mod tests;
