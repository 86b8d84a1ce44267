use crate::foundation::error::{DetwallError, DetwallResult};
use crate::render::raster::RasterImage;

/// Accepted drift between two renders of the same pass once effects are applied.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParityTolerance {
    /// Largest allowed absolute difference on any single color channel.
    pub max_channel_delta: u8,
    /// Largest allowed mean absolute difference over all color channels.
    pub mean_channel_delta: f64,
}

impl Default for ParityTolerance {
    fn default() -> Self {
        Self {
            max_channel_delta: 2,
            mean_channel_delta: 0.5,
        }
    }
}

impl ParityTolerance {
    /// Bit-identical color channels.
    pub const EXACT: Self = Self {
        max_channel_delta: 0,
        mean_channel_delta: 0.0,
    };
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParityReport {
    pub max_channel_delta: u8,
    pub mean_channel_delta: f64,
    pub differing_pixels: u64,
    pub total_pixels: u64,
    /// First pixel holding the largest channel delta, if any pixel differs.
    pub worst_pixel: Option<(u32, u32)>,
}

impl ParityReport {
    pub fn within(&self, tol: &ParityTolerance) -> bool {
        self.max_channel_delta <= tol.max_channel_delta
            && self.mean_channel_delta <= tol.mean_channel_delta
    }
}

/// Compare the color channels of two same-sized images. Alpha is ignored.
pub fn compare_rgba(a: &RasterImage, b: &RasterImage) -> DetwallResult<ParityReport> {
    if a.width != b.width || a.height != b.height {
        return Err(DetwallError::invalid_parameter(format!(
            "cannot compare {}x{} with {}x{}",
            a.width, a.height, b.width, b.height
        )));
    }
    let total_pixels = u64::from(a.width) * u64::from(a.height);
    let mut max_delta = 0u8;
    let mut sum = 0u64;
    let mut differing = 0u64;
    let mut worst = None;

    for (i, (pa, pb)) in a
        .data
        .chunks_exact(4)
        .zip(b.data.chunks_exact(4))
        .enumerate()
    {
        let mut px_max = 0u8;
        for c in 0..3 {
            let d = pa[c].abs_diff(pb[c]);
            sum += u64::from(d);
            px_max = px_max.max(d);
        }
        if px_max > 0 {
            differing += 1;
        }
        if px_max > max_delta {
            max_delta = px_max;
            let w = a.width as usize;
            worst = Some(((i % w) as u32, (i / w) as u32));
        }
    }

    let channels = total_pixels * 3;
    let mean = if channels == 0 {
        0.0
    } else {
        sum as f64 / channels as f64
    };
    Ok(ParityReport {
        max_channel_delta: max_delta,
        mean_channel_delta: mean,
        differing_pixels: differing,
        total_pixels,
        worst_pixel: worst,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compare.rs"]
mod tests;
