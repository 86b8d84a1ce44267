/// How the alpha channel of a rendered image is produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphaMode {
    /// Fully opaque.
    #[default]
    Opaque,
    /// Alpha follows each pixel's distance from its own luminance (a chroma proxy),
    /// scaled so the most saturated pixel is opaque.
    Chroma,
}

impl AlphaMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opaque => "opaque",
            Self::Chroma => "chroma",
        }
    }
}

fn chroma_intensity(px: &[u8]) -> f64 {
    let (r, g, b) = (f64::from(px[0]), f64::from(px[1]), f64::from(px[2]));
    let lum = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    ((r - lum).powi(2) + (g - lum).powi(2) + (b - lum).powi(2)).sqrt()
}

/// Rewrite the alpha channel of an RGBA8 buffer per `mode`.
///
/// A fully gray image has no chroma anywhere and stays opaque.
pub fn apply_alpha_mode(data: &mut [u8], mode: AlphaMode) {
    match mode {
        AlphaMode::Opaque => {
            for px in data.chunks_exact_mut(4) {
                px[3] = 255;
            }
        }
        AlphaMode::Chroma => {
            let max = data
                .chunks_exact(4)
                .map(chroma_intensity)
                .fold(0.0f64, f64::max);
            for px in data.chunks_exact_mut(4) {
                px[3] = if max > 0.0 {
                    // Truncation keeps the most saturated pixel at exactly 255.
                    (chroma_intensity(px) / max * 255.0).clamp(0.0, 255.0) as u8
                } else {
                    255
                };
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/alpha.rs"]
mod tests;
