use crate::{
    foundation::core::PixelRect,
    foundation::error::{DetwallError, DetwallResult},
    generate::pass::GenerationPass,
    render::{
        alpha::{AlphaMode, apply_alpha_mode},
        blur::blur_rgba8,
        effects::{feather_blocks, vignette_in_place},
    },
};

/// Straight-alpha RGBA8 image, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Opaque black canvas.
    pub fn black(width: u32, height: u32) -> Self {
        let data = [0u8, 0, 0, 255].repeat(width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> DetwallResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(DetwallError::invalid_parameter(format!(
                "rgba8 buffer of {} bytes does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Fill `rect` (clipped to the image) with an opaque color.
    pub fn fill_rect(&mut self, rect: PixelRect, rgb: [u8; 3]) {
        let x_end = rect.right().min(self.width) as usize;
        let y_end = rect.bottom().min(self.height) as usize;
        let x0 = rect.x as usize;
        if x0 >= x_end {
            return;
        }
        let px = [rgb[0], rgb[1], rgb[2], 255];
        for y in rect.y as usize..y_end {
            let start = (y * self.width as usize + x0) * 4;
            let end = (y * self.width as usize + x_end) * 4;
            for dst in self.data[start..end].chunks_exact_mut(4) {
                dst.copy_from_slice(&px);
            }
        }
    }
}

/// Paint every block with its base color over a black background. No effects.
pub fn paint_blocks(pass: &GenerationPass) -> RasterImage {
    let mut img = RasterImage::black(pass.canvas.width, pass.canvas.height);
    for (block, color) in pass.blocks.iter().zip(pass.block_colors()) {
        img.fill_rect(block.rect(), color.to_array());
    }
    img
}

/// Paint a pass and apply blur, vignette and feathering in that order.
#[tracing::instrument(skip(pass), fields(width = pass.canvas.width, height = pass.canvas.height, blocks = pass.blocks.len()))]
pub fn render_raster(pass: &GenerationPass) -> DetwallResult<RasterImage> {
    let visual = &pass.visual;
    let mut img = paint_blocks(pass);
    let (w, h) = (img.width, img.height);

    if visual.blur_sigma > 0.0 {
        img.data = blur_rgba8(&img.data, w, h, visual.blur_sigma)?;
    }
    if visual.vignette_strength > 0.0 {
        vignette_in_place(&mut img.data, w, h, visual.vignette_strength)?;
    }
    if visual.feather_strength > 0.0 {
        let snapshot = img.data.clone();
        let rects: Vec<PixelRect> = pass.blocks.iter().map(|b| b.rect()).collect();
        feather_blocks(
            &mut img.data,
            &snapshot,
            w,
            h,
            &rects,
            visual.feather_strength,
        )?;
    }

    tracing::debug!(
        blur_sigma = visual.blur_sigma,
        vignette = visual.vignette_strength,
        feather = visual.feather_strength,
        "raster render complete"
    );
    Ok(img)
}

/// [`render_raster`] followed by an alpha rewrite.
pub fn render_raster_with_alpha(
    pass: &GenerationPass,
    alpha: AlphaMode,
) -> DetwallResult<RasterImage> {
    let mut img = render_raster(pass)?;
    if alpha != AlphaMode::Opaque {
        apply_alpha_mode(&mut img.data, alpha);
    }
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
