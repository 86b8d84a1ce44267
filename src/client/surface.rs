//! Drawing seam for the client renderer.
//!
//! A [`Surface`] exposes the handful of primitives a browser-style 2D canvas offers:
//! solid rectangles, an optional native blur filter, raw pixel readback, a multiplied
//! radial gradient and a per-block edge gradient. Effects run in `f32`, so they track
//! the raster renderer closely but not bit-exactly.

use crate::{
    foundation::core::PixelRect,
    foundation::error::{DetwallError, DetwallResult},
    render::blur::{gaussian_weights, radius_for_sigma},
    render::effects::nearest_edge_mirror,
    render::raster::RasterImage,
};

pub trait Surface: Send {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Opaque fill, clipped to the surface.
    fn fill_rect(&mut self, rect: PixelRect, rgb: [u8; 3]);

    fn supports_native_blur(&self) -> bool {
        false
    }

    fn blur_native(&mut self, sigma: f32) -> DetwallResult<()> {
        let _ = sigma;
        Err(DetwallError::invalid_parameter(
            "surface has no native blur filter",
        ))
    }

    /// RGBA8 copy of the whole surface.
    fn read_pixels(&self) -> Vec<u8>;

    fn write_pixels(&mut self, data: &[u8]) -> DetwallResult<()>;

    /// Multiply color channels by a radial ramp from `inner` at `center` to `outer` at
    /// `radius` and beyond.
    fn multiply_radial_gradient(&mut self, center: (f32, f32), radius: f32, inner: f32, outer: f32);

    /// Soften the inside edges of `rect`, blending toward pixels mirrored across the
    /// nearest edge as found in `source`.
    fn feather_edges(&mut self, rect: PixelRect, band: f32, source: &[u8]);

    fn snapshot(&self) -> DetwallResult<RasterImage> {
        RasterImage::from_rgba8(self.width(), self.height(), self.read_pixels())
    }
}

/// Creates offscreen surfaces for renders.
pub trait SurfaceFactory: Send + Sync {
    fn create(&self, width: u32, height: u32) -> DetwallResult<Box<dyn Surface>>;
}

/// In-memory RGBA8 surface.
#[derive(Clone, Debug)]
pub struct SoftwareSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    native_blur: bool,
}

impl SoftwareSurface {
    /// Opaque black surface with a native blur filter.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: [0u8, 0, 0, 255].repeat(width as usize * height as usize),
            native_blur: true,
        }
    }

    /// Same surface, but forcing callers onto the manual blur path.
    pub fn without_native_blur(mut self) -> Self {
        self.native_blur = false;
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

impl Surface for SoftwareSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, rect: PixelRect, rgb: [u8; 3]) {
        let x_end = rect.right().min(self.width);
        let y_end = rect.bottom().min(self.height);
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                let i = self.idx(x, y);
                self.data[i..i + 4].copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
            }
        }
    }

    fn supports_native_blur(&self) -> bool {
        self.native_blur
    }

    fn blur_native(&mut self, sigma: f32) -> DetwallResult<()> {
        if !self.native_blur {
            return Err(DetwallError::invalid_parameter(
                "native blur disabled on this surface",
            ));
        }
        if !sigma.is_finite() {
            return Err(DetwallError::invalid_parameter("blur sigma must be finite"));
        }
        if sigma > 0.0 && !self.data.is_empty() {
            gaussian_f32(&mut self.data, self.width, self.height, sigma);
        }
        Ok(())
    }

    fn read_pixels(&self) -> Vec<u8> {
        self.data.clone()
    }

    fn write_pixels(&mut self, data: &[u8]) -> DetwallResult<()> {
        if data.len() != self.data.len() {
            return Err(DetwallError::invalid_parameter(format!(
                "write_pixels expects {} bytes, got {}",
                self.data.len(),
                data.len()
            )));
        }
        self.data.copy_from_slice(data);
        Ok(())
    }

    fn multiply_radial_gradient(&mut self, center: (f32, f32), radius: f32, inner: f32, outer: f32) {
        for y in 0..self.height {
            for x in 0..self.width {
                let dx = x as f32 + 0.5 - center.0;
                let dy = y as f32 + 0.5 - center.1;
                let t = if radius > 0.0 {
                    ((dx * dx + dy * dy).sqrt() / radius).min(1.0)
                } else {
                    1.0
                };
                let f = (inner + (outer - inner) * t).clamp(0.0, 1.0);
                let i = self.idx(x, y);
                for c in &mut self.data[i..i + 3] {
                    *c = (f32::from(*c) * f + 0.5).min(255.0) as u8;
                }
            }
        }
    }

    fn feather_edges(&mut self, rect: PixelRect, band: f32, source: &[u8]) {
        if band <= 0.0 || source.len() != self.data.len() {
            return;
        }
        let x_end = rect.right().min(self.width);
        let y_end = rect.bottom().min(self.height);
        for py in rect.y..y_end {
            for px in rect.x..x_end {
                let (d, mx, my) = nearest_edge_mirror(rect, px, py);
                if mx < 0 || my < 0 || mx >= i64::from(self.width) || my >= i64::from(self.height) {
                    continue;
                }
                let t = (d as f32 / band).min(1.0);
                let mask = 0.5 * (1.0 - (std::f32::consts::PI * t).cos());
                let i = self.idx(px, py);
                let m = self.idx(mx as u32, my as u32);
                for c in 0..3 {
                    let orig = f32::from(source[i + c]);
                    let mid = (orig + f32::from(source[m + c])) * 0.5;
                    self.data[i + c] = (orig * mask + mid * (1.0 - mask) + 0.5).min(255.0) as u8;
                }
            }
        }
    }
}

/// Factory for [`SoftwareSurface`]s.
#[derive(Clone, Copy, Debug)]
pub struct SoftwareSurfaceFactory {
    pub native_blur: bool,
}

impl Default for SoftwareSurfaceFactory {
    fn default() -> Self {
        Self { native_blur: true }
    }
}

impl SurfaceFactory for SoftwareSurfaceFactory {
    fn create(&self, width: u32, height: u32) -> DetwallResult<Box<dyn Surface>> {
        if width == 0 || height == 0 {
            return Err(DetwallError::invalid_parameter(
                "surface width/height must be > 0",
            ));
        }
        let surface = SoftwareSurface::new(width, height);
        Ok(Box::new(if self.native_blur {
            surface
        } else {
            surface.without_native_blur()
        }))
    }
}

fn gaussian_f32(data: &mut [u8], width: u32, height: u32, sigma: f32) {
    let sigma = f64::from(sigma);
    let radius = radius_for_sigma(sigma);
    let kernel: Vec<f32> = gaussian_weights(radius, sigma)
        .into_iter()
        .map(|w| w as f32)
        .collect();
    let radius = radius as i32;

    let (w, h) = (width as i32, height as i32);
    let mut tmp = vec![0f32; data.len()];
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0f32; 3];
            for (ki, kw) in kernel.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let i = ((y * w + sx) as usize) * 4;
                for c in 0..3 {
                    acc[c] += kw * f32::from(data[i + c]);
                }
            }
            // 8-bit intermediate, as a canvas filter would store it.
            let o = ((y * w + x) as usize) * 4;
            for c in 0..3 {
                tmp[o + c] = (acc[c] + 0.5).clamp(0.0, 255.0).floor();
            }
        }
    }
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0f32; 3];
            for (ki, kw) in kernel.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let i = ((sy * w + x) as usize) * 4;
                for c in 0..3 {
                    acc[c] += kw * tmp[i + c];
                }
            }
            let o = ((y * w + x) as usize) * 4;
            for c in 0..3 {
                data[o + c] = (acc[c] + 0.5).clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/surface.rs"]
mod tests;
