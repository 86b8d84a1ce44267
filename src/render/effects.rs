//! Post-paint effects over tightly packed RGBA8 buffers.
//!
//! Both passes leave the alpha channel alone. Vignette is row-parallel; feathering
//! reads from a snapshot taken before any block is touched, so block order does not
//! matter.

use rayon::prelude::*;

use crate::foundation::core::PixelRect;
use crate::foundation::error::{DetwallError, DetwallResult};
use crate::foundation::math::round_half_up_u8;

fn check_buffer(data: &[u8], width: u32, height: u32, what: &str) -> DetwallResult<()> {
    let expected = (width as usize) * (height as usize) * 4;
    if data.len() != expected {
        return Err(DetwallError::invalid_parameter(format!(
            "{what} expects a {width}x{height} rgba8 buffer ({expected} bytes), got {}",
            data.len()
        )));
    }
    Ok(())
}

/// Vignette multiplier for the pixel at `(x, y)`.
///
/// Decays from 1.0 at the canvas center to `1 - strength` at the corners, measured from
/// pixel centers and normalized by the half-diagonal.
pub fn vignette_factor(x: u32, y: u32, width: u32, height: u32, strength: f64) -> f64 {
    let cx = f64::from(width) * 0.5;
    let cy = f64::from(height) * 0.5;
    let half_diag = (cx * cx + cy * cy).sqrt();
    if half_diag <= 0.0 {
        return 1.0;
    }
    let dx = f64::from(x) + 0.5 - cx;
    let dy = f64::from(y) + 0.5 - cy;
    let dist = (dx * dx + dy * dy).sqrt();
    (1.0 - strength * dist / half_diag).clamp(0.0, 1.0)
}

pub fn vignette_in_place(
    data: &mut [u8],
    width: u32,
    height: u32,
    strength: f64,
) -> DetwallResult<()> {
    check_buffer(data, width, height, "vignette")?;
    if strength <= 0.0 || data.is_empty() {
        return Ok(());
    }
    let row_len = width as usize * 4;
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let f = vignette_factor(x as u32, y as u32, width, height, strength);
                for c in &mut px[..3] {
                    *c = round_half_up_u8(f64::from(*c) * f);
                }
            }
        });
    Ok(())
}

/// Width of the feather band for a block, in pixels.
pub fn feather_band(rect: PixelRect, strength: f64) -> f64 {
    f64::from(rect.width.min(rect.height)) * strength * 0.5
}

/// Raised-cosine weight of the original pixel at offset `d` into a band of `band` pixels.
pub fn feather_mask(d: f64, band: f64) -> f64 {
    let t = (d / band).clamp(0.0, 1.0);
    0.5 * (1.0 - (std::f64::consts::PI * t).cos())
}

/// Offset of `(px, py)` from the nearest edge of `rect`, and that pixel mirrored across
/// the edge.
///
/// Ties resolve left, right, top, bottom. The mirror may fall outside the canvas, in
/// which case the coordinates are negative or past the far edge.
pub fn nearest_edge_mirror(rect: PixelRect, px: u32, py: u32) -> (u32, i64, i64) {
    let (x, y) = (i64::from(px), i64::from(py));
    let left = i64::from(rect.x);
    let top = i64::from(rect.y);
    let right = i64::from(rect.right());
    let bottom = i64::from(rect.bottom());

    let candidates = [
        (x - left, 2 * left - 1 - x, y),
        (right - 1 - x, 2 * right - 1 - x, y),
        (y - top, x, 2 * top - 1 - y),
        (bottom - 1 - y, x, 2 * bottom - 1 - y),
    ];
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.0 < best.0 {
            best = *c;
        }
    }
    (best.0.max(0) as u32, best.1, best.2)
}

/// Blend every pixel of `rects` toward the midpoint with its mirror across the nearest
/// block edge.
///
/// `snapshot` is the pre-feather canvas; writes go to `data`.
pub fn feather_blocks(
    data: &mut [u8],
    snapshot: &[u8],
    width: u32,
    height: u32,
    rects: &[PixelRect],
    strength: f64,
) -> DetwallResult<()> {
    check_buffer(data, width, height, "feather")?;
    check_buffer(snapshot, width, height, "feather snapshot")?;
    if strength <= 0.0 {
        return Ok(());
    }
    for &rect in rects {
        feather_block(data, snapshot, width, height, rect, strength);
    }
    Ok(())
}

fn feather_block(
    data: &mut [u8],
    snapshot: &[u8],
    width: u32,
    height: u32,
    rect: PixelRect,
    strength: f64,
) {
    let band = feather_band(rect, strength);
    if band <= 0.0 {
        return;
    }
    let x_end = rect.right().min(width);
    let y_end = rect.bottom().min(height);
    for py in rect.y..y_end {
        for px in rect.x..x_end {
            let (d, mx, my) = nearest_edge_mirror(rect, px, py);
            if mx < 0 || my < 0 || mx >= i64::from(width) || my >= i64::from(height) {
                continue;
            }
            let mask = feather_mask(f64::from(d), band);
            if mask >= 1.0 {
                continue;
            }
            let idx = (py as usize * width as usize + px as usize) * 4;
            let midx = (my as usize * width as usize + mx as usize) * 4;
            for c in 0..3 {
                let orig = f64::from(snapshot[idx + c]);
                let mid = (orig + f64::from(snapshot[midx + c])) * 0.5;
                data[idx + c] = round_half_up_u8(orig * mask + mid * (1.0 - mask));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/effects.rs"]
mod tests;
