use rayon::prelude::*;

use crate::foundation::error::{DetwallError, DetwallResult};

/// Kernel radius covering three standard deviations.
pub fn radius_for_sigma(sigma: f64) -> u32 {
    if !(sigma > 0.0) {
        return 0;
    }
    ((sigma * 3.0).ceil() as u32).max(1)
}

/// Separable, edge-clamped Gaussian blur over RGBA8 in Q16 fixed point.
pub fn blur_rgba8(src: &[u8], width: u32, height: u32, sigma: f64) -> DetwallResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DetwallError::invalid_parameter("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(DetwallError::invalid_parameter(
            "blur_rgba8 expects src matching width*height*4",
        ));
    }
    if !sigma.is_finite() {
        return Err(DetwallError::invalid_parameter("blur sigma must be finite"));
    }
    let radius = radius_for_sigma(sigma);
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma);
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Normalized Gaussian taps for offsets `-radius..=radius`.
pub(crate) fn gaussian_weights(radius: u32, sigma: f64) -> Vec<f64> {
    let r = radius as i32;
    let denom = 2.0 * sigma * sigma;
    let taps: Vec<f64> = (-r..=r)
        .map(|i| (-f64::from(i * i) / denom).exp())
        .collect();
    let sum: f64 = taps.iter().sum();
    taps.into_iter().map(|w| w / sum).collect()
}

/// Q16 taps summing to exactly 65536; quantization drift lands on the center tap.
fn gaussian_kernel_q16(radius: u32, sigma: f64) -> Vec<u32> {
    let mut kernel: Vec<u32> = gaussian_weights(radius, sigma)
        .into_iter()
        .map(|w| (w * 65536.0).round() as u32)
        .collect();
    let total: i64 = kernel.iter().map(|&q| i64::from(q)).sum();
    let mid = kernel.len() / 2;
    kernel[mid] = (i64::from(kernel[mid]) + 65536 - total) as u32;
    kernel
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let row_len = width as usize * 4;
    dst.par_chunks_mut(row_len)
        .zip(src.par_chunks(row_len))
        .for_each(|(out_row, in_row)| {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                    let idx = sx as usize * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(in_row[idx + c]);
                    }
                }
                let out_idx = x as usize * 4;
                for c in 0..4 {
                    out_row[out_idx + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let row_len = width as usize * 4;
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, out_row)| {
            for x in 0..width as usize {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y as i32 + ki as i32 - radius).clamp(0, h - 1);
                    let idx = sy as usize * row_len + x * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..4 {
                    out_row[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
