//! Manual blur for surfaces without a native filter: three edge-clamped box passes
//! approximating a Gaussian of the requested sigma.

/// Box radius whose three-pass variance is closest to `sigma^2`.
pub fn box_radius_for_sigma(sigma: f64) -> u32 {
    if !(sigma > 0.0) {
        return 0;
    }
    let r = (((4.0 * sigma * sigma + 1.0).sqrt() - 1.0) * 0.5).round();
    (r as u32).max(1)
}

pub fn gaussian_approx_rgba8(data: &mut [u8], width: u32, height: u32, sigma: f64) {
    let radius = box_radius_for_sigma(sigma);
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    let mut scratch = vec![0u8; data.len()];
    for _ in 0..3 {
        box_blur_rgba8(data, &mut scratch, width, height, radius);
    }
}

/// One separable sliding-window box blur. Color channels only; `scratch` must match
/// `data` in length.
pub fn box_blur_rgba8(data: &mut [u8], scratch: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = width as i32;
    let h = height as i32;
    let r = radius as i32;
    let div = 2 * radius + 1;
    let half = div / 2;

    for y in 0..h {
        let row = y as usize * width as usize;
        let mut sum = [0u32; 3];
        for i in -r..=r {
            let idx = (row + i.clamp(0, w - 1) as usize) * 4;
            for c in 0..3 {
                sum[c] += u32::from(data[idx + c]);
            }
        }
        for x in 0..w {
            if x > 0 {
                let li = (row + (x - 1 - r).clamp(0, w - 1) as usize) * 4;
                let ei = (row + (x + r).clamp(0, w - 1) as usize) * 4;
                for c in 0..3 {
                    sum[c] = sum[c] - u32::from(data[li + c]) + u32::from(data[ei + c]);
                }
            }
            let idx = (row + x as usize) * 4;
            for c in 0..3 {
                scratch[idx + c] = ((sum[c] + half) / div) as u8;
            }
            scratch[idx + 3] = data[idx + 3];
        }
    }

    for x in 0..w {
        let mut sum = [0u32; 3];
        for i in -r..=r {
            let idx = (i.clamp(0, h - 1) as usize * width as usize + x as usize) * 4;
            for c in 0..3 {
                sum[c] += u32::from(scratch[idx + c]);
            }
        }
        for y in 0..h {
            if y > 0 {
                let li = ((y - 1 - r).clamp(0, h - 1) as usize * width as usize + x as usize) * 4;
                let ei = ((y + r).clamp(0, h - 1) as usize * width as usize + x as usize) * 4;
                for c in 0..3 {
                    sum[c] = sum[c] - u32::from(scratch[li + c]) + u32::from(scratch[ei + c]);
                }
            }
            let idx = (y as usize * width as usize + x as usize) * 4;
            for c in 0..3 {
                data[idx + c] = ((sum[c] + half) / div) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/fallback.rs"]
mod tests;
