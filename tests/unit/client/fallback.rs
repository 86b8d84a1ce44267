use super::*;

#[test]
fn radius_tracks_sigma() {
    assert_eq!(box_radius_for_sigma(0.0), 0);
    assert_eq!(box_radius_for_sigma(0.3), 1);
    assert_eq!(box_radius_for_sigma(1.5), 1);
    assert_eq!(box_radius_for_sigma(4.0), 4);
}

#[test]
fn constant_image_is_unchanged() {
    let (w, h) = (5u32, 4u32);
    let mut data = [40u8, 90, 200, 255].repeat((w * h) as usize);
    let before = data.clone();
    gaussian_approx_rgba8(&mut data, w, h, 2.0);
    assert_eq!(data, before);
}

#[test]
fn box_blur_averages_a_step_edge() {
    // One row: 0 0 0 255 255 255
    let (w, h) = (6u32, 1u32);
    let mut data = Vec::new();
    for x in 0..w {
        let v = if x < 3 { 0 } else { 255 };
        data.extend_from_slice(&[v, v, v, 255]);
    }
    let mut scratch = vec![0u8; data.len()];
    box_blur_rgba8(&mut data, &mut scratch, w, h, 1);
    // Pixel 2 sees [0, 0, 255], pixel 3 sees [0, 255, 255].
    assert_eq!(data[2 * 4], 85);
    assert_eq!(data[3 * 4], 170);
    assert_eq!(data[0], 0);
    assert_eq!(data[5 * 4], 255);
    assert!(data.chunks_exact(4).all(|px| px[3] == 255));
}
