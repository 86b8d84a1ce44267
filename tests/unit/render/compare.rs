use super::*;

#[test]
fn identical_images_report_zero() {
    let a = RasterImage::black(3, 2);
    let r = compare_rgba(&a, &a.clone()).unwrap();
    assert_eq!(r.max_channel_delta, 0);
    assert_eq!(r.differing_pixels, 0);
    assert_eq!(r.worst_pixel, None);
    assert!(r.within(&ParityTolerance::EXACT));
}

#[test]
fn report_locates_worst_pixel_and_ignores_alpha() {
    let a = RasterImage::black(2, 2);
    let mut b = a.clone();
    b.data[3] = 0; // alpha only
    b.data[4 * 3] = 3; // pixel (1,1) red
    b.data[4 * 2 + 1] = 1; // pixel (0,1) green

    let r = compare_rgba(&a, &b).unwrap();
    assert_eq!(r.max_channel_delta, 3);
    assert_eq!(r.differing_pixels, 2);
    assert_eq!(r.worst_pixel, Some((1, 1)));
    assert!((r.mean_channel_delta - 4.0 / 12.0).abs() < 1e-12);
    assert!(!r.within(&ParityTolerance::default()));
    assert!(r.within(&ParityTolerance {
        max_channel_delta: 3,
        mean_channel_delta: 0.5,
    }));
}

#[test]
fn size_mismatch_is_an_error() {
    let err = compare_rgba(&RasterImage::black(2, 2), &RasterImage::black(2, 3)).unwrap_err();
    assert!(matches!(err, DetwallError::InvalidParameter(_)));
}

#[test]
fn tolerance_parses_with_defaults() {
    let tol: ParityTolerance = serde_json::from_str(r#"{"max_channel_delta":4}"#).unwrap();
    assert_eq!(tol.max_channel_delta, 4);
    assert_eq!(tol.mean_channel_delta, 0.5);
}
