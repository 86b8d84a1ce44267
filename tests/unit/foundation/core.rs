use super::*;

#[test]
fn grid_dims_round_up_partial_cells() {
    let c = CanvasConfig::new(40, 40, 20, 0).unwrap();
    assert_eq!(c.grid_dims(), (2, 2));

    let c = CanvasConfig::new(41, 39, 20, 0).unwrap();
    assert_eq!(c.grid_dims(), (3, 2));
}

#[test]
fn gap_widens_the_stride() {
    let c = CanvasConfig::new(100, 50, 10, 1).unwrap();
    assert_eq!(c.stride(), 20);
    assert_eq!(c.grid_dims(), (5, 3));
}

#[test]
fn rejects_out_of_bounds_geometry() {
    assert!(CanvasConfig::new(0, 10, 5, 0).is_err());
    assert!(CanvasConfig::new(10, 10, 0, 0).is_err());
    assert!(CanvasConfig::new(MAX_CANVAS_SIDE + 1, 10, 5, 0).is_err());
    assert!(CanvasConfig::new(10, 10, 5, MAX_GAP_CELLS + 1).is_err());
    let err = CanvasConfig::new(10, 10, 0, 0).unwrap_err();
    assert!(matches!(err, DetwallError::InvalidParameter(_)));
}

#[test]
fn rect_intersection_is_half_open() {
    let a = PixelRect {
        x: 0,
        y: 0,
        width: 10,
        height: 10,
    };
    let b = PixelRect {
        x: 10,
        y: 0,
        width: 5,
        height: 5,
    };
    assert!(!a.intersects(b));
    assert!(a.contains(9, 9));
    assert!(!a.contains(10, 9));
}

#[test]
fn canvas_json_defaults_gap_and_rejects_unknown_fields() {
    let c: CanvasConfig =
        serde_json::from_str(r#"{"width":8,"height":4,"cell_size":2}"#).unwrap();
    assert_eq!(c.gap_cells, 0);
    assert!(
        serde_json::from_str::<CanvasConfig>(
            r#"{"width":8,"height":4,"cell_size":2,"dpi":2}"#
        )
        .is_err()
    );
}
