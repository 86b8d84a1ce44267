use super::*;

#[test]
fn defaults_are_valid() {
    VisualParameters::default().validate().unwrap();
}

#[test]
fn range_errors_are_invalid_range() {
    let v = VisualParameters {
        low: 1.0,
        high: 1.0,
        ..VisualParameters::default()
    };
    assert!(matches!(v.validate(), Err(DetwallError::InvalidRange(_))));
}

#[test]
fn out_of_bounds_effects_are_rejected_not_clamped() {
    let cases = [
        VisualParameters {
            normalizer: 1.5,
            ..VisualParameters::default()
        },
        VisualParameters {
            vignette_strength: -0.1,
            ..VisualParameters::default()
        },
        VisualParameters {
            feather_strength: f64::NAN,
            ..VisualParameters::default()
        },
        VisualParameters {
            blur_sigma: MAX_BLUR_SIGMA + 1.0,
            ..VisualParameters::default()
        },
    ];
    for v in cases {
        assert!(matches!(
            v.validate(),
            Err(DetwallError::InvalidParameter(_))
        ));
    }
}

#[test]
fn json_uses_snake_case_metric_and_defaults_it() {
    let json = r#"{
        "hue": "blue", "normalizer": 0.5, "low": 0, "high": 1,
        "blur_sigma": 0, "vignette_strength": 0, "feather_strength": 0,
        "use_determinant": false, "use_max": true
    }"#;
    let v: VisualParameters = serde_json::from_str(json).unwrap();
    assert_eq!(v.secondary_metric, SecondaryMetric::MeanEntry);
    assert_eq!(v.hue, Hue::Blue);

    let out = serde_json::to_value(VisualParameters {
        secondary_metric: SecondaryMetric::MeanDiagonal,
        ..v
    })
    .unwrap();
    assert_eq!(out["secondary_metric"], "mean_diagonal");
}
