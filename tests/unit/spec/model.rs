use super::*;
use crate::{
    generate::pass::{GenerationLimits, PassSettings, generate_pass},
    layout::planner::Pattern,
};

fn small_pass() -> GenerationPass {
    let canvas = CanvasConfig::new(60, 40, 10, 1).unwrap();
    generate_pass(
        &canvas,
        &VisualParameters::default(),
        PassSettings {
            pattern: Pattern::Mixed,
            max_n: 4,
            budget: 6,
            seed: 9,
        },
        &GenerationLimits::default(),
    )
    .unwrap()
}

#[test]
fn json_round_trip_reproduces_the_pass() {
    let pass = small_pass();
    let spec = RenderSpec::from_pass(&pass).unwrap();
    let json = spec.to_json().unwrap();
    let parsed = RenderSpec::from_json(&json).unwrap();
    assert_eq!(parsed, spec);
    assert_eq!(parsed.validate().unwrap(), pass);
}

#[test]
fn wire_shape_matches_contract() {
    let spec = RenderSpec::from_pass(&small_pass()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
    assert_eq!(v["version"], RENDER_SPEC_VERSION);
    for key in ["width", "height", "cell_size", "gap_cells"] {
        assert!(v["canvas"].get(key).is_some(), "canvas.{key}");
    }
    for key in [
        "hue",
        "normalizer",
        "low",
        "high",
        "blur_sigma",
        "vignette_strength",
        "feather_strength",
        "use_determinant",
        "use_max",
    ] {
        assert!(v["visual"].get(key).is_some(), "visual.{key}");
    }
    let block = &v["blocks"][0];
    for key in ["x", "y", "width", "height", "matrix", "determinant", "size"] {
        assert!(block.get(key).is_some(), "blocks[0].{key}");
    }
    assert!(block["matrix"][0].is_array());
}

#[test]
fn unknown_fields_are_rejected_cleanly() {
    let spec = RenderSpec::from_pass(&small_pass()).unwrap();
    let mut v = serde_json::to_value(&spec).unwrap();
    v["visual"]["grain"] = serde_json::json!(0.3);
    let err = RenderSpec::from_value(v).unwrap_err();
    assert!(matches!(err, DetwallError::SpecIntegrity(_)));
}

#[test]
fn unknown_hue_is_reported_as_unsupported() {
    let spec = RenderSpec::from_pass(&small_pass()).unwrap();
    let mut v = serde_json::to_value(&spec).unwrap();
    v["visual"]["hue"] = serde_json::json!("chartreuse");
    let err = RenderSpec::from_value(v).unwrap_err();
    assert!(matches!(err, DetwallError::UnsupportedHue(_)));
}

#[test]
fn garbage_is_an_integrity_error() {
    assert!(matches!(
        RenderSpec::from_json("{not json"),
        Err(DetwallError::SpecIntegrity(_))
    ));
    assert!(matches!(
        RenderSpec::from_json(r#"{"version":1}"#),
        Err(DetwallError::SpecIntegrity(_))
    ));
}

#[test]
fn parsed_floats_are_bit_identical() {
    let canvas = CanvasConfig::new(64, 64, 8, 0).unwrap();
    for seed in 0..25 {
        let pass = generate_pass(
            &canvas,
            &VisualParameters::default(),
            PassSettings {
                pattern: Pattern::Uniform,
                max_n: 4,
                budget: 3,
                seed,
            },
            &GenerationLimits::default(),
        )
        .unwrap();
        let spec = RenderSpec::from_pass(&pass).unwrap();
        let parsed = RenderSpec::from_json(&spec.to_json().unwrap()).unwrap();
        for (a, b) in spec.blocks.iter().zip(&parsed.blocks) {
            assert_eq!(a.determinant.to_bits(), b.determinant.to_bits(), "seed {seed}");
        }
        assert_eq!(parsed.validate().unwrap(), pass, "seed {seed}");
    }
}
