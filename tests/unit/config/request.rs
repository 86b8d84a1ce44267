use super::*;

#[test]
fn empty_object_gives_service_defaults() {
    let req = GenerationRequest::from_json("{}").unwrap();
    assert_eq!(req, GenerationRequest::default());
    assert_eq!(
        (req.canvas.width, req.canvas.height, req.canvas.cell_size, req.canvas.gap_cells),
        (1920, 1080, 12, 1)
    );
    assert_eq!((req.max_n, req.budget), (4, 16));
    assert_eq!(req.effective_seed(), DEFAULT_SEED);
    req.validate().unwrap();
}

#[test]
fn partial_request_overrides_fields() {
    let req = GenerationRequest::from_json(
        r#"{
            "canvas": {"width": 100, "height": 100, "cell_size": 50},
            "visual": {
                "hue": "blue", "normalizer": 0.5, "low": 0, "high": 1,
                "blur_sigma": 0, "vignette_strength": 0, "feather_strength": 0,
                "use_determinant": true, "use_max": true
            },
            "max_n": 2,
            "budget": 20,
            "seed": 7,
            "output": "spec"
        }"#,
    )
    .unwrap();
    assert_eq!(req.canvas.gap_cells, 0);
    assert_eq!(req.visual.hue, Hue::Blue);
    assert_eq!(req.output, OutputFormat::Spec);
    assert_eq!(req.pass_settings().seed, 7);
    assert_eq!(req.pattern, Pattern::Mixed);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = GenerationRequest::from_json(r#"{"max_matrix_size": 3}"#).unwrap_err();
    assert!(matches!(err, DetwallError::Serde(_)));
}

#[test]
fn validate_uses_error_taxonomy() {
    let mut req = GenerationRequest {
        max_n: 6,
        ..GenerationRequest::default()
    };
    assert!(matches!(
        req.validate().unwrap_err(),
        DetwallError::InvalidParameter(_)
    ));

    req.max_n = 4;
    req.visual.low = 1.0;
    req.visual.high = 1.0;
    assert!(matches!(
        req.validate().unwrap_err(),
        DetwallError::InvalidRange(_)
    ));

    req.visual = VisualParameters::default();
    req.budget = 0;
    assert!(req.validate().is_err());

    req.budget = 16;
    req.output = OutputFormat::Spec;
    req.alpha = AlphaMode::Chroma;
    assert!(req.validate().is_err());
}

#[test]
fn catalogue_lists_defaults_and_options() {
    let info = describe_parameters();
    let params = &info["parameters"];
    assert_eq!(params["canvas.width"]["default"], 1920);
    assert_eq!(params["visual.hue"]["default"], "purple");
    assert_eq!(params["visual.hue"]["options"].as_array().unwrap().len(), 9);
    assert_eq!(params["pattern"]["options"][2], "gradient");
    assert_eq!(params["max_n"]["max"], 5);
    assert_eq!(params["seed"]["default"], 42);
}
