use super::*;
use crate::foundation::core::CanvasConfig;
use crate::foundation::error::DetwallError;

fn small_request(output: OutputFormat) -> GenerationRequest {
    GenerationRequest {
        canvas: CanvasConfig::new(48, 24, 8, 1).unwrap(),
        output,
        seed: Some(5),
        ..GenerationRequest::default()
    }
}

#[test]
fn raster_and_spec_come_from_the_same_pass() {
    let raster = generate(&small_request(OutputFormat::Raster)).unwrap();
    let spec = generate(&small_request(OutputFormat::Spec)).unwrap();
    assert_eq!(raster.format(), OutputFormat::Raster);

    let GenerationOutput::Spec(spec) = spec else {
        panic!("expected spec output");
    };
    let pass = generate_request_pass(
        &small_request(OutputFormat::Raster),
        &GenerationLimits::default(),
    )
    .unwrap();
    assert_eq!(spec.validate().unwrap(), pass);

    let GenerationOutput::Raster(img) = raster else {
        panic!("expected raster output");
    };
    assert_eq!((img.width, img.height), (48, 24));
}

#[test]
fn absent_seed_uses_default() {
    let mut req = small_request(OutputFormat::Spec);
    req.seed = None;
    let a = generate(&req).unwrap();
    req.seed = Some(crate::config::request::DEFAULT_SEED);
    let b = generate(&req).unwrap();
    assert_eq!(a, b);
}

#[test]
fn work_limit_rejects_oversized_requests() {
    let req = small_request(OutputFormat::Spec);
    let err = generate_with_limits(
        &req,
        &GenerationLimits {
            work_limit: 10,
            ..GenerationLimits::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, DetwallError::InvalidParameter(_)));
}

#[test]
fn invalid_request_fails_before_generating() {
    let mut req = small_request(OutputFormat::Raster);
    req.visual.normalizer = 1.5;
    assert!(matches!(
        generate(&req).unwrap_err(),
        DetwallError::InvalidParameter(_)
    ));
}
