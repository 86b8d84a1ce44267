use super::*;
use crate::{
    config::visual::VisualParameters,
    foundation::core::CanvasConfig,
    generate::pass::{GenerationLimits, PassSettings, generate_pass},
    layout::planner::Pattern,
};

fn spec() -> RenderSpec {
    let canvas = CanvasConfig::new(40, 40, 20, 0).unwrap();
    let pass = generate_pass(
        &canvas,
        &VisualParameters::default(),
        PassSettings {
            pattern: Pattern::Uniform,
            max_n: 3,
            budget: 4,
            seed: 3,
        },
        &GenerationLimits::default(),
    )
    .unwrap();
    RenderSpec::from_pass(&pass).unwrap()
}

fn integrity_message(spec: &RenderSpec) -> String {
    match spec.validate() {
        Err(DetwallError::SpecIntegrity(msg)) => msg,
        other => panic!("expected integrity error, got {other:?}"),
    }
}

#[test]
fn valid_spec_passes() {
    let pass = spec().validate().unwrap();
    assert_eq!(pass.blocks.len(), 4);
}

#[test]
fn out_of_bounds_block_is_rejected_with_path() {
    let mut s = spec();
    s.blocks[1].width = 500;
    let msg = integrity_message(&s);
    assert!(msg.contains("$.blocks[1]"), "{msg}");
    assert!(msg.contains("leaves"), "{msg}");
}

#[test]
fn shifted_block_does_not_match_grid() {
    let mut s = spec();
    s.blocks[3].x = 10;
    s.blocks[3].width = 10;
    let msg = integrity_message(&s);
    assert!(msg.contains("planned cell"), "{msg}");
}

#[test]
fn empty_and_missing_blocks_are_rejected() {
    let mut s = spec();
    s.blocks[0].height = 0;
    assert!(integrity_message(&s).contains("non-empty"));

    let mut s = spec();
    s.blocks.pop();
    let msg = integrity_message(&s);
    assert!(msg.contains("expected 4 blocks"), "{msg}");
}

#[test]
fn block_count_is_checked_against_the_canvas_before_planning() {
    let mut s = spec();
    s.canvas = CanvasConfig::new(8192, 8192, 1, 0).unwrap();
    s.blocks.clear();
    let msg = integrity_message(&s);
    assert!(msg.contains("expected 67108864 blocks"), "{msg}");
    assert!(msg.contains("found 0"), "{msg}");
}

#[test]
fn matrix_shape_and_determinant_are_rechecked() {
    let mut s = spec();
    s.blocks[0].matrix.pop();
    assert!(integrity_message(&s).contains("$.blocks[0].matrix"));

    let mut s = spec();
    s.blocks[2].size = 9;
    assert!(integrity_message(&s).contains("$.blocks[2].size"));

    let mut s = spec();
    s.blocks[1].determinant += 0.25;
    assert!(integrity_message(&s).contains("$.blocks[1].determinant"));
}

#[test]
fn declared_range_must_be_the_true_extrema() {
    let mut s = spec();
    s.determinant_range.max += 1.0;
    assert!(integrity_message(&s).contains("$.determinant_range"));
}

#[test]
fn version_and_parameters_are_checked() {
    let mut s = spec();
    s.version = RENDER_SPEC_VERSION + 1;
    assert!(integrity_message(&s).contains("unsupported version"));

    let mut s = spec();
    s.visual.normalizer = 3.0;
    assert!(integrity_message(&s).contains("$.visual"));

    let mut s = spec();
    s.canvas.cell_size = 0;
    assert!(integrity_message(&s).contains("$.canvas"));
}

#[test]
fn long_issue_lists_are_truncated() {
    let issues: Vec<SpecIssue> = (0..40)
        .map(|i| SpecIssue::at(&[SpecPathElem::Index(i)], "bad"))
        .collect();
    let msg = into_error(issues).to_string();
    assert!(msg.contains("and 24 more"));
}
