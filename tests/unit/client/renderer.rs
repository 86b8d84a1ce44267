use super::*;
use crate::{
    client::surface::SoftwareSurfaceFactory,
    config::visual::VisualParameters,
    foundation::core::CanvasConfig,
    generate::pass::{GenerationLimits, PassSettings, generate_pass},
    layout::planner::Pattern,
};

fn spec(visual: VisualParameters) -> RenderSpec {
    let canvas = CanvasConfig::new(50, 30, 10, 0).unwrap();
    let pass = generate_pass(
        &canvas,
        &visual,
        PassSettings {
            pattern: Pattern::Mixed,
            max_n: 3,
            budget: 4,
            seed: 9,
        },
        &GenerationLimits::default(),
    )
    .unwrap();
    RenderSpec::from_pass(&pass).unwrap()
}

fn render_of(json: String, per_turn: usize) -> ClientRender {
    ClientRender::from_json(
        json,
        Arc::new(SoftwareSurfaceFactory::default()),
        ClientOptions {
            blocks_per_turn: per_turn,
        },
        RenderTicket::detached(),
    )
}

#[test]
fn walks_every_state_in_order() {
    let s = spec(VisualParameters {
        feather_strength: 0.4,
        ..VisualParameters::default()
    });
    let mut r = render_of(s.to_json().unwrap(), 6);
    assert_eq!(r.state(), RenderState::Parse);

    let mut seen = Vec::new();
    loop {
        match r.step().unwrap() {
            StepOutcome::Pending(state) => seen.push(state),
            StepOutcome::Done => break,
            StepOutcome::Superseded => panic!("detached render was superseded"),
        }
    }
    // 15 blocks in batches of 6.
    assert_eq!(
        seen,
        vec![
            RenderState::Validate,
            RenderState::DrawBlocks { next: 0 },
            RenderState::DrawBlocks { next: 6 },
            RenderState::DrawBlocks { next: 12 },
            RenderState::ApplyEffects(EffectStage::Blur),
            RenderState::ApplyEffects(EffectStage::Vignette),
            RenderState::ApplyEffects(EffectStage::Feather { next: 0 }),
            RenderState::ApplyEffects(EffectStage::Feather { next: 6 }),
            RenderState::ApplyEffects(EffectStage::Feather { next: 12 }),
        ]
    );
    assert_eq!(r.state(), RenderState::Done);
    assert_eq!(r.step().unwrap(), StepOutcome::Done);
}

#[test]
fn drawn_colors_match_the_pass() {
    let s = spec(VisualParameters::default());
    let pass = s.validate().unwrap();
    let mut r = render_of(s.to_json().unwrap(), 4);
    r.run_to_completion().unwrap();
    assert_eq!(r.drawn_colors(), pass.block_colors().as_slice());
}

#[test]
fn flat_spec_draws_exact_base_colors() {
    let s = spec(VisualParameters {
        blur_sigma: 0.0,
        vignette_strength: 0.0,
        feather_strength: 0.0,
        ..VisualParameters::default()
    });
    let pass = s.validate().unwrap();
    let mut r = render_of(s.to_json().unwrap(), 64);
    assert_eq!(r.run_to_completion().unwrap(), StepOutcome::Done);
    let img = r.surface().unwrap().snapshot().unwrap();
    for (block, color) in pass.blocks.iter().zip(pass.block_colors()) {
        assert_eq!(
            img.pixel(block.x + 1, block.y + 1).unwrap(),
            [color.r, color.g, color.b, 255]
        );
    }
}

#[test]
fn parse_failure_moves_to_failed() {
    let mut r = render_of("{ not json".to_string(), 8);
    let err = r.step().unwrap_err();
    assert!(matches!(err, DetwallError::SpecIntegrity(_)));
    assert_eq!(r.state(), RenderState::Failed);
    assert!(r.step().is_err());
    assert!(r.into_surface().is_none());
}

#[test]
fn tampered_spec_fails_validation() {
    let mut s = spec(VisualParameters::default());
    s.blocks[0].determinant += 1.0;
    let mut r = render_of(s.to_json().unwrap(), 8);
    let err = r.run_to_completion().unwrap_err();
    assert!(err.to_string().contains("$.blocks[0].determinant"));
    assert!(r.surface().is_none());
}

#[test]
fn manual_blur_fallback_is_used_without_native_filter() {
    let s = spec(VisualParameters {
        blur_sigma: 2.0,
        vignette_strength: 0.0,
        ..VisualParameters::default()
    });
    let mut r = ClientRender::from_spec(
        s,
        Arc::new(SoftwareSurfaceFactory { native_blur: false }),
        ClientOptions::default(),
        RenderTicket::detached(),
    );
    assert_eq!(r.state(), RenderState::Validate);
    assert_eq!(r.run_to_completion().unwrap(), StepOutcome::Done);
    assert!(!r.surface().unwrap().supports_native_blur());
}
