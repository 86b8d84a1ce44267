use super::*;
use crate::{
    config::visual::VisualParameters,
    foundation::core::CanvasConfig,
    generate::pass::{GenerationLimits, PassSettings, generate_pass},
    layout::planner::Pattern,
};

fn pass_with(visual: VisualParameters, gap_cells: u32) -> GenerationPass {
    let canvas = CanvasConfig::new(60, 40, 10, gap_cells).unwrap();
    generate_pass(
        &canvas,
        &visual,
        PassSettings {
            pattern: Pattern::Mixed,
            max_n: 4,
            budget: 6,
            seed: 11,
        },
        &GenerationLimits::default(),
    )
    .unwrap()
}

fn flat() -> VisualParameters {
    VisualParameters {
        blur_sigma: 0.0,
        vignette_strength: 0.0,
        feather_strength: 0.0,
        ..VisualParameters::default()
    }
}

#[test]
fn flat_render_is_base_colors_over_black_gaps() {
    let pass = pass_with(flat(), 1);
    let img = render_raster(&pass).unwrap();
    assert_eq!(img.data.len(), 60 * 40 * 4);

    for (block, color) in pass.blocks.iter().zip(pass.block_colors()) {
        let px = img.pixel(block.x, block.y).unwrap();
        assert_eq!(px, [color.r, color.g, color.b, 255]);
        let px = img
            .pixel(block.x + block.width - 1, block.y + block.height - 1)
            .unwrap();
        assert_eq!(px, [color.r, color.g, color.b, 255]);
    }
    // With one gap cell the second column of cells is background.
    assert_eq!(img.pixel(15, 5).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn effects_change_pixels_but_keep_alpha() {
    let flat_img = render_raster(&pass_with(flat(), 1)).unwrap();
    let fx_img = render_raster(&pass_with(
        VisualParameters {
            blur_sigma: 1.5,
            vignette_strength: 0.5,
            feather_strength: 0.5,
            ..VisualParameters::default()
        },
        1,
    ))
    .unwrap();
    assert_ne!(flat_img.data, fx_img.data);
    assert!(fx_img.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn render_is_deterministic() {
    let pass = pass_with(VisualParameters::default(), 0);
    assert_eq!(render_raster(&pass).unwrap(), render_raster(&pass).unwrap());
}

#[test]
fn fill_rect_clips_to_image() {
    let mut img = RasterImage::black(4, 4);
    img.fill_rect(
        PixelRect {
            x: 2,
            y: 2,
            width: 10,
            height: 10,
        },
        [9, 9, 9],
    );
    assert_eq!(img.pixel(3, 3).unwrap(), [9, 9, 9, 255]);
    assert_eq!(img.pixel(1, 1).unwrap(), [0, 0, 0, 255]);
    assert!(img.pixel(4, 0).is_none());
}

#[test]
fn from_rgba8_checks_length() {
    assert!(RasterImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(RasterImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn chroma_alpha_is_applied_after_effects() {
    let pass = pass_with(flat(), 1);
    let img = render_raster_with_alpha(&pass, AlphaMode::Chroma).unwrap();
    // Black gaps carry no chroma.
    assert_eq!(img.pixel(15, 5).unwrap()[3], 0);
}
