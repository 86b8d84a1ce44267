use std::sync::Arc;

use crate::{
    client::fallback::gaussian_approx_rgba8,
    client::host::RenderTicket,
    client::surface::{Surface, SurfaceFactory},
    color::mapper::determinant_to_color,
    foundation::core::Rgb8,
    foundation::error::{DetwallError, DetwallResult},
    generate::pass::GenerationPass,
    render::effects::feather_band,
    spec::model::RenderSpec,
};

/// Per-render tuning of the incremental client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientOptions {
    /// Blocks drawn (or feathered) per [`ClientRender::step`].
    pub blocks_per_turn: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            blocks_per_turn: 64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectStage {
    Blur,
    Vignette,
    Feather { next: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    Parse,
    Validate,
    DrawBlocks { next: usize },
    ApplyEffects(EffectStage),
    Done,
    Failed,
    Abandoned,
}

impl RenderState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Abandoned)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// More work remains; the render is now in this state.
    Pending(RenderState),
    Done,
    /// A newer render started. The offscreen surface has been dropped.
    Superseded,
}

/// One incremental render of a spec document onto an offscreen surface.
pub struct ClientRender {
    source: Option<String>,
    spec: Option<RenderSpec>,
    pass: Option<GenerationPass>,
    surface: Option<Box<dyn Surface>>,
    factory: Arc<dyn SurfaceFactory>,
    options: ClientOptions,
    ticket: RenderTicket,
    state: RenderState,
    drawn_colors: Vec<Rgb8>,
    feather_source: Option<Vec<u8>>,
}

impl std::fmt::Debug for ClientRender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRender")
            .field("state", &self.state)
            .field("generation", &self.ticket.generation())
            .field("drawn", &self.drawn_colors.len())
            .finish_non_exhaustive()
    }
}

impl ClientRender {
    /// Start from an untrusted JSON document.
    pub fn from_json(
        source: impl Into<String>,
        factory: Arc<dyn SurfaceFactory>,
        options: ClientOptions,
        ticket: RenderTicket,
    ) -> Self {
        Self::with_state(Some(source.into()), None, factory, options, ticket, RenderState::Parse)
    }

    /// Start from an already parsed spec. It is still validated.
    pub fn from_spec(
        spec: RenderSpec,
        factory: Arc<dyn SurfaceFactory>,
        options: ClientOptions,
        ticket: RenderTicket,
    ) -> Self {
        Self::with_state(None, Some(spec), factory, options, ticket, RenderState::Validate)
    }

    fn with_state(
        source: Option<String>,
        spec: Option<RenderSpec>,
        factory: Arc<dyn SurfaceFactory>,
        options: ClientOptions,
        ticket: RenderTicket,
        state: RenderState,
    ) -> Self {
        Self {
            source,
            spec,
            pass: None,
            surface: None,
            factory,
            options,
            ticket,
            state,
            drawn_colors: Vec::new(),
            feather_source: None,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn ticket(&self) -> &RenderTicket {
        &self.ticket
    }

    /// Base colors of the blocks drawn so far, in spec order.
    pub fn drawn_colors(&self) -> &[Rgb8] {
        &self.drawn_colors
    }

    pub fn surface(&self) -> Option<&dyn Surface> {
        self.surface.as_deref()
    }

    /// Hand over the finished surface. `None` unless the render is done.
    pub fn into_surface(self) -> Option<Box<dyn Surface>> {
        if self.state == RenderState::Done {
            self.surface
        } else {
            None
        }
    }

    /// Advance by one bounded unit of work.
    ///
    /// Errors move the render to [`RenderState::Failed`]; stepping a terminal render is
    /// a no-op that reports its final outcome.
    #[tracing::instrument(level = "trace", skip(self), fields(generation = self.ticket.generation()))]
    pub fn step(&mut self) -> DetwallResult<StepOutcome> {
        match self.state {
            RenderState::Done => return Ok(StepOutcome::Done),
            RenderState::Abandoned => return Ok(StepOutcome::Superseded),
            RenderState::Failed => {
                return Err(DetwallError::invalid_parameter(
                    "render already failed",
                ));
            }
            _ => {}
        }
        if !self.ticket.is_current() {
            self.abandon();
            return Ok(StepOutcome::Superseded);
        }

        match self.advance() {
            Ok(next) => {
                self.state = next;
                if next == RenderState::Done {
                    tracing::debug!(blocks = self.drawn_colors.len(), "client render complete");
                    Ok(StepOutcome::Done)
                } else {
                    Ok(StepOutcome::Pending(next))
                }
            }
            Err(err) => {
                self.state = RenderState::Failed;
                self.surface = None;
                self.feather_source = None;
                Err(err)
            }
        }
    }

    /// Step until the render finishes, fails, or is superseded.
    pub fn run_to_completion(&mut self) -> DetwallResult<StepOutcome> {
        loop {
            match self.step()? {
                StepOutcome::Pending(_) => continue,
                done => return Ok(done),
            }
        }
    }

    fn abandon(&mut self) {
        tracing::debug!(generation = self.ticket.generation(), "client render superseded");
        self.state = RenderState::Abandoned;
        self.surface = None;
        self.feather_source = None;
    }

    fn advance(&mut self) -> DetwallResult<RenderState> {
        match self.state {
            RenderState::Parse => {
                let source = self
                    .source
                    .take()
                    .ok_or_else(|| DetwallError::spec_integrity("no document to parse"))?;
                self.spec = Some(RenderSpec::from_json(&source)?);
                Ok(RenderState::Validate)
            }
            RenderState::Validate => {
                let spec = self
                    .spec
                    .take()
                    .ok_or_else(|| DetwallError::spec_integrity("no document to validate"))?;
                let pass = spec.validate()?;
                self.surface = Some(self.factory.create(pass.canvas.width, pass.canvas.height)?);
                self.pass = Some(pass);
                Ok(RenderState::DrawBlocks { next: 0 })
            }
            RenderState::DrawBlocks { next } => self.draw_blocks(next),
            RenderState::ApplyEffects(stage) => self.apply_effect(stage),
            RenderState::Done | RenderState::Failed | RenderState::Abandoned => Ok(self.state),
        }
    }

    fn parts(&mut self) -> DetwallResult<(&GenerationPass, &mut dyn Surface)> {
        match (self.pass.as_ref(), self.surface.as_deref_mut()) {
            (Some(pass), Some(surface)) => Ok((pass, surface)),
            _ => Err(DetwallError::invalid_parameter(
                "render has no validated pass or surface",
            )),
        }
    }

    fn draw_blocks(&mut self, next: usize) -> DetwallResult<RenderState> {
        let per_turn = self.options.blocks_per_turn.max(1);
        let mut colors = Vec::with_capacity(per_turn);
        let (pass, surface) = self.parts()?;
        let end = (next + per_turn).min(pass.blocks.len());
        for block in &pass.blocks[next..end] {
            let color = determinant_to_color(block.determinant, &block.matrix, &pass.range, &pass.visual);
            surface.fill_rect(block.rect(), color.to_array());
            colors.push(color);
        }
        let total = pass.blocks.len();
        self.drawn_colors.extend(colors);
        Ok(if end < total {
            RenderState::DrawBlocks { next: end }
        } else {
            RenderState::ApplyEffects(EffectStage::Blur)
        })
    }

    fn apply_effect(&mut self, stage: EffectStage) -> DetwallResult<RenderState> {
        let per_turn = self.options.blocks_per_turn.max(1);
        let mut feather_source = self.feather_source.take();
        let (pass, surface) = self.parts()?;
        let visual = &pass.visual;
        let next = match stage {
            EffectStage::Blur => {
                if visual.blur_sigma > 0.0 {
                    if surface.supports_native_blur() {
                        surface.blur_native(visual.blur_sigma as f32)?;
                    } else {
                        let mut data = surface.read_pixels();
                        gaussian_approx_rgba8(
                            &mut data,
                            surface.width(),
                            surface.height(),
                            visual.blur_sigma,
                        );
                        surface.write_pixels(&data)?;
                    }
                }
                RenderState::ApplyEffects(EffectStage::Vignette)
            }
            EffectStage::Vignette => {
                if visual.vignette_strength > 0.0 {
                    let cx = surface.width() as f32 * 0.5;
                    let cy = surface.height() as f32 * 0.5;
                    let radius = (cx * cx + cy * cy).sqrt();
                    surface.multiply_radial_gradient(
                        (cx, cy),
                        radius,
                        1.0,
                        1.0 - visual.vignette_strength as f32,
                    );
                }
                RenderState::ApplyEffects(EffectStage::Feather { next: 0 })
            }
            EffectStage::Feather { next } => {
                if visual.feather_strength <= 0.0 || next >= pass.blocks.len() {
                    RenderState::Done
                } else {
                    let source = feather_source.get_or_insert_with(|| surface.read_pixels());
                    let end = (next + per_turn).min(pass.blocks.len());
                    for block in &pass.blocks[next..end] {
                        let rect = block.rect();
                        let band = feather_band(rect, visual.feather_strength) as f32;
                        surface.feather_edges(rect, band, source);
                    }
                    if end < pass.blocks.len() {
                        RenderState::ApplyEffects(EffectStage::Feather { next: end })
                    } else {
                        feather_source = None;
                        RenderState::Done
                    }
                }
            }
        };
        self.feather_source = feather_source;
        Ok(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/renderer.rs"]
mod tests;
