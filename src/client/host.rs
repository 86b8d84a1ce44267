use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    client::renderer::{ClientOptions, ClientRender, RenderState, StepOutcome},
    client::surface::{Surface, SurfaceFactory},
    foundation::error::DetwallResult,
    spec::model::RenderSpec,
};

/// Identifies one render among those started by a host. Only the newest is current.
#[derive(Clone, Debug)]
pub struct RenderTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RenderTicket {
    /// A ticket with its own counter, for renders driven without a host.
    pub fn detached() -> Self {
        Self {
            generation: 1,
            current: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentOutcome {
    Presented,
    /// A newer render was started; the displayed surface is unchanged.
    Superseded,
    /// The render failed or has not finished; the displayed surface is unchanged.
    NotReady(RenderState),
}

/// Owns the displayed surface and hands out renders that may replace it.
pub struct RenderHost {
    factory: Arc<dyn SurfaceFactory>,
    options: ClientOptions,
    current: Arc<AtomicU64>,
    displayed: Option<Box<dyn Surface>>,
    displayed_generation: Option<u64>,
}

impl RenderHost {
    pub fn new(factory: Arc<dyn SurfaceFactory>, options: ClientOptions) -> Self {
        Self {
            factory,
            options,
            current: Arc::new(AtomicU64::new(0)),
            displayed: None,
            displayed_generation: None,
        }
    }

    fn next_ticket(&self) -> RenderTicket {
        let generation = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        RenderTicket {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Start rendering a JSON document. Any render in flight becomes superseded.
    pub fn begin(&self, source: impl Into<String>) -> ClientRender {
        ClientRender::from_json(
            source,
            Arc::clone(&self.factory),
            self.options,
            self.next_ticket(),
        )
    }

    pub fn begin_spec(&self, spec: RenderSpec) -> ClientRender {
        ClientRender::from_spec(
            spec,
            Arc::clone(&self.factory),
            self.options,
            self.next_ticket(),
        )
    }

    /// Supersede every render in flight without starting a new one.
    pub fn cancel(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    pub fn current_generation(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    /// Swap a finished, still-current render onto the display.
    pub fn present(&mut self, render: ClientRender) -> PresentOutcome {
        if !render.ticket().is_current() {
            return PresentOutcome::Superseded;
        }
        let state = render.state();
        if state != RenderState::Done {
            return PresentOutcome::NotReady(state);
        }
        let generation = render.ticket().generation();
        match render.into_surface() {
            Some(surface) => {
                self.displayed = Some(surface);
                self.displayed_generation = Some(generation);
                tracing::debug!(generation, "presented client render");
                PresentOutcome::Presented
            }
            None => PresentOutcome::NotReady(state),
        }
    }

    /// Begin, drive and present a document in one call.
    pub fn render_json(&mut self, source: impl Into<String>) -> DetwallResult<PresentOutcome> {
        let mut render = self.begin(source);
        match render.run_to_completion()? {
            StepOutcome::Superseded => Ok(PresentOutcome::Superseded),
            _ => Ok(self.present(render)),
        }
    }

    pub fn displayed(&self) -> Option<&dyn Surface> {
        self.displayed.as_deref()
    }

    pub fn displayed_generation(&self) -> Option<u64> {
        self.displayed_generation
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/host.rs"]
mod tests;
