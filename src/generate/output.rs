use crate::{
    config::request::{GenerationRequest, OutputFormat},
    foundation::error::DetwallResult,
    generate::pass::{GenerationLimits, GenerationPass, generate_pass},
    render::raster::{RasterImage, render_raster_with_alpha},
    spec::model::RenderSpec,
};

/// Result of one request: either a finished image or a spec for a client to draw.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationOutput {
    Raster(RasterImage),
    Spec(RenderSpec),
}

impl GenerationOutput {
    pub fn format(&self) -> OutputFormat {
        match self {
            Self::Raster(_) => OutputFormat::Raster,
            Self::Spec(_) => OutputFormat::Spec,
        }
    }
}

/// Validate a request and run its generation pass.
pub fn generate_request_pass(
    request: &GenerationRequest,
    limits: &GenerationLimits,
) -> DetwallResult<GenerationPass> {
    request.validate()?;
    generate_pass(
        &request.canvas,
        &request.visual,
        request.pass_settings(),
        limits,
    )
}

/// Serve a request with default limits.
pub fn generate(request: &GenerationRequest) -> DetwallResult<GenerationOutput> {
    generate_with_limits(request, &GenerationLimits::default())
}

pub fn generate_with_limits(
    request: &GenerationRequest,
    limits: &GenerationLimits,
) -> DetwallResult<GenerationOutput> {
    let pass = generate_request_pass(request, limits)?;
    match request.output {
        OutputFormat::Raster => Ok(GenerationOutput::Raster(render_raster_with_alpha(
            &pass,
            request.alpha,
        )?)),
        OutputFormat::Spec => Ok(GenerationOutput::Spec(RenderSpec::from_pass(&pass)?)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/output.rs"]
mod tests;
