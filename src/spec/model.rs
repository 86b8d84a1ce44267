use crate::{
    color::mapper::DeterminantRange,
    color::palette::Hue,
    config::visual::VisualParameters,
    foundation::core::CanvasConfig,
    foundation::error::{DetwallError, DetwallResult},
    generate::pass::{Block, GenerationPass},
    spec::version::RENDER_SPEC_VERSION,
};

/// Declarative description of a full generation pass. Enough to reproduce the image
/// without re-running the search.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSpec {
    pub version: u32,
    pub canvas: CanvasConfig,
    pub visual: VisualParameters,
    pub determinant_range: DeterminantRange,
    pub blocks: Vec<SpecBlock>,
}

/// Wire form of a [`Block`]; the matrix is a list of rows.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecBlock {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub matrix: Vec<Vec<f64>>,
    pub determinant: f64,
    pub size: usize,
}

impl From<&Block> for SpecBlock {
    fn from(b: &Block) -> Self {
        Self {
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            matrix: b.matrix.to_rows(),
            determinant: b.determinant,
            size: b.size,
        }
    }
}

impl RenderSpec {
    /// Assemble a spec from a pass and check it with [`RenderSpec::validate`].
    pub fn from_pass(pass: &GenerationPass) -> DetwallResult<Self> {
        let spec = Self {
            version: RENDER_SPEC_VERSION,
            canvas: pass.canvas,
            visual: pass.visual.clone(),
            determinant_range: pass.range,
            blocks: pass.blocks.iter().map(SpecBlock::from).collect(),
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn to_json(&self) -> DetwallResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> DetwallResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse an untrusted document. Shape errors are integrity errors; an unknown hue
    /// name is reported as such. Semantic checks are left to [`RenderSpec::validate`].
    pub fn from_json(s: &str) -> DetwallResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| DetwallError::spec_integrity(format!("malformed render spec: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> DetwallResult<Self> {
        if let Some(hue) = value.pointer("/visual/hue").and_then(|v| v.as_str()) {
            hue.parse::<Hue>()?;
        }
        serde_json::from_value(value)
            .map_err(|e| DetwallError::spec_integrity(format!("malformed render spec: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spec/model.rs"]
mod tests;
