/// Result alias used throughout the crate.
pub type DetwallResult<T> = Result<T, DetwallError>;

/// Error taxonomy shared by generation, spec validation and both renderers.
///
/// A degenerate determinant range (all blocks sharing one magnitude) is not an error; the
/// color mapper resolves it to the midpoint brightness.
#[derive(thiserror::Error, Debug)]
pub enum DetwallError {
    /// `low >= high`, or a bound that is not finite.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A dimension, budget, canvas or effect parameter outside its accepted bounds.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A render spec that is malformed, inconsistent, or out of bounds.
    #[error("spec integrity error: {0}")]
    SpecIntegrity(String),

    /// A hue name outside the enumerated palette.
    #[error("unsupported hue: {0}")]
    UnsupportedHue(String),

    /// A document that is not valid JSON for the expected shape.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else (IO at the edges, mostly).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DetwallError {
    /// Build a [`DetwallError::InvalidRange`].
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Build a [`DetwallError::InvalidParameter`].
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`DetwallError::SpecIntegrity`].
    pub fn spec_integrity(msg: impl Into<String>) -> Self {
        Self::SpecIntegrity(msg.into())
    }

    /// Build a [`DetwallError::UnsupportedHue`].
    pub fn unsupported_hue(msg: impl Into<String>) -> Self {
        Self::UnsupportedHue(msg.into())
    }

    /// Build a [`DetwallError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for DetwallError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
