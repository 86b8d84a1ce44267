use std::{fmt, str::FromStr};

use crate::foundation::error::DetwallError;

/// Named color family. Each carries a fixed base hue (degrees) and saturation; the
/// brightness computed per block becomes the HSL lightness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hue {
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    #[default]
    Purple,
    Pink,
    Teal,
}

impl Hue {
    pub const ALL: [Hue; 9] = [
        Hue::Gray,
        Hue::Red,
        Hue::Orange,
        Hue::Yellow,
        Hue::Green,
        Hue::Blue,
        Hue::Purple,
        Hue::Pink,
        Hue::Teal,
    ];

    /// `(hue_degrees, saturation)`.
    pub fn base(self) -> (f64, f64) {
        match self {
            Self::Gray => (0.0, 0.0),
            Self::Red => (0.0, 0.75),
            Self::Orange => (30.0, 0.90),
            Self::Yellow => (50.0, 0.90),
            Self::Green => (120.0, 0.60),
            Self::Blue => (210.0, 0.75),
            Self::Purple => (285.0, 0.60),
            Self::Pink => (330.0, 0.80),
            Self::Teal => (175.0, 0.65),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Teal => "teal",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|h| h.as_str()).collect()
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hue {
    type Err = DetwallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|h| h.as_str() == key)
            .ok_or_else(|| {
                DetwallError::unsupported_hue(format!(
                    "'{s}' (options: {})",
                    Self::names().join(", ")
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;
