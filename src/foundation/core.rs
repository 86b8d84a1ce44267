use crate::foundation::error::{DetwallError, DetwallResult};

/// Largest accepted canvas side, in pixels.
pub const MAX_CANVAS_SIDE: u32 = 8192;
/// Largest accepted cell side, in pixels.
pub const MAX_CELL_SIZE: u32 = 4096;
/// Largest accepted gap, in cells.
pub const MAX_GAP_CELLS: u32 = 64;

/// Straight (non-premultiplied) 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Axis-aligned pixel rectangle, `[x, x + width) x [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn right(self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(self) -> u32 {
        self.y + self.height
    }

    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn contains(self, px: u32, py: u32) -> bool {
        self.x <= px && px < self.right() && self.y <= py && py < self.bottom()
    }

    pub fn intersects(self, other: Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Canvas geometry: pixel size, cell pitch and the gap between cells.
///
/// `gap_cells` is measured in cells, so the pitch between cell origins is
/// `cell_size * (1 + gap_cells)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    #[serde(default)]
    pub gap_cells: u32,
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32, cell_size: u32, gap_cells: u32) -> DetwallResult<Self> {
        let canvas = Self {
            width,
            height,
            cell_size,
            gap_cells,
        };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> DetwallResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DetwallError::invalid_parameter(
                "canvas width/height must be > 0",
            ));
        }
        if self.width > MAX_CANVAS_SIDE || self.height > MAX_CANVAS_SIDE {
            return Err(DetwallError::invalid_parameter(format!(
                "canvas width/height must be <= {MAX_CANVAS_SIDE}"
            )));
        }
        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIZE {
            return Err(DetwallError::invalid_parameter(format!(
                "cell_size must be in 1..={MAX_CELL_SIZE}"
            )));
        }
        if self.gap_cells > MAX_GAP_CELLS {
            return Err(DetwallError::invalid_parameter(format!(
                "gap_cells must be <= {MAX_GAP_CELLS}"
            )));
        }
        Ok(())
    }

    pub fn stride(&self) -> u32 {
        self.cell_size * (1 + self.gap_cells)
    }

    /// Number of cell columns and rows, counting clipped cells at the far edges.
    pub fn grid_dims(&self) -> (u32, u32) {
        let stride = self.stride();
        (self.width.div_ceil(stride), self.height.div_ceil(stride))
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
