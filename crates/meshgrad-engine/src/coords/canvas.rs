use super::Vec2;

/// Target raster size in whole pixels.
///
/// Control points live in the unit square; `Canvas` maps them into pixel
/// space. Every evaluator and exporter goes through [`Canvas::to_pixels`] so the
/// preview and the exported geometry agree on coordinates.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels, or `None` on overflow.
    #[inline]
    pub fn area(self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Maps a unit-square position into pixel space.
    #[inline]
    pub fn to_pixels(self, unit: Vec2) -> Vec2 {
        Vec2::new(unit.x * self.width as f64, unit.y * self.height as f64)
    }

    /// The larger of the two dimensions, as `f64`.
    #[inline]
    pub fn max_side(self) -> f64 {
        self.width.max(self.height) as f64
    }
}
