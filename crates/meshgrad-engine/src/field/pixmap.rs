use crate::coords::Canvas;
use crate::error::RenderError;
use crate::paint::Rgba8;

/// Largest pixel count a single render may allocate (16384 x 16384).
pub const MAX_PIXELS: usize = 1 << 28;

/// Owned RGBA8 raster, row-major, top-left origin.
///
/// The buffer belongs to whoever requested the render; [`Pixmap::resize`]
/// keeps the allocation so a preview can reuse one pixmap across frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pixmap {
    canvas: Canvas,
    pixels: Vec<Rgba8>,
}

impl Pixmap {
    /// Allocates a fully transparent pixmap.
    pub fn new(canvas: Canvas) -> Result<Self, RenderError> {
        let mut pixmap = Self::default();
        pixmap.resize(canvas)?;
        Ok(pixmap)
    }

    /// Resizes in place and clears to transparent. Keeps capacity.
    pub fn resize(&mut self, canvas: Canvas) -> Result<(), RenderError> {
        let area = canvas
            .area()
            .filter(|&n| n <= MAX_PIXELS)
            .ok_or(RenderError::TooLarge { width: canvas.width, height: canvas.height })?;

        self.canvas = canvas;
        self.pixels.clear();
        self.pixels.resize(area, Rgba8::TRANSPARENT);
        Ok(())
    }

    #[inline]
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the raster.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        self.pixels.get(y as usize * self.canvas.width as usize + x as usize).copied()
    }

    /// Raw RGBA bytes, 4 per pixel.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// RGB bytes with alpha dropped, 3 per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }
}
