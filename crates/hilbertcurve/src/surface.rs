//! Drawing targets for the renderer.
//!
//! The renderer only ever talks to a [`Surface`]: clear it, stroke a
//! polyline, fill a disc. [`RgbaImage`] implements the trait with an
//! anti-aliased coverage rasterizer, which is what the CLI and the tests draw
//! into.

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::raster::Coverage;

/// A position in surface pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PixelPoint {
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels.
    pub y: f64,
}

impl PixelPoint {
    /// Create a new pixel-space point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Stroke color and width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    /// Stroke color.
    pub color: Rgba<u8>,
    /// Stroke width in pixels.
    pub width: f64,
}

/// A pixel target exclusively owned by a renderer.
///
/// `shadow_blur` follows the 2D canvas convention: `0.0` draws no shadow,
/// otherwise a blurred copy of the shape in the same color is painted beneath
/// it, with a Gaussian standard deviation of half the blur value.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// Resize the surface. Contents after a resize are unspecified.
    fn resize(&mut self, width: u32, height: u32);
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Rgba<u8>);
    /// Stroke one continuous polyline with round joins and caps. Paths with
    /// fewer than two points draw nothing.
    fn stroke_polyline(&mut self, path: &[PixelPoint], pen: &Pen, shadow_blur: f64);
    /// Fill a disc centred on `center`.
    fn fill_disc(&mut self, center: PixelPoint, radius: f64, color: Rgba<u8>, shadow_blur: f64);
}

/// Paint `coverage` onto `img`, preceded by its blurred shadow when requested.
fn paint(img: &mut RgbaImage, coverage: &Coverage, color: Rgba<u8>, shadow_blur: f64) {
    if shadow_blur > 0.0 {
        coverage.blurred(shadow_blur / 2.0).composite(img, color);
    }
    coverage.composite(img, color);
}

impl Surface for RgbaImage {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.dimensions() != (width, height) {
            *self = Self::new(width, height);
        }
    }

    fn clear(&mut self, color: Rgba<u8>) {
        for px in self.pixels_mut() {
            *px = color;
        }
    }

    fn stroke_polyline(&mut self, path: &[PixelPoint], pen: &Pen, shadow_blur: f64) {
        if path.len() < 2 {
            return;
        }
        let (width, height) = self.dimensions();
        let mut coverage = Coverage::new(width, height);
        let half = pen.width / 2.0;
        for seg in path.windows(2) {
            coverage.add_segment(seg[0], seg[1], half);
        }
        paint(self, &coverage, pen.color, shadow_blur);
    }

    fn fill_disc(&mut self, center: PixelPoint, radius: f64, color: Rgba<u8>, shadow_blur: f64) {
        let (width, height) = self.dimensions();
        let mut coverage = Coverage::new(width, height);
        coverage.add_segment(center, center, radius);
        paint(self, &coverage, color, shadow_blur);
    }
}
