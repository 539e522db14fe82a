//! Coverage masks: the anti-aliased rasterizer behind the image surface.
//!
//! Shapes are accumulated into a per-pixel coverage mask, taking the maximum
//! where shapes overlap, so a polyline is painted as one shape and joins never
//! double-blend. The mask is then composited onto the image in one pass.

use image::{ImageBuffer, Luma, Rgba, RgbaImage, imageops};

use crate::surface::PixelPoint;

/// Half-open pixel rectangle `[x0, x1) × [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bounds {
    /// Left edge, inclusive.
    x0: u32,
    /// Top edge, inclusive.
    y0: u32,
    /// Right edge, exclusive.
    x1: u32,
    /// Bottom edge, exclusive.
    y1: u32,
}

impl Bounds {
    /// Smallest rectangle containing both `self` and `other`.
    fn union(self, other: Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Grow by `by` pixels on every side, clipped to `width × height`.
    fn expand(self, by: u32, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.saturating_sub(by),
            y0: self.y0.saturating_sub(by),
            x1: self.x1.saturating_add(by).min(width),
            y1: self.y1.saturating_add(by).min(height),
        }
    }
}

/// Clip the span `[lo, hi]` in pixel space to pixel indices `[0, limit)`.
fn pixel_span(lo: f64, hi: f64, limit: u32) -> (u32, u32) {
    let start = lo.floor().max(0.0).min(f64::from(limit)) as u32;
    let end = hi.ceil().max(0.0).min(f64::from(limit)) as u32;
    (start, end)
}

/// Distance from `p` to the segment `a`–`b`.
fn segment_distance(p: PixelPoint, a: PixelPoint, b: PixelPoint) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * abx, a.y + t * aby);
    (p.x - cx).hypot(p.y - cy)
}

/// Single-channel float mask.
type Mask = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Per-pixel coverage in `[0, 1]` for one shape.
#[derive(Clone, Debug)]
pub struct Coverage {
    /// Coverage values, one per image pixel.
    mask: Mask,
    /// Rectangle containing every non-zero value, if any.
    bounds: Option<Bounds>,
}

impl Coverage {
    /// An empty mask of `width × height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mask: ImageBuffer::new(width, height),
            bounds: None,
        }
    }

    /// Whether the mask covers nothing.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Coverage of pixel `(x, y)`; zero outside the mask.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.mask.get_pixel_checked(x, y).map_or(0.0, |p| p.0[0])
    }

    /// Add a capsule of radius `half_width` around segment `a`–`b`.
    ///
    /// A zero-length segment is a disc. Pixel centres are sampled, with a
    /// one-pixel linear ramp at the edge for anti-aliasing.
    pub fn add_segment(&mut self, a: PixelPoint, b: PixelPoint, half_width: f64) {
        if half_width.is_nan() || half_width <= 0.0 {
            return;
        }
        let (width, height) = self.mask.dimensions();
        let reach = half_width + 1.0;
        let (x0, x1) = pixel_span(a.x.min(b.x) - reach, a.x.max(b.x) + reach, width);
        let (y0, y1) = pixel_span(a.y.min(b.y) - reach, a.y.max(b.y) + reach, height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let centre = PixelPoint::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let edge = half_width + 0.5 - segment_distance(centre, a, b);
                if edge <= 0.0 {
                    continue;
                }
                let value = edge.min(1.0) as f32;
                let px = self.mask.get_pixel_mut(x, y);
                if value > px.0[0] {
                    px.0[0] = value;
                }
            }
        }

        let area = Bounds { x0, y0, x1, y1 };
        self.bounds = Some(self.bounds.map_or(area, |b| b.union(area)));
    }

    /// A copy of the mask blurred with a Gaussian of standard deviation `sigma`.
    ///
    /// Only the covered bounds, widened by the blur reach, are processed.
    pub fn blurred(&self, sigma: f64) -> Self {
        let (width, height) = self.mask.dimensions();
        let mut out = Self::new(width, height);
        let Some(bounds) = self.bounds else {
            return out;
        };
        if sigma.is_nan() || sigma <= 0.0 {
            return self.clone();
        }

        let reach = (3.0 * sigma).ceil() as u32 + 1;
        let region = bounds.expand(reach, width, height);
        let patch = imageops::crop_imm(
            &self.mask,
            region.x0,
            region.y0,
            region.x1 - region.x0,
            region.y1 - region.y0,
        )
        .to_image();
        let mut shadow = imageops::blur(&patch, sigma as f32);
        for v in shadow.iter_mut() {
            *v = v.clamp(0.0, 1.0);
        }
        imageops::replace(
            &mut out.mask,
            &shadow,
            i64::from(region.x0),
            i64::from(region.y0),
        );
        out.bounds = Some(region);
        out
    }

    /// Blend `color` onto `img` with source-over, weighted by coverage.
    pub fn composite(&self, img: &mut RgbaImage, color: Rgba<u8>) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let x1 = bounds.x1.min(img.width());
        let y1 = bounds.y1.min(img.height());
        let src_alpha = f32::from(color.0[3]) / 255.0;
        for y in bounds.y0..y1 {
            for x in bounds.x0..x1 {
                let cov = self.get(x, y);
                if cov <= 0.0 {
                    continue;
                }
                let alpha = cov * src_alpha;
                let px = img.get_pixel_mut(x, y);
                for (dst, src) in px.0.iter_mut().zip(color.0).take(3) {
                    let blended = f32::from(src) * alpha + f32::from(*dst) * (1.0 - alpha);
                    *dst = blended.round().clamp(0.0, 255.0) as u8;
                }
                let dst_alpha = f32::from(px.0[3]) / 255.0;
                let out_alpha = alpha + dst_alpha * (1.0 - alpha);
                px.0[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
