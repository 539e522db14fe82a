//! Render requests and the statistics reported back for them.

use std::fmt;

use image::Rgba;

use crate::{
    curve::{Curve, Order},
    error::{Error, Result},
    render::Style,
};

/// Largest curve, in points, that is drawn with animation. Larger curves are
/// always drawn instantly.
pub const ANIMATION_POINT_LIMIT: usize = 65_536;

/// Default margin around the curve, in pixels.
pub const DEFAULT_PADDING: f64 = 30.0;

/// Default stroke color.
pub const DEFAULT_COLOR: Rgba<u8> = Rgba([0x00, 0xd4, 0xff, 0xff]);

/// Whether a curve of `point_count` points should be animated.
pub fn should_animate(animate: bool, point_count: usize) -> bool {
    animate && point_count <= ANIMATION_POINT_LIMIT
}

/// Everything needed to generate and draw one curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderRequest {
    /// Curve order, `1..=8`.
    pub order: u32,
    /// Stroke color. Treated as opaque by callers that parse colors.
    pub color: Rgba<u8>,
    /// Stroke width in pixels.
    pub line_width: f64,
    /// Draw progressively rather than all at once.
    pub animate: bool,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Margin around the curve in pixels.
    pub padding: f64,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            order: 5,
            color: DEFAULT_COLOR,
            line_width: 2.0,
            animate: true,
            width: 800,
            height: 800,
            padding: DEFAULT_PADDING,
        }
    }
}

impl RenderRequest {
    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        Order::new(self.order)?;
        self.style().validate()?;
        if self.width == 0 || self.height == 0 {
            return Err(Error::EmptySurface {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Stroke styling for this request.
    pub fn style(&self) -> Style {
        Style {
            color: self.color,
            line_width: self.line_width,
            padding: self.padding,
        }
    }
}

/// Summary of a generated curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveStats {
    /// Curve order.
    pub order: u32,
    /// Number of points, `4^order`.
    pub point_count: usize,
    /// Path length in grid units.
    pub path_length: f64,
}

impl CurveStats {
    /// Measure `curve`.
    pub fn for_curve(curve: &Curve) -> Self {
        Self {
            order: curve.order().get(),
            point_count: curve.len(),
            path_length: curve.path_length(),
        }
    }
}

impl fmt::Display for CurveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "order {}, {} points, length {:.2}",
            self.order, self.point_count, self.path_length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::generate_curve;

    #[test]
    fn animation_policy() {
        assert!(should_animate(true, 4));
        assert!(should_animate(true, ANIMATION_POINT_LIMIT));
        assert!(!should_animate(true, ANIMATION_POINT_LIMIT + 1));
        assert!(!should_animate(false, 4));
    }

    #[test]
    fn default_request_is_valid() -> Result<()> {
        RenderRequest::default().validate()
    }

    #[test]
    fn validation() {
        let ok = RenderRequest::default();
        let bad = [
            RenderRequest { order: 0, ..ok },
            RenderRequest { order: 9, ..ok },
            RenderRequest {
                line_width: 0.0,
                ..ok
            },
            RenderRequest {
                line_width: f64::NAN,
                ..ok
            },
            RenderRequest {
                padding: -1.0,
                ..ok
            },
            RenderRequest { width: 0, ..ok },
        ];
        for req in bad {
            assert!(req.validate().is_err(), "{req:?} should be rejected");
        }
        assert_eq!(
            RenderRequest { height: 0, ..ok }.validate(),
            Err(Error::EmptySurface {
                width: 800,
                height: 0
            })
        );
    }

    #[test]
    fn stats() -> Result<()> {
        let stats = CurveStats::for_curve(&generate_curve(Order::new(3)?));
        assert_eq!(stats.order, 3);
        assert_eq!(stats.point_count, 64);
        assert_eq!(stats.path_length, 63.0);
        assert_eq!(stats.to_string(), "order 3, 64 points, length 63.00");
        Ok(())
    }
}
