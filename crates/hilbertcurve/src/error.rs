//! Error types for curve generation and drawing.

use std::result;

use thiserror::Error;

/// Errors raised by the `hilbertcurve` crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested order is outside the supported range.
    #[error("invalid order {order}: must be between 1 and {max}")]
    InvalidOrder {
        /// The order that was requested.
        order: u32,
        /// The largest supported order.
        max: u32,
    },
    /// The stroke width is not a positive finite number.
    #[error("invalid line width {0}: must be a positive number")]
    InvalidLineWidth(f64),
    /// The padding is negative or not finite.
    #[error("invalid padding {0}: must be a non-negative number")]
    InvalidPadding(f64),
    /// The output surface has no pixels.
    #[error("surface of {width}x{height} pixels has no area")]
    EmptySurface {
        /// Surface width in pixels.
        width: u32,
        /// Surface height in pixels.
        height: u32,
    },
    /// The curve has no spatial extent, so no scale can be derived for it.
    #[error("curve of {0} point(s) has no extent to scale")]
    DegenerateCurve(usize),
    /// An index lies past the end of the curve.
    #[error("index {index} out of range for a curve of {length} points")]
    IndexOutOfRange {
        /// The offending index.
        index: u64,
        /// Number of points on the curve.
        length: u64,
    },
    /// A grid cell lies outside the curve's grid.
    #[error("point ({x}, {y}) out of range for a {side}x{side} grid")]
    PointOutOfRange {
        /// X coordinate.
        x: u32,
        /// Y coordinate.
        y: u32,
        /// Grid side length.
        side: u32,
    },
}

/// Convenience result alias for this crate.
pub type Result<T> = result::Result<T, Error>;
