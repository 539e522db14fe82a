//! Index ↔ coordinate mapping for the 2D Hilbert curve.
//!
//! The mapping walks the index two bits at a time, from the finest quadrant
//! to the coarsest, rotating and reflecting the accumulated point so the curve
//! stays continuous across quadrant boundaries.

use std::{fmt, ops::Deref};

use crate::{
    error::{Error, Result},
    point::Point,
    render::path_length,
};

/// A validated curve order (recursion depth).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Order(u32);

impl Order {
    /// Smallest supported order. An order-0 curve is a single cell with no
    /// extent to draw.
    pub const MIN: u32 = 1;
    /// Largest supported order.
    pub const MAX: u32 = 8;

    /// Validate an order in `MIN..=MAX`.
    pub fn new(order: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&order) {
            Ok(Self(order))
        } else {
            Err(Error::InvalidOrder {
                order,
                max: Self::MAX,
            })
        }
    }

    /// The raw order value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Grid side length, `2^order`.
    pub const fn side(self) -> u32 {
        1 << self.0
    }

    /// Number of points on the curve, `4^order`.
    pub const fn point_count(self) -> usize {
        1 << (2 * self.0)
    }
}

impl TryFrom<u32> for Order {
    type Error = Error;

    fn try_from(order: u32) -> Result<Self> {
        Self::new(order)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Map index `d` to its cell on the Hilbert curve filling an `n × n` grid.
///
/// `n` must be a power of two and `d` must be below `n * n`; other inputs
/// produce unspecified coordinates.
pub fn index_to_point(n: u32, d: u32) -> Point {
    debug_assert!(n.is_power_of_two(), "grid side {n} is not a power of two");
    debug_assert!(
        u64::from(d) < u64::from(n) * u64::from(n),
        "index {d} out of range for side {n}"
    );

    let mut x = 0;
    let mut y = 0;
    let mut t = d;
    let mut s = 1;
    while s < n {
        let rx = (t >> 1) & 1;
        let ry = (t ^ rx) & 1;
        if ry == 0 {
            if rx == 1 {
                x = s - 1 - x;
                y = s - 1 - y;
            }
            (x, y) = (y, x);
        }
        x += s * rx;
        y += s * ry;
        t >>= 2;
        s <<= 1;
    }
    Point::new(x, y)
}

/// Map a cell of an `n × n` grid back to its index on the Hilbert curve.
///
/// Inverse of [`index_to_point`]. `n` must be a power of two and both
/// coordinates must be below `n`.
pub fn point_to_index(n: u32, point: Point) -> u32 {
    debug_assert!(n.is_power_of_two(), "grid side {n} is not a power of two");
    debug_assert!(
        point.x < n && point.y < n,
        "point {point} out of range for side {n}"
    );

    let Point { mut x, mut y } = point;
    let mut d = 0;
    let mut s = n >> 1;
    while s > 0 {
        let rx = u32::from(x & s != 0);
        let ry = u32::from(y & s != 0);
        d += s * s * ((3 * rx) ^ ry);
        if ry == 0 {
            if rx == 1 {
                x = n - 1 - x;
                y = n - 1 - y;
            }
            (x, y) = (y, x);
        }
        s >>= 1;
    }
    d
}

/// Generate every point of the curve of `order`, in traversal order.
pub fn generate_curve(order: Order) -> Curve {
    let n = order.side();
    let points = (0..n * n).map(|d| index_to_point(n, d)).collect();
    Curve { order, points }
}

/// The full ordered point sequence of one Hilbert curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    /// Order the curve was generated for.
    order: Order,
    /// Points in traversal order.
    points: Vec<Point>,
}

impl Curve {
    /// Order the curve was generated for.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Points in traversal order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consume the curve, returning its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Total Euclidean length of the curve in grid units.
    pub fn path_length(&self) -> f64 {
        path_length(&self.points)
    }

    /// Point at `index`, or an error past the end of the curve.
    pub fn point(&self, index: u32) -> Result<Point> {
        self.points
            .get(index as usize)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index: u64::from(index),
                length: self.points.len() as u64,
            })
    }

    /// Index of `point` on the curve, or an error when it lies off the grid.
    pub fn index(&self, point: Point) -> Result<u32> {
        let side = self.order.side();
        if point.x >= side || point.y >= side {
            return Err(Error::PointOutOfRange {
                x: point.x,
                y: point.y,
                side,
            });
        }
        Ok(point_to_index(side, point))
    }
}

impl Deref for Curve {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}
