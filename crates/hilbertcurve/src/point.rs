//! Grid cells visited by the curve.

use std::fmt;

/// A cell in a `2^order × 2^order` grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    /// Column, growing to the right.
    pub x: u32,
    /// Row, growing downwards.
    pub y: u32,
}

impl Point {
    /// Create a new `Point`.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Chebyshev (king move) distance between two points.
    pub fn chebyshev(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Largest of the two coordinates.
    pub fn max_coord(&self) -> u32 {
        self.x.max(self.y)
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (u32, u32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance() {
        let a = Point::new(2, 2);
        assert_eq!(a.distance(&Point::new(2, 1)), 1.0);
        assert_eq!(a.distance(&Point::new(0, 2)), 2.0);
        assert_eq!(a.distance(&a), 0.0);
        assert_eq!(Point::new(0, 0).distance(&Point::new(3, 4)), 5.0);
    }

    #[test]
    fn chebyshev() {
        let a = Point::new(1, 1);
        assert_eq!(a.chebyshev(&Point::new(2, 1)), 1);
        assert_eq!(a.chebyshev(&Point::new(2, 2)), 1);
        assert_eq!(a.chebyshev(&Point::new(1, 4)), 3);
        assert_eq!(a.chebyshev(&a), 0);
    }

    #[test]
    fn display() {
        assert_eq!(Point::new(3, 7).to_string(), "(3, 7)");
    }
}
