//! 2D point.

use serde::{Deserialize, Serialize};

/// A 2D point in cartesian coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pnt2d {
    x: f64,
    y: f64,
}

impl Pnt2d {
    /// Creates a point at the origin (0, 0).
    #[inline]
    pub const fn new() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Creates a point with given coordinates.
    #[inline]
    pub const fn from_coords(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the X coordinate.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the Y coordinate.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns coordinates as tuple.
    #[inline]
    pub const fn coords(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// True when both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the distance to another point.
    #[inline]
    pub fn distance(&self, other: &Pnt2d) -> f64 {
        self.square_distance(other).sqrt()
    }

    /// Returns the squared distance to another point.
    #[inline]
    pub const fn square_distance(&self, other: &Pnt2d) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Checks if this point is equal to another within tolerance.
    #[inline]
    pub fn is_equal(&self, other: &Pnt2d, tolerance: f64) -> bool {
        self.distance(other) <= tolerance
    }

    /// Z component of `(b - self) × (c - self)`: twice the signed area of
    /// the triangle (self, b, c), positive when counter-clockwise.
    #[inline]
    pub fn cross(&self, b: &Pnt2d, c: &Pnt2d) -> f64 {
        (b.x - self.x) * (c.y - self.y) - (b.y - self.y) * (c.x - self.x)
    }

    /// Weighted average of `points`.
    ///
    /// Returns None when the weights sum to (numerically) zero or the
    /// result is not finite.
    pub fn barycenter(points: &[Pnt2d], weights: &[f64]) -> Option<Pnt2d> {
        if points.len() != weights.len() || points.is_empty() {
            return None;
        }
        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total.abs() <= f64::EPSILON {
            return None;
        }
        let (sx, sy) = points
            .iter()
            .zip(weights)
            .fold((0.0, 0.0), |(sx, sy), (p, w)| (sx + w * p.x, sy + w * p.y));
        let center = Pnt2d::from_coords(sx / total, sy / total);
        center.is_finite().then_some(center)
    }
}

impl From<(f64, f64)> for Pnt2d {
    fn from((x, y): (f64, f64)) -> Self {
        Pnt2d::from_coords(x, y)
    }
}

impl From<[f64; 2]> for Pnt2d {
    fn from([x, y]: [f64; 2]) -> Self {
        Pnt2d::from_coords(x, y)
    }
}
