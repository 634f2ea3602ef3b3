//! 2D circle.

use crate::gp::Pnt2d;
use serde::{Deserialize, Serialize};

/// A 2D circle defined by center and radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circ2d {
    center: Pnt2d,
    radius: f64,
}

impl Circ2d {
    /// Creates a circle. A negative radius is stored as its magnitude.
    #[inline]
    pub fn new(center: Pnt2d, radius: f64) -> Self {
        Self { center, radius: radius.abs() }
    }

    /// Returns the center.
    #[inline]
    pub fn center(&self) -> Pnt2d {
        self.center
    }

    /// Returns the radius.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Gap between the center distance and the external tangency distance
    /// `r1 + r2`. Zero when the circles touch from outside.
    pub fn external_gap(&self, other: &Circ2d) -> f64 {
        self.center.distance(&other.center) - (self.radius + other.radius)
    }

    /// Gap between the center distance and the internal tangency distance
    /// `|r1 - r2|`. Zero when one circle touches the other from inside.
    pub fn internal_gap(&self, other: &Circ2d) -> f64 {
        self.center.distance(&other.center) - (self.radius - other.radius).abs()
    }
}
