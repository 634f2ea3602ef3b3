//! Soddy circle calculator
//!
//! Given three base circles on the vertices of a triangle, computes the
//! inner and outer Soddy circles:
//!
//! - centers as barycentric blends of the vertices, weighted by side length
//!   times a per-vertex factor (area based for the outer circle, half-angle
//!   based for the inner one)
//! - radii from `r1 r2 r3 / (r1 r2 + r2 r3 + r1 r3 ± 2S)`
//!
//! The outer radius is signed: negative means the outer Soddy circle
//! encloses the base circles. A vanishing denominator (the outer "circle" is
//! a straight line) is reported as [`GeometricDomainError::OuterRadiusUndefined`].

use crate::config::SolverConfig;
use crate::configuration::{Circle, Generation, SoddyKind};
use crate::gp::Pnt2d;
use crate::precision::clamp_cosine;
use tracing::debug;

/// Failures of the Soddy computation for a particular triangle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometricDomainError {
    #[error("degenerate triangle: area {area:.3e}, shortest side {shortest_side:.3e}")]
    DegenerateTriangle { area: f64, shortest_side: f64 },

    #[error("base radius #{index} is not a positive number: {radius}")]
    NonPositiveRadius { index: usize, radius: f64 },

    #[error("law-of-cosines argument {cosine} at vertex #{vertex} is outside [-1, 1]")]
    CosineOutOfDomain { vertex: usize, cosine: f64 },

    #[error("barycentric weights sum to {sum:.3e}, center is undefined")]
    DegenerateWeights { sum: f64 },

    #[error("outer Soddy radius is undefined: denominator {denominator:.3e}")]
    OuterRadiusUndefined { denominator: f64 },

    #[error("Descartes radicand {radicand:.3e} is negative, circles are not mutually tangent")]
    NegativeDescartesRadicand { radicand: f64 },

    #[error("circle centers are collinear: elimination determinant {determinant:.3e}")]
    CollinearCenters { determinant: f64 },

    #[error("tangent circle curvature {curvature:.3e} vanishes")]
    VanishingCurvature { curvature: f64 },
}

type DomainResult<T> = std::result::Result<T, GeometricDomainError>;

/// Triangle metrics for one solution set.
///
/// `sides[i]` is the side opposite vertex `i` and `angles[i]` the interior
/// angle at vertex `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoddyTriangle {
    vertices: [Pnt2d; 3],
    sides: [f64; 3],
    angles: [f64; 3],
    area: f64,
    radii: [f64; 3],
}

impl SoddyTriangle {
    pub fn new(
        centroids: &[Pnt2d; 3],
        radii: &[f64; 3],
        config: &SolverConfig,
    ) -> DomainResult<Self> {
        for (index, &radius) in radii.iter().enumerate() {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(GeometricDomainError::NonPositiveRadius { index, radius });
            }
        }

        let [p0, p1, p2] = centroids;
        let sides = [p1.distance(p2), p0.distance(p2), p0.distance(p1)];
        let longest = sides.iter().copied().fold(0.0, f64::max);
        let shortest = sides.iter().copied().fold(f64::INFINITY, f64::min);
        if !longest.is_finite() || shortest <= config.confusion * longest {
            return Err(GeometricDomainError::DegenerateTriangle {
                area: 0.5 * p0.cross(p1, p2).abs(),
                shortest_side: shortest,
            });
        }

        let mut angles = [0.0; 3];
        for (vertex, angle) in angles.iter_mut().enumerate() {
            let opposite = sides[vertex];
            let u = sides[(vertex + 1) % 3];
            let v = sides[(vertex + 2) % 3];
            let cosine = (opposite * opposite - u * u - v * v) / (-2.0 * u * v);
            let clamped = clamp_cosine(cosine, config.cosine_slack)
                .ok_or(GeometricDomainError::CosineOutOfDomain { vertex, cosine })?;
            *angle = clamped.acos();
        }

        let [_, b, c] = sides;
        let area = 0.5 * b * c * angles[0].sin();
        if area <= 0.5 * config.confusion * longest * longest {
            return Err(GeometricDomainError::DegenerateTriangle {
                area,
                shortest_side: shortest,
            });
        }

        Ok(SoddyTriangle {
            vertices: *centroids,
            sides,
            angles,
            area,
            radii: *radii,
        })
    }

    pub fn sides(&self) -> [f64; 3] {
        self.sides
    }

    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn radii(&self) -> [f64; 3] {
        self.radii
    }

    /// Outer Soddy center: vertex weights `1 - 2S / (a (b + c - a))`.
    pub fn outer_center(&self) -> DomainResult<Pnt2d> {
        let [a, b, c] = self.sides;
        let factor = |opposite: f64, u: f64, v: f64| {
            1.0 - 2.0 * self.area / (opposite * (u + v - opposite))
        };
        self.blend([factor(a, b, c), factor(b, a, c), factor(c, a, b)])
    }

    /// Inner Soddy center: vertex weights `1 + sec(A/2) cos(B/2) cos(C/2)`.
    pub fn inner_center(&self) -> DomainResult<Pnt2d> {
        let half_cos = self.angles.map(|angle| (0.5 * angle).cos());
        let factor = |i: usize| {
            1.0 + half_cos[(i + 1) % 3] * half_cos[(i + 2) % 3] / half_cos[i]
        };
        self.blend([factor(0), factor(1), factor(2)])
    }

    /// `r1 r2 r3 / (r1 r2 + r2 r3 + r1 r3 + 2S)`, always positive.
    pub fn inner_radius(&self) -> f64 {
        let (product, pair_sum) = self.radius_terms();
        product / (pair_sum + 2.0 * self.area)
    }

    /// `r1 r2 r3 / (r1 r2 + r2 r3 + r1 r3 - 2S)`, signed.
    ///
    /// Errors when the denominator is within `confusion` (relative) of zero.
    pub fn outer_radius(&self, config: &SolverConfig) -> DomainResult<f64> {
        let (product, pair_sum) = self.radius_terms();
        let denominator = pair_sum - 2.0 * self.area;
        if !denominator.is_finite() || denominator.abs() <= config.confusion * pair_sum {
            return Err(GeometricDomainError::OuterRadiusUndefined { denominator });
        }
        let radius = product / denominator;
        if !radius.is_finite() {
            return Err(GeometricDomainError::OuterRadiusUndefined { denominator });
        }
        Ok(radius)
    }

    fn radius_terms(&self) -> (f64, f64) {
        let [r1, r2, r3] = self.radii;
        (r1 * r2 * r3, r2 * r3 + r1 * r3 + r1 * r2)
    }

    /// Vertices weighted by `side * factor`.
    fn blend(&self, factors: [f64; 3]) -> DomainResult<Pnt2d> {
        let weights = [
            self.sides[0] * factors[0],
            self.sides[1] * factors[1],
            self.sides[2] * factors[2],
        ];
        Pnt2d::barycenter(&self.vertices, &weights).ok_or(GeometricDomainError::DegenerateWeights {
            sum: weights.iter().sum(),
        })
    }
}

/// Inner and outer Soddy circles of one solution set, with default tolerances.
pub fn compute_soddy_circles(
    centroids: &[Pnt2d; 3],
    radii: &[f64; 3],
    set_index: usize,
) -> DomainResult<(Circle, Circle)> {
    compute_soddy_circles_with(centroids, radii, set_index, &SolverConfig::default())
}

/// Inner and outer Soddy circles of one solution set.
///
/// Both circles are tagged with `set_index`. The outer circle stores the
/// magnitude of the signed outer radius and records its sign as
/// `SoddyKind::Outer { enclosing }`.
pub fn compute_soddy_circles_with(
    centroids: &[Pnt2d; 3],
    radii: &[f64; 3],
    set_index: usize,
    config: &SolverConfig,
) -> DomainResult<(Circle, Circle)> {
    let triangle = SoddyTriangle::new(centroids, radii, config)?;
    debug!(
        set_index,
        sides = ?triangle.sides(),
        angles = ?triangle.angles(),
        area = triangle.area(),
        "soddy triangle"
    );

    let inner_center = triangle.inner_center()?;
    let inner_radius = triangle.inner_radius();
    let outer_radius = triangle.outer_radius(config)?;
    let outer_center = triangle.outer_center()?;

    debug!(
        set_index,
        inner_radius,
        outer_radius,
        "soddy radii"
    );

    let inner = Circle::new(
        inner_center,
        inner_radius,
        Generation::Soddy(SoddyKind::Inner),
        set_index,
    );
    let outer = Circle::new(
        outer_center,
        outer_radius,
        Generation::Soddy(SoddyKind::Outer {
            enclosing: outer_radius < 0.0,
        }),
        set_index,
    );
    Ok((inner, outer))
}
