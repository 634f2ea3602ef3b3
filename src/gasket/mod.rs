//! Apollonian gasket refinement
//!
//! The three base circles of a solution set and the two circles completing
//! their Descartes quadruple seed the gasket. Every triple of mutually
//! tangent circles then bounds a curvilinear gap, which is filled by
//! reflecting the fourth circle of its quadruple:
//!
//! ```text
//! k' = 2 (k1 + k2 + k3) - k4
//! z' = (2 (k1 z1 + k2 z2 + k3 z3) - k4 z4) / k'
//! ```
//!
//! Curvatures are signed: a circle enclosing its neighbours has negative
//! curvature. Refining to depth `n` gives `3^(n+1) + 2` circles per set,
//! see [`circle_count`].

use crate::config::SolverConfig;
use crate::configuration::{Circle, Configuration, Generation, SoddyKind};
use crate::gp::Pnt2d;
use crate::soddy::GeometricDomainError;
use crate::tangency::{SolutionSet, TangencySign, ROW_PAIRS};
use crate::{ApolloniusError, Result};
use tracing::{debug, info};

/// Deepest accepted refinement; depth 10 is already 177 149 circles per set.
pub const MAX_DEPTH: usize = 10;

type DomainResult<T> = std::result::Result<T, GeometricDomainError>;

/// Number of circles in a gasket refined to `depth`.
pub const fn circle_count(depth: usize) -> usize {
    3usize.pow(depth as u32 + 1) + 2
}

/// Center and signed curvature of one gasket circle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Disk {
    center: Pnt2d,
    curvature: f64,
}

impl Disk {
    fn signed_radius(&self) -> f64 {
        1.0 / self.curvature
    }
}

/// Circles of one refined solution set.
///
/// Index 0..3 are the base circles, 3 and 4 the Descartes seeds (inner,
/// then outer); refinement circles follow in depth-first order.
#[derive(Debug, Clone, PartialEq)]
pub struct Gasket {
    solution_set: usize,
    depth: usize,
    circles: Vec<Circle>,
    curvatures: Vec<f64>,
    parents: Vec<Option<[usize; 3]>>,
}

impl Gasket {
    pub fn solution_set(&self) -> usize {
        self.solution_set
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn into_circles(self) -> Vec<Circle> {
        self.circles
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Signed curvature of circle `index`; negative for an enclosing circle.
    pub fn curvature(&self, index: usize) -> Option<f64> {
        self.curvatures.get(index).copied()
    }

    /// Signed radius of circle `index`.
    pub fn signed_radius(&self, index: usize) -> Option<f64> {
        self.curvature(index).map(|k| 1.0 / k)
    }

    /// The three circles that circle `index` was fitted against.
    ///
    /// None for the base circles and for indices out of range.
    pub fn parents(&self, index: usize) -> Option<[usize; 3]> {
        self.parents.get(index).copied().flatten()
    }

    /// Circles added at refinement `stage` (1-based).
    pub fn stage(&self, stage: usize) -> impl Iterator<Item = &Circle> + '_ {
        self.circles
            .iter()
            .filter(move |c| c.generation() == Generation::Gasket { stage })
    }
}

/// Signed curvatures of the base circles of `set`: `1 / r`, negated for the
/// circle that encloses the other two.
pub fn signed_curvatures(set: &SolutionSet) -> [f64; 3] {
    let mut curvatures = set.radii().map(|r| 1.0 / r);
    for (&(first, second), sign) in ROW_PAIRS.iter().zip(set.signs()) {
        let encloser = match sign {
            TangencySign::A => continue,
            TangencySign::B => second,
            TangencySign::C => first,
        };
        curvatures[encloser] = -curvatures[encloser].abs();
    }
    curvatures
}

/// The two curvatures completing a Descartes quadruple with `k`, larger
/// first: `k1 + k2 + k3 ± 2 sqrt(k1 k2 + k2 k3 + k3 k1)`.
///
/// A radicand negative by less than `confusion` (relative to the curvatures)
/// is taken as zero.
pub fn descartes_curvatures(k: [f64; 3], config: &SolverConfig) -> DomainResult<(f64, f64)> {
    let [k1, k2, k3] = k;
    let radicand = k1 * k2 + k2 * k3 + k3 * k1;
    let scale = k1 * k1 + k2 * k2 + k3 * k3;
    if !radicand.is_finite() || radicand < -config.confusion * scale {
        return Err(GeometricDomainError::NegativeDescartesRadicand { radicand });
    }
    let root = 2.0 * radicand.max(0.0).sqrt();
    let sum = k1 + k2 + k3;
    Ok((sum + root, sum - root))
}

/// Center of the circle of curvature `curvature` tangent to all of `disks`.
///
/// Subtracting the tangency equation of the first disk from the other two
/// leaves a 2x2 linear system, solved by Cramer's rule.
fn tangent_center(disks: &[Disk; 3], curvature: f64, config: &SolverConfig) -> DomainResult<Pnt2d> {
    let rho = 1.0 / curvature;
    let [first, second, third] = disks;
    let (x1, y1) = first.center.coords();
    let reach1 = first.signed_radius() + rho;
    let row = |disk: &Disk| {
        let (x, y) = disk.center.coords();
        let reach = disk.signed_radius() + rho;
        (
            2.0 * (x - x1),
            2.0 * (y - y1),
            x * x - x1 * x1 + y * y - y1 * y1 + reach1 * reach1 - reach * reach,
        )
    };
    let (a1, b1, c1) = row(second);
    let (a2, b2, c2) = row(third);

    let longest_sq = first
        .center
        .square_distance(&second.center)
        .max(first.center.square_distance(&third.center))
        .max(second.center.square_distance(&third.center));
    let determinant = a1 * b2 - a2 * b1;
    if !determinant.is_finite() || determinant.abs() <= 4.0 * config.confusion * longest_sq {
        return Err(GeometricDomainError::CollinearCenters { determinant });
    }

    Ok(Pnt2d::from_coords(
        (c1 * b2 - c2 * b1) / determinant,
        (a1 * c2 - a2 * c1) / determinant,
    ))
}

/// The circle in the gap bounded by `triple`, on the far side from `opposite`.
fn reflect(triple: [Disk; 3], opposite: Disk, config: &SolverConfig) -> DomainResult<Disk> {
    let curvature = 2.0 * triple.iter().map(|d| d.curvature).sum::<f64>() - opposite.curvature;
    let scale: f64 = triple.iter().map(|d| d.curvature.abs()).sum();
    if !curvature.is_finite() || curvature <= config.confusion * scale {
        return Err(GeometricDomainError::VanishingCurvature { curvature });
    }

    let weighted = |coord: fn(&Pnt2d) -> f64| {
        2.0 * triple.iter().map(|d| d.curvature * coord(&d.center)).sum::<f64>()
            - opposite.curvature * coord(&opposite.center)
    };
    let center = Pnt2d::from_coords(
        weighted(Pnt2d::x) / curvature,
        weighted(Pnt2d::y) / curvature,
    );
    if !center.is_finite() {
        return Err(GeometricDomainError::VanishingCurvature { curvature });
    }
    Ok(Disk { center, curvature })
}

struct GasketBuilder<'a> {
    config: &'a SolverConfig,
    gasket: Gasket,
    disks: Vec<Disk>,
}

impl GasketBuilder<'_> {
    fn push(&mut self, disk: Disk, generation: Generation, parents: Option<[usize; 3]>) -> usize {
        let circle = Circle::new(
            disk.center,
            disk.signed_radius().abs(),
            generation,
            self.gasket.solution_set,
        );
        self.gasket.circles.push(circle);
        self.gasket.curvatures.push(disk.curvature);
        self.gasket.parents.push(parents);
        self.disks.push(disk);
        self.disks.len() - 1
    }

    fn refine(
        &mut self,
        triple: [usize; 3],
        opposite: usize,
        remaining: usize,
        stage: usize,
    ) -> DomainResult<()> {
        if remaining == 0 {
            return Ok(());
        }
        let disk = reflect(triple.map(|i| self.disks[i]), self.disks[opposite], self.config)?;
        let added = self.push(disk, Generation::Gasket { stage }, Some(triple));

        let [a, b, c] = triple;
        self.refine([a, b, added], c, remaining - 1, stage + 1)?;
        self.refine([a, added, c], b, remaining - 1, stage + 1)?;
        self.refine([added, b, c], a, remaining - 1, stage + 1)
    }
}

/// Refine the base circles of `set` into an Apollonian gasket of `depth`
/// stages.
///
/// Depth 0 gives the base circles and their two Descartes circles; for an
/// all-external set those coincide with the Soddy circles.
pub fn generate_gasket(set: &SolutionSet, depth: usize, config: &SolverConfig) -> Result<Gasket> {
    config.validate()?;
    if depth > MAX_DEPTH {
        return Err(ApolloniusError::InvalidConfig(format!(
            "gasket depth {} exceeds the maximum of {}",
            depth, MAX_DEPTH
        )));
    }

    let curvatures = signed_curvatures(set);
    let bases = [0, 1, 2].map(|i| Disk {
        center: set.centroids()[i],
        curvature: curvatures[i],
    });
    let (k_inner, k_outer) = descartes_curvatures(curvatures, config)?;
    let scale: f64 = curvatures.iter().map(|k| k.abs()).sum();
    if k_outer.abs() <= config.confusion * scale {
        return Err(GeometricDomainError::VanishingCurvature { curvature: k_outer }.into());
    }
    let inner = Disk {
        center: tangent_center(&bases, k_inner, config)?,
        curvature: k_inner,
    };
    let outer = Disk {
        center: tangent_center(&bases, k_outer, config)?,
        curvature: k_outer,
    };
    debug!(set = set.index(), k_inner, k_outer, "Descartes seeds");

    let count = circle_count(depth);
    let mut builder = GasketBuilder {
        config,
        gasket: Gasket {
            solution_set: set.index(),
            depth,
            circles: Vec::with_capacity(count),
            curvatures: Vec::with_capacity(count),
            parents: Vec::with_capacity(count),
        },
        disks: Vec::with_capacity(count),
    };
    for disk in bases {
        builder.push(disk, Generation::Base, None);
    }
    let inner_index = builder.push(inner, Generation::Soddy(SoddyKind::Inner), Some([0, 1, 2]));
    let outer_index = builder.push(
        outer,
        Generation::Soddy(SoddyKind::Outer { enclosing: k_outer < 0.0 }),
        Some([0, 1, 2]),
    );

    for fourth in [inner_index, outer_index] {
        for (a, b, opposite) in [(0, 1, 2), (0, 2, 1), (1, 2, 0)] {
            builder.refine([a, b, fourth], opposite, depth, 1)?;
        }
    }

    info!(set = set.index(), depth, circles = builder.gasket.len(), "generated gasket");
    Ok(builder.gasket)
}

/// One gasket per solution set of `configuration`, in set order.
pub fn generate_gaskets(
    configuration: &Configuration,
    depth: usize,
    config: &SolverConfig,
) -> Result<Vec<Gasket>> {
    configuration
        .solution_sets()
        .iter()
        .map(|set| generate_gasket(set, depth, config))
        .collect()
}
