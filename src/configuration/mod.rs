//! Configuration pipeline
//!
//! Runs the tangency solver and the Soddy calculator for one centroid triple
//! and collects every resulting circle into a flat list.

mod circle;

pub use circle::{Circle, Generation, SoddyKind};

use crate::config::SolverConfig;
use crate::gp::Pnt2d;
use crate::soddy::compute_soddy_circles_with;
use crate::tangency::{enumerate_tangency_matrices, solve_solution_sets, SolutionSet};
use crate::Result;
use tracing::info;

/// All solution sets for one centroid triple and their Soddy circles.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    centroids: [Pnt2d; 3],
    solution_sets: Vec<SolutionSet>,
    soddy: Vec<(Circle, Circle)>,
}

impl Configuration {
    pub fn centroids(&self) -> &[Pnt2d; 3] {
        &self.centroids
    }

    pub fn solution_sets(&self) -> &[SolutionSet] {
        &self.solution_sets
    }

    pub fn solution_set(&self, index: usize) -> Option<&SolutionSet> {
        self.solution_sets.get(index)
    }

    /// Inner and outer Soddy circle of set `index`.
    pub fn soddy_circles(&self, index: usize) -> Option<&(Circle, Circle)> {
        self.soddy.get(index)
    }

    /// Number of solution sets.
    pub fn len(&self) -> usize {
        self.solution_sets.len()
    }

    /// The "no solution" result: no sign configuration gave positive radii.
    pub fn is_empty(&self) -> bool {
        self.solution_sets.is_empty()
    }

    /// Base circles, three per set, in set order.
    pub fn base_circles(&self) -> Vec<Circle> {
        self.solution_sets
            .iter()
            .flat_map(|set| set.base_circles())
            .collect()
    }

    /// Flat list for the sinks: every base circle, then the inner and outer
    /// Soddy circle of each set.
    pub fn circles(&self) -> Vec<Circle> {
        let mut circles = self.base_circles();
        for (inner, outer) in &self.soddy {
            circles.push(*inner);
            circles.push(*outer);
        }
        circles
    }
}

/// Solves all tangency configurations for `points` and derives the Soddy
/// circles of each one.
///
/// Collinear input and Soddy domain errors are returned as errors; a triple
/// with no positive-radius configuration yields an empty [`Configuration`].
pub fn build_configuration(points: [Pnt2d; 3], config: &SolverConfig) -> Result<Configuration> {
    config.validate()?;

    let matrices = enumerate_tangency_matrices();
    let solution_sets = solve_solution_sets(&matrices, &points, config)?;
    if solution_sets.is_empty() {
        info!(?points, "no positive-radius tangency configuration");
    }

    let mut soddy = Vec::with_capacity(solution_sets.len());
    for set in &solution_sets {
        let pair = compute_soddy_circles_with(set.centroids(), set.radii(), set.index(), config)?;
        soddy.push(pair);
    }

    info!(
        solution_sets = solution_sets.len(),
        circles = solution_sets.len() * 5,
        "built tangent circle configuration"
    );

    Ok(Configuration {
        centroids: points,
        solution_sets,
        soddy,
    })
}
