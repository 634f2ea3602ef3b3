//! apollonius: mutually tangent circle configurations in pure Rust
//!
//! Three planar centroids admit several families of mutually tangent
//! circles. This crate enumerates the sign configurations of the tangency
//! system, solves each one for positive radii and derives the inner and
//! outer Soddy circles of every resulting configuration.
//!
//! Pipeline:
//! 1. [`tangency::enumerate_tangency_matrices`] - the 13 nonsingular sign matrices
//! 2. [`tangency::solve_radii`] - positive radii triples for three points
//! 3. [`soddy::compute_soddy_circles`] - inner/outer Soddy circle per triple
//! 4. [`configuration::build_configuration`] - all of the above, flattened
//!    into a list of [`Circle`] records for the [`visualization`] and [`io`] sinks
//! 5. [`gasket::generate_gasket`] - optional Apollonian gasket refinement of
//!    one solution set

pub mod precision;
pub mod config;
pub mod foundation;
pub mod gp;
pub mod tangency;
pub mod soddy;
pub mod configuration;
pub mod gasket;
pub mod check;
pub mod visualization;
pub mod io;

// Re-exports for convenience
pub use config::SolverConfig;
pub use gp::{Pnt2d, Circ2d};
pub use foundation::math::{Matrix3x3, solve_linear_system_3x3};
pub use tangency::{
    enumerate_tangency_matrices, solve_radii, solve_solution_sets, SolutionSet,
    TangencyMatrix, TangencySign,
};
pub use soddy::{compute_soddy_circles, GeometricDomainError, SoddyTriangle};
pub use configuration::{build_configuration, Circle, Configuration, Generation, SoddyKind};
pub use gasket::{generate_gasket, generate_gaskets, Gasket};
pub use check::{check_gasket, check_solution_set, TangencyFinding};

/// Result type for apollonius operations
pub type Result<T> = std::result::Result<T, ApolloniusError>;

#[derive(Debug, thiserror::Error)]
pub enum ApolloniusError {
    #[error("Collinear centroids: triangle area {area:.3e} is below tolerance")]
    CollinearPoints { area: f64 },

    #[error("Non-finite centroid #{index}: ({x}, {y})")]
    NonFinitePoint { index: usize, x: f64, y: f64 },

    #[error("Squared distance between centroids #{first} and #{second} overflows")]
    DistanceOverflow { first: usize, second: usize },

    #[error("Geometric domain error: {0}")]
    Domain(#[from] GeometricDomainError),

    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
