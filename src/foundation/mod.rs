//! Foundation classes: the small linear-algebra kernel the solver runs on.

pub mod math;

pub use math::{Matrix3x3, solve_linear_system_3x3};
