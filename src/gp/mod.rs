//! Geometric primitives package.
//!
//! Plain 2D value types shared by the solver, the checker and the sinks.

mod pnt2d;
mod circ2d;

pub use pnt2d::Pnt2d;
pub use circ2d::Circ2d;
