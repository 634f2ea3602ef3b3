//! File export for circle lists

mod dxf;
mod json;

pub use dxf::{layer_name, write_dxf, write_dxf_to};
pub use json::{read_json, to_json, write_json};
pub use crate::visualization::{write_svg, write_svg_to};
