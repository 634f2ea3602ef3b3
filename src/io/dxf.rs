//! DXF (AutoCAD Drawing Exchange Format) export for circle configurations

use crate::configuration::Circle;
use crate::visualization::group_by_solution_set;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Layer holding the circles of one solution set
pub fn layer_name(solution_set: usize) -> String {
    format!("SET_{}", solution_set)
}

/// Write circles to DXF ASCII format
///
/// Each circle becomes a CIRCLE entity on the layer of its solution set
/// (`SET_0`, `SET_1`, ...). Base circles use the layer color, Soddy circles
/// are forced to black/white (ACI 7).
///
/// # Example
/// ```rust,no_run
/// use apollonius::{build_configuration, Pnt2d, SolverConfig};
/// use apollonius::io::write_dxf;
///
/// let points = [
///     Pnt2d::from_coords(0.0, 0.0),
///     Pnt2d::from_coords(4.0, 0.0),
///     Pnt2d::from_coords(0.0, 3.0),
/// ];
/// let configuration = build_configuration(points, &SolverConfig::default()).unwrap();
/// write_dxf(&configuration.circles(), "circles.dxf").unwrap();
/// ```
pub fn write_dxf<P: AsRef<Path>>(circles: &[Circle], path: P) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_dxf_to(&mut out, circles)?;
    out.flush()?;
    Ok(())
}

/// Write DXF to any writer
pub fn write_dxf_to<W: Write>(out: &mut W, circles: &[Circle]) -> Result<()> {
    let layers: Vec<usize> = group_by_solution_set(circles).keys().copied().collect();

    write_dxf_header(out, &layers)?;

    writeln!(out, "  0")?;
    writeln!(out, "SECTION")?;
    writeln!(out, "  2")?;
    writeln!(out, "ENTITIES")?;
    for circle in circles {
        write_dxf_circle(out, circle)?;
    }
    writeln!(out, "  0")?;
    writeln!(out, "ENDSEC")?;

    writeln!(out, "  0")?;
    writeln!(out, "EOF")?;
    Ok(())
}

/// Write HEADER and TABLES sections with one layer per solution set
fn write_dxf_header<W: Write>(out: &mut W, layers: &[usize]) -> Result<()> {
    writeln!(out, "  0")?;
    writeln!(out, "SECTION")?;
    writeln!(out, "  2")?;
    writeln!(out, "HEADER")?;
    writeln!(out, "  9")?;
    writeln!(out, "$ACADVER")?;
    writeln!(out, "  1")?;
    writeln!(out, "AC1021")?; // DXF R2007 version
    writeln!(out, "  0")?;
    writeln!(out, "ENDSEC")?;

    writeln!(out, "  0")?;
    writeln!(out, "SECTION")?;
    writeln!(out, "  2")?;
    writeln!(out, "TABLES")?;
    writeln!(out, "  0")?;
    writeln!(out, "TABLE")?;
    writeln!(out, "  2")?;
    writeln!(out, "LAYER")?;
    writeln!(out, " 70")?;
    writeln!(out, "{}", layers.len())?;
    for &set in layers {
        writeln!(out, "  0")?;
        writeln!(out, "LAYER")?;
        writeln!(out, "  2")?;
        writeln!(out, "{}", layer_name(set))?;
        writeln!(out, " 70")?;
        writeln!(out, "0")?;
        writeln!(out, " 62")?;
        writeln!(out, "{}", layer_color(set))?;
        writeln!(out, "  6")?;
        writeln!(out, "CONTINUOUS")?;
    }
    writeln!(out, "  0")?;
    writeln!(out, "ENDTAB")?;
    writeln!(out, "  0")?;
    writeln!(out, "ENDSEC")?;

    Ok(())
}

/// Write a CIRCLE entity
fn write_dxf_circle<W: Write>(out: &mut W, circle: &Circle) -> Result<()> {
    writeln!(out, "  0")?;
    writeln!(out, "CIRCLE")?;
    writeln!(out, "  8")?;
    writeln!(out, "{}", layer_name(circle.solution_set()))?;
    if circle.generation().is_soddy() {
        writeln!(out, " 62")?;
        writeln!(out, "7")?;
    }
    writeln!(out, " 10")?;
    writeln!(out, "{:.6}", circle.center().x())?;
    writeln!(out, " 20")?;
    writeln!(out, "{:.6}", circle.center().y())?;
    writeln!(out, " 30")?;
    writeln!(out, "0.0")?;
    writeln!(out, " 40")?;
    writeln!(out, "{:.6}", circle.radius())?;
    Ok(())
}

/// AutoCAD color index for a set: cycles through 1..=6, skipping 7 (Soddy)
fn layer_color(solution_set: usize) -> usize {
    solution_set % 6 + 1
}
