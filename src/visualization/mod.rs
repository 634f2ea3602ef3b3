//! Visualization module - panel rendering for circle configurations
//!
//! Circles are grouped by solution set and drawn one panel per set:
//! - Base circles: open circles in the set's palette color
//! - Soddy circles: open circles in [`SODDY_COLOR`]
//! - Gasket circles: open circles in [`STAGE_COLORS`] by refinement stage
//! - A `+` marker at every base and Soddy center
//! - Light grid lines at a round spacing, about [`GRID_LINES`] per axis
//!
//! All panels share one bounding box and an equal aspect ratio, so circles
//! from different sets can be compared side by side.

use crate::configuration::{Circle, Generation};
use crate::Result;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Colors assigned to solution sets, cycled by set index
pub const PALETTE: [&str; 11] = [
    "blue", "green", "red", "yellow", "purple", "orange", "brown", "pink", "gray", "olive",
    "cyan",
];

/// Color of every Soddy circle
pub const SODDY_COLOR: &str = "black";

/// Colors of gasket circles, cycled by refinement stage starting at stage 1
pub const STAGE_COLORS: [&str; 4] = ["blue", "red", "green", "purple"];

/// Grid lines per axis the SVG grid aims for
pub const GRID_LINES: usize = 10;

/// Stroke color for a circle
pub fn color_for(circle: &Circle) -> &'static str {
    match circle.generation() {
        Generation::Base => PALETTE[circle.solution_set() % PALETTE.len()],
        Generation::Soddy(_) => SODDY_COLOR,
        Generation::Gasket { stage } => STAGE_COLORS[stage.saturating_sub(1) % STAGE_COLORS.len()],
    }
}

/// Circles keyed by solution-set index, in ascending order
pub fn group_by_solution_set(circles: &[Circle]) -> BTreeMap<usize, Vec<&Circle>> {
    let mut groups: BTreeMap<usize, Vec<&Circle>> = BTreeMap::new();
    for circle in circles {
        groups.entry(circle.solution_set()).or_default().push(circle);
    }
    groups
}

/// Axis-aligned plot limits shared by every panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Margin added beyond the largest radius on every side
    pub const MARGIN: f64 = 1.0;

    /// Centroid extent padded by the largest radius plus [`Self::MARGIN`].
    ///
    /// Returns None for an empty list.
    pub fn around(circles: &[Circle]) -> Option<BoundingBox> {
        let first = circles.first()?;
        let start = BoundingBox {
            min_x: first.center().x(),
            min_y: first.center().y(),
            max_x: first.center().x(),
            max_y: first.center().y(),
        };
        let (extent, max_radius) = circles.iter().fold((start, 0.0_f64), |(b, r), c| {
            let (x, y) = c.center().coords();
            (
                BoundingBox {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
                r.max(c.radius()),
            )
        });
        let pad = max_radius + Self::MARGIN;
        Some(BoundingBox {
            min_x: extent.min_x - pad,
            min_y: extent.min_y - pad,
            max_x: extent.max_x + pad,
            max_y: extent.max_y + pad,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Panel layout for SVG output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// Width of one panel in pixels; height follows the bounding box aspect
    pub panel_width: f64,
    /// Gap between panels in pixels
    pub spacing: f64,
    /// Stroke width of circles in pixels
    pub stroke_width: f64,
    /// Half-size of the centroid marker in pixels
    pub marker_size: f64,
    /// Draw grid lines
    pub grid: bool,
}

impl Default for PanelLayout {
    fn default() -> Self {
        PanelLayout {
            panel_width: 400.0,
            spacing: 20.0,
            stroke_width: 1.5,
            marker_size: 4.0,
            grid: true,
        }
    }
}

impl PanelLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_panel_width(mut self, width: f64) -> Self {
        self.panel_width = width.max(10.0);
        self
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }
}

/// Grid spacing of the form `{1, 2, 5} x 10^k` giving about `target`
/// lines across `span`. None when `span` is not a positive finite number.
pub fn grid_step(span: f64, target: usize) -> Option<f64> {
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return None;
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;
    (step.is_finite() && step > 0.0).then_some(step)
}

/// Multiples of `step` inside `[min, max]`.
fn grid_values(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(move |i| i as f64 * step)
}

/// Render all circles as an SVG document, one panel per solution set.
///
/// An empty list renders an empty document.
pub fn render_svg(circles: &[Circle], layout: &PanelLayout) -> Result<String> {
    let mut out = Vec::new();
    write_svg_to(&mut out, circles, layout)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Render all circles to an SVG file
pub fn write_svg<P: AsRef<Path>>(circles: &[Circle], layout: &PanelLayout, path: P) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_svg_to(&mut out, circles, layout)?;
    out.flush()?;
    Ok(())
}

/// Write the SVG document to any writer
pub fn write_svg_to<W: Write>(out: &mut W, circles: &[Circle], layout: &PanelLayout) -> Result<()> {
    let Some(bounds) = BoundingBox::around(circles) else {
        writeln!(out, "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"0\" height=\"0\"/>")?;
        return Ok(());
    };

    let groups = group_by_solution_set(circles);
    let panels = groups.len() as f64;
    let scale = layout.panel_width / bounds.width();
    let panel_height = bounds.height() * scale;
    let total_width = panels * layout.panel_width + (panels - 1.0).max(0.0) * layout.spacing;

    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.1}\" height=\"{:.1}\" viewBox=\"0 0 {:.1} {:.1}\">",
        total_width, panel_height, total_width, panel_height
    )?;

    for (slot, (set_index, members)) in groups.iter().enumerate() {
        let panel = Panel {
            bounds,
            offset: slot as f64 * (layout.panel_width + layout.spacing),
            scale,
            height: panel_height,
        };
        writeln!(out, "  <g id=\"solution-set-{}\">", set_index)?;
        writeln!(
            out,
            "    <rect x=\"{:.3}\" y=\"0\" width=\"{:.3}\" height=\"{:.3}\" fill=\"white\" stroke=\"lightgray\"/>",
            panel.offset, layout.panel_width, panel_height
        )?;
        if layout.grid {
            write_svg_grid(out, &panel, layout)?;
        }
        for circle in members {
            write_svg_circle(out, &panel, layout, circle)?;
        }
        writeln!(out, "  </g>")?;
    }

    writeln!(out, "</svg>")?;
    Ok(())
}

/// Placement of one panel in the document
struct Panel {
    bounds: BoundingBox,
    offset: f64,
    scale: f64,
    height: f64,
}

impl Panel {
    fn to_px(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.offset + (x - self.bounds.min_x) * self.scale,
            (self.bounds.max_y - y) * self.scale,
        )
    }
}

/// Grid lines at a round spacing; skipped when the box is not finite
fn write_svg_grid<W: Write>(out: &mut W, panel: &Panel, layout: &PanelLayout) -> Result<()> {
    let bounds = &panel.bounds;
    let (Some(step_x), Some(step_y)) = (
        grid_step(bounds.width(), GRID_LINES),
        grid_step(bounds.height(), GRID_LINES),
    ) else {
        return Ok(());
    };

    for gx in grid_values(bounds.min_x, bounds.max_x, step_x) {
        let (px, _) = panel.to_px(gx, 0.0);
        writeln!(
            out,
            "    <line x1=\"{:.3}\" y1=\"0\" x2=\"{:.3}\" y2=\"{:.3}\" stroke=\"#eeeeee\" stroke-width=\"0.5\"/>",
            px, px, panel.height
        )?;
    }
    for gy in grid_values(bounds.min_y, bounds.max_y, step_y) {
        let (_, py) = panel.to_px(0.0, gy);
        writeln!(
            out,
            "    <line x1=\"{:.3}\" y1=\"{:.3}\" x2=\"{:.3}\" y2=\"{:.3}\" stroke=\"#eeeeee\" stroke-width=\"0.5\"/>",
            panel.offset,
            py,
            panel.offset + layout.panel_width,
            py
        )?;
    }
    Ok(())
}

/// One circle, plus a centroid marker unless it is a gasket circle
fn write_svg_circle<W: Write>(
    out: &mut W,
    panel: &Panel,
    layout: &PanelLayout,
    circle: &Circle,
) -> Result<()> {
    let color = color_for(circle);
    let (cx, cy) = panel.to_px(circle.center().x(), circle.center().y());
    writeln!(
        out,
        "    <circle class=\"{}\" cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
        circle.generation().label(),
        cx,
        cy,
        circle.radius() * panel.scale,
        color,
        layout.stroke_width
    )?;
    if circle.generation().stage() > 0 {
        return Ok(());
    }
    let m = layout.marker_size;
    writeln!(
        out,
        "    <path class=\"marker\" d=\"M {:.3} {:.3} H {:.3} M {:.3} {:.3} V {:.3}\" stroke=\"{}\"/>",
        cx - m,
        cy,
        cx + m,
        cx,
        cy - m,
        cy + m,
        color
    )?;
    Ok(())
}
