//! Apollonius driver
//!
//! Draws (or takes) three centroids, builds every mutually tangent circle
//! configuration on them, optionally refines each one into an Apollonian
//! gasket and writes the result to SVG, DXF and/or JSON.

use anyhow::{bail, Context};
use apollonius::gasket::MAX_DEPTH;
use apollonius::io::{write_dxf, write_json, write_svg};
use apollonius::visualization::PanelLayout;
use apollonius::{
    build_configuration, generate_gaskets, ApolloniusError, Circle, Configuration, Pnt2d,
    SolverConfig,
};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Mutually tangent circles and their Soddy circles on three points
#[derive(Parser, Debug)]
#[command(name = "apollonius")]
#[command(version)]
#[command(about = "Solve tangent circle configurations on three planar points")]
struct Args {
    /// Seed for the random centroids; fresh entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Fixed centroids as x0,y0,x1,y1,x2,y2 instead of random ones
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    points: Option<Vec<f64>>,

    /// Solver tolerances as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refine every solution set into an Apollonian gasket of this depth
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=MAX_DEPTH as i64))]
    depth: Option<u8>,

    /// Random draws to try before giving up on degenerate triangles
    #[arg(long, default_value_t = 100)]
    max_attempts: usize,

    /// Write panels to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write circles to this DXF file
    #[arg(long)]
    dxf: Option<PathBuf>,

    /// Write circles to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Panel width in pixels for SVG output
    #[arg(long, default_value_t = 400.0)]
    panel_width: f64,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => SolverConfig::from_json_file(path)
            .with_context(|| format!("loading solver config from {}", path.display()))?,
        None => SolverConfig::default(),
    };

    let depth = args.depth.map(usize::from);
    let (configuration, circles) = match &args.points {
        Some(coords) => {
            let points = points_from_coords(coords)?;
            solve(points, &config, depth).with_context(|| format!("solving for {:?}", points))?
        }
        None => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            solve_random(&mut rng, &config, depth, args.max_attempts)?
        }
    };

    report(&configuration);
    if let Some(depth) = depth {
        println!("Gasket depth {}: {} circles", depth, circles.len());
    }

    if let Some(path) = &args.svg {
        let layout = PanelLayout::new().with_panel_width(args.panel_width);
        write_svg(&circles, &layout, path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote SVG");
    }
    if let Some(path) = &args.dxf {
        write_dxf(&circles, path).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote DXF");
    }
    if let Some(path) = &args.json {
        write_json(&circles, path).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON");
    }

    Ok(())
}

fn points_from_coords(coords: &[f64]) -> anyhow::Result<[Pnt2d; 3]> {
    if coords.len() != 6 {
        bail!("--points needs exactly six numbers, got {}", coords.len());
    }
    Ok([
        Pnt2d::from_coords(coords[0], coords[1]),
        Pnt2d::from_coords(coords[2], coords[3]),
        Pnt2d::from_coords(coords[4], coords[5]),
    ])
}

/// Integer centroids in `[0, 10)`, as floats.
fn random_points(rng: &mut StdRng) -> [Pnt2d; 3] {
    [0, 1, 2].map(|_| {
        Pnt2d::from_coords(
            rng.gen_range(0..10) as f64,
            rng.gen_range(0..10) as f64,
        )
    })
}

/// The configuration on `points` and the circles to export: the flat
/// circle list, or every gasket when `depth` is given.
fn solve(
    points: [Pnt2d; 3],
    config: &SolverConfig,
    depth: Option<usize>,
) -> Result<(Configuration, Vec<Circle>), ApolloniusError> {
    let configuration = build_configuration(points, config)?;
    let circles = match depth {
        Some(depth) => generate_gaskets(&configuration, depth, config)?
            .into_iter()
            .flat_map(|gasket| gasket.into_circles())
            .collect(),
        None => configuration.circles(),
    };
    Ok((configuration, circles))
}

/// Draws centroids until one triple yields a configuration. Degenerate
/// draws (collinear, or a geometric domain error) are re-drawn.
fn solve_random(
    rng: &mut StdRng,
    config: &SolverConfig,
    depth: Option<usize>,
    max_attempts: usize,
) -> anyhow::Result<(Configuration, Vec<Circle>)> {
    for attempt in 1..=max_attempts {
        let points = random_points(rng);
        match solve(points, config, depth) {
            Ok(solved) => {
                info!(attempt, ?points, "accepted centroids");
                return Ok(solved);
            }
            Err(err @ (ApolloniusError::CollinearPoints { .. } | ApolloniusError::Domain(_))) => {
                warn!(attempt, ?points, error = %err, "re-drawing centroids");
            }
            Err(err) => return Err(err.into()),
        }
    }
    bail!("no usable centroid triple after {} attempts", max_attempts)
}

fn report(configuration: &Configuration) {
    if configuration.is_empty() {
        println!("No solution: no tangency configuration has positive radii");
        return;
    }

    let [p0, p1, p2] = configuration.centroids();
    println!(
        "Centroids: ({}, {}) ({}, {}) ({}, {})",
        p0.x(),
        p0.y(),
        p1.x(),
        p1.y(),
        p2.x(),
        p2.y()
    );
    for set in configuration.solution_sets() {
        let [r0, r1, r2] = set.radii();
        println!(
            "Set {:>2} {:?}: radii {:.6} {:.6} {:.6}",
            set.index(),
            set.signs(),
            r0,
            r1,
            r2
        );
        if let Some((inner, outer)) = configuration.soddy_circles(set.index()) {
            println!(
                "        inner Soddy r = {:.6} at ({:.6}, {:.6})",
                inner.radius(),
                inner.center().x(),
                inner.center().y()
            );
            println!(
                "        outer Soddy r = {:.6} at ({:.6}, {:.6})",
                outer.signed_radius(),
                outer.center().x(),
                outer.center().y()
            );
        }
    }
}
