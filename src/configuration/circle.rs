//! Circle records handed to the visualization and export sinks.

use crate::gp::{Circ2d, Pnt2d};
use serde::{Deserialize, Serialize};

/// Which of the two Soddy circles a record is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoddyKind {
    Inner,
    /// `enclosing` is set when the signed outer radius came out negative,
    /// i.e. the circle wraps around the three base circles.
    Outer { enclosing: bool },
}

/// Generation level of a circle.
///
/// Serialized flat into the circle record as a `generation` level string
/// (`"base"`, `"soddy"` or `"gasket"`), plus `soddy` for the Soddy kind and
/// `stage` for gasket circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "GenerationRecord", try_from = "GenerationRecord")]
pub enum Generation {
    Base,
    Soddy(SoddyKind),
    /// Circle added by gasket refinement; `stage` starts at 1.
    Gasket { stage: usize },
}

impl Generation {
    /// `"base"`, `"soddy"` or `"gasket"`.
    pub const fn label(&self) -> &'static str {
        match self {
            Generation::Base => "base",
            Generation::Soddy(_) => "soddy",
            Generation::Gasket { .. } => "gasket",
        }
    }

    pub const fn is_base(&self) -> bool {
        matches!(self, Generation::Base)
    }

    pub const fn is_soddy(&self) -> bool {
        matches!(self, Generation::Soddy(_))
    }

    /// Refinement stage: 0 for base and Soddy circles.
    pub const fn stage(&self) -> usize {
        match self {
            Generation::Gasket { stage } => *stage,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Level {
    Base,
    Soddy,
    Gasket,
}

#[derive(Serialize, Deserialize)]
struct GenerationRecord {
    generation: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    soddy: Option<SoddyKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stage: Option<usize>,
}

impl From<Generation> for GenerationRecord {
    fn from(generation: Generation) -> Self {
        let (level, soddy, stage) = match generation {
            Generation::Base => (Level::Base, None, None),
            Generation::Soddy(kind) => (Level::Soddy, Some(kind), None),
            Generation::Gasket { stage } => (Level::Gasket, None, Some(stage)),
        };
        GenerationRecord {
            generation: level,
            soddy,
            stage,
        }
    }
}

impl TryFrom<GenerationRecord> for Generation {
    type Error = String;

    fn try_from(record: GenerationRecord) -> Result<Self, Self::Error> {
        match (record.generation, record.soddy, record.stage) {
            (Level::Base, _, _) => Ok(Generation::Base),
            (Level::Soddy, Some(kind), _) => Ok(Generation::Soddy(kind)),
            (Level::Soddy, None, _) => Err("soddy circle without a `soddy` kind".to_string()),
            (Level::Gasket, _, Some(stage)) if stage > 0 => Ok(Generation::Gasket { stage }),
            (Level::Gasket, _, _) => Err("gasket circle needs a `stage` of at least 1".to_string()),
        }
    }
}

/// An immutable circle record: geometry, generation and owning solution set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    center: Pnt2d,
    radius: f64,
    #[serde(flatten)]
    generation: Generation,
    solution_set: usize,
}

impl Circle {
    /// Creates a record. The radius is stored as a magnitude; the sign of an
    /// enclosing outer Soddy circle lives in its [`SoddyKind`].
    pub fn new(center: Pnt2d, radius: f64, generation: Generation, solution_set: usize) -> Self {
        Circle {
            center,
            radius: radius.abs(),
            generation,
            solution_set,
        }
    }

    pub fn center(&self) -> Pnt2d {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Radius in Descartes' sign convention: negative for an enclosing
    /// outer Soddy circle, positive otherwise.
    pub fn signed_radius(&self) -> f64 {
        match self.generation {
            Generation::Soddy(SoddyKind::Outer { enclosing: true }) => -self.radius,
            _ => self.radius,
        }
    }

    /// Signed curvature `1 / signed_radius`.
    pub fn curvature(&self) -> f64 {
        1.0 / self.signed_radius()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn solution_set(&self) -> usize {
        self.solution_set
    }

    /// Plain geometry of this record.
    pub fn to_circ2d(&self) -> Circ2d {
        Circ2d::new(self.center, self.radius)
    }
}
