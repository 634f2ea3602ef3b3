//! Solver configuration.
//!
//! Every field defaults to a constant from [`crate::precision`]; a JSON file
//! only needs to name the fields it overrides.

use crate::precision;
use crate::{ApolloniusError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tolerances used by the tangency solver, the Soddy calculator and the checker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Relative tolerance for collinear centroids, degenerate sides and
    /// vanishing outer-radius denominators.
    pub confusion: f64,
    /// Allowed overshoot of a law-of-cosines argument before it is an error.
    pub cosine_slack: f64,
    /// Absolute tolerance for substitution checks.
    pub residual_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            confusion: precision::CONFUSION,
            cosine_slack: precision::COSINE_SLACK,
            residual_tolerance: precision::APPROXIMATION,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_confusion(mut self, confusion: f64) -> Self {
        self.confusion = confusion;
        self
    }

    pub fn with_cosine_slack(mut self, slack: f64) -> Self {
        self.cosine_slack = slack;
        self
    }

    pub fn with_residual_tolerance(mut self, tolerance: f64) -> Self {
        self.residual_tolerance = tolerance;
        self
    }

    /// Rejects negative, NaN or infinite tolerances.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("confusion", self.confusion),
            ("cosine_slack", self.cosine_slack),
            ("residual_tolerance", self.residual_tolerance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ApolloniusError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
