//! JSON configuration and input for solve sessions

use crate::error::{Result, SolverError};
use crate::system::LinearSystem;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings of a solve session
///
/// The session tries `tolerance_steps` precision thresholds, starting at
/// `initial_tolerance` and multiplying by `reduction_factor` after each one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// First (loosest) precision threshold
    #[serde(default = "default_initial_tolerance")]
    pub initial_tolerance: f64,
    /// Number of thresholds to try
    #[serde(default = "default_tolerance_steps")]
    pub tolerance_steps: usize,
    /// Factor applied to the threshold after each step
    #[serde(default = "default_reduction_factor")]
    pub reduction_factor: f64,
    /// Iteration cap for each solver run
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Print solver progress every N iterations (0 = no output)
    #[serde(default)]
    pub print_interval: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_tolerance: default_initial_tolerance(),
            tolerance_steps: default_tolerance_steps(),
            reduction_factor: default_reduction_factor(),
            max_iterations: default_max_iterations(),
            print_interval: 0,
        }
    }
}

fn default_initial_tolerance() -> f64 {
    0.1
}

fn default_tolerance_steps() -> usize {
    6
}

fn default_reduction_factor() -> f64 {
    0.1
}

fn default_max_iterations() -> usize {
    100_000
}

impl SessionConfig {
    /// Check that the thresholds are positive and non-increasing
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_tolerance.is_finite() && self.initial_tolerance > 0.0) {
            return Err(SolverError::InvalidTolerance {
                tolerance: self.initial_tolerance,
            });
        }
        if !(self.reduction_factor > 0.0 && self.reduction_factor <= 1.0) {
            return Err(SolverError::InvalidConfig {
                reason: format!(
                    "reduction factor {} must be in (0, 1]",
                    self.reduction_factor
                ),
            });
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                reason: "max_iterations must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The thresholds tried by a session, loosest first
    ///
    /// Built by repeated multiplication, so later values carry the usual
    /// floating-point drift (0.1 · 0.1 = 0.010000000000000002).
    pub fn tolerances(&self) -> Vec<f64> {
        std::iter::successors(Some(self.initial_tolerance), |&tol| {
            Some(tol * self.reduction_factor)
        })
        .take(self.tolerance_steps)
        .collect()
    }

    /// Load a session configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// A linear system as read from JSON
///
/// ```json
/// {
///   "matrix": [[10, 1, 1], [1, 10, 1], [1, 1, 10]],
///   "rhs": [12, 12, 12],
///   "session": { "initial_tolerance": 0.1 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInput {
    /// Coefficient rows
    pub matrix: Vec<Vec<f64>>,
    /// Right-hand side
    pub rhs: Vec<f64>,
    /// Optional session settings
    #[serde(default)]
    pub session: SessionConfig,
}

impl SystemInput {
    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Save to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Validate and convert into a [`LinearSystem`]
    pub fn to_system(&self) -> Result<LinearSystem<f64>> {
        LinearSystem::from_rows(self.matrix.clone(), self.rhs.clone())
    }
}
