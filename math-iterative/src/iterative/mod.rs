//! Iterative solvers for diagonally dominant linear systems
//!
//! This module provides two classical stationary methods:
//! - [`relaxation`]: residual-driven relaxation, correcting the single
//!   component with the largest residual per iteration
//! - [`simple_iteration`]: Jacobi-style fixed-point iteration updating all
//!   components from the previous iterate
//!
//! Both loops are bounded by [`IterationConfig::max_iterations`] and fail with
//! `IterationLimitExceeded` rather than spinning forever.

mod relaxation;
mod simple_iteration;

pub use relaxation::{
    RelaxationForm, RelaxationSolution, ResidualTrace, relaxation, relaxation_with_guess,
};
pub use simple_iteration::{
    SimpleIterationForm, SimpleIterationSolution, simple_iteration, simple_iteration_with_guess,
};

use crate::error::{Result, SolverError};
use crate::traits::RealField;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The iterative methods offered by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Largest-residual relaxation
    Relaxation,
    /// Simple (Jacobi-style) iteration
    SimpleIteration,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Relaxation => write!(f, "relaxation"),
            Method::SimpleIteration => write!(f, "simple iteration"),
        }
    }
}

/// Iterative solver configuration
#[derive(Debug, Clone)]
pub struct IterationConfig<R> {
    /// Precision threshold ε
    pub tolerance: R,
    /// Maximum number of iterations before giving up
    pub max_iterations: usize,
    /// Print progress every N iterations (0 = no output)
    pub print_interval: usize,
}

impl Default for IterationConfig<f64> {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100_000,
            print_interval: 0,
        }
    }
}

impl Default for IterationConfig<f32> {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 100_000,
            print_interval: 0,
        }
    }
}

impl<R: RealField> IterationConfig<R> {
    /// Create config with a specific tolerance
    pub fn with_tolerance(tolerance: R) -> Self
    where
        Self: Default,
    {
        Self {
            tolerance,
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.tolerance.is_finite() && self.tolerance > R::zero() {
            Ok(())
        } else {
            Err(SolverError::InvalidTolerance {
                tolerance: self.tolerance.to_f64_lossy(),
            })
        }
    }

    #[inline]
    pub(crate) fn should_report(&self, iteration: usize) -> bool {
        self.print_interval > 0 && iteration % self.print_interval == 0
    }
}

/// Initial iterate: the caller's guess, or the zero vector
fn initial_guess<T: RealField>(n: usize, x0: Option<&Array1<T>>) -> Result<Array1<T>> {
    match x0 {
        Some(x0) if x0.len() != n => Err(SolverError::DimensionMismatch {
            expected: n,
            got: x0.len(),
        }),
        Some(x0) => Ok(x0.clone()),
        None => Ok(Array1::from_elem(n, T::zero())),
    }
}
