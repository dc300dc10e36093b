//! Relaxation solver
//!
//! Each equation is rewritten as
//!
//! ```text
//! R_i = Σ_j (a_ij / −a_ii) · x_j + b_i / a_ii
//! ```
//!
//! so that `R_i` is the amount by which row i is unsatisfied at the current
//! iterate. Every iteration picks the row with the largest |R_i| and adds
//! that residual to the matching component, leaving all other components
//! unchanged. The loop stops once max |R_i| ≤ ε; it always runs at least
//! once and the correction of the final iteration is still applied.

use super::{IterationConfig, Method, initial_guess};
use crate::error::{Result, SolverError};
use crate::system::LinearSystem;
use crate::traits::RealField;
use ndarray::{Array1, Array2};

/// Relaxation form of a system: n × (n+1), constant term in the last column
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationForm<T: RealField> {
    coefficients: Array2<T>,
}

impl<T: RealField> RelaxationForm<T> {
    /// Normalize every row of `system` by its negated diagonal
    pub fn new(system: &LinearSystem<T>) -> Self {
        let a = system.matrix();
        let b = system.rhs();
        let n = system.dim();

        let coefficients = Array2::from_shape_fn((n, n + 1), |(i, j)| {
            let pivot = -a[[i, i]];
            if j < n { a[[i, j]] / pivot } else { -b[i] / pivot }
        });

        log::debug!("Relaxation form (constant term last):\n{}", coefficients);

        Self { coefficients }
    }

    /// Number of unknowns
    #[inline]
    pub fn dim(&self) -> usize {
        self.coefficients.nrows()
    }

    /// The n × (n+1) coefficient table
    #[inline]
    pub fn coefficients(&self) -> &Array2<T> {
        &self.coefficients
    }

    /// Residuals R_i of all rows at the iterate `x`
    pub fn residuals(&self, x: &Array1<T>) -> Array1<T> {
        let n = self.dim();
        self.coefficients
            .rows()
            .into_iter()
            .map(|row| {
                let sum = row
                    .iter()
                    .take(n)
                    .zip(x.iter())
                    .fold(T::zero(), |acc, (&c, &xj)| acc + c * xj);
                sum + row[n]
            })
            .collect()
    }
}

/// Per-iteration residual vectors of one relaxation run
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualTrace<T: RealField> {
    steps: Vec<Array1<T>>,
}

impl<T: RealField> Default for ResidualTrace<T> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<T: RealField> ResidualTrace<T> {
    /// Number of recorded iterations
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if no iteration was recorded
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Residuals of iteration `k` (0-based)
    pub fn get(&self, k: usize) -> Option<&Array1<T>> {
        self.steps.get(k)
    }

    /// Residuals of the last iteration
    pub fn last(&self) -> Option<&Array1<T>> {
        self.steps.last()
    }

    /// Iterate over the residual vectors in iteration order
    pub fn iter(&self) -> impl Iterator<Item = &Array1<T>> {
        self.steps.iter()
    }

    /// Largest |R_i| of iteration `k`
    pub fn max_abs(&self, k: usize) -> Option<T> {
        self.steps
            .get(k)
            .map(|r| r.fold(T::zero(), |max, &ri| max.max(ri.abs())))
    }

    fn push(&mut self, residuals: Array1<T>) {
        self.steps.push(residuals);
    }
}

/// Relaxation solver result
#[derive(Debug, Clone)]
pub struct RelaxationSolution<T: RealField> {
    /// Solution vector
    pub x: Array1<T>,
    /// Number of iterations, including the terminating one
    pub iterations: usize,
    /// Residuals of every iteration
    pub trace: ResidualTrace<T>,
    /// max |R_i| of the terminating iteration
    pub max_residual: T,
    /// Component corrected by the terminating iteration
    pub last_index: usize,
}

/// Solve with the relaxation method starting from the zero vector
pub fn relaxation<T: RealField>(
    form: &RelaxationForm<T>,
    config: &IterationConfig<T>,
) -> Result<RelaxationSolution<T>> {
    relaxation_with_guess(form, None, config)
}

/// Solve with the relaxation method starting from `x0` (zero vector when `None`)
pub fn relaxation_with_guess<T: RealField>(
    form: &RelaxationForm<T>,
    x0: Option<&Array1<T>>,
    config: &IterationConfig<T>,
) -> Result<RelaxationSolution<T>> {
    config.validate()?;
    let mut x = initial_guess(form.dim(), x0)?;
    let mut trace = ResidualTrace::default();
    let mut last_max = T::zero();

    for iteration in 1..=config.max_iterations {
        let residuals = form.residuals(&x);
        let (index, max_residual) = largest_residual(&residuals);

        log::trace!("Relaxation iteration {}: residuals = {}", iteration, residuals);

        x[index] += residuals[index];
        trace.push(residuals);

        if config.should_report(iteration) {
            log::info!(
                "Relaxation iteration {}: max residual = {:.6e} (row {})",
                iteration,
                max_residual.to_f64_lossy(),
                index + 1
            );
        }

        if max_residual <= config.tolerance {
            return Ok(RelaxationSolution {
                x,
                iterations: iteration,
                trace,
                max_residual,
                last_index: index,
            });
        }
        last_max = max_residual;
    }

    Err(SolverError::IterationLimitExceeded {
        method: Method::Relaxation,
        max_iterations: config.max_iterations,
        last_change: last_max.to_f64_lossy(),
    })
}

/// Index and magnitude of the largest |R_i|; ties keep the earliest row
fn largest_residual<T: RealField>(residuals: &Array1<T>) -> (usize, T) {
    residuals
        .iter()
        .enumerate()
        .fold((0, T::zero()), |(index, max), (i, &r)| {
            if r.abs() > max { (i, r.abs()) } else { (index, max) }
        })
}
