//! Simple-iteration (Jacobi-style) solver
//!
//! All components are updated at once from the previous iterate:
//!
//! ```text
//! x'_i = b_i / a_ii + Σ_{j≠i} (a_ij / −a_ii) · x_j
//! ```
//!
//! The loop stops as soon as one component satisfies
//! `|x'_i − x_i| · a/(1−a) < ε`, where `a` is the contraction bound from the
//! convergence check. Only one component has to meet the bound; the others
//! may still be moving.

use super::{IterationConfig, Method, initial_guess};
use crate::convergence::ConvergenceCheck;
use crate::error::{Result, SolverError};
use crate::system::LinearSystem;
use crate::traits::RealField;
use ndarray::{Array1, Array2};

/// Simple-iteration form of a system
///
/// n × n; off-diagonal entries hold a_ij / −a_ii and the diagonal holds the
/// transformed constant b_i / a_ii in place of the (unused) diagonal coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleIterationForm<T: RealField> {
    coefficients: Array2<T>,
}

impl<T: RealField> SimpleIterationForm<T> {
    /// Normalize every row of `system` by its negated diagonal
    pub fn new(system: &LinearSystem<T>) -> Self {
        let a = system.matrix();
        let b = system.rhs();
        let n = system.dim();

        let coefficients = Array2::from_shape_fn((n, n), |(i, j)| {
            let pivot = -a[[i, i]];
            if i == j { -b[i] / pivot } else { a[[i, j]] / pivot }
        });

        log::debug!("Simple-iteration form (constants on the diagonal):\n{}", coefficients);

        Self { coefficients }
    }

    /// Number of unknowns
    #[inline]
    pub fn dim(&self) -> usize {
        self.coefficients.nrows()
    }

    /// The n × n coefficient table
    #[inline]
    pub fn coefficients(&self) -> &Array2<T> {
        &self.coefficients
    }

    /// Next iterate computed from `x`
    pub fn step(&self, x: &Array1<T>) -> Array1<T> {
        self.coefficients
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .zip(x.iter())
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .fold(row[i], |acc, (_, (&c, &xj))| acc + c * xj)
            })
            .collect()
    }
}

/// Simple-iteration solver result
#[derive(Debug, Clone)]
pub struct SimpleIterationSolution<T: RealField> {
    /// Solution vector (the iterate produced by the terminating iteration)
    pub x: Array1<T>,
    /// Number of iterations, including the terminating one
    pub iterations: usize,
    /// First component that met the stopping bound
    pub stopping_component: usize,
    /// |x'_i − x_i| of that component in the terminating iteration
    pub last_step: T,
    /// Stopping factor a/(1−a) used for the run
    pub stop_factor: T,
}

/// Solve with simple iteration starting from the zero vector
///
/// `check` must come from the same system as `form`; its norms fix the
/// stopping factor for the whole run.
pub fn simple_iteration<T: RealField>(
    form: &SimpleIterationForm<T>,
    check: &ConvergenceCheck<T>,
    config: &IterationConfig<T>,
) -> Result<SimpleIterationSolution<T>> {
    simple_iteration_with_guess(form, None, check, config)
}

/// Solve with simple iteration starting from `x0` (zero vector when `None`)
pub fn simple_iteration_with_guess<T: RealField>(
    form: &SimpleIterationForm<T>,
    x0: Option<&Array1<T>>,
    check: &ConvergenceCheck<T>,
    config: &IterationConfig<T>,
) -> Result<SimpleIterationSolution<T>> {
    config.validate()?;
    let stop_factor = check.stop_factor()?;
    let mut x = initial_guess(form.dim(), x0)?;
    let mut last_max_step = T::zero();

    for iteration in 1..=config.max_iterations {
        let next = form.step(&x);

        let steps: Array1<T> = next
            .iter()
            .zip(x.iter())
            .map(|(&xn, &xi)| (xn - xi).abs())
            .collect();
        let stopping = steps
            .iter()
            .position(|&step| step * stop_factor < config.tolerance);
        let max_step = steps.fold(T::zero(), |max, &s| max.max(s));

        log::trace!("Simple iteration {}: x = {}", iteration, next);
        x = next;

        if config.should_report(iteration) {
            log::info!(
                "Simple iteration {}: max step = {:.6e}",
                iteration,
                max_step.to_f64_lossy()
            );
        }

        if let Some(component) = stopping {
            return Ok(SimpleIterationSolution {
                x,
                iterations: iteration,
                stopping_component: component,
                last_step: steps[component],
                stop_factor,
            });
        }
        last_max_step = max_step;
    }

    Err(SolverError::IterationLimitExceeded {
        method: Method::SimpleIteration,
        max_iterations: config.max_iterations,
        last_change: last_max_step.to_f64_lossy(),
    })
}
