//! Norm-based convergence pre-check
//!
//! Both iterative methods converge when some norm of the canonical iteration
//! matrix `C` (c_ij = −a_ij / a_ii for i ≠ j) is below 1. The check is
//! sufficient, not necessary: a system that fails it may still converge, but
//! it is rejected before any iteration starts.
//!
//! The resulting [`ConvergenceCheck`] is a plain value. It is passed on
//! explicitly to the simple-iteration solver, which derives its stopping
//! factor from the same norms.

use crate::error::{Result, SolverError};
use crate::norms::{MatrixNorms, NormKind};
use crate::system::LinearSystem;
use crate::traits::RealField;
use ndarray::Array2;
use std::cmp::Ordering;

/// Canonical iteration matrix of a system
///
/// Row i holds the n − 1 off-diagonal entries −a_ij / a_ii in column order,
/// with the diagonal dropped. The norms are taken on this n × (n − 1)
/// layout, so for n ≥ 3 the column sums mix entries of different variables.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalMatrix<T: RealField> {
    entries: Array2<T>,
}

impl<T: RealField> CanonicalMatrix<T> {
    /// Build `C` from a square coefficient matrix with non-zero diagonal
    pub fn from_coefficients(matrix: &Array2<T>) -> Self {
        let n = matrix.nrows();
        let entries = Array2::from_shape_fn((n, n.saturating_sub(1)), |(i, k)| {
            let j = if k < i { k } else { k + 1 };
            -(matrix[[i, j]] / matrix[[i, i]])
        });
        Self { entries }
    }

    /// Number of equations
    #[inline]
    pub fn dim(&self) -> usize {
        self.entries.nrows()
    }

    /// Entry for equation `i` and variable `j`, or `None` on the diagonal
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        match j.cmp(&i) {
            Ordering::Less => self.entries.get((i, j)).copied(),
            Ordering::Equal => None,
            Ordering::Greater => self.entries.get((i, j - 1)).copied(),
        }
    }

    /// Compacted rows, n × (n − 1)
    #[inline]
    pub fn as_array(&self) -> &Array2<T> {
        &self.entries
    }

    /// Compute the M, L and K norms
    pub fn norms(&self) -> MatrixNorms<T> {
        MatrixNorms::compute(&self.entries)
    }
}

/// Outcome of the convergence pre-check
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceCheck<T: RealField> {
    /// Canonical iteration matrix of the checked system
    pub canonical: CanonicalMatrix<T>,
    /// Norms of the canonical matrix
    pub norms: MatrixNorms<T>,
}

impl<T: RealField> ConvergenceCheck<T> {
    /// `true` when at least one norm is below 1
    pub fn is_convergent(&self) -> bool {
        !self.satisfied_norms().is_empty()
    }

    /// Norms below 1, in M, L, K order
    pub fn satisfied_norms(&self) -> Vec<(NormKind, T)> {
        self.norms.below_one()
    }

    /// Contraction bound `a`: the largest of the norms below 1
    pub fn contraction_bound(&self) -> Option<T> {
        self.norms.max_below_one()
    }

    /// Stopping factor `a / (1 − a)` of the simple-iteration method
    pub fn stop_factor(&self) -> Result<T> {
        let a = self
            .contraction_bound()
            .ok_or_else(|| self.non_convergent_error())?;
        Ok(a / (T::one() - a))
    }

    fn non_convergent_error(&self) -> SolverError {
        SolverError::NonConvergentSystem {
            row_norm: self.norms.row.to_f64_lossy(),
            column_norm: self.norms.column.to_f64_lossy(),
            frobenius_norm: self.norms.frobenius.to_f64_lossy(),
        }
    }
}

/// Build the canonical matrix of `system` and evaluate its norms
pub fn check_convergence<T: RealField>(system: &LinearSystem<T>) -> ConvergenceCheck<T> {
    let canonical = CanonicalMatrix::from_coefficients(system.matrix());
    let norms = canonical.norms();

    log::debug!(
        "Convergence check: M = {:.6e}, L = {:.6e}, K = {:.6e}",
        norms.row.to_f64_lossy(),
        norms.column.to_f64_lossy(),
        norms.frobenius.to_f64_lossy()
    );

    ConvergenceCheck { canonical, norms }
}

/// Like [`check_convergence`], but fails with `NonConvergentSystem` when no norm is below 1
pub fn require_convergence<T: RealField>(system: &LinearSystem<T>) -> Result<ConvergenceCheck<T>> {
    let check = check_convergence(system);
    if check.is_convergent() {
        Ok(check)
    } else {
        log::warn!("System rejected: no norm of the canonical matrix is below 1");
        Err(check.non_convergent_error())
    }
}
