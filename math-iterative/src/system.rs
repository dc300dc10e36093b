//! Validated square linear systems
//!
//! [`LinearSystem`] owns the coefficient matrix A and the right-hand side b of
//! `A·x = b`. Shape and diagonal checks happen once at construction, so the
//! solvers can index freely afterwards.

use crate::error::{Result, SolverError};
use crate::traits::RealField;
use ndarray::{Array1, Array2};

/// A square system `A·x = b` with finite entries and non-zero diagonal
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem<T: RealField> {
    matrix: Array2<T>,
    rhs: Array1<T>,
}

impl<T: RealField> LinearSystem<T> {
    /// Create a system from a dense coefficient matrix and right-hand side
    pub fn new(matrix: Array2<T>, rhs: Array1<T>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows == 0 {
            return Err(SolverError::EmptySystem);
        }
        if rows != cols {
            return Err(SolverError::NotSquare { rows, cols });
        }
        if rhs.len() != rows {
            return Err(SolverError::DimensionMismatch {
                expected: rows,
                got: rhs.len(),
            });
        }
        let non_finite = matrix.indexed_iter().find(|(_, a)| !a.is_finite());
        if let Some(((row, col), &value)) = non_finite {
            return Err(SolverError::NonFiniteCoefficient {
                row,
                col,
                value: value.to_f64_lossy(),
            });
        }
        if let Some((row, &value)) = rhs.iter().enumerate().find(|(_, b)| !b.is_finite()) {
            return Err(SolverError::NonFiniteRhs {
                row,
                value: value.to_f64_lossy(),
            });
        }
        if let Some(row) = (0..rows).find(|&i| matrix[[i, i]] == T::zero()) {
            return Err(SolverError::ZeroDiagonal { row });
        }

        Ok(Self { matrix, rhs })
    }

    /// Create a system from row vectors, rejecting rows of unequal length
    pub fn from_rows(rows: Vec<Vec<T>>, rhs: Vec<T>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(SolverError::EmptySystem);
        }

        let cols = rows[0].len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(SolverError::RaggedRow {
                row,
                expected: cols,
                got: r.len(),
            });
        }

        let flat: Vec<T> = rows.into_iter().flatten().collect();
        let matrix = Array2::from_shape_vec((n, cols), flat).map_err(|_| {
            SolverError::NotSquare { rows: n, cols }
        })?;

        Self::new(matrix, Array1::from_vec(rhs))
    }

    /// Number of equations (and unknowns)
    #[inline]
    pub fn dim(&self) -> usize {
        self.rhs.len()
    }

    /// Coefficient matrix A
    #[inline]
    pub fn matrix(&self) -> &Array2<T> {
        &self.matrix
    }

    /// Right-hand side b
    #[inline]
    pub fn rhs(&self) -> &Array1<T> {
        &self.rhs
    }

    /// Residual `A·x − b` of a candidate solution
    pub fn residual(&self, x: &Array1<T>) -> Array1<T> {
        self.matrix.dot(x) - &self.rhs
    }

    /// Check strict row diagonal dominance: |A_ii| > Σ_{j≠i} |A_ij| for every row
    pub fn is_row_diagonally_dominant(&self) -> bool {
        self.matrix.rows().into_iter().enumerate().all(|(i, row)| {
            let off_diagonal = row
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(T::zero(), |acc, (_, &a)| acc + a.abs());
            row[i].abs() > off_diagonal
        })
    }
}
