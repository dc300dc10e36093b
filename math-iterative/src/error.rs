//! Error types for the iterative solvers.
//!
//! Follows the pattern used across the math-audio crates: a `thiserror`
//! enum with structured payloads and helper methods for categorization.

use crate::iterative::Method;
use thiserror::Error;

/// Errors that can occur while building, checking or solving a linear system.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The system has no equations.
    #[error("empty system: at least one equation is required")]
    EmptySystem,

    /// The coefficient matrix is not square.
    #[error("coefficient matrix is not square: {rows} rows, {cols} columns")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// A row of the coefficient matrix has the wrong length.
    #[error("row {row} has {got} coefficients, expected {expected}")]
    RaggedRow {
        /// Index of the offending row
        row: usize,
        /// Expected number of coefficients
        expected: usize,
        /// Actual number of coefficients
        got: usize,
    },

    /// Right-hand side length does not match the matrix dimension.
    #[error("right-hand side dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        got: usize,
    },

    /// A diagonal coefficient is zero; both iteration forms divide by it.
    #[error("zero diagonal coefficient in row {row}")]
    ZeroDiagonal {
        /// Index of the offending row
        row: usize,
    },

    /// A coefficient of A is NaN or infinite.
    #[error("non-finite coefficient {value} at row {row}, column {col}")]
    NonFiniteCoefficient {
        /// Row of the offending coefficient
        row: usize,
        /// Column of the offending coefficient
        col: usize,
        /// The offending value
        value: f64,
    },

    /// An entry of the right-hand side is NaN or infinite.
    #[error("non-finite right-hand side {value} in row {row}")]
    NonFiniteRhs {
        /// Row of the offending entry
        row: usize,
        /// The offending value
        value: f64,
    },

    /// Tolerance is not a finite positive number.
    #[error("invalid tolerance: {tolerance} (must be finite and > 0)")]
    InvalidTolerance {
        /// The invalid tolerance
        tolerance: f64,
    },

    /// Session configuration is inconsistent.
    #[error("invalid session configuration: {reason}")]
    InvalidConfig {
        /// Human-readable reason
        reason: String,
    },

    /// None of the norms of the canonical matrix is below 1.
    #[error(
        "system does not satisfy the convergence condition: \
         M = {row_norm}, L = {column_norm}, K = {frobenius_norm} (one of them must be < 1)"
    )]
    NonConvergentSystem {
        /// Row-sum norm of the canonical matrix
        row_norm: f64,
        /// Column-sum norm of the canonical matrix
        column_norm: f64,
        /// Frobenius norm of the canonical matrix
        frobenius_norm: f64,
    },

    /// An iterative method hit its iteration cap before meeting the tolerance.
    #[error(
        "{method} did not converge within {max_iterations} iterations (last change {last_change})"
    )]
    IterationLimitExceeded {
        /// The method that gave up
        method: Method,
        /// The configured cap
        max_iterations: usize,
        /// Largest residual (relaxation) or step (simple iteration) of the last iteration
        last_change: f64,
    },

    /// Input file could not be read.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Input file is not valid JSON for the expected schema.
    #[error("failed to parse JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;

impl SolverError {
    /// Returns `true` if the input system has an invalid shape.
    ///
    /// This includes `EmptySystem`, `NotSquare`, `RaggedRow`,
    /// `DimensionMismatch` and `ZeroDiagonal`.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            SolverError::EmptySystem
                | SolverError::NotSquare { .. }
                | SolverError::RaggedRow { .. }
                | SolverError::DimensionMismatch { .. }
                | SolverError::ZeroDiagonal { .. }
        )
    }

    /// Returns `true` if the system contains NaN or infinite values.
    pub fn is_non_finite(&self) -> bool {
        matches!(
            self,
            SolverError::NonFiniteCoefficient { .. } | SolverError::NonFiniteRhs { .. }
        )
    }

    /// Returns `true` if the system failed the norm-based convergence check.
    pub fn is_convergence_error(&self) -> bool {
        matches!(self, SolverError::NonConvergentSystem { .. })
    }

    /// Returns `true` if a solver gave up after its iteration cap.
    pub fn is_iteration_limit(&self) -> bool {
        matches!(self, SolverError::IterationLimitExceeded { .. })
    }
}
