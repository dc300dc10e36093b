//! Matrix norms used by the convergence check
//!
//! - [`row_norm`] (M): max over rows of Σ|a_ij|
//! - [`column_norm`] (L): max over columns of Σ|a_ij|
//! - [`frobenius_norm`] (K): sqrt(Σ a_ij²)
//!
//! Any rectangular matrix is accepted. An empty matrix has all three norms
//! equal to zero.

use crate::traits::RealField;
use ndarray::Array2;
use std::fmt;

/// Identifies one of the three norms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormKind {
    /// Row-sum norm (M)
    Row,
    /// Column-sum norm (L)
    Column,
    /// Frobenius norm (K)
    Frobenius,
}

impl NormKind {
    /// All norms, in the order they are evaluated
    pub const ALL: [NormKind; 3] = [NormKind::Row, NormKind::Column, NormKind::Frobenius];
}

impl fmt::Display for NormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormKind::Row => write!(f, "M"),
            NormKind::Column => write!(f, "L"),
            NormKind::Frobenius => write!(f, "K"),
        }
    }
}

/// Maximum absolute row sum: ||A||_M = max_i Σ_j |a_ij|
pub fn row_norm<T: RealField>(matrix: &Array2<T>) -> T {
    matrix
        .rows()
        .into_iter()
        .map(|row| row.fold(T::zero(), |acc, &a| acc + a.abs()))
        .fold(T::zero(), |max, sum| if sum > max { sum } else { max })
}

/// Maximum absolute column sum: ||A||_L = max_j Σ_i |a_ij|
pub fn column_norm<T: RealField>(matrix: &Array2<T>) -> T {
    matrix
        .columns()
        .into_iter()
        .map(|col| col.fold(T::zero(), |acc, &a| acc + a.abs()))
        .fold(T::zero(), |max, sum| if sum > max { sum } else { max })
}

/// Frobenius norm: ||A||_K = sqrt(Σ_ij a_ij²)
pub fn frobenius_norm<T: RealField>(matrix: &Array2<T>) -> T {
    matrix.fold(T::zero(), |acc, &a| acc + a * a).sqrt()
}

/// The three norms of a matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixNorms<T: RealField> {
    /// Row-sum norm (M)
    pub row: T,
    /// Column-sum norm (L)
    pub column: T,
    /// Frobenius norm (K)
    pub frobenius: T,
}

impl<T: RealField> MatrixNorms<T> {
    /// Compute all three norms of `matrix`
    pub fn compute(matrix: &Array2<T>) -> Self {
        Self {
            row: row_norm(matrix),
            column: column_norm(matrix),
            frobenius: frobenius_norm(matrix),
        }
    }

    /// Value of a single norm
    #[inline]
    pub fn get(&self, kind: NormKind) -> T {
        match kind {
            NormKind::Row => self.row,
            NormKind::Column => self.column,
            NormKind::Frobenius => self.frobenius,
        }
    }

    /// The norms strictly below 1, in M, L, K order
    pub fn below_one(&self) -> Vec<(NormKind, T)> {
        NormKind::ALL
            .iter()
            .map(|&kind| (kind, self.get(kind)))
            .filter(|&(_, value)| value < T::one())
            .collect()
    }

    /// Largest of the norms strictly below 1, if any
    pub fn max_below_one(&self) -> Option<T> {
        self.below_one()
            .into_iter()
            .map(|(_, value)| value)
            .reduce(T::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_row_and_column_norms() {
        let m = array![[1.0_f64, -2.0], [3.0, 4.0]];
        assert_relative_eq!(row_norm(&m), 7.0);
        assert_relative_eq!(column_norm(&m), 6.0);
    }

    #[test]
    fn test_frobenius_norm() {
        let m = array![[3.0_f64, 0.0], [0.0, -4.0]];
        assert_relative_eq!(frobenius_norm(&m), 5.0);
    }

    #[test]
    fn test_rectangular_matrix() {
        let m = array![[0.1_f64, 0.2, 0.3], [0.0, -0.1, 0.0]];
        assert_relative_eq!(row_norm(&m), 0.6, epsilon = 1e-12);
        assert_relative_eq!(column_norm(&m), 0.3, epsilon = 1e-12);
        assert_relative_eq!(frobenius_norm(&m), 0.15_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_below_one_subset() {
        // row sums 0.6 / 0.9, column sums 1.2 / 0.3
        let m = array![[0.5_f64, 0.1], [0.7, 0.2]];
        let norms = MatrixNorms::compute(&m);
        let below = norms.below_one();

        let kinds: Vec<NormKind> = below.iter().map(|&(k, _)| k).collect();
        assert_eq!(kinds, vec![NormKind::Row, NormKind::Frobenius]);
        assert_relative_eq!(norms.max_below_one().unwrap(), 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_none_below_one() {
        let m = array![[0.0_f64, -5.0], [-5.0, 0.0]];
        let norms = MatrixNorms::compute(&m);
        assert!(norms.below_one().is_empty());
        assert!(norms.max_below_one().is_none());
    }

    #[test]
    fn test_norm_kind_display() {
        assert_eq!(NormKind::Row.to_string(), "M");
        assert_eq!(NormKind::Column.to_string(), "L");
        assert_eq!(NormKind::Frobenius.to_string(), "K");
    }
}
