//! Solution verification and formatting
//!
//! The verification is deliberately coarse: every row residual `A_i·x − b_i`
//! is rounded to the nearest integer and must be zero, so any solution
//! within ±0.5 of every equation passes.

use crate::system::LinearSystem;
use crate::traits::RealField;
use ndarray::Array1;
use std::fmt::Write;

/// Check a candidate solution against the original system
///
/// Returns `false` for a candidate of the wrong length.
pub fn verify_solution<T: RealField>(system: &LinearSystem<T>, x: &Array1<T>) -> bool {
    if x.len() != system.dim() {
        return false;
    }

    system
        .matrix()
        .rows()
        .into_iter()
        .zip(system.rhs().iter())
        .all(|(row, &b)| {
            let lhs = row
                .iter()
                .zip(x.iter())
                .fold(T::zero(), |acc, (&a, &xj)| acc + a * xj);
            (lhs - b).round_to_integer() == T::zero()
        })
}

/// Render a solution as `x1 = 1.0000` lines, four decimals each
pub fn format_solution<T: RealField>(x: &Array1<T>) -> String {
    let mut out = String::new();
    for (i, xi) in x.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "x{} = {:.4}", i + 1, xi);
    }
    out
}
