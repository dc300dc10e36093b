//! Core scalar trait
//!
//! The solvers in this crate work on real-valued systems only. [`RealField`]
//! collects the numeric bounds they need so that the same code runs on
//! `f64` (default) and `f32`.

use num_traits::{Float, FromPrimitive, NumAssign, ToPrimitive};
use std::fmt::{Debug, Display};

/// Trait for real scalar types usable by the relaxation and simple-iteration solvers.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default)
/// - `f32` (for memory-constrained applications)
pub trait RealField:
    Float + NumAssign + FromPrimitive + ToPrimitive + Debug + Display + Send + Sync + 'static
{
    /// Convert an `f64` constant into this type, rounding if necessary
    fn from_f64_lossy(value: f64) -> Self;

    /// Convert to `f64` for logging and error reporting
    fn to_f64_lossy(self) -> f64;

    /// Round to the nearest integer, halfway cases away from zero
    #[inline]
    fn round_to_integer(self) -> Self {
        self.round()
    }
}

impl RealField for f64 {
    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }
}

impl RealField for f32 {
    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        f64::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_f64_field() {
        let x = f64::from_f64_lossy(0.1);
        assert_relative_eq!(x, 0.1);
        assert_relative_eq!(x.to_f64_lossy(), 0.1);
    }

    #[test]
    fn test_f32_field() {
        let x = f32::from_f64_lossy(0.25);
        assert_relative_eq!(x, 0.25_f32);
        assert_relative_eq!(x.to_f64_lossy(), 0.25);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(0.5_f64.round_to_integer(), 1.0);
        assert_eq!((-0.5_f64).round_to_integer(), -1.0);
        assert_eq!(0.49_f64.round_to_integer(), 0.0);
        // -0.0 compares equal to zero
        assert_eq!((-0.3_f64).round_to_integer(), 0.0);
    }
}
