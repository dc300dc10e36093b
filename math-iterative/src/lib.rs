//! Iterative solvers for diagonally dominant linear systems
//!
//! This crate solves square systems `A·x = b` with two classical stationary
//! methods and a norm-based convergence pre-check.
//!
//! # Features
//!
//! - **Convergence check**: M (row), L (column) and K (Frobenius) norms of the
//!   canonical iteration matrix; the system is accepted if any is below 1
//! - **Relaxation**: corrects the component with the largest residual, one per iteration
//! - **Simple iteration**: Jacobi-style fixed point with an a/(1−a) stopping bound
//! - **Sessions**: both methods over a descending sequence of thresholds, with
//!   coarse verification of every answer
//! - **Generic Scalar Types**: Works with f64 and f32
//!
//! # Example
//!
//! ```
//! use math_audio_iterative::{LinearSystem, SessionConfig, solve_session};
//! use ndarray::array;
//!
//! let system = LinearSystem::new(
//!     array![[10.0, 1.0, 1.0], [1.0, 10.0, 1.0], [1.0, 1.0, 10.0]],
//!     array![12.0, 12.0, 12.0],
//! )?;
//!
//! let session = solve_session(&system, &SessionConfig::default())?;
//! for report in &session.reports {
//!     println!("{report}");
//! }
//! # Ok::<(), math_audio_iterative::SolverError>(())
//! ```

pub mod config;
pub mod convergence;
pub mod error;
pub mod iterative;
pub mod norms;
pub mod session;
pub mod system;
pub mod traits;
pub mod verify;

// Re-export main types
pub use config::{SessionConfig, SystemInput};
pub use convergence::{CanonicalMatrix, ConvergenceCheck, check_convergence, require_convergence};
pub use error::{Result, SolverError};
pub use norms::{MatrixNorms, NormKind};
pub use system::LinearSystem;
pub use traits::RealField;
pub use verify::{format_solution, verify_solution};

// Re-export iterative solvers
pub use iterative::{
    IterationConfig, Method, RelaxationForm, RelaxationSolution, ResidualTrace,
    SimpleIterationForm, SimpleIterationSolution, relaxation, relaxation_with_guess,
    simple_iteration, simple_iteration_with_guess,
};

// Re-export sessions
pub use session::{MethodOutcome, SolveReport, SolveSession, solve_session};
