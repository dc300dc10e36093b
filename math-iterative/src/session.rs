//! Solve sessions: both methods across a descending sequence of thresholds
//!
//! A session rejects non-convergent systems up front, then for every
//! precision threshold runs relaxation and simple iteration from scratch,
//! verifies both answers and keeps a [`SolveReport`] only when both pass.
//! Thresholds whose solutions fail verification are skipped silently, so a
//! session may hold anywhere from zero to `tolerance_steps` reports.

use crate::config::SessionConfig;
use crate::convergence::{ConvergenceCheck, require_convergence};
use crate::error::{Result, SolverError};
use crate::iterative::{
    IterationConfig, RelaxationForm, ResidualTrace, SimpleIterationForm, relaxation,
    simple_iteration,
};
use crate::system::LinearSystem;
use crate::traits::RealField;
use crate::verify::{format_solution, verify_solution};
use ndarray::Array1;
use std::fmt;

/// Solution and iteration count of one method at one threshold
#[derive(Debug, Clone, PartialEq)]
pub struct MethodOutcome<T: RealField> {
    /// Solution vector
    pub solution: Array1<T>,
    /// Iterations performed, including the terminating one
    pub iterations: usize,
}

impl<T: RealField> MethodOutcome<T> {
    /// Per-variable text, `x1 = 1.0000` lines
    pub fn formatted(&self) -> String {
        format_solution(&self.solution)
    }
}

/// Verified results of both methods at one precision threshold
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport<T: RealField> {
    /// Precision threshold ε
    pub tolerance: T,
    /// Relaxation outcome
    pub relaxation: MethodOutcome<T>,
    /// Simple-iteration outcome
    pub simple_iteration: MethodOutcome<T>,
}

impl<T: RealField> fmt::Display for SolveReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relaxation = self.relaxation.solution.iter();
        let simple = self.simple_iteration.solution.iter();

        for (i, (r, s)) in relaxation.zip(simple).enumerate() {
            let tolerance = if i == 0 {
                format!("{:.6}", self.tolerance)
            } else {
                String::new()
            };
            let (r_iter, s_iter) = if i == 0 {
                (
                    self.relaxation.iterations.to_string(),
                    self.simple_iteration.iterations.to_string(),
                )
            } else {
                (String::new(), String::new())
            };
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<10} | x{:<3} = {:>12.4} | {:>8} | x{:<3} = {:>12.4} | {:>8}",
                tolerance,
                i + 1,
                r,
                r_iter,
                i + 1,
                s,
                s_iter
            )?;
        }
        Ok(())
    }
}

/// Everything a session produced
#[derive(Debug, Clone)]
pub struct SolveSession<T: RealField> {
    /// Convergence check, including the canonical matrix
    pub check: ConvergenceCheck<T>,
    /// Verified reports, loosest threshold first
    pub reports: Vec<SolveReport<T>>,
    /// Thresholds whose solutions failed verification
    pub skipped: Vec<T>,
    /// Residual trace of the last relaxation run
    pub residual_trace: ResidualTrace<T>,
}

impl<T: RealField> SolveSession<T> {
    /// `true` when no threshold produced a verified report
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Run both solvers over the thresholds configured in `config`
///
/// Fails with `NonConvergentSystem` before any iteration when the norm check
/// does not pass, and propagates `IterationLimitExceeded` from either solver.
/// A limit hit at a tighter threshold fails the whole session: reports
/// already verified at looser thresholds are dropped with it (a warning
/// logs how many).
pub fn solve_session<T: RealField>(
    system: &LinearSystem<T>,
    config: &SessionConfig,
) -> Result<SolveSession<T>> {
    config.validate()?;
    let check = require_convergence(system)?;

    let relaxation_form = RelaxationForm::new(system);
    let simple_form = SimpleIterationForm::new(system);

    let mut reports = Vec::with_capacity(config.tolerance_steps);
    let mut skipped = Vec::new();
    let mut residual_trace = ResidualTrace::default();

    for tolerance in config.tolerances() {
        let tolerance = T::from_f64_lossy(tolerance);
        let iteration_config = IterationConfig {
            tolerance,
            max_iterations: config.max_iterations,
            print_interval: config.print_interval,
        };

        let discard = |e: &SolverError| {
            log::warn!(
                "Tolerance {:.1e}: {}; discarding {} verified report(s)",
                tolerance.to_f64_lossy(),
                e,
                reports.len()
            );
        };
        let relaxed = relaxation(&relaxation_form, &iteration_config).inspect_err(discard)?;
        let simple =
            simple_iteration(&simple_form, &check, &iteration_config).inspect_err(discard)?;

        log::info!(
            "Tolerance {:.1e}: relaxation {} iterations, simple iteration {} iterations",
            tolerance.to_f64_lossy(),
            relaxed.iterations,
            simple.iterations
        );

        let verified =
            verify_solution(system, &relaxed.x) && verify_solution(system, &simple.x);
        residual_trace = relaxed.trace;

        if verified {
            reports.push(SolveReport {
                tolerance,
                relaxation: MethodOutcome {
                    solution: relaxed.x,
                    iterations: relaxed.iterations,
                },
                simple_iteration: MethodOutcome {
                    solution: simple.x,
                    iterations: simple.iterations,
                },
            });
        } else {
            log::debug!(
                "Tolerance {:.1e}: solution failed verification, skipped",
                tolerance.to_f64_lossy()
            );
            skipped.push(tolerance);
        }
    }

    Ok(SolveSession {
        check,
        reports,
        skipped,
        residual_trace,
    })
}
