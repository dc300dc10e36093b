//! Integration tests for the convergence check, both solvers and solve sessions

use approx::assert_abs_diff_eq;
use math_audio_iterative::{
    IterationConfig, LinearSystem, RelaxationForm, SessionConfig, SimpleIterationForm,
    SolverError, SystemInput, check_convergence, relaxation, relaxation_with_guess,
    require_convergence, simple_iteration, simple_iteration_with_guess, solve_session,
    verify_solution,
};
use ndarray::{Array1, Array2, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Iteration cap imposed by the harness; hitting it is a termination failure
const HARNESS_CAP: usize = 10_000;

fn reference_system() -> LinearSystem<f64> {
    LinearSystem::new(
        array![[10.0, 1.0, 1.0], [1.0, 10.0, 1.0], [1.0, 1.0, 10.0]],
        array![12.0, 12.0, 12.0],
    )
    .expect("valid system")
}

/// Random strictly row-dominant system with known solution in [1, 5]^n
fn random_dominant_system(rng: &mut StdRng) -> LinearSystem<f64> {
    let n = rng.random_range(2..=6);
    let mut a = Array2::from_shape_fn((n, n), |_| rng.random_range(-1.0_f64..1.0));
    for i in 0..n {
        let off_diagonal: f64 = (0..n).filter(|&j| j != i).map(|j| a[[i, j]].abs()).sum();
        a[[i, i]] = off_diagonal + rng.random_range(0.5_f64..3.0);
    }
    let x_true = Array1::from_shape_fn(n, |_| rng.random_range(1.0_f64..5.0));
    let b = a.dot(&x_true);
    LinearSystem::new(a, b).expect("valid system")
}

fn harness_config(tolerance: f64) -> IterationConfig<f64> {
    IterationConfig {
        tolerance,
        max_iterations: HARNESS_CAP,
        print_interval: 0,
    }
}

#[test]
fn test_reference_scenario_both_methods() {
    let system = reference_system();
    let check = require_convergence(&system).expect("diagonally dominant system converges");
    let config = harness_config(1e-4);

    let relaxed = relaxation(&RelaxationForm::new(&system), &config).unwrap();
    let simple = simple_iteration(&SimpleIterationForm::new(&system), &check, &config).unwrap();

    for i in 0..3 {
        assert_abs_diff_eq!(relaxed.x[i], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(simple.x[i], 1.0, epsilon = 1e-3);
    }
    assert!(verify_solution(&system, &relaxed.x));
    assert!(verify_solution(&system, &simple.x));
}

#[test]
fn test_reference_session_report() {
    let session = solve_session(&reference_system(), &SessionConfig::default()).unwrap();

    assert_eq!(session.reports.len(), 6);
    let relaxation_iterations: Vec<usize> =
        session.reports.iter().map(|r| r.relaxation.iterations).collect();
    let simple_iterations: Vec<usize> = session
        .reports
        .iter()
        .map(|r| r.simple_iteration.iterations)
        .collect();

    assert_eq!(relaxation_iterations, vec![5, 7, 9, 11, 13, 14]);
    assert_eq!(simple_iterations, vec![3, 4, 5, 7, 8, 10]);

    let first = &session.reports[0];
    assert_eq!(
        first.relaxation.formatted(),
        "x1 = 0.9948\nx2 = 1.0033\nx3 = 0.9720"
    );
    assert_eq!(
        first.simple_iteration.formatted(),
        "x1 = 1.0080\nx2 = 1.0080\nx3 = 1.0080"
    );
}

#[test]
fn test_non_dominant_system_rejected() {
    let system = LinearSystem::new(array![[1.0_f64, 5.0], [5.0, 1.0]], array![6.0, 6.0]).unwrap();

    assert!(!check_convergence(&system).is_convergent());
    match solve_session(&system, &SessionConfig::default()) {
        Err(SolverError::NonConvergentSystem { row_norm, .. }) => {
            assert_abs_diff_eq!(row_norm, 5.0, epsilon = 1e-12);
        }
        other => panic!("expected NonConvergentSystem, got {other:?}"),
    }
}

#[test]
fn test_row_dominant_systems_pass_convergence_check() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let system = random_dominant_system(&mut rng);
        assert!(system.is_row_diagonally_dominant());
        let check = check_convergence(&system);
        assert!(check.is_convergent());
        assert!(check.norms.row < 1.0);
    }
}

#[test]
fn test_convergent_systems_solve_and_verify() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = harness_config(1e-6);

    for _ in 0..50 {
        let system = random_dominant_system(&mut rng);
        let check = require_convergence(&system).unwrap();

        let relaxed = relaxation(&RelaxationForm::new(&system), &config)
            .expect("relaxation terminates within the harness cap");
        let simple = simple_iteration(&SimpleIterationForm::new(&system), &check, &config)
            .expect("simple iteration terminates within the harness cap");

        assert!(verify_solution(&system, &relaxed.x));
        assert!(verify_solution(&system, &simple.x));

        // The terminating iteration met the tolerance
        let last = relaxed.trace.max_abs(relaxed.iterations - 1).unwrap();
        assert!(last <= 1e-6);
        assert!(simple.last_step * simple.stop_factor < 1e-6);
    }
}

#[test]
fn test_restart_from_terminal_iterate_takes_one_iteration() {
    let system = reference_system();
    let check = require_convergence(&system).unwrap();
    let relaxation_form = RelaxationForm::new(&system);
    let simple_form = SimpleIterationForm::new(&system);

    for tolerance in SessionConfig::default().tolerances() {
        let config = harness_config(tolerance);

        let relaxed = relaxation(&relaxation_form, &config).unwrap();
        let again = relaxation_with_guess(&relaxation_form, Some(&relaxed.x), &config).unwrap();
        assert_eq!(again.iterations, 1, "relaxation restart at {tolerance}");

        let simple = simple_iteration(&simple_form, &check, &config).unwrap();
        let again =
            simple_iteration_with_guess(&simple_form, Some(&simple.x), &check, &config).unwrap();
        assert_eq!(again.iterations, 1, "simple iteration restart at {tolerance}");
    }
}

#[test]
fn test_tiny_tolerance_still_terminates() {
    let system = reference_system();
    let check = require_convergence(&system).unwrap();
    let config = harness_config(1e-10);

    match relaxation(&RelaxationForm::new(&system), &config) {
        Ok(solution) => assert!(solution.iterations < HARNESS_CAP),
        Err(e) if e.is_iteration_limit() => panic!("relaxation did not terminate: {e}"),
        Err(e) => panic!("relaxation failed: {e}"),
    }
    match simple_iteration(&SimpleIterationForm::new(&system), &check, &config) {
        Ok(solution) => {
            for xi in solution.x.iter() {
                assert_abs_diff_eq!(*xi, 1.0, epsilon = 1e-9);
            }
        }
        Err(e) if e.is_iteration_limit() => panic!("simple iteration did not terminate: {e}"),
        Err(e) => panic!("simple iteration failed: {e}"),
    }
}

#[test]
fn test_iteration_cap_surfaces_distinct_error() {
    let system = reference_system();
    let config = SessionConfig {
        max_iterations: 3,
        ..Default::default()
    };

    let err = solve_session(&system, &config).unwrap_err();
    assert!(err.is_iteration_limit());
    assert!(!err.is_convergence_error());
}

#[test]
fn test_f32_session() {
    let system = LinearSystem::new(
        array![[10.0_f32, 1.0, 1.0], [1.0, 10.0, 1.0], [1.0, 1.0, 10.0]],
        array![12.0_f32, 12.0, 12.0],
    )
    .unwrap();
    let config = SessionConfig {
        tolerance_steps: 4,
        ..Default::default()
    };

    let session = solve_session(&system, &config).unwrap();
    assert_eq!(session.reports.len(), 4);
    for xi in session.reports[3].relaxation.solution.iter() {
        assert_abs_diff_eq!(*xi, 1.0_f32, epsilon = 1e-3);
    }
}

#[test]
fn test_json_input_round_trip_through_session() {
    let input = SystemInput::from_json_str(
        r#"{
            "matrix": [[4, 1], [2, 5]],
            "rhs": [9, 16],
            "session": { "tolerance_steps": 3 }
        }"#,
    )
    .unwrap();

    let system = input.to_system().unwrap();
    let session = solve_session(&system, &input.session).unwrap();

    assert_eq!(session.reports.len() + session.skipped.len(), 3);
    for report in &session.reports {
        assert!(verify_solution(&system, &report.relaxation.solution));
        assert!(verify_solution(&system, &report.simple_iteration.solution));
    }
}
