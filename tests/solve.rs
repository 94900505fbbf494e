// End-to-end solves against the default in-process engine
#![cfg(feature = "microlp")]

mod common;

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use common::init_tracing;
use lpsolve_model::{
    Comparison, Constraint, Direction, EngineBackend, Problem, Scaling, Solution, Solver,
    SolverError, SolverOptions, Verbosity,
};

const TOLERANCE: f64 = 1e-6;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn assert_variables(solution: &Solution, expected: &[f64]) {
    assert_eq!(solution.variables().len(), expected.len());
    for (&actual, &expected) in solution.variables().iter().zip(expected) {
        assert_close(actual, expected);
    }
}

fn solver(direction: Direction) -> Solver {
    Solver::new(direction)
        .with_scaling(Scaling::MEAN | Scaling::INTEGERS)
        .with_verbosity(Verbosity::Neutral)
        .with_backend(EngineBackend::MicroLp)
}

fn feed_mix_constraints() -> Vec<Constraint> {
    vec![
        Constraint::new(vec![0.0, 78.26, 0.0, 2.9], Comparison::GreaterOrEqual, 92.3),
        Constraint::new(vec![0.24, 0.0, 11.31, 0.0], Comparison::LessOrEqual, 14.8),
        Constraint::new(vec![12.68, 0.0, 0.08, 0.9], Comparison::GreaterOrEqual, 4.0),
    ]
}

fn integer_constraints() -> Vec<Constraint> {
    vec![
        Constraint::new(vec![1.0, 1.0, 0.0, 0.0], Comparison::LessOrEqual, 5.0),
        Constraint::new(vec![2.0, -1.0, 0.0, 0.0], Comparison::GreaterOrEqual, 0.0),
        Constraint::new(vec![-1.0, 3.0, 0.0, 0.0], Comparison::GreaterOrEqual, 0.0),
        Constraint::new(vec![0.0, 0.0, 1.0, 1.0], Comparison::GreaterOrEqual, 0.5),
    ]
}

fn infeasible_problem() -> Problem {
    Problem::new(
        vec![10.0, 10.0],
        vec![
            Constraint::from_string("1x + 1y = 20").unwrap(),
            Constraint::from_string("0x + 1y <= 5").unwrap(),
            Constraint::from_string("1x + 0y <= 5").unwrap(),
        ],
    )
}

#[test]
fn test_bounded_minimization() {
    init_tracing();
    let problem = Problem::new(vec![1.0, 3.0, 6.24, 0.1], feed_mix_constraints()).with_bounds(
        vec![28.6, 0.0, 0.0, 18.0],
        vec![f64::INFINITY, f64::INFINITY, f64::INFINITY, 48.98],
    );

    let solution = solver(Direction::Minimize).solve(&problem).unwrap();

    assert_close(solution.objective(), 31.78275862069);
    assert_eq!(solution.count(), 1);
    assert_variables(&solution, &[28.6, 0.0, 0.0, 31.827586206897]);
    assert_eq!(solution.code(), 0);
    assert_eq!(solution.status(), "OPTIMAL solution");
    assert!(solution.is_optimal());
}

#[test]
fn test_maximization() {
    let problem = Problem::new(
        vec![143.0, 60.0, 195.0],
        vec![
            Constraint::new(vec![120.0, 210.0, 150.75], Comparison::LessOrEqual, 15000.0),
            Constraint::new(vec![110.0, 30.0, 125.0], Comparison::LessOrEqual, 4000.0),
            Constraint::new(vec![1.0, 1.0, 1.0], Comparison::LessOrEqual, 75.0),
        ],
    );

    let solution = solver(Direction::Maximize).solve(&problem).unwrap();

    assert_close(solution.objective(), 6986.842105263158);
    assert_variables(&solution, &[0.0, 56.578947368421, 18.421052631579]);
    assert_eq!(solution.code(), 0);
}

#[test]
fn test_integer_variable() {
    let problem = Problem::new(vec![-1.0, -2.0, 0.1, 3.0], integer_constraints())
        .with_bounds(vec![0.0, 0.0, 1.1, 0.0], vec![])
        .with_integer_variables(vec![false, false, true, false]);

    let solution = solver(Direction::Minimize).solve(&problem).unwrap();

    assert_close(solution.objective(), -8.133333333333);
    assert_variables(&solution, &[1.666666666667, 3.333333333333, 2.0, 0.0]);
}

#[test]
fn test_integer_and_binary_variables() {
    let problem = Problem::new(vec![-1.0, -2.0, 0.1, 3.0], integer_constraints())
        .with_bounds(vec![0.0, 0.0, 1.1, 0.0], vec![])
        .with_integer_variables(vec![false, false, true, false])
        .with_binary_variables(vec![true, false, false, true]);

    let solution = solver(Direction::Minimize).solve(&problem).unwrap();

    assert_close(solution.objective(), -4.8);
    assert_variables(&solution, &[1.0, 2.0, 2.0, 0.0]);
}

#[test]
fn test_all_variables_binary() {
    // Binary marking resets the 1.1 lower bound of the third column
    let problem = Problem::new(vec![-1.0, -2.0, 0.1, 3.0], integer_constraints())
        .with_bounds(vec![0.0, 0.0, 1.1, 0.0], vec![])
        .with_integer_variables(false)
        .with_binary_variables(true);

    let solution = solver(Direction::Minimize).solve(&problem).unwrap();

    assert_close(solution.objective(), -2.9);
    assert_variables(&solution, &[1.0, 1.0, 1.0, 0.0]);
}

#[test]
fn test_problem_without_constraints() {
    let problem = Problem::new(vec![1.0], vec![]);

    let solution = solver(Direction::Minimize).solve(&problem).unwrap();

    assert_close(solution.objective(), 0.0);
    assert_eq!(solution.count(), 1);
    assert_variables(&solution, &[0.0]);
    assert_eq!(solution.status(), "OPTIMAL solution");
}

#[test]
fn test_infeasible_problem() {
    let solution = Solver::minimize().solve(&infeasible_problem()).unwrap();

    assert_eq!(solution.count(), 0);
    assert_eq!(solution.code(), 2);
    assert_eq!(solution.status(), "Model is primal INFEASIBLE");
    assert!(!solution.is_optimal());
}

#[test]
fn test_infeasible_problem_throws() {
    let err = Solver::minimize()
        .throw_on_failure()
        .solve(&infeasible_problem())
        .unwrap_err();

    assert!(matches!(err, SolverError::SolveFailed { code: 2, .. }));
    assert_eq!(err.to_string(), "Model is primal INFEASIBLE");
}

#[test]
fn test_mismatched_constraint_is_rejected() {
    let problem = Problem::new(
        vec![1.0],
        vec![Constraint::new(vec![0.0, 78.26, 0.0, 2.9], Comparison::GreaterOrEqual, 92.3)],
    );

    let err = Solver::minimize().solve(&problem).unwrap_err();

    assert!(matches!(err, SolverError::DimensionMismatch { .. }));
}

#[test]
fn test_callbacks_see_live_model() {
    let problem = Problem::new(vec![1.0, 3.0, 6.24, 0.1], feed_mix_constraints());
    let columns = Arc::new(AtomicUsize::new(0));
    let iterations = Arc::new(AtomicU64::new(u64::MAX));

    let seen_columns = Arc::clone(&columns);
    let seen_iterations = Arc::clone(&iterations);
    let solution = Solver::minimize()
        .before_solve(move |model, problem| {
            seen_columns.store(model.ncolumns(), Ordering::SeqCst);
            assert_eq!(model.ncolumns(), problem.count_cols());
            Ok(())
        })
        .after_solve(move |model, _, solution| {
            seen_iterations.store(model.total_iter(), Ordering::SeqCst);
            assert_eq!(model.total_iter(), solution.iterations());
            Ok(())
        })
        .solve(&problem)
        .unwrap();

    assert_close(solution.objective(), 3.18275862069);
    assert_eq!(columns.load(Ordering::SeqCst), 4);
    assert_eq!(iterations.load(Ordering::SeqCst), solution.iterations());
}

#[test]
fn test_solver_from_toml_options() {
    let options = SolverOptions::from_toml_str(
        r#"
        direction = "maximize"
        backend = "microlp"
        verbosity = "neutral"
        "#,
    )
    .unwrap();
    let problem = Problem::new(
        vec![3.0, 2.0],
        vec![
            Constraint::from_string("1x + 1y <= 4").unwrap(),
            Constraint::from_string("1x + 3y <= 6").unwrap(),
        ],
    )
    .with_bounds(vec![], vec![3.0, f64::INFINITY]);

    let solution = Solver::from_options(&options).solve(&problem).unwrap();

    assert_close(solution.objective(), 11.0);
    assert_variables(&solution, &[3.0, 1.0]);
}

#[test]
fn test_microlp_reports_no_iterations() {
    let problem = Problem::new(vec![1.0, 3.0, 6.24, 0.1], feed_mix_constraints());

    let solution = solver(Direction::Minimize).solve(&problem).unwrap();

    assert_eq!(solution.iterations(), 0);
}

#[cfg(feature = "highs")]
#[test]
fn test_highs_reports_iterations() {
    let problem = Problem::new(vec![1.0, 3.0, 6.24, 0.1], feed_mix_constraints());

    let solution = Solver::minimize()
        .with_backend(EngineBackend::Highs)
        .solve(&problem)
        .unwrap();

    assert_close(solution.objective(), 3.18275862069);
    assert!(solution.iterations() > 0);
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_solve_async() {
    let problem = Problem::new(vec![1.0, 3.0, 6.24, 0.1], feed_mix_constraints());

    let solution = Solver::minimize().solve_async(problem).await.unwrap();

    assert_close(solution.objective(), 3.18275862069);
    assert!(solution.is_optimal());
}
