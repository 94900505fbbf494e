// HiGHS backend
// Translates a buffered model into a HiGHS RowProblem (add columns first, then rows)

use std::ffi::CString;

use highs::{HighsModelStatus, RowProblem, Sense, SolvedModel};
use tracing::{trace, warn};

use super::buffered::Backend;
use super::model_state::{ModelState, SolveOutcome};
use crate::domain::value_objects::{Scaling, StatusCode, Verbosity};

pub struct HighsBackend;

impl HighsBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HighsBackend {
    fn name(&self) -> &str {
        "HiGHS"
    }

    fn solve(&self, model: &ModelState) -> SolveOutcome {
        let num_vars = model.columns();
        let mut pb = RowProblem::default();
        let mut vars = Vec::with_capacity(num_vars);

        for i in 0..num_vars {
            let obj_coeff = model.objective()[i];
            let bounds = model.lower_bounds()[i]..=model.upper_bounds()[i];
            let col = if model.integer_flags()[i] {
                pb.add_integer_column(obj_coeff, bounds)
            } else {
                pb.add_column(obj_coeff, bounds)
            };
            vars.push(col);
        }

        for row in model.rows() {
            let terms: Vec<_> = row
                .coefficients
                .iter()
                .zip(&vars)
                .filter(|(&coeff, _)| coeff != 0.0)
                .map(|(&coeff, &col)| (col, coeff))
                .collect();

            match row.comparison {
                1 => pb.add_row(..=row.rhs, &terms),
                2 => pb.add_row(row.rhs.., &terms),
                _ => pb.add_row(row.rhs..=row.rhs, &terms),
            };
        }

        let sense = if model.is_maximize() {
            Sense::Maximise
        } else {
            Sense::Minimise
        };

        let mut highs_model = pb.optimise(sense);
        if Verbosity::from_level(model.verbosity()) <= Verbosity::Important {
            highs_model.make_quiet();
        } else {
            highs_model.set_option("output_flag", true);
        }
        if model.timeout() > 0 {
            highs_model.set_option("time_limit", model.timeout() as f64);
        }
        highs_model.set_option("simplex_scale_strategy", scale_strategy(Scaling(model.scaling())));
        // The engine does not presolve unless asked to
        highs_model.set_option("presolve", "off");

        let solved = highs_model.solve();
        let highs_status = solved.status();
        let status = map_status(highs_status);
        trace!(
            component = "engine",
            operation = "solve",
            backend = "HiGHS",
            ?highs_status,
            status_code = status,
            "HiGHS status mapped"
        );

        let iterations = simplex_iteration_count(&solved);

        if !matches!(status, 0 | 1 | 7) {
            return SolveOutcome {
                iterations,
                ..SolveOutcome::without_solution(status, num_vars)
            };
        }

        let variables = solved.get_solution().columns().to_vec();
        if variables.len() != num_vars {
            return SolveOutcome {
                iterations,
                ..SolveOutcome::without_solution(status, num_vars)
            };
        }

        SolveOutcome {
            status,
            objective: model.evaluate(&variables),
            variables,
            solution_count: 1,
            iterations,
        }
    }
}

/// Simplex iterations of the last run, 0 when HiGHS cannot report them.
fn simplex_iteration_count(solved: &SolvedModel) -> u64 {
    let Ok(name) = CString::new("simplex_iteration_count") else {
        return 0;
    };
    let mut value: highs_sys::HighsInt = 0;
    // SAFETY: `solved` owns a live HiGHS instance and `name` is NUL-terminated
    let status =
        unsafe { highs_sys::Highs_getIntInfoValue(solved.as_ptr(), name.as_ptr(), &mut value) };

    if status != highs_sys::STATUS_OK {
        warn!(
            component = "engine",
            operation = "get_total_iter",
            status = "warn",
            info = "simplex_iteration_count",
            status_code = status,
            "Failed to read simplex iteration count"
        );
        return 0;
    }

    u64::try_from(value).unwrap_or(0)
}

/// Map the engine scaling mode onto HiGHS `simplex_scale_strategy`.
fn scale_strategy(scaling: Scaling) -> i32 {
    match scaling.mode() {
        0 => 0,
        1 | 2 => 4,
        _ => 2,
    }
}

fn map_status(status: HighsModelStatus) -> i32 {
    let code = match status {
        HighsModelStatus::Optimal | HighsModelStatus::ModelEmpty => StatusCode::Optimal,
        HighsModelStatus::Infeasible | HighsModelStatus::UnboundedOrInfeasible => {
            StatusCode::Infeasible
        }
        HighsModelStatus::Unbounded => StatusCode::Unbounded,
        HighsModelStatus::ReachedTimeLimit => StatusCode::Timeout,
        HighsModelStatus::ReachedIterationLimit => StatusCode::SubOptimal,
        _ => StatusCode::NumFailure,
    };
    code.code()
}
