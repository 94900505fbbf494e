// good_lp backend
// Translates a buffered model into a good_lp problem and runs it with microlp or COIN-OR CBC

use good_lp::{
    solvers::Solver as GoodLpSolver, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use tracing::{debug, warn};

use super::buffered::Backend;
use super::model_state::{ModelState, SolveOutcome};
use crate::domain::value_objects::StatusCode;

/// Which good_lp solver runs the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoodLpKind {
    #[cfg(feature = "microlp")]
    MicroLp,
    #[cfg(feature = "coin_cbc")]
    CoinCbc,
}

pub struct GoodLpBackend {
    kind: GoodLpKind,
}

impl GoodLpBackend {
    pub fn new(kind: GoodLpKind) -> Self {
        Self { kind }
    }

    #[cfg(feature = "microlp")]
    pub fn microlp() -> Self {
        Self::new(GoodLpKind::MicroLp)
    }

    #[cfg(feature = "coin_cbc")]
    pub fn coin_cbc() -> Self {
        Self::new(GoodLpKind::CoinCbc)
    }
}

impl Backend for GoodLpBackend {
    fn name(&self) -> &str {
        match self.kind {
            #[cfg(feature = "microlp")]
            GoodLpKind::MicroLp => "microlp",
            #[cfg(feature = "coin_cbc")]
            GoodLpKind::CoinCbc => "COIN-OR CBC",
        }
    }

    fn solve(&self, model: &ModelState) -> SolveOutcome {
        if model.timeout() > 0 {
            debug!(
                component = "engine",
                operation = "set_timeout",
                backend = self.name(),
                seconds = model.timeout(),
                "Time limit is not enforced by this backend"
            );
        }

        match self.kind {
            #[cfg(feature = "microlp")]
            GoodLpKind::MicroLp => run(model, good_lp::solvers::microlp::microlp),
            #[cfg(feature = "coin_cbc")]
            GoodLpKind::CoinCbc => run(model, good_lp::solvers::coin_cbc::coin_cbc),
        }
    }
}

fn run<S>(model: &ModelState, solver: S) -> SolveOutcome
where
    S: GoodLpSolver,
    S::Model: SolverModel<Error = ResolutionError>,
{
    let num_vars = model.columns();

    // Build variables using good_lp
    let mut vars = variables!();
    let mut lp_variables: Vec<GoodLpVariable> = Vec::with_capacity(num_vars);
    for i in 0..num_vars {
        let mut definition = variable()
            .min(model.lower_bounds()[i])
            .max(model.upper_bounds()[i]);
        if model.integer_flags()[i] {
            definition = definition.integer();
        }
        lp_variables.push(vars.add(definition));
    }

    let mut obj_expr: Expression = 0.into();
    for (&coeff, &var) in model.objective().iter().zip(&lp_variables) {
        if coeff != 0.0 {
            obj_expr += coeff * var;
        }
    }

    let unsolved = if model.is_maximize() {
        vars.maximise(obj_expr)
    } else {
        vars.minimise(obj_expr)
    };
    let mut lp_model = unsolved.using(solver);

    for row in model.rows() {
        let mut lhs: Expression = 0.into();
        for (&coeff, &var) in row.coefficients.iter().zip(&lp_variables) {
            if coeff != 0.0 {
                lhs += coeff * var;
            }
        }

        lp_model = match row.comparison {
            1 => lp_model.with(lhs.leq(row.rhs)),
            2 => lp_model.with(lhs.geq(row.rhs)),
            _ => lp_model.with(lhs.eq(row.rhs)),
        };
    }

    match lp_model.solve() {
        Ok(solution) => {
            let variables: Vec<f64> = lp_variables.iter().map(|&var| solution.value(var)).collect();
            SolveOutcome {
                status: StatusCode::Optimal.code(),
                objective: model.evaluate(&variables),
                variables,
                solution_count: 1,
                // good_lp does not expose an iteration counter
                iterations: 0,
            }
        }
        Err(ResolutionError::Infeasible) => {
            SolveOutcome::without_solution(StatusCode::Infeasible.code(), num_vars)
        }
        Err(ResolutionError::Unbounded) => {
            SolveOutcome::without_solution(StatusCode::Unbounded.code(), num_vars)
        }
        Err(e) => {
            warn!(
                component = "engine",
                operation = "solve",
                status = "error",
                error = %e,
                "good_lp solver failed"
            );
            SolveOutcome::without_solution(StatusCode::NumFailure.code(), num_vars)
        }
    }
}
