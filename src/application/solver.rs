// Solver: drives one engine model per solve and maps its output into a Solution
//
// Call order against the model is fixed:
// configure -> objective/direction -> rows -> bounds -> integer/binary -> before hook
// -> solve -> extract -> after hook -> release

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::config::SolverOptions;
use super::hooks::{AfterSolve, BeforeSolve, HookResult, ModelHandle};
use crate::domain::{
    models::{Problem, Solution},
    solver_service::{LpEngine, LpModel, Result, SolverError},
    value_objects::{Direction, EngineBackend, Scaling, StatusCode, Verbosity},
};
use crate::solver::EngineFactory;

/// Configured solver. Holds options and hooks only, never problem state, so
/// one instance can solve many problems in sequence.
///
/// Solving from several threads at once is safe exactly when the engine's
/// `make_lp` is; that is the caller's responsibility.
#[derive(Clone)]
pub struct Solver {
    direction: Direction,
    scaling: Scaling,
    verbosity: Verbosity,
    timeout: Option<Duration>,
    throw_on_failure: bool,
    before_solve: Option<BeforeSolve>,
    after_solve: Option<AfterSolve>,
    backend: EngineBackend,
    engine: Option<Arc<dyn LpEngine>>,
}

impl Solver {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            scaling: Scaling::NONE,
            verbosity: Verbosity::Important,
            timeout: None,
            throw_on_failure: false,
            before_solve: None,
            after_solve: None,
            backend: EngineBackend::Auto,
            engine: None,
        }
    }

    pub fn minimize() -> Self {
        Self::new(Direction::Minimize)
    }

    pub fn maximize() -> Self {
        Self::new(Direction::Maximize)
    }

    /// Build from a direction name such as `"min"`, `"maximize"` or `"set_maxim"`.
    pub fn from_direction(direction: &str) -> Result<Self> {
        Ok(Self::new(direction.parse()?))
    }

    pub fn from_options(options: &SolverOptions) -> Self {
        let mut solver = Self::new(options.direction)
            .with_scaling(options.scaling)
            .with_verbosity(options.verbosity)
            .with_backend(options.backend);
        solver.timeout = options.timeout();
        solver.throw_on_failure = options.throw_on_failure;
        solver
    }

    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Advisory time limit enforced by the engine, in whole seconds.
    ///
    /// The fractional part is dropped, except that a non-zero limit below one
    /// second becomes one second so it never reads as "unlimited".
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fail with `SolveFailed` whenever the status is not optimal.
    pub fn throw_on_failure(mut self) -> Self {
        self.throw_on_failure = true;
        self
    }

    pub fn before_solve<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut ModelHandle<'_>, &Problem) -> HookResult + Send + Sync + 'static,
    {
        self.before_solve = Some(Arc::new(hook));
        self
    }

    pub fn after_solve<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut ModelHandle<'_>, &Problem, &Solution) -> HookResult + Send + Sync + 'static,
    {
        self.after_solve = Some(Arc::new(hook));
        self
    }

    /// Select a backend through the engine factory.
    pub fn with_backend(mut self, backend: EngineBackend) -> Self {
        self.backend = backend;
        self.engine = None;
        self
    }

    /// Use a specific engine instead of the factory.
    pub fn with_engine(mut self, engine: Arc<dyn LpEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn throws_on_failure(&self) -> bool {
        self.throw_on_failure
    }

    /// Solve a problem on a freshly created engine model.
    ///
    /// A non-optimal outcome is returned as a normal `Solution` unless
    /// `throw_on_failure` was requested. The model is released on every path.
    pub fn solve(&self, problem: &Problem) -> Result<Solution> {
        problem.validate()?;
        let engine = self.engine()?;

        debug!(
            component = "solver",
            operation = "solve",
            engine = engine.name(),
            direction = %self.direction,
            num_cols = problem.count_cols(),
            num_rows = problem.count_rows(),
            "Solving problem"
        );

        let model = engine.make_lp(0, problem.count_cols()).ok_or_else(|| {
            SolverError::EngineUnavailable("Unable to create new LP model".to_string())
        })?;
        let mut guard = ModelGuard { model };
        let solution = self.run(guard.model(), problem)?;
        drop(guard);

        debug!(
            component = "solver",
            operation = "solve",
            status_code = solution.code(),
            status = solution.status(),
            objective = solution.objective(),
            iterations = solution.iterations(),
            "Solve finished"
        );

        if self.throw_on_failure && solution.code() != StatusCode::Optimal.code() {
            return Err(SolverError::SolveFailed {
                message: solution.status().to_string(),
                code: solution.code(),
            });
        }

        Ok(solution)
    }

    /// Run `solve` on tokio's blocking pool.
    #[cfg(feature = "async")]
    pub async fn solve_async(&self, problem: Problem) -> Result<Solution> {
        let solver = self.clone();
        match tokio::task::spawn_blocking(move || solver.solve(&problem)).await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(SolverError::EngineUnavailable(format!(
                "solve task failed: {}",
                e
            ))),
        }
    }

    fn engine(&self) -> Result<Arc<dyn LpEngine>> {
        match (&self.engine, self.backend) {
            (Some(engine), _) => Ok(Arc::clone(engine)),
            (None, EngineBackend::Auto) => EngineFactory::default_engine(),
            (None, backend) => EngineFactory::create(backend),
        }
    }

    fn run(&self, model: &mut dyn LpModel, problem: &Problem) -> Result<Solution> {
        let columns = problem.count_cols();

        model.set_scaling(self.scaling.bits());
        model.set_verbose(self.verbosity.level());
        model.set_timeout(self.timeout.map_or(0, timeout_secs));

        accepted(model.set_obj_fn(problem.objective()), "set_obj_fn")?;
        match self.direction {
            Direction::Minimize => model.set_minim(),
            Direction::Maximize => model.set_maxim(),
        }

        for constraint in problem.constraints() {
            accepted(
                model.add_constraint(
                    constraint.coefficients(),
                    constraint.comparison().code(),
                    constraint.value(),
                ),
                "add_constraint",
            )?;
        }

        // Empty bound vectors keep the engine defaults
        if !problem.lower_bounds().is_empty() {
            accepted(model.set_lowbo(problem.lower_bounds()), "set_lowbo")?;
        }
        if !problem.upper_bounds().is_empty() {
            accepted(model.set_upbo(problem.upper_bounds()), "set_upbo")?;
        }

        // Integer before binary; the engine decides how the two combine
        for column in problem.integer_variables().marked_columns(columns) {
            accepted(model.set_int(column, true), "set_int")?;
        }
        for column in problem.binary_variables().marked_columns(columns) {
            accepted(model.set_binary(column, true), "set_binary")?;
        }

        if let Some(hook) = &self.before_solve {
            hook(&mut ModelHandle::new(&mut *model), problem).map_err(|source| {
                SolverError::HookFailed {
                    stage: "before_solve",
                    source,
                }
            })?;
        }

        model.solve();

        let objective = model.get_working_objective();
        let count = model.get_solutioncount();
        let variables = model.get_variables().unwrap_or_else(|| {
            warn!(
                component = "solver",
                operation = "get_variables",
                status = "warn",
                "Engine returned no variable values"
            );
            Vec::new()
        });
        let code = model.get_status();
        let status = model.get_statustext(code);
        let iterations = model.get_total_iter();
        let solution = Solution::new(objective, count, variables, code, status, iterations);

        if let Some(hook) = &self.after_solve {
            hook(&mut ModelHandle::new(&mut *model), problem, &solution).map_err(|source| {
                SolverError::HookFailed {
                    stage: "after_solve",
                    source,
                }
            })?;
        }

        Ok(solution)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::minimize()
    }
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("direction", &self.direction)
            .field("scaling", &self.scaling)
            .field("verbosity", &self.verbosity)
            .field("timeout", &self.timeout)
            .field("throw_on_failure", &self.throw_on_failure)
            .field("backend", &self.backend)
            .field("before_solve", &self.before_solve.is_some())
            .field("after_solve", &self.after_solve.is_some())
            .finish_non_exhaustive()
    }
}

/// Engine timeout in seconds; 0 is reserved for "no limit".
fn timeout_secs(timeout: Duration) -> u64 {
    match timeout.as_secs() {
        0 if !timeout.is_zero() => 1,
        secs => secs,
    }
}

fn accepted(ok: bool, operation: &'static str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(SolverError::EngineRejected { operation })
    }
}

/// Owns the engine model for the duration of one solve and releases it when
/// dropped, including on early returns and unwinding.
struct ModelGuard {
    model: Box<dyn LpModel>,
}

impl ModelGuard {
    fn model(&mut self) -> &mut dyn LpModel {
        self.model.as_mut()
    }
}

impl Drop for ModelGuard {
    fn drop(&mut self) {
        trace!(
            component = "solver",
            operation = "delete_lp",
            "Releasing engine model"
        );
        self.model.delete_lp();
    }
}
