// Engine adapter: exposes the foreign model surface over an in-process backend
// This is an adapter pattern - the backend only sees the finished ModelState

use std::sync::Arc;
use tracing::{debug, trace};

use super::model_state::{status_text, ModelState, SolveOutcome};
use crate::domain::solver_service::{LpEngine, LpModel};

/// A numerical backend able to run a buffered model
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    /// Run the model and report the outcome. Must not panic on infeasible
    /// or unbounded models. `SolveOutcome::iterations` is 0 when the
    /// backend cannot count iterations.
    fn solve(&self, model: &ModelState) -> SolveOutcome;
}

/// Engine that allocates buffered models for one backend
pub struct BufferedEngine<B> {
    backend: Arc<B>,
}

impl<B: Backend + 'static> BufferedEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

impl<B: Backend + 'static> LpEngine for BufferedEngine<B> {
    fn make_lp(&self, rows: usize, cols: usize) -> Option<Box<dyn LpModel>> {
        debug!(
            component = "engine",
            operation = "make_lp",
            backend = self.backend.name(),
            rows,
            cols,
            "Creating model"
        );
        Some(Box::new(BufferedModel {
            backend: Arc::clone(&self.backend),
            state: ModelState::new(rows, cols),
        }))
    }

    fn name(&self) -> &str {
        self.backend.name()
    }
}

pub struct BufferedModel<B> {
    backend: Arc<B>,
    state: ModelState,
}

impl<B: Backend> BufferedModel<B> {
    pub fn state(&self) -> &ModelState {
        &self.state
    }
}

impl<B: Backend> LpModel for BufferedModel<B> {
    fn set_scaling(&mut self, scaling: u32) {
        self.state.set_scaling(scaling);
    }

    fn set_verbose(&mut self, verbosity: i32) {
        self.state.set_verbosity(verbosity);
    }

    fn set_timeout(&mut self, seconds: u64) {
        self.state.set_timeout(seconds);
    }

    fn set_obj_fn(&mut self, objective: &[f64]) -> bool {
        self.state.set_objective(objective)
    }

    fn set_minim(&mut self) {
        self.state.set_maximize(false);
    }

    fn set_maxim(&mut self) {
        self.state.set_maximize(true);
    }

    fn add_constraint(&mut self, coefficients: &[f64], comparison: i32, rhs: f64) -> bool {
        self.state.add_row(coefficients, comparison, rhs)
    }

    fn set_lowbo(&mut self, bounds: &[f64]) -> bool {
        self.state.set_lower_bounds(bounds)
    }

    fn set_upbo(&mut self, bounds: &[f64]) -> bool {
        self.state.set_upper_bounds(bounds)
    }

    fn set_lowbo_single(&mut self, column: usize, value: f64) -> bool {
        self.state.set_lower_bound(column, value)
    }

    fn set_upbo_single(&mut self, column: usize, value: f64) -> bool {
        self.state.set_upper_bound(column, value)
    }

    fn set_int(&mut self, column: usize, flag: bool) -> bool {
        self.state.set_integer(column, flag)
    }

    fn set_binary(&mut self, column: usize, flag: bool) -> bool {
        self.state.set_binary(column, flag)
    }

    fn solve(&mut self) -> i32 {
        debug!(
            component = "engine",
            operation = "solve",
            backend = self.backend.name(),
            num_cols = self.state.columns(),
            num_rows = self.state.rows().len(),
            "Solving model"
        );
        let outcome = self.backend.solve(&self.state);
        let status = outcome.status;
        trace!(
            component = "engine",
            operation = "solve",
            status_code = status,
            solution_count = outcome.solution_count,
            iterations = outcome.iterations,
            "Solution status received"
        );
        self.state.record_outcome(outcome);
        status
    }

    fn get_working_objective(&self) -> f64 {
        self.state.outcome().map_or(0.0, |outcome| outcome.objective)
    }

    fn get_solutioncount(&self) -> usize {
        self.state.outcome().map_or(0, |outcome| outcome.solution_count)
    }

    fn get_variables(&self) -> Option<Vec<f64>> {
        self.state.outcome().map(|outcome| outcome.variables.clone())
    }

    fn get_status(&self) -> i32 {
        self.state.status()
    }

    fn get_statustext(&self, code: i32) -> String {
        status_text(code).to_string()
    }

    fn get_total_iter(&self) -> u64 {
        self.state.outcome().map_or(0, |outcome| outcome.iterations)
    }

    fn get_ncolumns(&self) -> usize {
        self.state.columns()
    }

    fn get_nrows(&self) -> usize {
        self.state.rows().len()
    }

    fn get_lowbo(&self, column: usize) -> Option<f64> {
        self.state.lower_bound(column)
    }

    fn get_upbo(&self, column: usize) -> Option<f64> {
        self.state.upper_bound(column)
    }

    fn is_int(&self, column: usize) -> bool {
        self.state.is_integer(column)
    }

    fn is_binary(&self, column: usize) -> bool {
        self.state.is_binary(column)
    }

    fn is_maxim(&self) -> bool {
        self.state.is_maximize()
    }

    fn get_scaling(&self) -> u32 {
        self.state.scaling()
    }

    fn get_verbose(&self) -> i32 {
        self.state.verbosity()
    }

    fn get_timeout(&self) -> u64 {
        self.state.timeout()
    }

    fn delete_lp(&mut self) {
        trace!(
            component = "engine",
            operation = "delete_lp",
            backend = self.backend.name(),
            "Releasing model"
        );
        self.state.clear();
    }
}
