// Buffered engine model shared by the in-process backends
// Records every foreign call with the engine's own semantics; a backend reads it at solve time

use tracing::{trace, warn};

/// Default scaling of a fresh model: geometric + equilibrate + integers.
pub const DEFAULT_SCALING: u32 = 196;
/// Default verbosity of a fresh model: critical messages only.
pub const DEFAULT_VERBOSITY: i32 = 1;

/// Status code reported before the model has been solved.
pub const NOT_RUN: i32 = -1;

/// One registered row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub coefficients: Vec<f64>,
    /// Engine comparator code (LE=1, GE=2, EQ=3)
    pub comparison: i32,
    pub rhs: f64,
}

/// What a backend reports after running a model
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub status: i32,
    pub objective: f64,
    pub variables: Vec<f64>,
    pub solution_count: usize,
    /// Total solver iterations. Backends without an iteration counter
    /// (the good_lp solvers) report 0.
    pub iterations: u64,
}

impl SolveOutcome {
    /// Outcome without a solution, e.g. infeasible or failed runs.
    pub fn without_solution(status: i32, columns: usize) -> Self {
        Self {
            status,
            objective: 0.0,
            variables: vec![0.0; columns],
            solution_count: 0,
            iterations: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelState {
    columns: usize,
    objective: Vec<f64>,
    maximize: bool,
    rows: Vec<Row>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    integer: Vec<bool>,
    binary: Vec<bool>,
    scaling: u32,
    verbosity: i32,
    timeout: u64,
    outcome: Option<SolveOutcome>,
}

impl ModelState {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            columns,
            objective: vec![0.0; columns],
            maximize: false,
            rows: Vec::with_capacity(rows),
            lower: vec![0.0; columns],
            upper: vec![f64::INFINITY; columns],
            integer: vec![false; columns],
            binary: vec![false; columns],
            scaling: DEFAULT_SCALING,
            verbosity: DEFAULT_VERBOSITY,
            timeout: 0,
            outcome: None,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn is_maximize(&self) -> bool {
        self.maximize
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn lower_bounds(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper_bounds(&self) -> &[f64] {
        &self.upper
    }

    pub fn integer_flags(&self) -> &[bool] {
        &self.integer
    }

    pub fn scaling(&self) -> u32 {
        self.scaling
    }

    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn outcome(&self) -> Option<&SolveOutcome> {
        self.outcome.as_ref()
    }

    pub fn set_scaling(&mut self, scaling: u32) {
        self.scaling = scaling;
    }

    pub fn set_verbosity(&mut self, verbosity: i32) {
        self.verbosity = verbosity;
    }

    pub fn set_timeout(&mut self, seconds: u64) {
        self.timeout = seconds;
    }

    pub fn set_maximize(&mut self, maximize: bool) {
        self.maximize = maximize;
    }

    pub fn set_objective(&mut self, objective: &[f64]) -> bool {
        if !self.check_vector("set_obj_fn", objective.len()) {
            return false;
        }
        self.objective = objective.to_vec();
        true
    }

    pub fn add_row(&mut self, coefficients: &[f64], comparison: i32, rhs: f64) -> bool {
        if !self.check_vector("add_constraint", coefficients.len()) {
            return false;
        }
        if !(1..=3).contains(&comparison) {
            warn!(
                component = "engine",
                operation = "add_constraint",
                status = "error",
                comparison,
                "Unknown comparator code"
            );
            return false;
        }
        trace!(
            component = "engine",
            operation = "add_constraint",
            row = self.rows.len() + 1,
            comparison,
            rhs,
            "Adding row"
        );
        self.rows.push(Row {
            coefficients: coefficients.to_vec(),
            comparison,
            rhs,
        });
        true
    }

    pub fn set_lower_bounds(&mut self, bounds: &[f64]) -> bool {
        if !self.check_vector("set_lowbo", bounds.len()) {
            return false;
        }
        self.lower = bounds.to_vec();
        true
    }

    pub fn set_upper_bounds(&mut self, bounds: &[f64]) -> bool {
        if !self.check_vector("set_upbo", bounds.len()) {
            return false;
        }
        self.upper = bounds.to_vec();
        true
    }

    pub fn set_lower_bound(&mut self, column: usize, value: f64) -> bool {
        match self.index("set_lowbo", column) {
            Some(i) => {
                self.lower[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn set_upper_bound(&mut self, column: usize, value: f64) -> bool {
        match self.index("set_upbo", column) {
            Some(i) => {
                self.upper[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn set_integer(&mut self, column: usize, flag: bool) -> bool {
        match self.index("set_int", column) {
            Some(i) => {
                self.integer[i] = flag;
                if !flag {
                    self.binary[i] = false;
                }
                true
            }
            None => false,
        }
    }

    /// A binary column is an integer column bounded to [0, 1]; marking it
    /// overrides any bounds set before.
    pub fn set_binary(&mut self, column: usize, flag: bool) -> bool {
        match self.index("set_binary", column) {
            Some(i) => {
                self.binary[i] = flag;
                self.integer[i] = flag;
                if flag {
                    self.lower[i] = 0.0;
                    self.upper[i] = 1.0;
                }
                true
            }
            None => false,
        }
    }

    pub fn lower_bound(&self, column: usize) -> Option<f64> {
        column.checked_sub(1).and_then(|i| self.lower.get(i)).copied()
    }

    pub fn upper_bound(&self, column: usize) -> Option<f64> {
        column.checked_sub(1).and_then(|i| self.upper.get(i)).copied()
    }

    pub fn is_integer(&self, column: usize) -> bool {
        column
            .checked_sub(1)
            .and_then(|i| self.integer.get(i))
            .copied()
            .unwrap_or(false)
    }

    pub fn is_binary(&self, column: usize) -> bool {
        column
            .checked_sub(1)
            .and_then(|i| self.binary.get(i))
            .copied()
            .unwrap_or(false)
    }

    pub fn record_outcome(&mut self, outcome: SolveOutcome) {
        self.outcome = Some(outcome);
    }

    pub fn status(&self) -> i32 {
        self.outcome.as_ref().map_or(NOT_RUN, |outcome| outcome.status)
    }

    /// Drop everything the model holds.
    pub fn clear(&mut self) {
        *self = ModelState::new(0, 0);
    }

    /// Objective value of a variable assignment.
    pub fn evaluate(&self, variables: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(variables)
            .map(|(coefficient, value)| coefficient * value)
            .sum()
    }

    fn check_vector(&self, operation: &'static str, len: usize) -> bool {
        if len == self.columns {
            return true;
        }
        warn!(
            component = "engine",
            operation,
            status = "error",
            expected = self.columns,
            got = len,
            "Invalid vector"
        );
        false
    }

    fn index(&self, operation: &'static str, column: usize) -> Option<usize> {
        if (1..=self.columns).contains(&column) {
            return Some(column - 1);
        }
        warn!(
            component = "engine",
            operation,
            status = "error",
            column,
            num_columns = self.columns,
            "Column out of range"
        );
        None
    }
}

/// The engine's text for each status code.
pub fn status_text(code: i32) -> &'static str {
    match code {
        -5 => "Unknown error",
        -4 => "Data ignored",
        -3 => "No basis factorization package",
        -2 => "Out of memory",
        -1 => "Model has not been optimized",
        0 => "OPTIMAL solution",
        1 => "SUB-OPTIMAL solution",
        2 => "Model is primal INFEASIBLE",
        3 => "Model is primal UNBOUNDED",
        4 => "DEGENERATE situation",
        5 => "NUMERIC FAILURE encountered",
        6 => "User-requested termination",
        7 => "Termination due to timeout",
        8 => "lp_solve is currently running",
        9 => "Model was presolved",
        10 => "B&B routine failed",
        11 => "B&B routine terminated",
        12 => "Feasible B&B solution found",
        13 => "No feasible B&B solution found",
        14 => "Fathomed/pruned branch",
        _ => "Undefined internal error",
    }
}
