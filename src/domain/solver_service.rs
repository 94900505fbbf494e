// Engine boundary: the foreign call surface every solver engine must offer
// The orchestrator only talks to these traits, never to a concrete backend

use std::error::Error as StdError;

/// Error types for modeling and solving
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid constraint format: {0}")]
    InvalidFormat(String),

    #[error("Objective function must be minimized or maximized (got '{0}')")]
    InvalidDirection(String),

    #[error("Engine not available: {0}")]
    EngineUnavailable(String),

    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("Engine rejected {operation}: invalid vector")]
    EngineRejected { operation: &'static str },

    #[error("{message}")]
    SolveFailed { message: String, code: i32 },

    #[error("{stage} hook failed: {source}")]
    HookFailed {
        stage: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SolverError {
    /// Engine status code carried by a `SolveFailed` error.
    pub fn code(&self) -> Option<i32> {
        match self {
            SolverError::SolveFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// An external solver engine able to allocate models.
///
/// Whether `make_lp` may be called concurrently is a property of the
/// implementation; callers that share one engine across threads rely on it.
pub trait LpEngine: Send + Sync {
    /// Allocate a fresh model with `rows` rows and `cols` columns.
    /// `None` means the engine could not create the model.
    fn make_lp(&self, rows: usize, cols: usize) -> Option<Box<dyn LpModel>>;

    /// Get the name of this engine backend
    fn name(&self) -> &str;
}

/// One engine model instance.
///
/// Vector arguments are 0-based and positional per column. Single-column
/// operations (`set_int`, `set_binary`, `get_lowbo`, ...) take 1-based
/// column numbers and report `false` for a column outside the model.
pub trait LpModel: Send {
    fn set_scaling(&mut self, scaling: u32);
    fn set_verbose(&mut self, verbosity: i32);
    /// Timeout in seconds, 0 disables it.
    fn set_timeout(&mut self, seconds: u64);
    fn set_obj_fn(&mut self, objective: &[f64]) -> bool;
    fn set_minim(&mut self);
    fn set_maxim(&mut self);
    /// Append a row. `comparison` is the engine comparator code (LE=1, GE=2, EQ=3).
    fn add_constraint(&mut self, coefficients: &[f64], comparison: i32, rhs: f64) -> bool;
    fn set_lowbo(&mut self, bounds: &[f64]) -> bool;
    fn set_upbo(&mut self, bounds: &[f64]) -> bool;
    fn set_lowbo_single(&mut self, column: usize, value: f64) -> bool;
    fn set_upbo_single(&mut self, column: usize, value: f64) -> bool;
    fn set_int(&mut self, column: usize, flag: bool) -> bool;
    fn set_binary(&mut self, column: usize, flag: bool) -> bool;

    /// Run the engine. Returns the status code.
    fn solve(&mut self) -> i32;

    fn get_working_objective(&self) -> f64;
    fn get_solutioncount(&self) -> usize;
    /// Variable values of the last solve, `None` if there is nothing to report.
    fn get_variables(&self) -> Option<Vec<f64>>;
    fn get_status(&self) -> i32;
    /// The engine's own text for a status code.
    fn get_statustext(&self, code: i32) -> String;
    fn get_total_iter(&self) -> u64;

    fn get_ncolumns(&self) -> usize;
    fn get_nrows(&self) -> usize;
    fn get_lowbo(&self, column: usize) -> Option<f64>;
    fn get_upbo(&self, column: usize) -> Option<f64>;
    fn is_int(&self, column: usize) -> bool;
    fn is_binary(&self, column: usize) -> bool;
    fn is_maxim(&self) -> bool;
    fn get_scaling(&self) -> u32;
    fn get_verbose(&self) -> i32;
    fn get_timeout(&self) -> u64;

    /// Release the model. Called exactly once, after which the model is not used.
    fn delete_lp(&mut self);
}
