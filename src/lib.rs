// Domain layer: value objects, models, constraint grammar and the engine boundary
pub mod domain;

// Application layer: the Solver orchestrator, hooks and configuration
pub mod application;

// Engine adapters: concrete implementations of LpEngine
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Comparison, Constraint, Direction, EngineBackend, LpEngine, LpModel, Problem, Result,
    Scaling, Solution, SolverError, StatusCode, VariableDesignation, Verbosity,
};

pub use application::{ConfigError, HookResult, ModelHandle, Solver, SolverOptions};

pub use solver::{Backend, BufferedEngine, EngineFactory, ModelState, SolveOutcome};
