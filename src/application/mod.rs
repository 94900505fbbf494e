// Application layer: solver orchestration, hook capabilities and configuration

pub mod config;
pub mod hooks;
pub mod solver;

pub use config::{ConfigError, SolverOptions};
pub use hooks::{AfterSolve, BeforeSolve, HookResult, ModelHandle};
pub use solver::Solver;
