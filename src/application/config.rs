//! Solver configuration.
//!
//! Options can be built in code or loaded from TOML:
//!
//! ```
//! use lpsolve_model::{Direction, SolverOptions, Verbosity};
//!
//! let options = SolverOptions::from_toml_str(r#"
//!     direction = "maximize"
//!     verbosity = "neutral"
//!     scaling = 131
//!     timeout_secs = 30
//!     throw_on_failure = true
//! "#).unwrap();
//!
//! assert_eq!(options.direction, Direction::Maximize);
//! assert_eq!(options.verbosity, Verbosity::Neutral);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    solver_service::SolverError,
    value_objects::{Direction, EngineBackend, Scaling, Verbosity},
};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<ConfigError> for SolverError {
    fn from(err: ConfigError) -> Self {
        SolverError::Config(err.to_string())
    }
}

/// Solver-level options. Every field is optional in TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Optimization direction
    pub direction: Direction,
    /// Engine backend to allocate models from
    pub backend: EngineBackend,
    /// Engine scaling flags, 0 disables scaling
    pub scaling: Scaling,
    /// Engine message level
    pub verbosity: Verbosity,
    /// Time limit in seconds. `None` means no limit.
    pub timeout_secs: Option<u64>,
    /// Fail with `SolveFailed` when the result is not optimal
    pub throw_on_failure: bool,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses options from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|&secs| secs > 0).map(Duration::from_secs)
    }
}
