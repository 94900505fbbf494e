use std::sync::Arc;
use tracing::debug;

use super::buffered::BufferedEngine;
use crate::domain::{
    solver_service::{LpEngine, Result, SolverError},
    value_objects::EngineBackend,
};

#[cfg(any(feature = "microlp", feature = "coin_cbc"))]
use super::good_lp_backend::GoodLpBackend;
#[cfg(feature = "highs")]
use super::highs_backend::HighsBackend;

/// Factory for creating engines based on configuration
pub struct EngineFactory;

impl EngineFactory {
    /// Create an engine for a specific backend.
    ///
    /// Fails with `EngineUnavailable` when the backend is not compiled in.
    pub fn create(backend: EngineBackend) -> Result<Arc<dyn LpEngine>> {
        let resolved = match backend {
            EngineBackend::Auto => Self::available_backends()
                .first()
                .copied()
                .ok_or_else(|| {
                    SolverError::EngineUnavailable("no engine backend compiled in".to_string())
                })?,
            other => other,
        };
        debug!(
            component = "engine",
            operation = "create_engine",
            requested = %backend,
            resolved = %resolved,
            "Selecting engine backend"
        );

        match resolved {
            #[cfg(feature = "microlp")]
            EngineBackend::MicroLp => Ok(Arc::new(BufferedEngine::new(GoodLpBackend::microlp()))),
            #[cfg(feature = "coin_cbc")]
            EngineBackend::CoinCbc => Ok(Arc::new(BufferedEngine::new(GoodLpBackend::coin_cbc()))),
            #[cfg(feature = "highs")]
            EngineBackend::Highs => Ok(Arc::new(BufferedEngine::new(HighsBackend::new()))),
            other => Err(SolverError::EngineUnavailable(format!(
                "backend '{}' is not enabled in this build",
                other
            ))),
        }
    }

    /// Get the default engine
    pub fn default_engine() -> Result<Arc<dyn LpEngine>> {
        Self::create(EngineBackend::Auto)
    }

    /// Backends compiled into this build, in order of preference.
    pub fn available_backends() -> Vec<EngineBackend> {
        let mut backends = Vec::new();
        if cfg!(feature = "microlp") {
            backends.push(EngineBackend::MicroLp);
        }
        if cfg!(feature = "highs") {
            backends.push(EngineBackend::Highs);
        }
        if cfg!(feature = "coin_cbc") {
            backends.push(EngineBackend::CoinCbc);
        }
        backends
    }
}
