// Engine adapters: in-process backends behind the foreign model surface

pub mod buffered;
pub mod factory;
#[cfg(any(feature = "microlp", feature = "coin_cbc"))]
pub mod good_lp_backend;
#[cfg(feature = "highs")]
pub mod highs_backend;
pub mod model_state;

pub use buffered::{Backend, BufferedEngine, BufferedModel};
pub use factory::EngineFactory;
#[cfg(any(feature = "microlp", feature = "coin_cbc"))]
pub use good_lp_backend::{GoodLpBackend, GoodLpKind};
#[cfg(feature = "highs")]
pub use highs_backend::HighsBackend;
pub use model_state::{status_text, ModelState, Row, SolveOutcome};
