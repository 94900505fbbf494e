// Domain module: value objects, models, the constraint grammar and the engine boundary

pub mod grammar;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use models::*;
pub use solver_service::*;
pub use value_objects::*;
