pub mod contract;
pub mod models;
#[cfg(any(test, feature = "test-helpers"))]
pub mod scripted;

pub use contract::{Engine, EngineError, is_not_ready};
pub use models::{PredictionItem, format_combo};
