pub mod classify;
pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod orchestrator;
pub mod record;
pub mod region;
pub mod render;
pub mod tree;

pub use config::ViewConfig;
pub use error::{InitializationError, ValidationError};
pub use orchestrator::{Controls, InitControl, Orchestrator, StatusLine};
pub use region::{Phase, RegionId, Settlement};
pub use tree::{Node, VisualTree};
