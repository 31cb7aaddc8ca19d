pub mod config;
pub mod models;
pub mod tui;

pub use config::AppConfig;
pub use models::{AppRoot, ConfigSource};

// Re-export commonly used types
pub use arbor_core::{ArborError, ArborResult, RootNode, RuntimeConfig};
