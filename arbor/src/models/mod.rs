//! The example application tree
//!
//! ```text
//! AppRoot
//! ├── Configurator (leaf)
//! └── Dashboard (branch, core application)
//!     └── Heartbeat (leaf)
//! ```

pub mod configurator;
pub mod dashboard;
pub mod heartbeat;
pub mod root;

use std::path::PathBuf;

use arbor_core::{ArborError, Command, Message, NodeId};

use crate::config::AppConfig;

pub use configurator::Configurator;
pub use dashboard::Dashboard;
pub use heartbeat::Heartbeat;
pub use root::AppRoot;

/// A complete configuration is available.
#[derive(Debug, Clone)]
pub struct ConfigReady(pub AppConfig);

/// The configuration must be filled in; carries whatever was loaded.
#[derive(Debug, Clone)]
pub struct ConfigMissing(pub AppConfig);

/// One heartbeat tick for the heartbeat node `target`.
#[derive(Debug, Clone)]
pub struct Beat {
    pub target: NodeId,
}

/// Where the configuration lives and whether the form is forced.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub force_form: bool,
}

impl ConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            force_form: false,
        }
    }

    pub fn force_form(mut self, force: bool) -> Self {
        self.force_form = force;
        self
    }

    /// Load the file off the update path and report `ConfigReady`,
    /// `ConfigMissing` or an error.
    pub fn load(&self) -> Command {
        let source = self.clone();
        Command::future(async move {
            let path = source.path.clone();
            match tokio::task::spawn_blocking(move || AppConfig::load(&path)).await {
                Ok(Ok(config)) if config.is_complete() && !source.force_form => {
                    Message::app(ConfigReady(config))
                }
                Ok(Ok(config)) => Message::app(ConfigMissing(config)),
                Ok(Err(err)) => Message::error(err),
                Err(err) => Message::error(join_error("loading configuration", err)),
            }
        })
    }

    /// Persist `config` and report `ConfigReady` once written.
    pub fn save(&self, config: AppConfig) -> Command {
        let path = self.path.clone();
        Command::future(async move {
            let saved = config.clone();
            match tokio::task::spawn_blocking(move || saved.save(&path)).await {
                Ok(Ok(())) => Message::app(ConfigReady(config)),
                Ok(Err(err)) => Message::error(err),
                Err(err) => Message::error(join_error("saving configuration", err)),
            }
        })
    }
}

fn join_error(context: &str, err: tokio::task::JoinError) -> ArborError {
    ArborError::Internal {
        message: format!("{} task failed: {}", context, err),
    }
}
