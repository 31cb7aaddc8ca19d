//! Persisted application configuration
//!
//! Stored as TOML:
//!
//! ```toml
//! [profile]
//! name = "ada"
//! role = "engineer"
//! team = "compilers"
//!
//! [dashboard]
//! heartbeat_ms = 500
//! ```

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use arbor_core::{ArborError, ArborResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub profile: Profile,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub team: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Interval between heartbeats; the runtime default applies when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heartbeat_ms: Option<u64>,
}

impl Profile {
    /// Field labels and values in form order.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("Name", self.name.as_str()),
            ("Role", self.role.as_str()),
            ("Team", self.team.as_str()),
        ]
    }
}

impl AppConfig {
    /// `$HOME/.config/arbor/arbor.toml`
    pub fn default_path() -> ArborResult<PathBuf> {
        let home = std::env::var_os("HOME")
            .ok_or_else(|| ArborError::configuration("HOME is not set; pass --config"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("arbor")
            .join("arbor.toml"))
    }

    /// Read the file at `path`. A missing file is an empty configuration.
    pub fn load(path: &Path) -> ArborResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        toml::from_str(&text)
            .map_err(|e| ArborError::domain(format!("parsing {}", path.display()), e))
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> ArborResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)
            .map_err(|e| ArborError::domain("serializing configuration", e))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Every profile field is filled in.
    pub fn is_complete(&self) -> bool {
        self.profile
            .fields()
            .iter()
            .all(|(_, value)| !value.trim().is_empty())
    }

    pub fn heartbeat(&self, fallback: Duration) -> Duration {
        match self.dashboard.heartbeat_ms {
            Some(ms) if ms > 0 => Duration::from_millis(ms),
            _ => fallback,
        }
    }
}
