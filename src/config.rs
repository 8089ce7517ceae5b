//! TOML configuration for the desk tools
//!
//! The configuration only names file locations. A missing file yields the
//! defaults, mirroring how a missing tasks file means "no tasks yet".
//!
//! ```toml
//! [todo]
//! file = "tasks.txt"
//!
//! [tickets]
//! database = "tickets.sqlite"
//!
//! [plot]
//! output_dir = "charts"
//! ```

use crate::error::DeskResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "deskkit.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub todo: TodoConfig,
    pub tickets: TicketsConfig,
    pub plot: PlotConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    /// Path of the `text|priority` tasks file
    pub file: PathBuf,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("tasks.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketsConfig {
    /// Path of the SQLite database holding the `tickets` table
    pub database: PathBuf,
}

impl Default for TicketsConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("tickets.sqlite"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Directory receiving rendered charts
    pub output_dir: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> DeskResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
