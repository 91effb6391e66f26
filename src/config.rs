//! Configuration loading and management
//!
//! Optional TOML file at `<config-dir>/ht/config.toml`; every field has a
//! default so a missing file just means defaults.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::STORE_FILE;
use crate::task::Priority;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Priority assigned when none is given
    #[serde(default)]
    pub default_priority: Priority,

    /// Whether listings include completed tasks by default
    #[serde(default = "default_show_completed")]
    pub show_completed: bool,

    /// Store file override; defaults to the platform data directory
    #[serde(default)]
    pub store: Option<PathBuf>,
}

fn default_show_completed() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_priority: Priority::default(),
            show_completed: default_show_completed(),
            store: None,
        }
    }
}

impl Config {
    pub fn load(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from the platform config directory, or return defaults.
    ///
    /// A file that exists but fails to parse is a hard error; silently
    /// ignoring a typo'd config is worse than refusing to start.
    pub fn load_default() -> Result<Self> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
            .map_err(|err| Error::InvalidConfig(format!("{}: {err}", path.display())))
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ht").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Resolve the store file path: explicit flag > config > data dir.
    pub fn store_path(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path);
        }
        if let Some(path) = &self.store {
            return Ok(path.clone());
        }
        ProjectDirs::from("", "", "ht")
            .map(|dirs| dirs.data_dir().join(STORE_FILE))
            .ok_or_else(|| {
                Error::OperationFailed("could not determine a data directory".to_string())
            })
    }
}
