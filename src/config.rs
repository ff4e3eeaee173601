//! User configuration
//!
//! A project may pin the script used for each run mode in `.unirunrc` (or
//! `.unirunrc.json`) at its root:
//!
//! ```json
//! { "scripts": { "dev": "start:local", "build": "build:prod" } }
//! ```
//!
//! An explicit entry beats every detection heuristic for that mode. A config
//! file that cannot be read or parsed is reported and then ignored.

use crate::fs::FileSystem;
use crate::stack::RunMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Config file names, checked in this order
pub const CONFIG_FILES: &[&str] = &[".unirunrc", ".unirunrc.json"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-mode script overrides
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScriptOverrides {
    pub dev: Option<String>,
    pub build: Option<String>,
    pub prod: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    pub scripts: ScriptOverrides,
}

impl UserConfig {
    /// Explicit script for `mode`, if configured
    pub fn script_for(&self, mode: RunMode) -> Option<&str> {
        let script = match mode {
            RunMode::Dev => self.scripts.dev.as_deref(),
            RunMode::Build => self.scripts.build.as_deref(),
            RunMode::Prod => self.scripts.prod.as_deref(),
        };
        script.filter(|s| !s.trim().is_empty())
    }

    /// Reads the first config file present at `root`.
    ///
    /// Returns `Ok(None)` when no config file exists.
    pub fn read<F: FileSystem + ?Sized>(fs: &F, root: &Path) -> Result<Option<Self>, ConfigError> {
        let Some(path) = CONFIG_FILES
            .iter()
            .map(|name| root.join(name))
            .find(|path| fs.is_file(path))
        else {
            return Ok(None);
        };

        debug!("Reading config from {}", path.display());
        let content = fs.read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path, source })
    }

    /// Like [`UserConfig::read`], but a broken config is logged and treated as absent
    pub fn load<F: FileSystem + ?Sized>(fs: &F, root: &Path) -> Option<Self> {
        match Self::read(fs, root) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; ignoring configuration", e);
                None
            }
        }
    }
}
