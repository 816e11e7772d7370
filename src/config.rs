//! orgchart configuration.
//!
//! Loaded from `~/.orgchart/config.toml`. Every key is optional and a missing
//! file means defaults.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::Level;

/// orgchart configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Seed file used when `--seed` is not provided.
    /// Falls back to the built-in demo organization.
    pub seed: Option<PathBuf>,

    /// Log verbosity: `error`, `warn`, `info`, `debug` or `trace`.
    /// Defaults to `warn`.
    pub log_level: Option<String>,
}

impl Config {
    /// Load config from `~/.orgchart/config.toml`.
    /// Returns an error only if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.orgchart/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".orgchart").join("config.toml"))
    }

    /// The configured log level.
    pub fn log_level(&self) -> Result<Level, String> {
        let Some(raw) = &self.log_level else {
            return Ok(Level::WARN);
        };
        raw.parse().map_err(|_| {
            format!("invalid log-level {raw:?}: expected error, warn, info, debug or trace")
        })
    }
}
