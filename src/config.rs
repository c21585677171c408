//! Configuration loading
//!
//! Reads `~/.config/edgetree/config.json` (platform config dir) when present.
//! Every field is optional in the file; missing ones take their defaults.

use crate::model::SymbolRange;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Runtime settings for the assembler and CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lowest valid symbol
    pub min_symbol: char,
    /// Highest valid symbol
    pub max_symbol: char,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_symbol: SymbolRange::DEFAULT.min(),
            max_symbol: SymbolRange::DEFAULT.max(),
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("edgetree").join(CONFIG_FILE))
    }

    /// Load from an explicit file; the file must exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.symbol_range()?;
        Ok(config)
    }

    /// Load from `path` if given, else the default location, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Config::default()),
        }
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Validated symbol range described by this config
    pub fn symbol_range(&self) -> Result<SymbolRange> {
        SymbolRange::new(self.min_symbol, self.max_symbol)
    }
}
