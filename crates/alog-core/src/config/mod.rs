//! Configuration management for alog.
//!
//! Configuration is loaded from a TOML file (platform config dir, falling back
//! to `~/.alog/config.toml`). Every section has defaults, so an empty or
//! missing file yields a usable setup: `info` everywhere, standard
//! formatter, stdout.

mod types;
mod validate;

pub use types::*;

use crate::error::{ConfigError, Result};
use crate::registry::Registry;
use crate::sink::Sink;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default level and channel overrides
    pub filters: FilterConfig,

    /// Formatter and annotations
    pub format: FormatConfig,

    /// Sinks
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> std::result::Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.alog.alog/config.toml
    /// - Linux: ~/.config/alog/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\alog\config\config.toml
    ///
    /// Falls back to ~/.alog/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "alog", "alog")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".alog").join("config.toml")
            })
    }

    /// File sink paths with `~` expanded.
    pub fn resolved_files(&self) -> Vec<PathBuf> {
        self.output
            .files
            .iter()
            .map(|path| {
                let raw = path.to_string_lossy();
                PathBuf::from(shellexpand::tilde(&raw).into_owned())
            })
            .collect()
    }

    /// Install this configuration on a registry.
    ///
    /// Levels, formatter, flags, service name and the stdout/stderr sinks are
    /// applied. File sinks are left to the caller, which owns opening them.
    /// Levels are parsed first, so a bad spec leaves the registry unchanged.
    pub fn apply(&self, registry: &Registry) -> Result<()> {
        registry.setup_filters(&self.filters.channels, &self.filters.default_level)?;
        registry.set_formatter_kind(self.format.formatter);

        if self.format.thread_id {
            registry.enable_thread_id();
        } else {
            registry.disable_thread_id();
        }
        if self.format.metadata {
            registry.enable_metadata();
        } else {
            registry.disable_metadata();
        }
        registry.set_service_name(self.format.service_name.as_str());

        if self.output.stdout {
            registry.add_sink(Sink::stdout());
        }
        if self.output.stderr {
            registry.add_sink(Sink::stderr());
        }
        Ok(())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> std::result::Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
