//! Sub-configuration structs with their defaults.

use crate::formatter::FormatterKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Level for channels without an override
    pub default_level: String,

    /// Per-channel overrides, `CH1:level1,CH2:level2`
    pub channels: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            channels: String::new(),
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Which formatter renders entries
    pub formatter: FormatterKind,

    /// Include the producing thread id in every entry
    pub thread_id: bool,

    /// Merge per-thread metadata into every entry
    pub metadata: bool,

    /// Service name stamped on every entry (empty for none)
    pub service_name: String,
}

/// Where entries go.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write to standard output
    pub stdout: bool,

    /// Write to standard error
    pub stderr: bool,

    /// Files to append to (opened by the caller; `~` is expanded)
    pub files: Vec<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            stdout: true,
            stderr: false,
            files: Vec::new(),
        }
    }
}
