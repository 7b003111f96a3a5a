//! Registry setup: config loading, command-line overrides, sinks.

use alog_core::{Config, FormatterKind, Registry};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use super::sinks;

/// Formatter choices on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatterArg {
    /// Human-readable lines
    Pretty,
    /// One JSON object per line
    Json,
}

impl From<FormatterArg> for FormatterKind {
    fn from(arg: FormatterArg) -> Self {
        match arg {
            FormatterArg::Pretty => FormatterKind::Standard,
            FormatterArg::Json => FormatterKind::Json,
        }
    }
}

/// Engine settings shared by every subcommand. Each flag overrides the
/// matching config file value.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Config file to load instead of the default location
    #[arg(long = "config", global = true, env = "ALOG_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Default level for channels without an override
    #[arg(long, global = true)]
    pub level: Option<String>,

    /// Channel overrides, e.g. "APP:debug,DB:warning"
    #[arg(long, global = true)]
    pub filters: Option<String>,

    /// Output formatter
    #[arg(long, global = true, value_enum)]
    pub formatter: Option<FormatterArg>,

    /// Include the thread id in every entry
    #[arg(long, global = true)]
    pub thread_id: bool,

    /// Merge per-thread metadata into every entry
    #[arg(long, global = true)]
    pub metadata: bool,

    /// Service name stamped on every entry
    #[arg(long, global = true)]
    pub service_name: Option<String>,

    /// Append entries to this file as well (repeatable)
    #[arg(long = "file", global = true)]
    pub files: Vec<PathBuf>,

    /// Do not write entries to stdout
    #[arg(long, global = true)]
    pub no_stdout: bool,
}

impl EngineArgs {
    /// Load the config file named by `--config`, or the default one.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let config = match &self.config_file {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Ok(config)
    }

    /// Fold command-line overrides into a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(level) = &self.level {
            config.filters.default_level = level.clone();
        }
        if let Some(filters) = &self.filters {
            config.filters.channels = filters.clone();
        }
        if let Some(formatter) = self.formatter {
            config.format.formatter = formatter.into();
        }
        if self.thread_id {
            config.format.thread_id = true;
        }
        if self.metadata {
            config.format.metadata = true;
        }
        if let Some(name) = &self.service_name {
            config.format.service_name = name.clone();
        }
        if self.no_stdout {
            config.output.stdout = false;
        }
        config.output.files.extend(self.files.iter().cloned());
    }
}

/// Load config, apply overrides, and build a ready registry with all sinks.
pub fn build_registry(args: &EngineArgs) -> anyhow::Result<Registry> {
    let mut config = args.load_config()?;
    args.apply_overrides(&mut config);
    registry_from_config(&config)
}

/// Build a registry from a fully resolved config.
pub fn registry_from_config(config: &Config) -> anyhow::Result<Registry> {
    let registry = Registry::new();
    config.apply(&registry)?;

    for path in config.resolved_files() {
        let sink = sinks::open_file_sink(&path)?;
        registry.add_sink(sink);
        tracing::debug!("Writing entries to {}", path.display());
    }

    if registry.sink_count() == 0 {
        tracing::warn!("No sinks configured; entries will be formatted but not written");
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alog_core::Level;

    #[test]
    fn test_overrides_win_over_config() {
        let args = EngineArgs {
            level: Some("debug".into()),
            filters: Some("APP:fatal".into()),
            formatter: Some(FormatterArg::Json),
            thread_id: true,
            no_stdout: true,
            ..Default::default()
        };
        let mut config = Config::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.filters.default_level, "debug");
        assert_eq!(config.filters.channels, "APP:fatal");
        assert_eq!(config.format.formatter, FormatterKind::Json);
        assert!(config.format.thread_id);
        assert!(!config.output.stdout);
    }

    #[test]
    fn test_registry_from_config_opens_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.log");

        let mut config = Config::default();
        config.output.stdout = false;
        config.output.files = vec![path.clone()];

        let registry = registry_from_config(&config).unwrap();
        assert_eq!(registry.sink_count(), 1);

        registry
            .log("APP", Level::Info, "to file", Default::default())
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[APP  :INFO] to file"));
    }

    #[test]
    fn test_bad_level_is_reported() {
        let mut config = Config::default();
        config.filters.default_level = "shouty".into();
        config.output.stdout = false;
        assert!(registry_from_config(&config).is_err());
    }
}
