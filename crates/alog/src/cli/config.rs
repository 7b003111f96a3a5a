//! The `alog config` command for configuration management.

use alog_core::Config;
use clap::{Args, Subcommand};

use super::setup::EngineArgs;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration (file plus command-line overrides)
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, engine: &EngineArgs) -> anyhow::Result<()> {
    let path = engine.config_file.clone().unwrap_or_else(Config::default_path);

    match args.command {
        ConfigCommand::Show => {
            let mut config = engine.load_config()?;
            engine.apply_overrides(&mut config);
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = Config::default().to_toml()?;
            std::fs::write(&path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_at(path: std::path::PathBuf) -> EngineArgs {
        EngineArgs {
            config_file: Some(path),
            ..Default::default()
        }
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alog").join("config.toml");
        let engine = engine_at(path.clone());

        execute(
            ConfigArgs {
                command: ConfigCommand::Init { force: false },
            },
            &engine,
        )
        .unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.filters.default_level, "info");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();
        let engine = engine_at(path.clone());

        let err = execute(
            ConfigArgs {
                command: ConfigCommand::Init { force: false },
            },
            &engine,
        )
        .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        execute(
            ConfigArgs {
                command: ConfigCommand::Init { force: true },
            },
            &engine,
        )
        .unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[filters]"));
    }
}
