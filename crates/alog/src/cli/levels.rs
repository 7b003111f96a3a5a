//! The `alog levels` command: explain what the current filters let through.

use alog_core::{Level, Registry};
use clap::Args;

use super::setup::EngineArgs;

/// Arguments for the `levels` command.
#[derive(Args, Debug)]
pub struct LevelsArgs {
    /// Channels to report on (defaults to the configured overrides)
    pub channels: Vec<String>,
}

/// One row of the report.
fn describe(registry: &Registry, channel: &str) -> String {
    let enabled: Vec<&str> = Level::ALL
        .iter()
        .copied()
        .filter(|level| registry.is_enabled(channel, *level))
        .map(Level::as_str)
        .collect();

    let enabled = if enabled.is_empty() {
        "(nothing)".to_string()
    } else {
        enabled.join(" ")
    };
    format!(
        "{channel:<12} {:<8} {enabled}",
        registry.level_for(channel).as_str()
    )
}

/// Execute the levels command.
pub fn execute(args: LevelsArgs, engine: &EngineArgs) -> anyhow::Result<()> {
    let mut config = engine.load_config()?;
    engine.apply_overrides(&mut config);
    let registry = build_registry_quiet(&config)?;

    let channels: Vec<String> = if args.channels.is_empty() {
        alog_core::FilterTable::parse(&config.filters.channels, &config.filters.default_level)?
            .overrides()
            .into_iter()
            .map(|(channel, _)| channel.to_string())
            .collect()
    } else {
        args.channels
    };

    println!("default: {}", registry.default_level().as_str());
    for channel in &channels {
        println!("{}", describe(&registry, channel));
    }
    Ok(())
}

/// Levels only needs the filter table, never sinks.
fn build_registry_quiet(config: &alog_core::Config) -> anyhow::Result<Registry> {
    let registry = Registry::new();
    registry.setup_filters(&config.filters.channels, &config.filters.default_level)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_enabled_levels() {
        let registry = Registry::new();
        registry.setup_filters("APP:warning", "off").unwrap();

        let row = describe(&registry, "APP");
        assert!(row.starts_with("APP"));
        assert!(row.ends_with("fatal error warning"));
        assert!(!row.contains("off "));

        let row = describe(&registry, "OTHER");
        assert!(row.ends_with("(nothing)"));
    }
}
