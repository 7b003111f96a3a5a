//! The `alog emit` command.

use alog_core::{Level, MapData};
use clap::Args;
use serde_json::Value;

use super::setup::{build_registry, EngineArgs};

/// Arguments for the `emit` command.
#[derive(Args, Debug)]
pub struct EmitArgs {
    /// Channel name
    pub channel: String,

    /// Level name (fatal, error, warning, info, trace, debug, debug1..debug4)
    #[arg(value_name = "LEVEL")]
    pub severity: String,

    /// Message text; embedded newlines become separate lines
    #[arg(default_value = "")]
    pub message: String,

    /// Attach a key=value pair (value parsed as JSON when possible)
    #[arg(short = 'm', long = "meta", value_parser = parse_key_value)]
    pub meta: Vec<(String, Value)>,

    /// Render the thread id on this entry
    #[arg(long)]
    pub thread: bool,
}

/// Parse `key=value`; the value is JSON if it parses, else a string.
pub fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

/// Execute the emit command.
pub fn execute(args: EmitArgs, engine: &EngineArgs) -> anyhow::Result<()> {
    let level = Level::parse(&args.severity)?;
    let registry = build_registry(engine)?;

    if !registry.filter(&args.channel, level)? {
        tracing::info!(
            channel = %args.channel,
            level = level.as_str(),
            configured = registry.level_for(&args.channel).as_str(),
            "Entry suppressed by filters"
        );
        return Ok(());
    }

    let map: MapData = args.meta.into_iter().collect();
    if args.thread {
        registry.log_thread(&args.channel, level, &args.message, map)?;
    } else {
        registry.log(&args.channel, level, &args.message, map)?;
    }
    Ok(())
}
