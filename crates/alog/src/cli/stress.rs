//! The `alog stress` command: concurrent logging with a line-integrity check.
//!
//! Every worker thread logs through the same registry. An in-memory sink
//! captures everything, and afterwards each captured entry line is checked
//! for its full payload, so a torn write shows up as a failure.

use alog_core::{
    Level, MapData, Registry, ScopeBlock, ScopedIndent, ScopedMetadata, ScopedTimer, Sink,
};
use clap::Args;
use std::sync::{Arc, Mutex};
use std::thread;

use super::setup::{build_registry, EngineArgs};

const PAYLOAD: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Arguments for the `stress` command.
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Number of worker threads
    #[arg(long, default_value_t = 4)]
    pub threads: usize,

    /// Entries per thread
    #[arg(long, default_value_t = 1000)]
    pub lines: usize,

    /// Channel the workers log on
    #[arg(long, default_value = "LOAD")]
    pub channel: String,

    /// Level the workers log at
    #[arg(long, default_value = "info")]
    pub at: String,
}

/// Outcome of one stress run.
#[derive(Debug, PartialEq, Eq)]
pub struct StressReport {
    pub expected: usize,
    pub complete: usize,
    pub torn: usize,
}

/// Run the workers against `registry` and inspect what reached the sinks.
pub fn run(registry: &Registry, args: &StressArgs, level: Level) -> anyhow::Result<StressReport> {
    let captured = Arc::new(Mutex::new(Vec::<u8>::new()));
    registry.add_sink(Sink::new("stress-capture", captured.clone()));

    {
        let _timer = ScopedTimer::new(registry, "STRES", level, "stress run took ")?;
        thread::scope(|s| {
            for worker in 0..args.threads {
                s.spawn(move || worker_loop(registry, args, level, worker));
            }
        });
    }

    let raw = captured.lock().map_err(|_| anyhow::anyhow!("capture poisoned"))?;
    let text = String::from_utf8_lossy(&raw);
    let mut complete = 0;
    let mut torn = 0;
    for line in text.lines().filter(|line| line.contains("seq=")) {
        if line.contains(&format!("payload={PAYLOAD}")) {
            complete += 1;
        } else {
            torn += 1;
        }
    }

    Ok(StressReport {
        expected: args.threads * args.lines,
        complete,
        torn,
    })
}

fn worker_loop(registry: &Registry, args: &StressArgs, level: Level, worker: usize) {
    let _meta = ScopedMetadata::new(registry, "worker", worker);
    let _block = match ScopeBlock::new(registry, &args.channel, level, format!("worker {worker}")) {
        Ok(block) => block,
        Err(e) => {
            tracing::error!("worker {worker} could not start: {e}");
            return;
        }
    };
    let _indent = ScopedIndent::new(registry);

    for seq in 0..args.lines {
        let result = registry.log_with(&args.channel, level, MapData::new(), || {
            format!("worker={worker} seq={seq} payload={PAYLOAD}")
        });
        if let Err(e) = result {
            tracing::warn!("worker {worker} seq {seq}: {e}");
        }
    }
}

/// Execute the stress command.
pub fn execute(args: StressArgs, engine: &EngineArgs) -> anyhow::Result<()> {
    let level = Level::parse(&args.at)?;
    let registry = build_registry(engine)?;

    if !registry.filter(&args.channel, level)? {
        anyhow::bail!(
            "Channel {} is filtered out at level {}.\n  Hint: pass --level {} or --filters {}:{}",
            args.channel,
            level.as_str(),
            level.as_str(),
            args.channel,
            level.as_str()
        );
    }

    let report = run(&registry, &args, level)?;
    eprintln!(
        "{} threads x {} entries: {} complete, {} torn (expected {})",
        args.threads, args.lines, report.complete, report.torn, report.expected
    );

    if report.torn > 0 || report.complete != report.expected {
        anyhow::bail!("stress run lost or corrupted entries");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_delivers_every_entry_whole() {
        let registry = Registry::new();
        registry.setup_filters("", "info").unwrap();
        registry.enable_metadata();

        let args = StressArgs {
            threads: 6,
            lines: 150,
            channel: "LOAD".into(),
            at: "info".into(),
        };
        let report = run(&registry, &args, Level::Info).unwrap();

        assert_eq!(
            report,
            StressReport {
                expected: 900,
                complete: 900,
                torn: 0
            }
        );
        assert_eq!(registry.indent(), 0);
        assert_eq!(registry.active_threads(), 0);
    }

    #[test]
    fn test_run_json_formatter() {
        let registry = Registry::new();
        registry.setup_filters("LOAD:debug", "off").unwrap();
        registry.set_formatter_kind(alog_core::FormatterKind::Json);

        let args = StressArgs {
            threads: 3,
            lines: 50,
            channel: "LOAD".into(),
            at: "debug".into(),
        };
        let report = run(&registry, &args, Level::Debug).unwrap();
        assert_eq!(report.complete, 150);
        assert_eq!(report.torn, 0);
    }
}
