//! Scoped guards that pair an entry action with an exit action.
//!
//! Each guard borrows the [`Registry`] and runs its exit action in `Drop`, so
//! it fires on every path out of the block, including `?` and panics that
//! unwind. Guards are not `Clone`. Errors during drop cannot be returned and
//! are reported through `tracing` instead.

use crate::entry::MapData;
use crate::error::{LogError, LogResult};
use crate::level::Level;
use crate::registry::Registry;
use serde_json::Value;
use std::time::{Duration, Instant};

fn reject_off(level: Level) -> LogResult<()> {
    if level == Level::Off {
        return Err(LogError::LoggingToOffDisallowed);
    }
    Ok(())
}

fn report(result: LogResult<bool>, channel: &str) {
    if let Err(e) = result {
        tracing::warn!(channel, error = %e, "Scoped log write failed");
    }
}

/// Logs `Start: <msg>` on creation and `End: <msg>` when dropped.
pub struct ScopeBlock<'a> {
    registry: &'a Registry,
    channel: String,
    level: Level,
    message: String,
    map_data: MapData,
}

impl<'a> ScopeBlock<'a> {
    pub fn new(
        registry: &'a Registry,
        channel: impl Into<String>,
        level: Level,
        message: impl Into<String>,
    ) -> LogResult<Self> {
        Self::with_map(registry, channel, level, message, MapData::new())
    }

    /// Attach `map_data` to both the start and end entries.
    pub fn with_map(
        registry: &'a Registry,
        channel: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        map_data: MapData,
    ) -> LogResult<Self> {
        reject_off(level)?;
        let block = Self {
            registry,
            channel: channel.into(),
            level,
            message: message.into(),
            map_data,
        };
        block.emit("Start");
        Ok(block)
    }

    fn emit(&self, phase: &str) {
        let result = self.registry.log_with(
            &self.channel,
            self.level,
            self.map_data.clone(),
            || format!("{phase}: {}", self.message),
        );
        report(result, &self.channel);
    }
}

impl Drop for ScopeBlock<'_> {
    fn drop(&mut self) {
        self.emit("End");
    }
}

/// Times the enclosing block and logs `<msg><value><unit>` when dropped.
///
/// The clock only starts if the channel/level is enabled at creation.
pub struct ScopedTimer<'a> {
    registry: &'a Registry,
    channel: String,
    level: Level,
    message: String,
    map_data: MapData,
    started: Option<Instant>,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(
        registry: &'a Registry,
        channel: impl Into<String>,
        level: Level,
        message: impl Into<String>,
    ) -> LogResult<Self> {
        Self::with_map(registry, channel, level, message, MapData::new())
    }

    pub fn with_map(
        registry: &'a Registry,
        channel: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        map_data: MapData,
    ) -> LogResult<Self> {
        reject_off(level)?;
        let channel = channel.into();
        let started = registry.filter(&channel, level)?.then(Instant::now);
        Ok(Self {
            registry,
            channel,
            level,
            message: message.into(),
            map_data,
            started,
        })
    }

    /// Nanoseconds since the timer started; 0 if it never started.
    pub fn elapsed_ns(&self) -> u64 {
        self.started
            .map(|t0| u64::try_from(t0.elapsed().as_nanos()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        let Some(t0) = self.started else {
            return;
        };
        let elapsed = t0.elapsed();
        let result = self.registry.log_with(
            &self.channel,
            self.level,
            std::mem::take(&mut self.map_data),
            || format!("{}{}", self.message, format_elapsed(elapsed)),
        );
        report(result, &self.channel);
    }
}

/// Render a duration in the coarsest unit that keeps the value readable:
/// seconds from 0.1s, milliseconds from 1ms, microseconds from 1us.
pub fn format_elapsed(elapsed: Duration) -> String {
    let ns = elapsed.as_nanos();
    let secs = elapsed.as_secs_f64();
    if ns >= 100_000_000 {
        format!("{}s", significant(secs))
    } else if ns >= 1_000_000 {
        format!("{}ms", significant(secs * 1e3))
    } else if ns >= 1_000 {
        format!("{}us", significant(secs * 1e6))
    } else {
        format!("{ns}ns")
    }
}

/// Six significant digits with trailing zeros removed.
fn significant(value: f64) -> String {
    let int_digits = if value >= 1.0 {
        value.log10().floor() as usize + 1
    } else {
        0
    };
    let decimals = 6usize.saturating_sub(int_digits);
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Adds one indent level for the calling thread until dropped.
pub struct ScopedIndent<'a> {
    registry: &'a Registry,
    enabled: bool,
}

impl<'a> ScopedIndent<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        registry.add_indent();
        Self {
            registry,
            enabled: true,
        }
    }

    /// Indent only if `channel`/`level` is currently enabled.
    pub fn new_if(registry: &'a Registry, channel: &str, level: Level) -> LogResult<Self> {
        let enabled = registry.filter(channel, level)?;
        if enabled {
            registry.add_indent();
        }
        Ok(Self { registry, enabled })
    }

    pub fn is_active(&self) -> bool {
        self.enabled
    }
}

impl Drop for ScopedIndent<'_> {
    fn drop(&mut self) {
        if self.enabled {
            self.registry.remove_indent();
        }
    }
}

/// Attaches metadata to the calling thread until dropped.
///
/// Dropping removes exactly the keys this guard added. A key that already
/// existed is overwritten and then deleted outright; the earlier value is
/// not restored.
pub struct ScopedMetadata<'a> {
    registry: &'a Registry,
    keys: Vec<String>,
}

impl<'a> ScopedMetadata<'a> {
    pub fn new(registry: &'a Registry, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        registry.add_metadata(key.clone(), value);
        Self {
            registry,
            keys: vec![key],
        }
    }

    pub fn from_map<I, K>(registry: &'a Registry, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut keys = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            registry.add_metadata(key.clone(), value);
            keys.push(key);
        }
        Self { registry, keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl Drop for ScopedMetadata<'_> {
    fn drop(&mut self) {
        for key in &self.keys {
            self.registry.remove_metadata(key);
        }
    }
}

/// A `Start`/`End` block around a function body with the body indented.
///
/// The message reads `name( detail )`. The indent is released before the
/// `End` line, so both lines sit at the caller's depth.
pub struct ScopedFunction<'a> {
    // Field order is drop order: indent goes first.
    indent: ScopedIndent<'a>,
    _block: ScopeBlock<'a>,
}

impl<'a> ScopedFunction<'a> {
    pub fn new(
        registry: &'a Registry,
        channel: &str,
        level: Level,
        function: &str,
        detail: &str,
    ) -> LogResult<Self> {
        let block = ScopeBlock::new(registry, channel, level, format!("{function}( {detail} )"))?;
        let indent = ScopedIndent::new_if(registry, channel, level)?;
        Ok(Self {
            indent,
            _block: block,
        })
    }

    /// Trace-level function scope.
    pub fn trace(
        registry: &'a Registry,
        channel: &str,
        function: &str,
        detail: &str,
    ) -> LogResult<Self> {
        Self::new(registry, channel, Level::Trace, function, detail)
    }

    pub fn is_indented(&self) -> bool {
        self.indent.is_active()
    }
}
