//! The registry: filter table, sinks, formatter, flags and per-thread context.
//!
//! One [`Registry`] is constructed explicitly and shared by reference (or
//! `Arc`) with every call site. All shared state sits behind a single mutex;
//! formatting and sink writes happen after the lock is released, using a
//! snapshot taken under it.
//!
//! Call sites are expected to check [`Registry::filter`] before building a
//! message and then call [`Registry::log`], which does no filtering of its
//! own. [`Registry::log_with`] does both and builds the message lazily.

use crate::context::{Metadata, ThreadContexts};
use crate::entry::{timestamp_now, LogEntry, MapData};
use crate::error::{LogError, LogResult};
use crate::filter::FilterTable;
use crate::formatter::{FormatterKind, LogFormatter, StandardFormatter};
use crate::level::Level;
use crate::sink::Sink;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

struct RegistryState {
    filters: FilterTable,
    sinks: Vec<Sink>,
    formatter: Option<Arc<dyn LogFormatter>>,
    service_name: Option<String>,
    thread_id: bool,
    metadata: bool,
    contexts: ThreadContexts,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            filters: FilterTable::default(),
            sinks: Vec::new(),
            formatter: Some(Arc::new(StandardFormatter)),
            service_name: None,
            thread_id: false,
            metadata: false,
            contexts: ThreadContexts::new(),
        }
    }
}

/// Process-wide logging context.
///
/// A fresh registry has no sinks, no channel overrides, a default level of
/// `off` and the standard formatter installed.
#[derive(Default)]
pub struct Registry {
    state: Mutex<RegistryState>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // === Configuration ===

    /// Replace the channel filters and default level.
    ///
    /// The filter string is parsed in full before the lock is taken; on error
    /// nothing changes.
    pub fn setup_filters(&self, filter_spec: &str, default_level_spec: &str) -> LogResult<()> {
        let table = FilterTable::parse(filter_spec, default_level_spec)?;
        tracing::debug!(
            default_level = table.default_level().as_str(),
            overrides = table.overrides().len(),
            "Installing log filters"
        );
        self.lock().filters = table;
        Ok(())
    }

    /// Configure levels and attach stdout as a sink.
    pub fn setup(&self, default_level: &str, filter_spec: &str) -> LogResult<()> {
        self.setup_filters(filter_spec, default_level)?;
        self.add_sink(Sink::stdout());
        Ok(())
    }

    /// Change levels without touching sinks or the formatter.
    pub fn adjust_levels(&self, default_level: &str, filter_spec: &str) -> LogResult<()> {
        self.setup_filters(filter_spec, default_level)
    }

    pub fn add_sink(&self, sink: Sink) {
        tracing::debug!(sink = sink.name(), "Adding log sink");
        self.lock().sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.lock().sinks.len()
    }

    pub fn set_formatter<F>(&self, formatter: F)
    where
        F: LogFormatter + 'static,
    {
        self.lock().formatter = Some(Arc::new(formatter));
    }

    pub fn set_formatter_kind(&self, kind: FormatterKind) {
        tracing::debug!(?kind, "Switching log formatter");
        self.lock().formatter = Some(kind.build());
    }

    /// Remove the formatter; logging becomes a no-op until one is set.
    pub fn clear_formatter(&self) {
        self.lock().formatter = None;
    }

    pub fn enable_thread_id(&self) {
        self.lock().thread_id = true;
    }

    pub fn disable_thread_id(&self) {
        self.lock().thread_id = false;
    }

    pub fn thread_id_enabled(&self) -> bool {
        self.lock().thread_id
    }

    pub fn enable_metadata(&self) {
        self.lock().metadata = true;
    }

    pub fn disable_metadata(&self) {
        self.lock().metadata = false;
    }

    pub fn metadata_enabled(&self) -> bool {
        self.lock().metadata
    }

    /// Set the service name; an empty name unsets it.
    pub fn set_service_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.lock().service_name = (!name.is_empty()).then_some(name);
    }

    pub fn service_name(&self) -> Option<String> {
        self.lock().service_name.clone()
    }

    /// Return to the unconfigured state.
    ///
    /// Not meant to race with active logging; intended for shutdown and
    /// between test cases.
    pub fn reset(&self) {
        tracing::debug!("Resetting log registry");
        *self.lock() = RegistryState::default();
    }

    // === Filtering ===

    /// Whether an entry at `level` on `channel` would be emitted.
    ///
    /// Does not allocate. Asking about `off` is a call-site bug and errors.
    #[inline]
    pub fn filter(&self, channel: &str, level: Level) -> LogResult<bool> {
        if level == Level::Off {
            return Err(LogError::LoggingToOffDisallowed);
        }
        Ok(self.lock().filters.allows(channel, level))
    }

    /// Infallible form of [`Registry::filter`]; `off` is never enabled.
    #[inline]
    pub fn is_enabled(&self, channel: &str, level: Level) -> bool {
        self.filter(channel, level).unwrap_or(false)
    }

    pub fn default_level(&self) -> Level {
        self.lock().filters.default_level()
    }

    pub fn level_for(&self, channel: &str) -> Level {
        self.lock().filters.level_for(channel)
    }

    // === Logging ===

    /// Format and write an entry to every sink. Performs no filtering.
    pub fn log(
        &self,
        channel: &str,
        level: Level,
        message: &str,
        map_data: MapData,
    ) -> LogResult<()> {
        self.emit(channel, level, message, map_data, false)
    }

    /// Like [`Registry::log`] but always renders the thread id.
    pub fn log_thread(
        &self,
        channel: &str,
        level: Level,
        message: &str,
        map_data: MapData,
    ) -> LogResult<()> {
        self.emit(channel, level, message, map_data, true)
    }

    /// Filter, then build the message and log it. Returns whether anything
    /// was emitted.
    pub fn log_with<F>(
        &self,
        channel: &str,
        level: Level,
        map_data: MapData,
        message: F,
    ) -> LogResult<bool>
    where
        F: FnOnce() -> String,
    {
        if !self.filter(channel, level)? {
            return Ok(false);
        }
        self.log(channel, level, &message(), map_data)?;
        Ok(true)
    }

    fn emit(
        &self,
        channel: &str,
        level: Level,
        message: &str,
        map_data: MapData,
        force_thread_id: bool,
    ) -> LogResult<()> {
        if level == Level::Off {
            return Err(LogError::LoggingToOffDisallowed);
        }

        let tid = thread::current().id();
        let (formatter, sinks, entry) = {
            let state = self.lock();
            let Some(formatter) = state.formatter.clone() else {
                return Ok(());
            };

            let mut merged = MapData::new();
            if state.metadata {
                state.contexts.merge_metadata_into(tid, &mut merged);
            }
            merged.extend(map_data);

            let entry = LogEntry {
                channel: channel.to_string(),
                level,
                message: message.to_string(),
                timestamp: timestamp_now(),
                service_name: state.service_name.clone(),
                num_indent: state.contexts.indent(tid),
                thread_id: tid,
                log_thread_id: force_thread_id || state.thread_id,
                map_data: merged,
            };
            (formatter, state.sinks.clone(), entry)
        };

        let mut first_err = None;
        for line in formatter.format_entry(&entry) {
            for sink in &sinks {
                if let Err(e) = sink.write_line(&line) {
                    first_err.get_or_insert(e);
                }
            }
        }

        match first_err {
            Some(e) => Err(LogError::Io(e)),
            None => Ok(()),
        }
    }

    // === Per-thread context ===

    pub fn add_indent(&self) {
        let tid = thread::current().id();
        self.lock().contexts.add_indent(tid);
    }

    /// Remove one indent level; a no-op at 0.
    pub fn remove_indent(&self) {
        let tid = thread::current().id();
        self.lock().contexts.remove_indent(tid);
    }

    pub fn indent(&self) -> usize {
        let tid = thread::current().id();
        self.lock().contexts.indent(tid)
    }

    pub fn add_metadata(&self, key: impl Into<String>, value: impl Into<Value>) {
        let tid = thread::current().id();
        self.lock().contexts.add_metadata(tid, key, value.into());
    }

    pub fn remove_metadata(&self, key: &str) {
        let tid = thread::current().id();
        self.lock().contexts.remove_metadata(tid, key);
    }

    pub fn clear_metadata(&self) {
        let tid = thread::current().id();
        self.lock().contexts.clear_metadata(tid);
    }

    /// Snapshot of the calling thread's metadata.
    pub fn metadata(&self) -> Metadata {
        let tid = thread::current().id();
        self.lock().contexts.metadata(tid)
    }

    /// Threads currently holding indentation or metadata.
    pub fn active_threads(&self) -> usize {
        self.lock().contexts.active_threads()
    }
}
