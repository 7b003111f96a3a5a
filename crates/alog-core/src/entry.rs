//! The value handed to formatters.

use crate::level::Level;
use serde_json::{Map, Value};
use std::thread::{self, ThreadId};

/// Timestamp layout shared by both formatters.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Structured key/value data attached to an entry. Keys iterate sorted.
pub type MapData = Map<String, Value>;

/// One log statement, snapshotted at the moment it was emitted.
///
/// Everything a formatter needs is captured here, including the registry
/// flags, so formatting never has to go back to the registry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub channel: String,
    pub level: Level,
    pub message: String,
    /// Local wall-clock time, second resolution, [`TIMESTAMP_FORMAT`]
    pub timestamp: String,
    pub service_name: Option<String>,
    /// Indent depth of the producing thread
    pub num_indent: usize,
    pub thread_id: ThreadId,
    /// Whether the thread id should be rendered
    pub log_thread_id: bool,
    pub map_data: MapData,
}

impl LogEntry {
    /// Create an entry stamped with the current time and thread.
    pub fn new(channel: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            level,
            message: message.into(),
            timestamp: timestamp_now(),
            service_name: None,
            num_indent: 0,
            thread_id: thread::current().id(),
            log_thread_id: false,
            map_data: MapData::new(),
        }
    }

    /// Thread id rendered as its bare number, e.g. `7`.
    pub fn thread_id_string(&self) -> String {
        format_thread_id(self.thread_id)
    }
}

/// Current local time rendered with [`TIMESTAMP_FORMAT`].
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// `ThreadId` only exposes a Debug form (`ThreadId(7)`); strip it to the number.
pub fn format_thread_id(id: ThreadId) -> String {
    let raw = format!("{id:?}");
    raw.strip_prefix("ThreadId(")
        .and_then(|rest| rest.strip_suffix(')'))
        .map(str::to_string)
        .unwrap_or(raw)
}
