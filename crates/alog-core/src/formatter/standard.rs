//! Human-readable formatter.

use super::LogFormatter;
use crate::entry::LogEntry;
use std::fmt::Write;

/// Channel names are cut or padded to this many characters in the header.
pub const CHANNEL_WIDTH: usize = 5;

/// One level of indentation.
pub const INDENT: &str = "  ";

/// Renders `2024/01/02 03:04:05 <svc> [CHANL:INFO:7]   message`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter;

impl StandardFormatter {
    fn header(entry: &LogEntry) -> String {
        let mut out = String::with_capacity(48 + entry.num_indent * INDENT.len());
        out.push_str(&entry.timestamp);

        if let Some(service) = &entry.service_name {
            let _ = write!(out, " <{service}>");
        }

        let channel: String = entry.channel.chars().take(CHANNEL_WIDTH).collect();
        let _ = write!(
            out,
            " [{channel:<width$}:{}",
            entry.level.code(),
            width = CHANNEL_WIDTH
        );
        if entry.log_thread_id {
            let _ = write!(out, ":{}", entry.thread_id_string());
        }
        out.push_str("] ");

        for _ in 0..entry.num_indent {
            out.push_str(INDENT);
        }
        out
    }
}

impl LogFormatter for StandardFormatter {
    fn format_entry(&self, entry: &LogEntry) -> Vec<String> {
        let header = Self::header(entry);
        let mut out = Vec::new();

        for line in entry.message.split_terminator('\n') {
            out.push(format!("{header}{line}\n"));
        }
        for (key, value) in &entry.map_data {
            out.push(format!("{header}{key}: {value}\n"));
        }
        out
    }
}
