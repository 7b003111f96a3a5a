//! Output formatters.
//!
//! A formatter turns one [`LogEntry`] into the exact lines written to every
//! sink. Two are provided:
//! - **standard**: fixed-order human-readable header, one line per message line
//! - **json**: one newline-delimited JSON object per entry

mod json;
mod standard;

pub use json::JsonFormatter;
pub use standard::{StandardFormatter, CHANNEL_WIDTH, INDENT};

use crate::entry::LogEntry;
use crate::error::LogError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Strategy converting an entry into output lines. Each line carries its own
/// trailing newline.
pub trait LogFormatter: Send + Sync {
    fn format_entry(&self, entry: &LogEntry) -> Vec<String>;
}

/// Named formatter choices, used by configuration and the CLI.
///
/// Config files go through [`FormatterKind::parse`], so names are
/// case-insensitive there too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum FormatterKind {
    /// Human-readable lines
    #[default]
    Standard,
    /// One JSON object per line
    Json,
}

impl FormatterKind {
    /// Parse a formatter name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" | "pretty" => Some(Self::Standard),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Canonical name, as written back to config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Json => "json",
        }
    }

    /// Instantiate the formatter this kind names.
    pub fn build(self) -> Arc<dyn LogFormatter> {
        match self {
            Self::Standard => Arc::new(StandardFormatter),
            Self::Json => Arc::new(JsonFormatter),
        }
    }
}

impl FromStr for FormatterKind {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LogError::UnknownFormatter(s.to_string()))
    }
}

impl TryFrom<String> for FormatterKind {
    type Error = LogError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FormatterKind> for &'static str {
    fn from(kind: FormatterKind) -> Self {
        kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn test_kind_parse() {
        assert_eq!(FormatterKind::parse("pretty"), Some(FormatterKind::Standard));
        assert_eq!(FormatterKind::parse("STD"), Some(FormatterKind::Standard));
        assert_eq!(FormatterKind::parse("json"), Some(FormatterKind::Json));
        assert_eq!(FormatterKind::parse("xml"), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Json".parse::<FormatterKind>().unwrap(), FormatterKind::Json);
        let err = "xml".parse::<FormatterKind>().unwrap_err();
        assert!(matches!(err, LogError::UnknownFormatter(ref s) if s == "xml"));
    }

    #[test]
    fn test_kind_builds_matching_formatter() {
        let entry = LogEntry::new("APP", Level::Info, "hi");
        let json = FormatterKind::Json.build().format_entry(&entry);
        assert!(json[0].starts_with('{'));
        let std = FormatterKind::Standard.build().format_entry(&entry);
        assert!(std[0].contains("[APP  :INFO]"));
    }
}
