//! alog core - a thread-safe, channel and level filtered logging engine.
//!
//! Entries carry a free-form channel name and a [`Level`]. A [`Registry`]
//! decides cheaply whether an entry is observable and, if so, hands a
//! [`LogEntry`] to the active formatter and writes the resulting lines to
//! every registered [`Sink`].
//!
//! # Architecture
//!
//! ```text
//! caller → Registry::filter → Registry::log → LogFormatter::format_entry → sinks
//! ```
//!
//! Per-thread indentation and metadata live in the registry and are enriched
//! onto entries automatically. Scoped guards in [`scope`] pair entry and exit
//! actions with a block's lifetime.
//!
//! # Usage
//!
//! ```rust,no_run
//! use alog_core::{Level, MapData, Registry, ScopedIndent, Sink};
//!
//! fn main() -> alog_core::Result<()> {
//!     let registry = Registry::new();
//!     registry.setup_filters("DB:debug", "info")?;
//!     registry.add_sink(Sink::stdout());
//!
//!     if registry.filter("DB", Level::Debug)? {
//!         registry.log("DB", Level::Debug, "connected", MapData::new())?;
//!     }
//!
//!     let _indent = ScopedIndent::new(&registry);
//!     registry.log_with("APP", Level::Info, MapData::new(), || format!("ready in {}ms", 12))?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod level;
pub mod registry;
pub mod scope;
pub mod sink;

// Re-exports for convenient access
pub use config::Config;
pub use context::{Metadata, ThreadContexts};
pub use entry::{LogEntry, MapData};
pub use error::{AlogError, ConfigError, LogError, LogResult, Result};
pub use filter::FilterTable;
pub use formatter::{FormatterKind, JsonFormatter, LogFormatter, StandardFormatter};
pub use level::Level;
pub use registry::Registry;
pub use scope::{ScopeBlock, ScopedFunction, ScopedIndent, ScopedMetadata, ScopedTimer};
pub use sink::Sink;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_end_to_end_example() {
        use std::sync::{Arc, Mutex};

        let registry = Registry::new();
        registry.setup_filters("APP:info", "error").unwrap();
        let buffer = Arc::new(Mutex::new(Vec::<u8>::new()));
        registry.add_sink(Sink::new("mem", buffer.clone()));

        for channel in ["APP", "OTHER"] {
            registry
                .log_with(channel, Level::Info, MapData::new(), || "hello".to_string())
                .unwrap();
        }

        let out = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("[APP  :INFO] hello"));
    }
}
