//! Per-channel filter table and the `CH:level,CH:level` spec grammar.

use crate::error::{LogError, LogResult};
use crate::level::Level;
use std::collections::HashMap;

/// Channel overrides plus the fallback level for channels not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterTable {
    channels: HashMap<String, Level>,
    default_level: Level,
}

impl FilterTable {
    /// Build a table from a filter spec and a default level name.
    ///
    /// Both inputs are parsed completely before anything is returned, so a
    /// bad token anywhere rejects the whole configuration.
    pub fn parse(filter_spec: &str, default_level_spec: &str) -> LogResult<Self> {
        let channels = parse_filter_spec(filter_spec)?;
        let default_level = Level::parse(default_level_spec)?;
        Ok(Self {
            channels,
            default_level,
        })
    }

    /// Level configured for `channel`, falling back to the default.
    #[inline]
    pub fn level_for(&self, channel: &str) -> Level {
        self.channels
            .get(channel)
            .copied()
            .unwrap_or(self.default_level)
    }

    /// Whether an entry at `level` on `channel` passes this table.
    #[inline]
    pub fn allows(&self, channel: &str, level: Level) -> bool {
        self.level_for(channel).allows(level)
    }

    pub fn default_level(&self) -> Level {
        self.default_level
    }

    /// Channel overrides, sorted by channel name.
    pub fn overrides(&self) -> Vec<(&str, Level)> {
        let mut out: Vec<_> = self
            .channels
            .iter()
            .map(|(channel, level)| (channel.as_str(), *level))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}

/// Parse `CH1:level1,CH2:level2` into a channel map.
///
/// An empty (or all-whitespace) spec yields an empty map. Whitespace around a
/// whole pair is dropped; inside a pair, the channel is kept byte for byte and
/// the level must be an exact name. Every pair must split into exactly two
/// non-empty tokens.
pub fn parse_filter_spec(spec: &str) -> LogResult<HashMap<String, Level>> {
    let mut out = HashMap::new();
    if spec.trim().is_empty() {
        return Ok(out);
    }

    for pair in spec.split(',') {
        let parts: Vec<&str> = pair.trim().split(':').collect();
        match parts.as_slice() {
            [channel, level] if !channel.is_empty() && !level.is_empty() => {
                out.insert((*channel).to_string(), Level::parse(level)?);
            }
            _ => return Err(LogError::InvalidFilterSpec(spec.to_string())),
        }
    }
    Ok(out)
}
