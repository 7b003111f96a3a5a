//! Severity levels.
//!
//! Levels form a strict total order where a larger ordinal means a more
//! verbose, less severe entry. `Off` is only a filter baseline and can never
//! be logged to.

use crate::error::{LogError, LogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered verbosity level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Off = 0,
    Fatal,
    Error,
    Warning,
    Info,
    Trace,
    Debug,
    Debug1,
    Debug2,
    Debug3,
    Debug4,
}

impl Level {
    /// Every level, least verbose first.
    pub const ALL: [Level; 11] = [
        Level::Off,
        Level::Fatal,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Trace,
        Level::Debug,
        Level::Debug1,
        Level::Debug2,
        Level::Debug3,
        Level::Debug4,
    ];

    /// Parse a level from its exact lowercase name.
    pub fn parse(s: &str) -> LogResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LogError::InvalidLevelSpec(s.to_string()))
    }

    /// Lowercase full name, as accepted by [`Level::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Off => "off",
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Debug1 => "debug1",
            Level::Debug2 => "debug2",
            Level::Debug3 => "debug3",
            Level::Debug4 => "debug4",
        }
    }

    /// Fixed-width code used in human-readable headers.
    pub fn code(self) -> &'static str {
        match self {
            Level::Off => "OFF ",
            Level::Fatal => "FATL",
            Level::Error => "ERRR",
            Level::Warning => "WARN",
            Level::Info => "INFO",
            Level::Trace => "TRCE",
            Level::Debug => "DBUG",
            Level::Debug1 => "DBG1",
            Level::Debug2 => "DBG2",
            Level::Debug3 => "DBG3",
            Level::Debug4 => "DBG4",
        }
    }

    /// Numeric position on the verbosity scale.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Whether a filter configured at `self` lets an entry at `level` through.
    #[inline]
    pub fn allows(self, level: Level) -> bool {
        self >= level
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_every_level() {
        for level in Level::ALL {
            assert_eq!(Level::parse(level.as_str()).unwrap(), level);
        }
    }

    #[test]
    fn test_ordering_matches_ordinals() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].ordinal() + 1, pair[1].ordinal());
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = Level::parse("verbose").unwrap_err();
        assert!(matches!(err, LogError::InvalidLevelSpec(ref s) if s == "verbose"));
        assert!(Level::parse("INFO").is_err());
        assert!(Level::parse("").is_err());
    }

    #[test]
    fn test_allows_is_monotonic() {
        for configured in Level::ALL {
            for message in Level::ALL.iter().copied().filter(|l| *l != Level::Off) {
                assert_eq!(
                    configured.allows(message),
                    message.ordinal() <= configured.ordinal()
                );
            }
        }
        for message in &Level::ALL[1..] {
            assert!(!Level::Off.allows(*message));
        }
    }

    #[test]
    fn test_codes_are_four_wide() {
        for level in Level::ALL {
            assert_eq!(level.code().len(), 4);
        }
        assert_eq!(Level::Warning.to_string(), "WARN");
    }

    #[test]
    fn test_from_str() {
        let level: Level = "debug3".parse().unwrap();
        assert_eq!(level, Level::Debug3);
    }
}
