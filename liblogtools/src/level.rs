/*
 * Severity levels and level filters
 *
 * Level is the severity attached to a single log call. LevelFilter is the
 * threshold configured on a logger group, including the two pseudo levels
 * `all` and `off`. Both are ordered so that a filter enables every level whose
 * ordinal is at or below its own.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Log severity of a single message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Level {
    Fatal = 1,
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
    Trace = 6,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold configured for a logger group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LevelFilter {
    Off = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Trace = 6,
    All = 7,
}

// Recognized level names, matched as prefixes of the configured value
const TOKENS: [(&str, LevelFilter); 8] = [
    ("fatal", LevelFilter::Fatal),
    ("error", LevelFilter::Error),
    ("warn", LevelFilter::Warn),
    ("info", LevelFilter::Info),
    ("debug", LevelFilter::Debug),
    ("trace", LevelFilter::Trace),
    ("all", LevelFilter::All),
    ("off", LevelFilter::Off),
];

impl LevelFilter {
    /// Returns true when messages of `level` pass this filter.
    #[inline]
    pub fn enables(self, level: Level) -> bool {
        (level as u8) <= (self as u8)
    }

    /// Parses a configuration token.
    ///
    /// Matching is case-insensitive and accepts any value that starts with a
    /// known level name (`"Debugging"` is `Debug`). When several names match,
    /// the longest one wins. Returns `None` for anything unrecognized.
    pub fn parse_token(token: &str) -> Option<LevelFilter> {
        let token = token.trim().to_ascii_lowercase();
        TOKENS
            .iter()
            .filter(|(name, _)| token.starts_with(name))
            .max_by_key(|(name, _)| name.len())
            .map(|(_, filter)| *filter)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelFilter::Off => "OFF",
            LevelFilter::Fatal => "FATAL",
            LevelFilter::Error => "ERROR",
            LevelFilter::Warn => "WARN",
            LevelFilter::Info => "INFO",
            LevelFilter::Debug => "DEBUG",
            LevelFilter::Trace => "TRACE",
            LevelFilter::All => "ALL",
        }
    }

    pub(crate) fn from_u8(value: u8) -> LevelFilter {
        match value {
            0 => LevelFilter::Off,
            1 => LevelFilter::Fatal,
            2 => LevelFilter::Error,
            3 => LevelFilter::Warn,
            4 => LevelFilter::Info,
            5 => LevelFilter::Debug,
            6 => LevelFilter::Trace,
            _ => LevelFilter::All,
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Same token rules as the property loader, so a TOML file accepts "WARN" or "warning"
impl<'de> Deserialize<'de> for LevelFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LevelFilter::parse_token(&s).ok_or_else(|| {
            serde::de::Error::unknown_variant(
                &s,
                &["fatal", "error", "warn", "info", "debug", "trace", "all", "off"],
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitive_prefixes() {
        assert_eq!(LevelFilter::parse_token("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(LevelFilter::parse_token("  Warning "), Some(LevelFilter::Warn));
        assert_eq!(LevelFilter::parse_token("tracer"), Some(LevelFilter::Trace));
        assert_eq!(LevelFilter::parse_token("off"), Some(LevelFilter::Off));
        assert_eq!(LevelFilter::parse_token("ALL"), Some(LevelFilter::All));
        assert_eq!(LevelFilter::parse_token("fatal"), Some(LevelFilter::Fatal));
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert_eq!(LevelFilter::parse_token("verbose"), None);
        assert_eq!(LevelFilter::parse_token(""), None);
        assert_eq!(LevelFilter::parse_token("deb"), None);
    }

    #[test]
    fn filter_enables_levels_at_or_above_severity() {
        assert!(LevelFilter::Warn.enables(Level::Error));
        assert!(LevelFilter::Warn.enables(Level::Warn));
        assert!(!LevelFilter::Warn.enables(Level::Info));
        assert!(LevelFilter::All.enables(Level::Trace));
        assert!(!LevelFilter::Off.enables(Level::Fatal));
        assert!(LevelFilter::Fatal.enables(Level::Fatal));
        assert!(!LevelFilter::Fatal.enables(Level::Error));
    }

    #[test]
    fn u8_conversion_matches_ordinal() {
        for filter in [
            LevelFilter::Off,
            LevelFilter::Fatal,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
            LevelFilter::Trace,
            LevelFilter::All,
        ] {
            assert_eq!(LevelFilter::from_u8(filter as u8), filter);
        }
    }

    #[test]
    fn deserializes_from_toml_value() {
        #[derive(Deserialize)]
        struct Holder {
            level: LevelFilter,
        }
        let holder: Holder = toml::from_str("level = \"Error\"").unwrap();
        assert_eq!(holder.level, LevelFilter::Error);
        assert!(toml::from_str::<Holder>("level = \"loud\"").is_err());
    }
}
