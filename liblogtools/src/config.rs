/*
 * Configuration for the LogTools facade
 *
 * This module handles:
 * - Scanning process properties / environment for `log.level*` and `log.granular`
 * - Parsing the optional `[logging]` section of a TOML file
 * - Resolving the granular-mode precedence (explicit flag, then group keys, then off)
 *
 * A LogToolsConfig is built once at startup and handed to LogTools::new. Nothing
 * in here fails on bad input: unknown keys and unrecognized level tokens are
 * skipped and the defaults stay in place.
 */

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{LogToolsError, Result};
use crate::level::LevelFilter;

pub const GRANULAR_KEY: &str = "log.granular";
pub const ROOT_LEVEL_KEY: &str = "log.level";
pub const GROUP_LEVEL_PREFIX: &str = "log.level.";
pub const LEGACY_ROOT_LEVEL_KEY: &str = "ihmc.log.level";

// Environment spellings usable from a shell
const ENV_ROOT_LEVEL_KEY: &str = "LOG_LEVEL";
const ENV_GRANULAR_KEY: &str = "LOG_GRANULAR";

/// Immutable facade configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogToolsConfig {
    root_level: Option<LevelFilter>,
    levels: BTreeMap<String, LevelFilter>,
    granular: Option<bool>,
}

// Values stay untyped so one bad entry only drops that entry
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    level: Option<toml::Value>,
    #[serde(default)]
    granular: Option<toml::Value>,
    #[serde(default)]
    levels: BTreeMap<String, toml::Value>,
}

const LOGGING_SECTION: &str = "logging";

// Shell aliases, applied before the canonical keys so those win
const ALIAS_KEYS: [&str; 3] = [LEGACY_ROOT_LEVEL_KEY, ENV_ROOT_LEVEL_KEY, ENV_GRANULAR_KEY];

impl LogToolsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from key/value properties.
    ///
    /// Later entries override earlier ones for the same key.
    pub fn from_properties<I, K, V>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in properties {
            config.apply_property(key.as_ref(), value.as_ref());
        }
        config
    }

    /// Builds a configuration from the process environment.
    ///
    /// When several root keys are set, `log.level` beats `LOG_LEVEL`, which
    /// beats `ihmc.log.level`. `log.granular` beats `LOG_GRANULAR`.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut vars: BTreeMap<String, String> = vars.into_iter().collect();
        let mut ordered = Vec::with_capacity(vars.len());
        for key in ALIAS_KEYS {
            if let Some(value) = vars.remove(key) {
                ordered.push((key.to_string(), value));
            }
        }
        ordered.extend(vars);
        Self::from_properties(ordered)
    }

    /// Loads the `[logging]` section of a TOML file.
    ///
    /// A missing file is not an error: a warning goes to stderr and the default
    /// configuration is returned.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                eprintln!(
                    "Warning: config file '{}' not found, using default log levels",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(LogToolsError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let parse_error = |source: toml::de::Error| LogToolsError::ConfigParse {
            path: path.to_path_buf(),
            source,
        };
        let mut table = toml::from_str::<toml::Table>(&content).map_err(parse_error)?;
        // Accept a bare table without the [logging] header too
        let section = match table.remove(LOGGING_SECTION) {
            Some(section) => section,
            None => toml::Value::Table(table),
        };
        let file = section.try_into::<FileConfig>().map_err(parse_error)?;

        let mut config = Self {
            root_level: file.level.as_ref().and_then(level_value),
            granular: file.granular.as_ref().and_then(flag_value),
            ..Self::default()
        };
        for (group, value) in &file.levels {
            if let Some(filter) = level_value(value) {
                config.set_level(group, filter);
            }
        }
        Ok(config)
    }

    /// Overlays `other` on top of `self`; values set in `other` win.
    pub fn merge(mut self, other: LogToolsConfig) -> Self {
        if other.root_level.is_some() {
            self.root_level = other.root_level;
        }
        if other.granular.is_some() {
            self.granular = other.granular;
        }
        self.levels.extend(other.levels);
        self
    }

    pub fn with_root_level(mut self, filter: LevelFilter) -> Self {
        self.root_level = Some(filter);
        self
    }

    /// Sets the level of a named group. An empty group name sets the root level.
    pub fn with_level(mut self, group: &str, filter: LevelFilter) -> Self {
        self.set_level(group, filter);
        self
    }

    pub fn with_granular(mut self, granular: bool) -> Self {
        self.granular = Some(granular);
        self
    }

    pub fn root_level(&self) -> LevelFilter {
        self.root_level.unwrap_or_default()
    }

    pub fn levels(&self) -> &BTreeMap<String, LevelFilter> {
        &self.levels
    }

    /// Effective granular mode: an explicit flag always wins, otherwise any
    /// group level turns it on.
    pub fn is_granular(&self) -> bool {
        self.granular.unwrap_or(!self.levels.is_empty())
    }

    /// True when granular mode is on only because group levels are present.
    pub fn granular_implied(&self) -> bool {
        self.granular.is_none() && !self.levels.is_empty()
    }

    fn set_level(&mut self, group: &str, filter: LevelFilter) {
        match normalize_group(group) {
            Some(group) => {
                self.levels.insert(group, filter);
            }
            None => self.root_level = Some(filter),
        }
    }

    fn apply_property(&mut self, key: &str, value: &str) {
        match key {
            GRANULAR_KEY | ENV_GRANULAR_KEY => {
                if let Some(flag) = parse_flag(value) {
                    self.granular = Some(flag);
                }
            }
            ROOT_LEVEL_KEY | LEGACY_ROOT_LEVEL_KEY | ENV_ROOT_LEVEL_KEY => {
                if let Some(filter) = LevelFilter::parse_token(value) {
                    self.root_level = Some(filter);
                }
            }
            _ => {
                if let Some(group) = key.strip_prefix(GROUP_LEVEL_PREFIX) {
                    if let Some(filter) = LevelFilter::parse_token(value) {
                        self.set_level(group, filter);
                    }
                }
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn level_value(value: &toml::Value) -> Option<LevelFilter> {
    value.as_str().and_then(LevelFilter::parse_token)
}

fn flag_value(value: &toml::Value) -> Option<bool> {
    match value {
        toml::Value::Boolean(flag) => Some(*flag),
        toml::Value::String(flag) => parse_flag(flag),
        _ => None,
    }
}

/// Converts a dotted group path into a module path, `None` for the root group.
pub(crate) fn normalize_group(group: &str) -> Option<String> {
    let group = group.trim().replace('.', "::");
    let group = group.trim_matches(':');
    if group.is_empty() {
        None
    } else {
        Some(group.to_string())
    }
}
