/*
 * LogTools facade
 *
 * This file implements the level-gated dispatch path:
 * - Construction from an explicit LogToolsConfig and a backend sink
 * - Logger resolution, either the single default logger or one logger per
 *   calling module when granular mode is on
 * - The optional process-wide instance used by the logging macros, installed
 *   explicitly or built lazily from the environment on first use
 * - Runtime level changes that propagate to every live logger
 *
 * Granular mode resolves the logger from the call site before the level check.
 * That costs a registry lookup per call, plus one allocation the first time a
 * module logs, so it is announced once when the facade is built.
 */

use once_cell::sync::OnceCell;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{normalize_group, LogToolsConfig};
use crate::error::{LogToolsError, Result};
use crate::level::{Level, LevelFilter};
use crate::location::CallerLocation;
use crate::outputs::{ConsoleBackend, LogBackend, Record};
use crate::registry::{LevelTable, LoggerHandle, LoggerRegistry};

/// Name of the logger used for every call when granular mode is off.
pub const DEFAULT_LOGGER: &str = "liblogtools";

static GLOBAL: OnceCell<LogTools> = OnceCell::new();

pub struct LogTools {
    granular: bool,
    backend: Arc<dyn LogBackend>,
    levels: RwLock<LevelTable>,
    registry: LoggerRegistry,
    default_logger: Arc<LoggerHandle>,
}

/// Logger resolved for one call
pub enum LoggerRef<'a> {
    Default(&'a LoggerHandle),
    Named(Arc<LoggerHandle>),
}

impl Deref for LoggerRef<'_> {
    type Target = LoggerHandle;

    fn deref(&self) -> &LoggerHandle {
        match self {
            LoggerRef::Default(handle) => *handle,
            LoggerRef::Named(handle) => handle.as_ref(),
        }
    }
}

impl LogTools {
    pub fn new(config: LogToolsConfig, backend: Arc<dyn LogBackend>) -> Self {
        let table = LevelTable::new(config.root_level(), config.levels().clone());
        let registry = LoggerRegistry::new();
        let default_logger = registry.get_or_create(DEFAULT_LOGGER, || {
            LoggerHandle::new(DEFAULT_LOGGER, table.resolve(DEFAULT_LOGGER), Arc::clone(&backend))
        });

        let tools = LogTools {
            granular: config.is_granular(),
            backend,
            levels: RwLock::new(table),
            registry,
            default_logger,
        };

        if tools.granular {
            let reason = if config.granular_implied() {
                "enabled by per-group levels"
            } else {
                "enabled"
            };
            // Bypasses level filtering, a strict root level must not hide it
            let location = crate::caller_location!();
            let notice = tools.backend.write(&Record::new(
                Level::Warn,
                DEFAULT_LOGGER,
                format_args!(
                    "{}: Granular logging {}: loggers are resolved per module before the level \
                     check, which adds a registry lookup to every call",
                    location, reason
                ),
            ));
            if let Err(e) = notice {
                eprintln!("Failed to write log: {}", e);
            }
        }

        tools
    }

    /// Facade writing to the console.
    pub fn with_console(config: LogToolsConfig) -> Self {
        Self::new(config, Arc::new(ConsoleBackend::new()))
    }

    /// Facade configured from the process environment, writing to the console.
    pub fn from_env() -> Self {
        Self::with_console(LogToolsConfig::from_env())
    }

    /// Makes `tools` the process-wide instance used by the logging macros.
    pub fn install(tools: LogTools) -> Result<&'static LogTools> {
        let mut tools = Some(tools);
        let installed = GLOBAL.get_or_init(|| tools.take().unwrap_or_else(LogTools::from_env));
        match tools {
            None => Ok(installed),
            Some(_) => Err(LogToolsError::AlreadyInstalled),
        }
    }

    /// The process-wide instance, built from the environment on first use.
    pub fn global() -> &'static LogTools {
        GLOBAL.get_or_init(LogTools::from_env)
    }

    pub fn is_granular(&self) -> bool {
        self.granular
    }

    pub fn registry(&self) -> &LoggerRegistry {
        &self.registry
    }

    pub fn default_logger(&self) -> &LoggerHandle {
        &self.default_logger
    }

    /// Returns the one logger registered under `name`, creating it on first use.
    pub fn get_or_create(&self, name: &str) -> Arc<LoggerHandle> {
        if let Some(handle) = self.registry.get(name) {
            return handle;
        }
        // Held across the insert so a concurrent set_level cannot miss the new handle
        let levels = self.levels.read().unwrap_or_else(PoisonError::into_inner);
        let handle = self.registry.get_or_create(name, || {
            LoggerHandle::new(name, levels.resolve(name), Arc::clone(&self.backend))
        });
        handle
    }

    /// Per-name lookup that is only meaningful in granular mode.
    ///
    /// # Panics
    ///
    /// Panics when granular mode is disabled.
    pub fn granular_logger(&self, name: &str) -> Arc<LoggerHandle> {
        assert!(
            self.granular,
            "granular_logger({}) called while granular logging is disabled",
            name
        );
        self.get_or_create(name)
    }

    /// Logger a call from `location` goes to.
    #[inline]
    pub fn logger_at(&self, location: &CallerLocation) -> LoggerRef<'_> {
        if self.granular {
            LoggerRef::Named(self.get_or_create(location.logger_name()))
        } else {
            LoggerRef::Default(&self.default_logger)
        }
    }

    pub fn is_enabled(&self, level: Level, location: &CallerLocation) -> bool {
        self.logger_at(location).is_enabled(level)
    }

    pub fn is_fatal_enabled(&self, location: &CallerLocation) -> bool {
        self.is_enabled(Level::Fatal, location)
    }

    pub fn is_error_enabled(&self, location: &CallerLocation) -> bool {
        self.is_enabled(Level::Error, location)
    }

    pub fn is_warn_enabled(&self, location: &CallerLocation) -> bool {
        self.is_enabled(Level::Warn, location)
    }

    pub fn is_info_enabled(&self, location: &CallerLocation) -> bool {
        self.is_enabled(Level::Info, location)
    }

    pub fn is_debug_enabled(&self, location: &CallerLocation) -> bool {
        self.is_enabled(Level::Debug, location)
    }

    pub fn is_trace_enabled(&self, location: &CallerLocation) -> bool {
        self.is_enabled(Level::Trace, location)
    }

    /// Logs preformatted arguments.
    ///
    /// Arguments are evaluated by the caller before this runs; the macros avoid
    /// that by checking the level first.
    pub fn log(&self, level: Level, location: &CallerLocation, message: fmt::Arguments<'_>) {
        self.logger_at(location).log(level, location, message);
    }

    /// Builds the message only when `level` is enabled.
    pub fn log_lazy<F, M>(&self, level: Level, location: &CallerLocation, producer: F)
    where
        F: FnOnce() -> M,
        M: fmt::Display,
    {
        let logger = self.logger_at(location);
        if logger.is_enabled(level) {
            logger.dispatch(level, location, format_args!("{}", producer()));
        }
    }

    pub fn root_level(&self) -> LevelFilter {
        self.levels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .root()
    }

    /// Effective level a logger named `name` has or would get.
    pub fn level_of(&self, name: &str) -> LevelFilter {
        match self.registry.get(name) {
            Some(handle) => handle.level(),
            None => self
                .levels
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .resolve(name),
        }
    }

    pub fn set_root_level(&self, filter: LevelFilter) {
        let mut levels = self.levels.write().unwrap_or_else(PoisonError::into_inner);
        levels.set_root(filter);
        self.refresh(&levels);
    }

    /// Changes the level of `group` (dotted or `::` path) and of every logger under it.
    pub fn set_level(&self, group: &str, filter: LevelFilter) {
        let mut levels = self.levels.write().unwrap_or_else(PoisonError::into_inner);
        match normalize_group(group) {
            Some(group) => levels.set_group(group, filter),
            None => levels.set_root(filter),
        }
        self.refresh(&levels);
    }

    fn refresh(&self, levels: &LevelTable) {
        self.registry
            .for_each(|handle| handle.set_level(levels.resolve(handle.name())));
    }
}

impl fmt::Debug for LogTools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogTools")
            .field("granular", &self.granular)
            .field("root_level", &self.root_level())
            .field("loggers", &self.registry.len())
            .finish()
    }
}

/// Displays `None` as `null`, for messages that may be missing.
pub fn display_opt<T: fmt::Display>(value: Option<T>) -> DisplayOpt<T> {
    DisplayOpt(value)
}

pub struct DisplayOpt<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for DisplayOpt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("null"),
        }
    }
}
