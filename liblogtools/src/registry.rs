/*
 * Logger handles and the process-wide registry
 *
 * A LoggerHandle is the per-name logger: its effective level lives in an atomic
 * so the enablement check is a single load, and it owns a shared reference to
 * the backend sink. The registry maps names to handles and guarantees that a
 * name is bound to exactly one handle, even when many threads log from a new
 * module at the same time.
 */

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::level::{Level, LevelFilter};
use crate::location::CallerLocation;
use crate::outputs::{LogBackend, Record};

/// A named logger
pub struct LoggerHandle {
    name: String,
    level: AtomicU8,
    backend: Arc<dyn LogBackend>,
}

impl LoggerHandle {
    pub(crate) fn new(name: &str, level: LevelFilter, backend: Arc<dyn LogBackend>) -> Self {
        LoggerHandle {
            name: name.to_string(),
            level: AtomicU8::new(level as u8),
            backend,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LevelFilter {
        LevelFilter::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub(crate) fn set_level(&self, level: LevelFilter) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_enabled(&self, level: Level) -> bool {
        (level as u8) <= self.level.load(Ordering::Relaxed)
    }

    /// Logs `message` if `level` is enabled.
    pub fn log(&self, level: Level, location: &CallerLocation, message: fmt::Arguments<'_>) {
        if self.is_enabled(level) {
            self.dispatch(level, location, message);
        }
    }

    /// Prefixes and writes a message without checking the level again.
    ///
    /// Callers are expected to have checked `is_enabled` first.
    pub fn dispatch(&self, level: Level, location: &CallerLocation, message: fmt::Arguments<'_>) {
        let result = self.backend.write(&Record::new(
            level,
            &self.name,
            format_args!("{}: {}", location, message),
        ));
        if let Err(e) = result {
            eprintln!("Failed to write log: {}", e);
        }
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("name", &self.name)
            .field("level", &self.level())
            .finish()
    }
}

/// Name → handle map shared by every thread
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: DashMap<String, Arc<LoggerHandle>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an existing handle. Never allocates.
    pub fn get(&self, name: &str) -> Option<Arc<LoggerHandle>> {
        self.loggers.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the handle for `name`, building it with `make` if absent.
    ///
    /// The insert is atomic per name: when several threads miss at once only
    /// one `make` result is kept and all of them get that handle.
    pub fn get_or_create<F>(&self, name: &str, make: F) -> Arc<LoggerHandle>
    where
        F: FnOnce() -> LoggerHandle,
    {
        if let Some(handle) = self.get(name) {
            return handle;
        }
        let entry = self
            .loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(make()));
        Arc::clone(entry.value())
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    /// Names of every registered logger, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.iter().map(|entry| entry.key().clone()).collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn for_each(&self, mut f: impl FnMut(&LoggerHandle)) {
        for entry in self.loggers.iter() {
            f(entry.value());
        }
    }
}

/// Root level plus per-group overrides
#[derive(Debug, Clone)]
pub(crate) struct LevelTable {
    root: LevelFilter,
    groups: BTreeMap<String, LevelFilter>,
}

impl LevelTable {
    pub(crate) fn new(root: LevelFilter, groups: BTreeMap<String, LevelFilter>) -> Self {
        LevelTable { root, groups }
    }

    pub(crate) fn root(&self) -> LevelFilter {
        self.root
    }

    pub(crate) fn set_root(&mut self, filter: LevelFilter) {
        self.root = filter;
    }

    pub(crate) fn set_group(&mut self, group: String, filter: LevelFilter) {
        self.groups.insert(group, filter);
    }

    /// Level of the most specific group containing `name`, else the root level.
    pub(crate) fn resolve(&self, name: &str) -> LevelFilter {
        self.groups
            .iter()
            .filter(|(group, _)| is_within(name, group))
            .max_by_key(|(group, _)| group.len())
            .map(|(_, filter)| *filter)
            .unwrap_or(self.root)
    }
}

// `a::b::c` is within `a::b` and `a::b::c`, not within `a::bc` or `a::b::cd`
fn is_within(name: &str, group: &str) -> bool {
    match name.strip_prefix(group) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}
