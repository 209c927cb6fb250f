/*
 * Main library entry point that exposes the public API
 *
 * This file defines the public interface of the LogTools facade, including:
 * - Re-exporting LogTools, its configuration, levels and backend trait
 * - Defining the level macros (log_fatal, log_error, log_warn, log_info,
 *   log_debug, log_trace) plus log_at and log_enabled
 *
 * Every macro captures the call site at compile time and checks the level
 * before the format arguments are evaluated. Each line reaches the backend as
 * `(<SimpleName>:<Line>): <message>`.
 *
 * Accepted forms, shown for log_info:
 *   log_info!("plain message")
 *   log_info!("a: {}, b: {}", a, b)
 *   log_info!()                                  prefix only
 *   log_info!(tools = &facade, "...")            explicit facade instead of the global one
 *   log_info!(caller = location, "...")          location captured by a #[track_caller] wrapper
 *   log_info!(tools = &facade, caller = location, "...")
 */

mod config;
mod error;
mod level;
mod location;
mod logger;
mod outputs;
mod registry;

pub use config::{
    LogToolsConfig, GRANULAR_KEY, GROUP_LEVEL_PREFIX, LEGACY_ROOT_LEVEL_KEY, ROOT_LEVEL_KEY,
};
pub use error::{LogToolsError, Result};
pub use level::{Level, LevelFilter};
pub use location::CallerLocation;
pub use logger::{display_opt, DisplayOpt, LogTools, LoggerRef, DEFAULT_LOGGER};
#[cfg(feature = "tracing")]
pub use outputs::TracingBackend;
pub use outputs::{ConsoleBackend, LogBackend, Record};
pub use registry::{LoggerHandle, LoggerRegistry};

#[doc(hidden)]
#[macro_export]
macro_rules! __log_emit {
    ($tools:expr, $level:expr, $location:expr $(,)?) => {
        $crate::__log_emit!($tools, $level, $location, "")
    };
    ($tools:expr, $level:expr, $location:expr, $($arg:tt)+) => {{
        let tools: &$crate::LogTools = $tools;
        let location: $crate::CallerLocation = $location;
        let level: $crate::Level = $level;
        let logger = tools.logger_at(&location);
        if logger.is_enabled(level) {
            logger.dispatch(level, &location, format_args!($($arg)+));
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_args {
    ($level:expr; tools = $tools:expr, caller = $location:expr $(, $($arg:tt)+)?) => {
        $crate::__log_emit!($tools, $level, $location $(, $($arg)+)?)
    };
    ($level:expr; tools = $tools:expr $(, $($arg:tt)+)?) => {
        $crate::__log_emit!($tools, $level, $crate::caller_location!() $(, $($arg)+)?)
    };
    ($level:expr; caller = $location:expr $(, $($arg:tt)+)?) => {
        $crate::__log_emit!($crate::LogTools::global(), $level, $location $(, $($arg)+)?)
    };
    ($level:expr; $($arg:tt)*) => {
        $crate::__log_emit!($crate::LogTools::global(), $level, $crate::caller_location!(), $($arg)*)
    };
}

/// Logs at a level chosen at runtime: `log_at!(level, "...", args)`.
#[macro_export]
macro_rules! log_at {
    ($level:expr $(, $($arg:tt)*)?) => {
        $crate::__log_args!($level; $($($arg)*)?)
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {
        $crate::__log_args!($crate::Level::Fatal; $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::__log_args!($crate::Level::Error; $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::__log_args!($crate::Level::Warn; $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__log_args!($crate::Level::Info; $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::__log_args!($crate::Level::Debug; $($arg)*)
    };
}

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::__log_args!($crate::Level::Trace; $($arg)*)
    };
}

/// True when a message at `level` from this call site would be written.
#[macro_export]
macro_rules! log_enabled {
    (tools = $tools:expr, $level:expr) => {{
        let tools: &$crate::LogTools = $tools;
        tools.is_enabled($level, &$crate::caller_location!())
    }};
    ($level:expr) => {
        $crate::LogTools::global().is_enabled($level, &$crate::caller_location!())
    };
}
