/*
 * Backend sinks
 *
 * This module defines where formatted lines end up:
 * - ConsoleBackend: writes `[LEVEL] <date> <message>` lines to stdout
 * - TracingBackend: forwards records as `tracing` events (feature "tracing")
 *
 * The facade has already applied level filtering and the caller prefix by the
 * time a Record reaches a backend. Backends only decorate and write.
 */

use chrono::Local;
use std::fmt;
use std::io::{self, Write};

use crate::error::Result;
use crate::level::Level;

/// One enabled, already-prefixed log line
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    level: Level,
    logger: &'a str,
    message: fmt::Arguments<'a>,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, logger: &'a str, message: fmt::Arguments<'a>) -> Self {
        Record {
            level,
            logger,
            message,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Name of the logger that accepted the record.
    pub fn logger(&self) -> &'a str {
        self.logger
    }

    /// The `(<SimpleName>:<Line>): <message>` text.
    pub fn message(&self) -> fmt::Arguments<'a> {
        self.message
    }
}

/// Destination for log records.
///
/// Calls arrive concurrently from any thread, so implementations synchronize
/// internally.
pub trait LogBackend: Send + Sync {
    fn write(&self, record: &Record<'_>) -> Result<()>;
}

/// Console output with a single-line `[LEVEL] Www hh:mm AM message` pattern
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleBackend;

impl ConsoleBackend {
    pub fn new() -> Self {
        ConsoleBackend
    }
}

impl LogBackend for ConsoleBackend {
    fn write(&self, record: &Record<'_>) -> Result<()> {
        let timestamp = Local::now().format("%a %I:%M %p");
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "[{}] {} {}", record.level(), timestamp, record.message())?;
        Ok(())
    }
}

/// Forwards records to the `tracing` ecosystem.
///
/// `tracing` has no FATAL level, so fatal records become ERROR events. The
/// logger name travels as the `logger` field.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

#[cfg(feature = "tracing")]
impl TracingBackend {
    pub fn new() -> Self {
        TracingBackend
    }
}

#[cfg(feature = "tracing")]
impl LogBackend for TracingBackend {
    fn write(&self, record: &Record<'_>) -> Result<()> {
        let logger = record.logger();
        let message = record.message();
        match record.level() {
            Level::Fatal | Level::Error => tracing::error!(logger, "{}", message),
            Level::Warn => tracing::warn!(logger, "{}", message),
            Level::Info => tracing::info!(logger, "{}", message),
            Level::Debug => tracing::debug!(logger, "{}", message),
            Level::Trace => tracing::trace!(logger, "{}", message),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_exposes_fields() {
        let line = 12;
        let check = |record: &Record<'_>| {
            assert_eq!(record.level(), Level::Warn);
            assert_eq!(record.logger(), "my_app");
            assert_eq!(record.message().to_string(), "(main:12): hi");
        };
        check(&Record::new(
            Level::Warn,
            "my_app",
            format_args!("(main:{}): {}", line, "hi"),
        ));
    }

    #[test]
    fn console_backend_writes_without_error() {
        let backend = ConsoleBackend::new();
        let result = backend.write(&Record::new(
            Level::Info,
            "liblogtools",
            format_args!("(outputs:1): console smoke test"),
        ));
        assert!(result.is_ok());
    }

    #[test]
    fn backends_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConsoleBackend>();
        #[cfg(feature = "tracing")]
        assert_send_sync::<TracingBackend>();
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_backend_accepts_every_level() {
        let backend = TracingBackend::new();
        for level in [
            Level::Fatal,
            Level::Error,
            Level::Warn,
            Level::Info,
            Level::Debug,
            Level::Trace,
        ] {
            assert!(backend
                .write(&Record::new(level, "liblogtools", format_args!("(outputs:1): hi")))
                .is_ok());
        }
    }
}
