//! Error types for setup and backend writes.
//!
//! Logging calls themselves never return errors; these only surface from
//! configuration loading, global installation and backend implementations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogToolsError {
    /// Configuration file exists but could not be read.
    #[error("could not read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file is not valid TOML for the expected layout.
    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Backend sink failed to write a record.
    #[error("failed to write log record: {0}")]
    Write(#[from] io::Error),

    /// The process-wide facade was already set.
    #[error("a global LogTools instance is already installed")]
    AlreadyInstalled,
}

pub type Result<T> = std::result::Result<T, LogToolsError>;
