#![allow(dead_code)]

use liblogtools::{Level, LogBackend, LogTools, LogToolsConfig, Record, Result};
use std::sync::{Arc, Mutex};

/// One line as the backend received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub level: Level,
    pub logger: String,
    pub message: String,
}

/// Backend that keeps every record in memory
#[derive(Default)]
pub struct CaptureBackend {
    lines: Mutex<Vec<Captured>>,
}

impl CaptureBackend {
    pub fn lines(&self) -> Vec<Captured> {
        self.lines.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|line| line.message).collect()
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }
}

impl LogBackend for CaptureBackend {
    fn write(&self, record: &Record<'_>) -> Result<()> {
        self.lines.lock().unwrap().push(Captured {
            level: record.level(),
            logger: record.logger().to_string(),
            message: record.message().to_string(),
        });
        Ok(())
    }
}

pub fn capture_tools(config: LogToolsConfig) -> (LogTools, Arc<CaptureBackend>) {
    let backend = Arc::new(CaptureBackend::default());
    (LogTools::new(config, backend.clone()), backend)
}

pub fn from_properties(properties: &[(&str, &str)]) -> (LogTools, Arc<CaptureBackend>) {
    capture_tools(LogToolsConfig::from_properties(properties.iter().copied()))
}
