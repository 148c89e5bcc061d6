//! Custom logging module.
//!
//! This module provides a logger implementation that captures log entries
//! into a bounded buffer shared with the application state for display in
//! the log panel.

use crate::error::{AppError, AppResult};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Maximum number of log entries kept for display.
///
pub const LOG_CAPACITY: usize = 500;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Bounded buffer of formatted log entries, oldest first.
///
#[derive(Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn push(&self, entry: String) {
        // A poisoned buffer only loses log lines
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() >= LOG_CAPACITY {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(index).cloned())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }
}

/// Logger that captures records into a `LogBuffer`.
///
pub struct CustomLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl CustomLogger {
    pub fn new(buffer: LogBuffer, level: LevelFilter) -> Self {
        CustomLogger { buffer, level }
    }

    /// Install as the global logger.
    ///
    pub fn init(self) -> AppResult<()> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self)).map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(format_log(record));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_buffer_is_bounded() {
        let buffer = LogBuffer::default();
        for i in 0..LOG_CAPACITY + 5 {
            buffer.push(format!("entry {}", i));
        }
        assert_eq!(buffer.len(), LOG_CAPACITY);
        assert_eq!(buffer.get(0).unwrap(), "entry 5");
        assert_eq!(
            buffer.snapshot().last().unwrap(),
            &format!("entry {}", LOG_CAPACITY + 4)
        );
    }

    #[test]
    fn test_logger_filters_by_level() {
        let buffer = LogBuffer::default();
        let logger = CustomLogger::new(buffer.clone(), LevelFilter::Info);
        logger.log(
            &Record::builder()
                .args(format_args!("kept"))
                .level(Level::Warn)
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("dropped"))
                .level(Level::Debug)
                .build(),
        );
        let entries = buffer.snapshot();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].ends_with("WARN kept"));
    }
}
