#![deny(missing_docs)]
//! Logging plumbing shared across the exporter workspace.
//!
//! Components never talk to a process-wide logger directly. They are handed a
//! [`LogSink`] at construction and emit through the `sink_*` macros, so tests
//! can capture output with a [`MemorySink`] while the binary forwards
//! everything to the `log` facade via [`FacadeSink`].

use std::sync::{Arc, Mutex};

pub use log::Level;

/// Target used for records forwarded to the `log` facade.
pub const LOG_TARGET: &str = "safeq";

/// Destination for log lines produced by the exporter components.
pub trait LogSink: Send + Sync {
    /// Records one formatted message at the given level.
    fn log(&self, level: Level, message: String);
}

/// Sink that forwards every message to the global `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl FacadeSink {
    /// Convenience constructor returning the sink behind an `Arc`.
    pub fn shared() -> Arc<dyn LogSink> {
        Arc::new(FacadeSink)
    }
}

impl LogSink for FacadeSink {
    fn log(&self, level: Level, message: String) {
        log::log!(target: LOG_TARGET, level, "{}", message);
    }
}

/// One captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity the message was emitted with.
    pub level: Level,
    /// Fully formatted message text.
    pub message: String,
}

/// Sink that keeps every record in memory, in emission order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Returns the messages captured at `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|record| record.level == level)
            .map(|record| record.message.clone())
            .collect()
    }

    /// True if any captured message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lock()
            .iter()
            .any(|record| record.message.contains(needle))
    }

    /// Drains and returns all captured records.
    pub fn take(&self) -> Vec<LogRecord> {
        self.lock().drain(..).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        // A poisoned lock only means a test panicked mid-push; the data is still usable.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: String) {
        self.lock().push(LogRecord { level, message });
    }
}

/// Logs an info-level message to the given sink.
#[macro_export]
macro_rules! sink_info {
    ($sink:expr, $($arg:tt)*) => {{
        $crate::LogSink::log(&*$sink, $crate::Level::Info, format!($($arg)*));
    }};
}

/// Logs a warn-level message to the given sink.
#[macro_export]
macro_rules! sink_warn {
    ($sink:expr, $($arg:tt)*) => {{
        $crate::LogSink::log(&*$sink, $crate::Level::Warn, format!($($arg)*));
    }};
}

/// Logs an error-level message to the given sink.
#[macro_export]
macro_rules! sink_error {
    ($sink:expr, $($arg:tt)*) => {{
        $crate::LogSink::log(&*$sink, $crate::Level::Error, format!($($arg)*));
    }};
}
