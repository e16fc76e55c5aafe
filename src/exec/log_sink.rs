//! Logging sink abstraction
//!
//! Tools receive an explicit sink instead of reaching for an ambient logger,
//! so the caller decides where progress lines, warnings, and errors go. The
//! child process's stdout maps to info and its stderr to error, mirroring
//! the original stream handling.

use chrono::Local;
use std::sync::Mutex;

/// Line-oriented logging sink with four severities
pub trait LogSink: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sink that writes timestamped lines to stdout (debug/info) and
/// stderr (warn/error)
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    fn stamp(level: &str, message: &str) -> String {
        format!("{} [{level}] {message}", Local::now().format("%H:%M:%S"))
    }
}

impl LogSink for ConsoleSink {
    fn debug(&self, message: &str) {
        println!("{}", Self::stamp("DEBUG", message));
    }

    fn info(&self, message: &str) {
        println!("{}", Self::stamp("INFO", message));
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", Self::stamp("WARN", message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", Self::stamp("ERROR", message));
    }
}

/// Log severity recorded by [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Sink that records every line in memory, used to assert on log output
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, level: LogLevel, message: &str) {
        self.entries
            .lock()
            .expect("log sink poisoned")
            .push((level, message.to_string()));
    }

    /// All recorded entries, in order
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().expect("log sink poisoned").clone()
    }

    /// Recorded messages of one severity, in order
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn debug(&self, message: &str) {
        self.record(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.record(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.info("first");
        sink.warn("second");
        sink.info("third");

        let entries = sink.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], (LogLevel::Info, "first".to_string()));
        assert_eq!(entries[1], (LogLevel::Warn, "second".to_string()));
        assert_eq!(sink.messages(LogLevel::Info), vec!["first", "third"]);
    }
}
