//! Per-run processing log.
//!
//! The pipeline accumulates a structured log for every `process` call and
//! returns it with the result; persistence of the aggregate is the caller's
//! concern. Each run owns its own buffer, so concurrent documents never
//! share log state.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Normal pipeline progress
    Info,
    /// Degraded but recovered (quality-gate miss, AI fallback)
    Warning,
    /// Stage failure
    Error,
}

impl LogLevel {
    /// Canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timestamped, leveled log message.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingLogEntry {
    /// Milliseconds since Unix epoch
    pub timestamp_ms: u64,

    /// Severity
    pub level: LogLevel,

    /// Human-readable message
    pub message: String,

    /// Optional structured detail (error text, counts)
    pub details: Option<String>,
}

/// Append-only log buffer scoped to one processing run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingLog {
    entries: Vec<ProcessingLogEntry>,
}

impl ProcessingLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the given level.
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.push_with_details(level, message, None);
    }

    /// Append a message with a structured detail string.
    pub fn push_with_details(
        &mut self,
        level: LogLevel,
        message: impl Into<String>,
        details: Option<String>,
    ) {
        self.entries.push(ProcessingLogEntry {
            timestamp_ms: now_ms(),
            level,
            message: message.into(),
            details,
        });
    }

    /// All entries in append order.
    pub fn entries(&self) -> &[ProcessingLogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry is at the given level.
    pub fn has_level(&self, level: LogLevel) -> bool {
        self.entries.iter().any(|e| e.level == level)
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_order_preserved() {
        let mut log = ProcessingLog::new();
        log.push(LogLevel::Info, "first");
        log.push(LogLevel::Warning, "second");
        log.push(LogLevel::Error, "third");

        let messages: Vec<_> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_has_level() {
        let mut log = ProcessingLog::new();
        log.push(LogLevel::Info, "ok");
        assert!(log.has_level(LogLevel::Info));
        assert!(!log.has_level(LogLevel::Error));
    }

    #[test]
    fn test_details_attached() {
        let mut log = ProcessingLog::new();
        log.push_with_details(LogLevel::Error, "boom", Some("stack".to_string()));
        assert_eq!(log.entries()[0].details.as_deref(), Some("stack"));
    }
}
