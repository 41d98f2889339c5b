//! Ordered record of what happened during one fixer run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Collect,
    Mkdir,
    Touch,
    Chmod,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Collect => "collect",
            Operation::Mkdir => "mkdir",
            Operation::Touch => "touch",
            Operation::Chmod => "chmod",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub operation: Operation,
    pub message: String,
}

/// Append-only log. Informational entries are kept only in verbose mode;
/// every call is mirrored to `tracing` either way.
#[derive(Debug, Default)]
pub struct OperationLog {
    entries: Vec<LogEntry>,
    verbose: bool,
}

impl OperationLog {
    pub fn new(verbose: bool) -> Self {
        Self {
            entries: Vec::new(),
            verbose,
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn log(&mut self, message: impl Into<String>, operation: Operation) {
        let message = message.into();
        tracing::debug!(operation = operation.as_str(), "{}", message);
        if self.verbose {
            self.push(Level::Info, operation, message);
        }
    }

    pub fn log_error(&mut self, message: impl Into<String>, operation: Operation) {
        let message = message.into();
        tracing::warn!(operation = operation.as_str(), "{}", message);
        self.push(Level::Error, operation, message);
    }

    fn push(&mut self, level: Level, operation: Operation, message: String) {
        self.entries.push(LogEntry {
            timestamp: Utc::now(),
            level,
            operation,
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hand the entries to the caller and start over.
    pub fn take(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.entries)
    }
}
