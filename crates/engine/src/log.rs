//! Append-only step log, mirrored to the console as it grows

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One timestamped line of the run trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

/// Ordered record of what the engine did during one run.
///
/// Insertion order is chronological order is display order. Each recorded
/// message is also emitted through `tracing` immediately, so a watcher
/// sees the trail live rather than only in the final report.
#[derive(Debug, Default)]
pub struct StepLog {
    entries: Vec<LogEntry>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}
