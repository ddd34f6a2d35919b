//! Caller-owned event collector.
//!
//! Briefing runs want both console logging and a record of what happened
//! (which products fell back to older runs, which ones failed) to report at
//! the end. An `EventLog` is created by the caller and handed to the
//! components that emit events; every event is also forwarded to `tracing`.

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventLevel::Info => f.write_str("INFO"),
            EventLevel::Warning => f.write_str("WARNING"),
            EventLevel::Error => f.write_str("ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub level: EventLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<LoggedEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, message: impl Into<String>) {
        self.record(EventLevel::Info, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.record(EventLevel::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.record(EventLevel::Error, message.into());
    }

    /// Copy of every event recorded so far, oldest first.
    pub fn events(&self) -> Vec<LoggedEvent> {
        self.lock().clone()
    }

    /// Events at exactly the given level.
    pub fn events_at(&self, level: EventLevel) -> Vec<LoggedEvent> {
        self.lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(|e| e.level == EventLevel::Error)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return all recorded events.
    pub fn drain(&self) -> Vec<LoggedEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn record(&self, level: EventLevel, message: String) {
        match level {
            EventLevel::Info => info!(event = %message),
            EventLevel::Warning => warn!(event = %message),
            EventLevel::Error => error!(event = %message),
        }
        self.lock().push(LoggedEvent {
            level,
            message,
            at: Utc::now(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LoggedEvent>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
