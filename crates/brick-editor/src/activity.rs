//! Recent-activity log shown on the dashboard.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Entries retained by default.
pub const DEFAULT_CAPACITY: usize = 20;
/// Entries the dashboard displays.
pub const DISPLAYED: usize = 10;

/// Source of timestamps for activity entries and saved models.
pub trait Clock {
    /// Current time as an ISO-8601 string.
    fn now(&self) -> String;
}

impl<F: Fn() -> String> Clock for F {
    fn now(&self) -> String {
        self()
    }
}

/// A clock stuck at one instant. Used by default on native targets and
/// in tests, where wall-clock time would make output nondeterministic.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Default for FixedClock {
    fn default() -> Self {
        Self("1970-01-01T00:00:00.000Z".to_string())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub message: String,
    pub timestamp: String,
}

/// Newest-first bounded log.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, timestamp: String) {
        let message = message.into();
        log::info!("{message}");
        self.entries.push_front(ActivityEntry { message, timestamp });
        self.entries.truncate(self.capacity);
    }

    /// Up to `n` entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().take(n)
    }

    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
