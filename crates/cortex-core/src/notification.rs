//! Transient notification queue.
//!
//! A bounded, newest-first sequence of user-facing messages. The queue
//! itself is pure state; the 3-second TTL expiry is scheduled by the
//! application layer against the entry id returned from [`NotificationQueue::enqueue`].

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum number of entries held at once; older entries are evicted.
pub const NOTIFICATION_CAPACITY: usize = 10;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A single queued notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEntry {
    /// Monotonic id, unique for the lifetime of the queue.
    ///
    /// Deliberately not wall-clock based: two entries enqueued within the
    /// same millisecond must still get distinct ids.
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    /// Creation timestamp (ISO 8601 format)
    pub created_at: String,
}

/// Bounded ordered notification sequence, newest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    entries: Vec<NotificationEntry>,
    next_id: u64,
}

impl NotificationQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a new entry and returns its id.
    ///
    /// Anything beyond [`NOTIFICATION_CAPACITY`] is dropped silently from
    /// the old end.
    pub fn enqueue(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            0,
            NotificationEntry {
                id,
                message: message.into(),
                kind,
                created_at: Utc::now().to_rfc3339(),
            },
        );
        self.entries.truncate(NOTIFICATION_CAPACITY);
        id
    }

    /// Removes the entry with the given id.
    ///
    /// Returns false if it was already gone (evicted by capacity), in which
    /// case this is a no-op.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Current entries, newest first.
    pub fn entries(&self) -> &[NotificationEntry] {
        &self.entries
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
