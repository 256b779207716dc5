//! Notification surface with scheduled expiry.
//!
//! Wraps the pure [`NotificationQueue`] and attaches the runtime concern it
//! deliberately leaves out: every entry self-expires after
//! [`NOTIFICATION_TTL`]. Expiry is keyed by entry id, so a removal firing
//! after the entry was already evicted by capacity is a no-op.

use cortex_core::notification::{NotificationEntry, NotificationKind, NotificationQueue};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// How long an entry stays visible before it removes itself.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Shared handle to the notification queue.
#[derive(Clone, Default)]
pub struct Notifier {
    queue: Arc<RwLock<NotificationQueue>>,
}

impl Notifier {
    /// Creates an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a message and schedules its expiry.
    ///
    /// Returns the entry id. The deadline is anchored here, at enqueue
    /// time, not at the expiry task's first poll. The task holds only a
    /// weak-by-id reference: if the entry is gone by then, nothing happens.
    pub async fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let id = self.queue.write().await.enqueue(message, kind);
        let deadline = tokio::time::Instant::now() + NOTIFICATION_TTL;
        let queue = Arc::clone(&self.queue);
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            queue.write().await.remove(id);
        });
        id
    }

    /// Shorthand for an info message.
    pub async fn info(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Info).await
    }

    /// Shorthand for a success message.
    pub async fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Success).await
    }

    /// Shorthand for an error message.
    pub async fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Error).await
    }

    /// Dismisses an entry ahead of its TTL.
    pub async fn dismiss(&self, id: u64) -> bool {
        self.queue.write().await.remove(id)
    }

    /// Snapshot of the visible entries, newest first.
    pub async fn entries(&self) -> Vec<NotificationEntry> {
        self.queue.read().await.entries().to_vec()
    }

    /// Number of visible entries.
    pub async fn len(&self) -> usize {
        self.queue.read().await.len()
    }

    /// True when nothing is visible.
    pub async fn is_empty(&self) -> bool {
        self.queue.read().await.is_empty()
    }
}
