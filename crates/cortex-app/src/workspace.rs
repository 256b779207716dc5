//! In-memory workspace caches.
//!
//! One snapshot of everything the signed-in user sees: dashboard summary,
//! resource lists, and the insight feed. Cleared wholesale on logout.

use cortex_core::dashboard::DashboardSummary;
use cortex_core::event::Event;
use cortex_core::insight::InsightFeed;
use cortex_core::note::Note;
use cortex_core::task::Task;

/// Cached server state for the authenticated user.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub dashboard: Option<DashboardSummary>,
    /// Notes, newest first
    pub notes: Vec<Note>,
    pub tasks: Vec<Task>,
    pub events: Vec<Event>,
    pub insights: Option<InsightFeed>,
}

impl Workspace {
    /// Drops every cached resource.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.dashboard.is_none()
            && self.notes.is_empty()
            && self.tasks.is_empty()
            && self.events.is_empty()
            && self.insights.is_none()
    }
}
