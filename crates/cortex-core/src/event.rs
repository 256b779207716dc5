//! Calendar event domain model.

use serde::{Deserialize, Serialize};

/// A calendar event as returned by the API.
///
/// Start and end times arrive as ISO 8601 strings; parsing is deferred to
/// the calendar-day filter so a malformed timestamp degrades to "not today"
/// instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO 8601 start timestamp
    pub start_time: String,
    /// ISO 8601 end timestamp
    pub end_time: String,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#3B82F6".to_string()
}

/// Payload for creating an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_online: bool,
}
