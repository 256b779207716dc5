//! Dashboard summary models and derived views.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{event::Event, insight::Insight, note::Note};

/// Aggregate counters for the dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_notes: u64,
    #[serde(default)]
    pub total_tasks: u64,
    #[serde(default)]
    pub completed_tasks: u64,
    #[serde(default)]
    pub in_progress_tasks: u64,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub weekly_notes: u64,
    #[serde(default)]
    pub weekly_completed_tasks: u64,
}

/// The `/dashboard/summary` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub today_events: Vec<Event>,
    #[serde(default)]
    pub recent_notes: Vec<Note>,
    #[serde(default)]
    pub ai_insight: Option<Insight>,
}

/// Filters events down to those starting on `today`.
///
/// Pure; recomputed whenever the source collection or the current day
/// changes. Timestamps that fail to parse are treated as not-today.
pub fn events_today<'a>(events: &'a [Event], today: NaiveDate) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| parse_day(&event.start_time) == Some(today))
        .collect()
}

/// Parses an ISO 8601 timestamp's calendar day.
///
/// The backend emits naive UTC timestamps without an offset, so try
/// RFC 3339 first and fall back to a naive parse.
fn parse_day(timestamp: &str) -> Option<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.date_naive());
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}
