//! Note domain model.

use serde::{Deserialize, Serialize};

/// A note as returned by the API.
///
/// The server sends a richer shape (word counts, sentiment, sync ids);
/// only the fields the client orchestrates are kept. Unknown fields are
/// ignored at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_archived: bool,
    /// ISO 8601 creation timestamp
    #[serde(default)]
    pub created_at: String,
    /// ISO 8601 last-update timestamp
    #[serde(default)]
    pub updated_at: String,
}

/// Payload for creating or updating a note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NoteDraft {
    /// Creates a draft with a title and empty content.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}
