//! Server-side search result models.

use serde::{Deserialize, Serialize};

use crate::{event::Event, note::Note, task::Task};

/// Result of a `/search` call, partitioned by resource kind for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// The query that produced these results
    pub query: String,
    pub results: SearchBuckets,
    /// Total matches across every bucket; zero renders the empty state
    pub total_results: usize,
}

/// Per-resource-kind result buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchBuckets {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl SearchResults {
    /// Creates an empty result set for a query.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: SearchBuckets::default(),
            total_results: 0,
        }
    }

    /// True when no bucket matched.
    pub fn is_empty(&self) -> bool {
        self.total_results == 0
    }
}
