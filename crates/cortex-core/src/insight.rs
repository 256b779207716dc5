//! AI coaching insight domain model.

use serde::{Deserialize, Serialize};

/// A generated productivity insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(default)]
    pub daily_summary: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub focus_score: f64,
    #[serde(default)]
    pub productivity_trend: Option<String>,
}

/// The `/ai/insights` payload: the freshest insight plus history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightFeed {
    #[serde(default)]
    pub latest_insight: Option<Insight>,
    #[serde(default)]
    pub insights_history: Vec<serde_json::Value>,
}
