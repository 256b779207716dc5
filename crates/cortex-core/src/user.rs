//! User profile domain model.

use serde::{Deserialize, Serialize};

/// Identity snapshot for the signed-in user.
///
/// This is an immutable snapshot: it is replaced wholesale whenever the
/// profile is refreshed, never mutated field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier
    pub id: i64,
    /// Account email address
    pub email: String,
    /// Display name
    pub username: String,
    /// Subscription plan (e.g. "free", "pro")
    #[serde(default = "default_plan")]
    pub plan: String,
    /// Avatar image URL, if the account has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

fn default_plan() -> String {
    "free".to_string()
}
