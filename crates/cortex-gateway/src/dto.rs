//! Wire envelopes and request/response payloads.
//!
//! Every endpoint response is validated against one of these shapes at the
//! boundary, so a malformed server payload fails here as a typed error
//! instead of surfacing as a missing field deeper in the client.

use cortex_core::error::{CortexError, Result};
use cortex_core::note::Note;
use cortex_core::task::TaskStatus;
use cortex_core::user::UserProfile;
use serde::{Deserialize, Serialize};

/// The standard `{success, message?, data?}` envelope.
///
/// The optional fields carry no `serde(default)`: that would put a
/// `T: Default` bound on the derived `Deserialize`, and absent `Option`
/// fields already decode to `None` without it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload of a successful envelope.
    ///
    /// Failures normally arrive as non-2xx responses and never reach this
    /// point; a 2xx envelope with `success: false` or no data is treated as
    /// a malformed response.
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(CortexError::api(
                200,
                self.message.unwrap_or_else(|| "request rejected".to_string()),
            ));
        }
        self.data.ok_or_else(|| CortexError::Serialization {
            format: "JSON".to_string(),
            message: "response envelope is missing the data field".to_string(),
        })
    }
}

/// Response of `/auth/login`, `/auth/register`, and `/auth/me`.
///
/// `/auth/me` carries only `user`; the other two carry both fields.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl AuthPayload {
    /// Unwraps the issued token and profile of a successful auth response.
    pub fn into_credentials(self) -> Result<(String, UserProfile)> {
        match (self.success, self.access_token, self.user) {
            (true, Some(token), Some(user)) => Ok((token, user)),
            (_, _, _) => Err(CortexError::api(
                200,
                self.message
                    .unwrap_or_else(|| "authentication response was incomplete".to_string()),
            )),
        }
    }

    /// Unwraps the profile of a successful `/auth/me` response.
    pub fn into_user(self) -> Result<UserProfile> {
        match (self.success, self.user) {
            (true, Some(user)) => Ok(user),
            _ => Err(CortexError::api(
                200,
                self.message
                    .unwrap_or_else(|| "profile response was incomplete".to_string()),
            )),
        }
    }
}

/// `GET /notes` payload: the notes page plus pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct NotesPage {
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// Partial update for `PUT /tasks/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl TaskPatch {
    /// A patch that only moves the task to a new status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// `GET /templates` payload: the user's template notes plus the built-ins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateCatalog {
    #[serde(default)]
    pub user_templates: Vec<Note>,
    #[serde(default)]
    pub default_templates: Vec<NoteTemplate>,
}

/// A built-in note template.
///
/// Built-in ids are slugs (`"meeting-notes"`), user template ids are the
/// numeric note id rendered as a string; both go into the `use` endpoint
/// verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteTemplate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// `POST /ai/chat` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// `POST /focus/sessions` payload: the server-registered session.
#[derive(Debug, Clone, Deserialize)]
pub struct FocusSessionRecord {
    pub id: i64,
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default)]
    pub planned_duration: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_unwraps_data() {
        let envelope: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success": true, "data": [1, 2, 3]}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_envelope_works_for_payloads_without_default() {
        // The payload type only needs Deserialize, nothing else
        #[derive(Deserialize)]
        struct Payload {
            value: i32,
        }

        let envelope: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"success": true, "data": {"value": 7}}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap().value, 7);

        let empty: ApiEnvelope<Payload> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(empty.into_data().is_err());
    }

    #[test]
    fn test_envelope_missing_data_is_a_serialization_error() {
        let envelope: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success": true}"#).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(matches!(err, CortexError::Serialization { .. }));
    }

    #[test]
    fn test_auth_payload_roundtrip() {
        let payload: AuthPayload = serde_json::from_str(
            r#"{
                "success": true,
                "message": "ok",
                "access_token": "tok-abc",
                "user": {"id": 1, "email": "demo@cortex.app", "username": "demo", "plan": "free"}
            }"#,
        )
        .unwrap();
        let (token, user) = payload.into_credentials().unwrap();
        assert_eq!(token, "tok-abc");
        assert_eq!(user.username, "demo");
    }

    #[test]
    fn test_auth_payload_without_token_is_rejected() {
        let payload: AuthPayload =
            serde_json::from_str(r#"{"success": true, "message": "partial"}"#).unwrap();
        let err = payload.into_credentials().unwrap_err();
        assert_eq!(err.user_message(), "partial");
    }

    #[test]
    fn test_notes_page_ignores_pagination() {
        let page: NotesPage = serde_json::from_str(
            r#"{
                "notes": [{"id": 9, "title": "hello", "content": "", "tags": []}],
                "pagination": {"page": 1, "pages": 1, "per_page": 20, "total": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(page.notes.len(), 1);
        assert_eq!(page.notes[0].id, 9);
    }

    #[test]
    fn test_template_catalog_mixes_builtin_and_user_templates() {
        let catalog: TemplateCatalog = serde_json::from_str(
            r##"{
                "user_templates": [{"id": 31, "title": "retro", "content": "", "tags": []}],
                "default_templates": [
                    {"id": "meeting-notes", "title": "회의록 템플릿", "emoji": "👥", "content": "# 회의록", "category": "project"}
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(catalog.user_templates.len(), 1);
        assert_eq!(catalog.default_templates[0].id, "meeting-notes");
        assert_eq!(catalog.default_templates[0].category.as_deref(), Some("project"));
    }

    #[test]
    fn test_task_patch_serializes_only_set_fields() {
        let patch = TaskPatch::status(TaskStatus::Completed);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"status": "completed"}));
    }
}
