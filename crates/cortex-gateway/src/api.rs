//! The Cortex API surface.
//!
//! [`ProductivityApi`] is the seam the application layer depends on; the
//! [`HttpGateway`] implementation maps each operation onto an endpoint and
//! validates the response shape at the boundary.

use async_trait::async_trait;
use cortex_core::error::Result;
use cortex_core::event::{Event, EventDraft};
use cortex_core::focus::{CompletionReport, SessionType};
use cortex_core::insight::InsightFeed;
use cortex_core::note::{Note, NoteDraft};
use cortex_core::search::SearchResults;
use cortex_core::task::{Task, TaskDraft};
use cortex_core::user::UserProfile;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::client::HttpGateway;
use crate::dto::{
    ApiEnvelope, AuthPayload, ChatReply, FocusSessionRecord, NotesPage, TaskPatch,
    TemplateCatalog,
};

/// Everything the client asks of the remote API.
#[async_trait]
pub trait ProductivityApi: Send + Sync {
    // Auth
    async fn login(&self, email: &str, password: &str) -> Result<(String, UserProfile)>;
    async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<(String, UserProfile)>;
    async fn me(&self) -> Result<UserProfile>;

    // Dashboard & AI
    async fn dashboard_summary(&self) -> Result<cortex_core::dashboard::DashboardSummary>;
    async fn ai_insights(&self) -> Result<InsightFeed>;
    async fn ai_chat(&self, message: &str) -> Result<ChatReply>;

    // Resources
    async fn list_notes(&self) -> Result<Vec<Note>>;
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note>;
    async fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Note>;
    async fn delete_note(&self, id: i64) -> Result<()>;
    async fn list_tasks(&self) -> Result<Vec<Task>>;
    async fn create_task(&self, draft: &TaskDraft) -> Result<Task>;
    async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task>;
    async fn list_events(&self) -> Result<Vec<Event>>;
    async fn create_event(&self, draft: &EventDraft) -> Result<Event>;

    // Focus
    async fn start_focus_session(
        &self,
        session_type: SessionType,
        planned_minutes: u32,
    ) -> Result<FocusSessionRecord>;
    async fn complete_focus_session(&self, report: &CompletionReport) -> Result<()>;

    // Search
    async fn search(&self, query: &str) -> Result<SearchResults>;

    // Note templates
    async fn get_templates(&self) -> Result<TemplateCatalog>;
    async fn use_template(&self, template_id: &str, title: Option<&str>) -> Result<Note>;

    // Settings (same envelope as every other resource)
    async fn get_settings(&self) -> Result<serde_json::Value>;
    async fn update_settings(&self, settings: &serde_json::Value) -> Result<serde_json::Value>;
}

impl HttpGateway {
    /// Sends a request and unwraps the standard data envelope.
    async fn send_enveloped<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let value = self.send(endpoint, method, body, true).await?;
        let envelope: ApiEnvelope<T> = serde_json::from_value(value)?;
        envelope.into_data()
    }
}

#[async_trait]
impl ProductivityApi for HttpGateway {
    async fn login(&self, email: &str, password: &str) -> Result<(String, UserProfile)> {
        let body = json!({ "email": email, "password": password });
        let value = self
            .send("/auth/login", Method::POST, Some(&body), false)
            .await?;
        let payload: AuthPayload = serde_json::from_value(value)?;
        payload.into_credentials()
    }

    async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<(String, UserProfile)> {
        let body = json!({ "email": email, "username": username, "password": password });
        let value = self
            .send("/auth/register", Method::POST, Some(&body), false)
            .await?;
        let payload: AuthPayload = serde_json::from_value(value)?;
        payload.into_credentials()
    }

    async fn me(&self) -> Result<UserProfile> {
        let value = self.send("/auth/me", Method::GET, None, true).await?;
        let payload: AuthPayload = serde_json::from_value(value)?;
        payload.into_user()
    }

    async fn dashboard_summary(&self) -> Result<cortex_core::dashboard::DashboardSummary> {
        self.send_enveloped("/dashboard/summary", Method::GET, None)
            .await
    }

    async fn ai_insights(&self) -> Result<InsightFeed> {
        self.send_enveloped("/ai/insights", Method::GET, None).await
    }

    async fn ai_chat(&self, message: &str) -> Result<ChatReply> {
        let body = json!({ "message": message });
        self.send_enveloped("/ai/chat", Method::POST, Some(&body))
            .await
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        let page: NotesPage = self.send_enveloped("/notes", Method::GET, None).await?;
        Ok(page.notes)
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        let body = serde_json::to_value(draft)?;
        self.send_enveloped("/notes", Method::POST, Some(&body)).await
    }

    async fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Note> {
        let body = serde_json::to_value(draft)?;
        self.send_enveloped(&format!("/notes/{id}"), Method::PUT, Some(&body))
            .await
    }

    async fn delete_note(&self, id: i64) -> Result<()> {
        self.send(&format!("/notes/{id}"), Method::DELETE, None, true)
            .await?;
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.send_enveloped("/tasks", Method::GET, None).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        let body = serde_json::to_value(draft)?;
        self.send_enveloped("/tasks", Method::POST, Some(&body)).await
    }

    async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task> {
        let body = serde_json::to_value(patch)?;
        self.send_enveloped(&format!("/tasks/{id}"), Method::PUT, Some(&body))
            .await
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        self.send_enveloped("/events", Method::GET, None).await
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event> {
        let body = serde_json::to_value(draft)?;
        self.send_enveloped("/events", Method::POST, Some(&body))
            .await
    }

    async fn start_focus_session(
        &self,
        session_type: SessionType,
        planned_minutes: u32,
    ) -> Result<FocusSessionRecord> {
        let body = json!({
            "session_type": session_type.as_str(),
            "planned_duration": planned_minutes,
        });
        self.send_enveloped("/focus/sessions", Method::POST, Some(&body))
            .await
    }

    async fn complete_focus_session(&self, report: &CompletionReport) -> Result<()> {
        let body = json!({
            "quality_rating": report.quality_rating,
            "focus_score": report.focus_score,
        });
        self.send(
            &format!("/focus/sessions/{}/complete", report.session_id),
            Method::POST,
            Some(&body),
            true,
        )
        .await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<SearchResults> {
        let value = self
            .send_with_query("/search", Method::GET, &[("q", query)], true)
            .await?;
        let envelope: ApiEnvelope<SearchResults> = serde_json::from_value(value)?;
        envelope.into_data()
    }

    async fn get_templates(&self) -> Result<TemplateCatalog> {
        self.send_enveloped("/templates", Method::GET, None).await
    }

    async fn use_template(&self, template_id: &str, title: Option<&str>) -> Result<Note> {
        let body = match title {
            Some(title) => json!({ "title": title }),
            None => json!({}),
        };
        self.send_enveloped(
            &format!("/templates/{template_id}/use"),
            Method::POST,
            Some(&body),
        )
        .await
    }

    async fn get_settings(&self) -> Result<serde_json::Value> {
        self.send_enveloped("/settings", Method::GET, None).await
    }

    async fn update_settings(&self, settings: &serde_json::Value) -> Result<serde_json::Value> {
        self.send_enveloped("/settings", Method::PUT, Some(settings))
            .await
    }
}
