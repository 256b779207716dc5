//! Shared test doubles for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use cortex_app::CortexApp;
use cortex_core::dashboard::{DashboardStats, DashboardSummary};
use cortex_core::error::{CortexError, Result};
use cortex_core::event::{Event, EventDraft};
use cortex_core::focus::{CompletionReport, SessionType};
use cortex_core::insight::{Insight, InsightFeed};
use cortex_core::note::{Note, NoteDraft};
use cortex_core::search::{SearchBuckets, SearchResults};
use cortex_core::task::{Task, TaskDraft, TaskStatus};
use cortex_core::user::UserProfile;
use cortex_gateway::{
    AuthToken, ChatReply, FocusSessionRecord, MemoryTokenStore, NoteTemplate, ProductivityApi,
    TaskPatch, TemplateCatalog,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// API double that records every call, fails on demand per endpoint, and
/// can hold a call open to stage a race against logout.
#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    dropping: Mutex<HashSet<&'static str>>,
    gated: Mutex<HashSet<&'static str>>,
    gate: tokio::sync::Notify,
    next_id: AtomicI64,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(100),
            ..Self::default()
        })
    }

    /// Makes the named endpoint fail with an API error from now on.
    pub fn fail(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().insert(endpoint);
    }

    /// Makes the named endpoint fail with a transport error from now on.
    pub fn fail_transport(&self, endpoint: &'static str) {
        self.dropping.lock().unwrap().insert(endpoint);
    }

    /// Holds calls to the named endpoint open until [`MockApi::release`].
    pub fn gate(&self, endpoint: &'static str) {
        self.gated.lock().unwrap().insert(endpoint);
    }

    /// Releases every call held open by [`MockApi::gate`].
    pub fn release(&self) {
        self.gated.lock().unwrap().clear();
        self.gate.notify_waiters();
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose record starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    async fn record(&self, call: impl Into<String>) -> Result<()> {
        let call = call.into();
        let endpoint = call.split(':').next().unwrap_or(&call).to_string();
        self.calls.lock().unwrap().push(call);

        loop {
            let released = self.gate.notified();
            if !self.gated.lock().unwrap().contains(endpoint.as_str()) {
                break;
            }
            released.await;
        }

        if self.dropping.lock().unwrap().contains(endpoint.as_str()) {
            return Err(CortexError::network("network error"));
        }
        if self.failing.lock().unwrap().contains(endpoint.as_str()) {
            return Err(CortexError::api(500, format!("{endpoint} unavailable")));
        }
        Ok(())
    }

    fn fresh_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: 1,
        email: "demo@cortex.app".to_string(),
        username: "demo".to_string(),
        plan: "free".to_string(),
        avatar_url: None,
    }
}

pub fn note(id: i64, title: &str) -> Note {
    Note {
        id,
        title: title.to_string(),
        content: String::new(),
        tags: Vec::new(),
        is_archived: false,
        created_at: "2026-08-23T08:00:00".to_string(),
        updated_at: "2026-08-23T08:00:00".to_string(),
    }
}

pub fn task(id: i64, title: &str, status: TaskStatus) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        status,
        priority: "medium".to_string(),
        due_date: None,
        created_at: "2026-08-23T08:00:00".to_string(),
        updated_at: "2026-08-23T08:00:00".to_string(),
        completed_at: None,
    }
}

pub fn event(id: i64, title: &str, start_time: &str) -> Event {
    Event {
        id,
        title: title.to_string(),
        description: None,
        start_time: start_time.to_string(),
        end_time: start_time.to_string(),
        is_all_day: false,
        is_online: false,
        location: None,
        color: "#3B82F6".to_string(),
    }
}

fn summary() -> DashboardSummary {
    DashboardSummary {
        stats: DashboardStats {
            total_notes: 2,
            total_tasks: 3,
            completed_tasks: 1,
            ..Default::default()
        },
        today_events: vec![event(10, "standup", "2026-08-23T09:30:00")],
        recent_notes: vec![note(1, "weekly plan"), note(2, "meeting minutes")],
        ai_insight: None,
    }
}

#[async_trait]
impl ProductivityApi for MockApi {
    async fn login(&self, email: &str, _password: &str) -> Result<(String, UserProfile)> {
        self.record(format!("login:{email}")).await
            .map_err(|_| CortexError::api(401, "invalid credentials"))?;
        Ok(("tok-login".to_string(), profile()))
    }

    async fn register(
        &self,
        email: &str,
        username: &str,
        _password: &str,
    ) -> Result<(String, UserProfile)> {
        self.record(format!("register:{email}")).await?;
        let mut user = profile();
        user.username = username.to_string();
        Ok(("tok-register".to_string(), user))
    }

    async fn me(&self) -> Result<UserProfile> {
        self.record("me").await?;
        Ok(profile())
    }

    async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        self.record("dashboard_summary").await?;
        Ok(summary())
    }

    async fn ai_insights(&self) -> Result<InsightFeed> {
        self.record("ai_insights").await?;
        Ok(InsightFeed {
            latest_insight: Some(Insight {
                daily_summary: Some("steady progress".to_string()),
                suggestions: vec!["take a break".to_string()],
                focus_score: 7.5,
                productivity_trend: Some("up".to_string()),
            }),
            insights_history: Vec::new(),
        })
    }

    async fn ai_chat(&self, message: &str) -> Result<ChatReply> {
        self.record(format!("ai_chat:{message}")).await?;
        Ok(ChatReply {
            response: format!("coach says: {message}"),
            timestamp: None,
        })
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.record("list_notes").await?;
        Ok(vec![note(1, "weekly plan"), note(2, "meeting minutes")])
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        self.record(format!("create_note:{}", draft.title)).await?;
        Ok(note(self.fresh_id(), &draft.title))
    }

    async fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Note> {
        self.record(format!("update_note:{id}")).await?;
        Ok(note(id, &draft.title))
    }

    async fn delete_note(&self, id: i64) -> Result<()> {
        self.record(format!("delete_note:{id}")).await?;
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.record("list_tasks").await?;
        Ok(vec![
            task(20, "review draft", TaskStatus::Todo),
            task(21, "ship release", TaskStatus::InProgress),
        ])
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        self.record(format!("create_task:{}", draft.title)).await?;
        Ok(task(self.fresh_id(), &draft.title, TaskStatus::Todo))
    }

    async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task> {
        self.record(format!("update_task:{id}")).await?;
        let status = patch.status.unwrap_or(TaskStatus::Todo);
        Ok(task(id, "review draft", status))
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        self.record("list_events").await?;
        Ok(vec![event(10, "standup", "2026-08-23T09:30:00")])
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event> {
        self.record(format!("create_event:{}", draft.title)).await?;
        Ok(event(self.fresh_id(), &draft.title, &draft.start_time))
    }

    async fn start_focus_session(
        &self,
        session_type: SessionType,
        planned_minutes: u32,
    ) -> Result<FocusSessionRecord> {
        self.record(format!("start_focus_session:{}", session_type.as_str())).await?;
        Ok(FocusSessionRecord {
            id: self.fresh_id(),
            session_type: Some(session_type.as_str().to_string()),
            planned_duration: Some(planned_minutes),
            status: Some("active".to_string()),
        })
    }

    async fn complete_focus_session(&self, report: &CompletionReport) -> Result<()> {
        self.record(format!("complete_focus_session:{}", report.session_id)).await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<SearchResults> {
        self.record(format!("search:{query}")).await?;
        Ok(SearchResults {
            query: query.to_string(),
            results: SearchBuckets {
                notes: vec![note(1, "weekly plan")],
                tasks: Vec::new(),
                events: Vec::new(),
            },
            total_results: 1,
        })
    }

    async fn get_templates(&self) -> Result<TemplateCatalog> {
        self.record("get_templates").await?;
        Ok(TemplateCatalog {
            user_templates: vec![note(31, "retro")],
            default_templates: vec![NoteTemplate {
                id: "meeting-notes".to_string(),
                title: "회의록 템플릿".to_string(),
                content: "# 회의록".to_string(),
                emoji: Some("👥".to_string()),
                category: Some("project".to_string()),
            }],
        })
    }

    async fn use_template(&self, template_id: &str, title: Option<&str>) -> Result<Note> {
        self.record(format!("use_template:{template_id}")).await?;
        Ok(note(self.fresh_id(), title.unwrap_or("회의록 템플릿")))
    }

    async fn get_settings(&self) -> Result<serde_json::Value> {
        self.record("get_settings").await?;
        Ok(serde_json::json!({"theme": "light"}))
    }

    async fn update_settings(&self, settings: &serde_json::Value) -> Result<serde_json::Value> {
        self.record("update_settings").await?;
        Ok(settings.clone())
    }
}

/// Builds an app over the mock API with empty in-memory token storage.
pub fn app(api: Arc<MockApi>) -> CortexApp {
    CortexApp::new(api, Arc::new(MemoryTokenStore::new()), AuthToken::new())
}

/// Builds an app whose token store already holds a persisted token.
pub fn app_with_stored_token(api: Arc<MockApi>, token: &str) -> CortexApp {
    CortexApp::new(
        api,
        Arc::new(MemoryTokenStore::with_token(token)),
        AuthToken::new(),
    )
}
