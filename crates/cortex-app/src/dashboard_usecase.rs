//! Workspace data use case.
//!
//! Loads the dashboard concurrently, keeps the resource caches current, and
//! applies mutations with server-confirmed records. Fetches run under the
//! request scope so a logout racing a slow response drops the result.

use chrono::Local;
use cortex_core::dashboard::DashboardSummary;
use cortex_core::error::Result;
use cortex_core::event::{Event, EventDraft};
use cortex_core::insight::InsightFeed;
use cortex_core::note::{Note, NoteDraft};
use cortex_core::session::Session;
use cortex_core::task::{Task, TaskDraft, TaskStatus};
use cortex_gateway::{ProductivityApi, TaskPatch, TemplateCatalog};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::notifier::Notifier;
use crate::scope::RequestScope;
use crate::workspace::Workspace;

/// Use case for the dashboard and the note/task/event resources.
pub struct DashboardUseCase {
    api: Arc<dyn ProductivityApi>,
    session: Arc<RwLock<Session>>,
    workspace: Arc<RwLock<Workspace>>,
    notifier: Notifier,
    scope: RequestScope,
}

impl DashboardUseCase {
    pub fn new(
        api: Arc<dyn ProductivityApi>,
        session: Arc<RwLock<Session>>,
        workspace: Arc<RwLock<Workspace>>,
        notifier: Notifier,
        scope: RequestScope,
    ) -> Self {
        Self {
            api,
            session,
            workspace,
            notifier,
            scope,
        }
    }

    /// Refreshes the dashboard summary and the insight feed concurrently.
    ///
    /// The two fetches are independent: a failure in one never blocks
    /// applying the other, and any failure produces exactly one error
    /// notification. Results arriving after logout are discarded.
    ///
    /// # Errors
    ///
    /// The first fetch error, after the surviving results were applied.
    pub async fn refresh(&self) -> Result<()> {
        if !self.session.read().await.is_authenticated() {
            return Ok(());
        }

        let cancel = self.scope.token().await;
        let (summary, insights) = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            results = async {
                tokio::join!(self.api.dashboard_summary(), self.api.ai_insights())
            } => results,
        };

        // The session may have ended while the fetches were in flight
        if cancel.is_cancelled() || !self.session.read().await.is_authenticated() {
            return Ok(());
        }

        let mut first_error = None;
        {
            let mut workspace = self.workspace.write().await;
            match summary {
                Ok(summary) => self.apply_summary(&mut workspace, summary),
                Err(err) => first_error = Some(err),
            }
            match insights {
                Ok(feed) => workspace.insights = Some(feed),
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => {
                tracing::warn!(target: "dashboard", error = %err, "dashboard refresh failed");
                self.notifier.error("데이터를 불러오는데 실패했습니다.").await;
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn apply_summary(&self, workspace: &mut Workspace, summary: DashboardSummary) {
        workspace.notes = summary.recent_notes.clone();
        workspace.events = summary.today_events.clone();
        workspace.dashboard = Some(summary);
    }

    /// True when a completion must be discarded: the scope was cancelled or
    /// the user signed out while the request was in flight.
    async fn stale(&self, cancel: &CancellationToken) -> bool {
        cancel.is_cancelled() || !self.session.read().await.is_authenticated()
    }

    /// Loads the full notes list for the notes view.
    pub async fn load_notes(&self) -> Result<()> {
        let cancel = self.scope.token().await;
        let notes = self.api.list_notes().await?;
        if !self.stale(&cancel).await {
            self.workspace.write().await.notes = notes;
        }
        Ok(())
    }

    /// Loads the full tasks list for the tasks view.
    pub async fn load_tasks(&self) -> Result<()> {
        let cancel = self.scope.token().await;
        let tasks = self.api.list_tasks().await?;
        if !self.stale(&cancel).await {
            self.workspace.write().await.tasks = tasks;
        }
        Ok(())
    }

    /// Loads the full events list for the calendar view.
    pub async fn load_events(&self) -> Result<()> {
        let cancel = self.scope.token().await;
        let events = self.api.list_events().await?;
        if !self.stale(&cancel).await {
            self.workspace.write().await.events = events;
        }
        Ok(())
    }

    /// Creates a note and prepends the server-confirmed record.
    pub async fn create_note(&self, draft: NoteDraft) -> Result<Note> {
        let cancel = self.scope.token().await;
        match self.api.create_note(&draft).await {
            Ok(note) => {
                if !self.stale(&cancel).await {
                    self.workspace.write().await.notes.insert(0, note.clone());
                    self.notifier.success("노트가 생성되었습니다!").await;
                }
                Ok(note)
            }
            Err(err) => {
                if !self.stale(&cancel).await {
                    self.notifier.error("노트 생성에 실패했습니다.").await;
                }
                Err(err)
            }
        }
    }

    /// Updates a note in place with the server-confirmed record.
    pub async fn update_note(&self, id: i64, draft: NoteDraft) -> Result<Note> {
        let cancel = self.scope.token().await;
        let updated = self.api.update_note(id, &draft).await?;
        if !self.stale(&cancel).await {
            let mut workspace = self.workspace.write().await;
            if let Some(slot) = workspace.notes.iter_mut().find(|n| n.id == id) {
                *slot = updated.clone();
            }
        }
        Ok(updated)
    }

    /// Deletes a note and drops it from the cache.
    pub async fn delete_note(&self, id: i64) -> Result<()> {
        let cancel = self.scope.token().await;
        self.api.delete_note(id).await?;
        if !self.stale(&cancel).await {
            self.workspace.write().await.notes.retain(|n| n.id != id);
        }
        Ok(())
    }

    /// Creates a task and prepends the server-confirmed record.
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Task> {
        let cancel = self.scope.token().await;
        match self.api.create_task(&draft).await {
            Ok(task) => {
                if !self.stale(&cancel).await {
                    self.workspace.write().await.tasks.insert(0, task.clone());
                    self.notifier.success("작업이 생성되었습니다!").await;
                }
                Ok(task)
            }
            Err(err) => {
                if !self.stale(&cancel).await {
                    self.notifier.error("작업 생성에 실패했습니다.").await;
                }
                Err(err)
            }
        }
    }

    /// Moves a task to a new status and updates the cached row.
    pub async fn update_task_status(&self, id: i64, status: TaskStatus) -> Result<()> {
        let cancel = self.scope.token().await;
        match self.api.update_task(id, &TaskPatch::status(status)).await {
            Ok(updated) => {
                if !self.stale(&cancel).await {
                    {
                        let mut workspace = self.workspace.write().await;
                        if let Some(slot) = workspace.tasks.iter_mut().find(|t| t.id == id) {
                            *slot = updated;
                        }
                    }
                    let message = if status == TaskStatus::Completed {
                        "작업이 완료되었습니다!"
                    } else {
                        "작업이 업데이트되었습니다!"
                    };
                    self.notifier.success(message).await;
                }
                Ok(())
            }
            Err(err) => {
                if !self.stale(&cancel).await {
                    self.notifier.error("작업 업데이트에 실패했습니다.").await;
                }
                Err(err)
            }
        }
    }

    /// Creates an event and prepends the server-confirmed record.
    pub async fn create_event(&self, draft: EventDraft) -> Result<Event> {
        let cancel = self.scope.token().await;
        match self.api.create_event(&draft).await {
            Ok(event) => {
                if !self.stale(&cancel).await {
                    self.workspace.write().await.events.insert(0, event.clone());
                    self.notifier.success("일정이 생성되었습니다!").await;
                }
                Ok(event)
            }
            Err(err) => {
                if !self.stale(&cancel).await {
                    self.notifier.error("일정 생성에 실패했습니다.").await;
                }
                Err(err)
            }
        }
    }

    /// Fetches the template catalog for the template picker.
    pub async fn templates(&self) -> Result<TemplateCatalog> {
        self.api.get_templates().await
    }

    /// Instantiates a template into a new note and prepends the result.
    pub async fn create_note_from_template(
        &self,
        template_id: &str,
        title: Option<&str>,
    ) -> Result<Note> {
        let cancel = self.scope.token().await;
        match self.api.use_template(template_id, title).await {
            Ok(note) => {
                if !self.stale(&cancel).await {
                    self.workspace.write().await.notes.insert(0, note.clone());
                    self.notifier
                        .success("템플릿으로부터 노트가 생성되었습니다.")
                        .await;
                }
                Ok(note)
            }
            Err(err) => {
                if !self.stale(&cancel).await {
                    self.notifier.error("노트 생성에 실패했습니다.").await;
                }
                Err(err)
            }
        }
    }

    /// Cached events starting on the local calendar day.
    pub async fn events_today(&self) -> Vec<Event> {
        let today = Local::now().date_naive();
        let workspace = self.workspace.read().await;
        cortex_core::dashboard::events_today(&workspace.events, today)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Snapshot of the cached dashboard summary.
    pub async fn dashboard(&self) -> Option<DashboardSummary> {
        self.workspace.read().await.dashboard.clone()
    }

    /// Snapshot of the cached insight feed.
    pub async fn insights(&self) -> Option<InsightFeed> {
        self.workspace.read().await.insights.clone()
    }

    /// Snapshot of the cached notes, newest first.
    pub async fn notes(&self) -> Vec<Note> {
        self.workspace.read().await.notes.clone()
    }

    /// Snapshot of the cached tasks.
    pub async fn tasks(&self) -> Vec<Task> {
        self.workspace.read().await.tasks.clone()
    }

    /// Snapshot of the cached events.
    pub async fn events(&self) -> Vec<Event> {
        self.workspace.read().await.events.clone()
    }
}
