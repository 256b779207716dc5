//! Focus session use case.
//!
//! Registers sessions with the API, drives the once-per-second tick of the
//! pure [`FocusTracker`], and reports completions. At most one ticker task
//! exists at a time; it is aborted before being replaced and on teardown.

use cortex_core::error::Result;
use cortex_core::focus::{CompletionReport, FocusSession, FocusTracker, SessionType};
use cortex_gateway::ProductivityApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::notifier::Notifier;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Use case for the focus timer.
pub struct FocusUseCase {
    api: Arc<dyn ProductivityApi>,
    tracker: Arc<RwLock<FocusTracker>>,
    /// The running ticker task, if any. Aborted before replacement.
    ticker: Mutex<Option<JoinHandle<()>>>,
    notifier: Notifier,
}

impl FocusUseCase {
    pub fn new(api: Arc<dyn ProductivityApi>, notifier: Notifier) -> Self {
        Self {
            api,
            tracker: Arc::new(RwLock::new(FocusTracker::new())),
            ticker: Mutex::new(None),
            notifier,
        }
    }

    /// Starts a focus session.
    ///
    /// Registers the session with the API first, then arms the local tracker
    /// with the server-assigned id and spawns the 1 Hz ticker. The tracker
    /// rejects a second session before any network traffic happens.
    pub async fn start(&self, session_type: SessionType, planned_minutes: u32) -> Result<()> {
        {
            let tracker = self.tracker.read().await;
            if tracker.is_active() {
                return Err(cortex_core::CortexError::state(
                    "a focus session is already running",
                ));
            }
        }
        if planned_minutes == 0 {
            return Err(cortex_core::CortexError::state(
                "planned duration must be positive",
            ));
        }

        let record = match self.api.start_focus_session(session_type, planned_minutes).await {
            Ok(record) => record,
            Err(err) => {
                self.notifier.error("집중 세션 시작에 실패했습니다.").await;
                return Err(err);
            }
        };

        self.tracker
            .write()
            .await
            .begin(record.id, session_type, planned_minutes)?;
        self.spawn_ticker().await;

        self.notifier
            .success(format!("{planned_minutes}분 집중 세션이 시작되었습니다!"))
            .await;
        Ok(())
    }

    /// Pauses or resumes the timer, returning the new running state.
    ///
    /// The ticker task lives exactly as long as the Running state: pausing
    /// aborts it, resuming spawns a fresh one anchored at the resume.
    pub async fn toggle(&self) -> Result<bool> {
        let running = self.tracker.write().await.toggle()?;
        if running {
            self.spawn_ticker().await;
        } else {
            self.stop_ticker().await;
        }
        Ok(running)
    }

    /// Completes the active session.
    ///
    /// The session completes locally no matter what: the ticker is stopped
    /// and the tracker returns to idle even when reporting the result to the
    /// API fails, in which case one error notification is shown.
    pub async fn complete(&self, quality_rating: u8) -> Result<CompletionReport> {
        self.stop_ticker().await;
        let report = self.tracker.write().await.complete(quality_rating)?;

        match self.api.complete_focus_session(&report).await {
            Ok(()) => {
                self.notifier.success("집중 세션이 완료되었습니다!").await;
            }
            Err(err) => {
                tracing::warn!(target: "focus", error = %err, "failed to report session completion");
                self.notifier.error("세션 완료 처리에 실패했습니다.").await;
            }
        }
        Ok(report)
    }

    /// Discards any active session without reporting it. Used on logout.
    pub async fn shutdown(&self) {
        self.stop_ticker().await;
        *self.tracker.write().await = FocusTracker::new();
    }

    /// Snapshot of the active session, if any.
    pub async fn session(&self) -> Option<FocusSession> {
        self.tracker.read().await.session().cloned()
    }

    /// Remaining seconds against the plan; negative on overrun.
    pub async fn remaining_secs(&self) -> Option<i64> {
        self.tracker.read().await.remaining_secs()
    }

    async fn spawn_ticker(&self) {
        let tracker = Arc::clone(&self.tracker);
        // Anchor the cadence to the transition into Running, not to the
        // spawned task's first poll: the first tick lands at exactly +1s.
        let first_tick = tokio::time::Instant::now() + TICK_PERIOD;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first_tick, TICK_PERIOD);
            loop {
                interval.tick().await;
                tracker.write().await.tick();
            }
        });

        let mut slot = self.ticker.lock().await;
        if let Some(old) = slot.replace(handle) {
            old.abort();
        }
    }

    async fn stop_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }
}

impl Drop for FocusUseCase {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.ticker.try_lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}
