//! Focus session state machine.
//!
//! At most one focus session is active per client. The tracker is a pure
//! state machine: scheduling the once-per-second tick is the application
//! layer's job, so the transitions here stay deterministic and testable.

use serde::{Deserialize, Serialize};

use crate::error::{CortexError, Result};

/// Kind of focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Pomodoro,
    DeepWork,
    Custom,
}

impl SessionType {
    /// Wire representation used by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro",
            Self::DeepWork => "deep_work",
            Self::Custom => "custom",
        }
    }
}

/// The active focus session owned by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    /// Server-assigned session id
    pub id: i64,
    pub session_type: SessionType,
    /// Planned duration in minutes (positive)
    pub planned_minutes: u32,
    /// Whole seconds elapsed while running
    pub elapsed_secs: u64,
    /// Whether the timer is currently advancing
    pub running: bool,
}

/// Completion summary reported back to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionReport {
    /// Server-assigned session id
    pub session_id: i64,
    /// User-supplied quality rating (1-5)
    pub quality_rating: u8,
    /// Computed score in `[0, 10]`
    pub focus_score: f64,
}

/// Single-session focus state machine.
///
/// `Idle -> Running -> Paused -> Running -> ... -> Completed -> Idle`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusTracker {
    session: Option<FocusSession>,
}

impl FocusTracker {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a session, transitioning to Running with zero elapsed time.
    ///
    /// # Errors
    ///
    /// `CortexError::State` if a session is already active.
    pub fn begin(&mut self, id: i64, session_type: SessionType, planned_minutes: u32) -> Result<&FocusSession> {
        if self.session.is_some() {
            return Err(CortexError::state("a focus session is already running"));
        }
        if planned_minutes == 0 {
            return Err(CortexError::state("planned duration must be positive"));
        }
        self.session = Some(FocusSession {
            id,
            session_type,
            planned_minutes,
            elapsed_secs: 0,
            running: true,
        });
        // Safe to unwrap because we just assigned it
        Ok(self.session.as_ref().unwrap())
    }

    /// Advances the elapsed counter by one second.
    ///
    /// A no-op while paused or idle, so a late tick after a transition
    /// cannot advance a frozen session.
    pub fn tick(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.running {
                session.elapsed_secs += 1;
            }
        }
    }

    /// Flips Running <-> Paused, returning the new running state.
    ///
    /// # Errors
    ///
    /// `CortexError::State` if no session is active.
    pub fn toggle(&mut self) -> Result<bool> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| CortexError::state("no focus session to toggle"))?;
        session.running = !session.running;
        Ok(session.running)
    }

    /// Completes the session, discarding it and returning the report.
    ///
    /// Valid from both Running and Paused. The caller reports the result to
    /// the API; local completion never depends on that call succeeding.
    ///
    /// # Errors
    ///
    /// `CortexError::State` if no session is active.
    pub fn complete(&mut self, quality_rating: u8) -> Result<CompletionReport> {
        let session = self
            .session
            .take()
            .ok_or_else(|| CortexError::state("no focus session to complete"))?;
        Ok(CompletionReport {
            session_id: session.id,
            quality_rating,
            focus_score: focus_score(session.elapsed_secs, session.planned_minutes),
        })
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&FocusSession> {
        self.session.as_ref()
    }

    /// True while a session exists (Running or Paused).
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Remaining seconds against the plan.
    ///
    /// Goes negative on overrun; presentation clamps, the counter does not.
    pub fn remaining_secs(&self) -> Option<i64> {
        self.session
            .as_ref()
            .map(|s| i64::from(s.planned_minutes) * 60 - s.elapsed_secs as i64)
    }
}

/// `min(10, (elapsed_minutes / planned_minutes) * 10)`
fn focus_score(elapsed_secs: u64, planned_minutes: u32) -> f64 {
    let elapsed_minutes = elapsed_secs as f64 / 60.0;
    (elapsed_minutes / f64::from(planned_minutes) * 10.0).min(10.0)
}
