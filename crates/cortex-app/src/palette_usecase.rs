//! Command palette use case.
//!
//! Keyboard navigation plus the debounced search pipeline. Each keystroke
//! bumps a generation counter; the debounce task and the response handler
//! both re-check it, so a burst of typing costs one request and a stale
//! response can never overwrite a newer query's results.

use cortex_core::error::Result;
use cortex_core::palette::{Command, CommandAction, CommandPalette};
use cortex_core::search::SearchResults;
use cortex_gateway::ProductivityApi;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// Keystroke-to-request quiet period.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Use case for the command palette and its live search.
#[derive(Clone)]
pub struct PaletteUseCase {
    api: Arc<dyn ProductivityApi>,
    palette: Arc<RwLock<CommandPalette>>,
    /// Monotonic query generation; only the latest generation may search
    /// and apply results.
    generation: Arc<AtomicU64>,
}

impl PaletteUseCase {
    pub fn new(api: Arc<dyn ProductivityApi>, palette: Arc<RwLock<CommandPalette>>) -> Self {
        Self {
            api,
            palette,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Applies a new query and schedules the debounced search.
    ///
    /// A blank query clears results immediately and schedules nothing.
    pub async fn input(&self, query: &str) {
        self.palette.write().await.set_query(query);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim().to_string();
        if query.is_empty() {
            return;
        }

        // The quiet period starts at the keystroke, not at the task's
        // first poll.
        let deadline = tokio::time::Instant::now() + SEARCH_DEBOUNCE;
        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if this.generation.load(Ordering::SeqCst) != generation {
                return;
            }
            match this.api.search(&query).await {
                Ok(results) => this.apply_results(generation, results).await,
                Err(err) => {
                    tracing::debug!(target: "palette", error = %err, "search failed");
                }
            }
        });
    }

    async fn apply_results(&self, generation: u64, results: SearchResults) {
        // The query may have moved on while the request was in flight
        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }
        self.palette.write().await.set_results(results);
    }

    /// Searches immediately, bypassing the debounce. Used by explicit
    /// search submission outside the palette.
    pub async fn search_now(&self, query: &str) -> Result<SearchResults> {
        self.api.search(query).await
    }

    /// Moves the selection down.
    pub async fn move_down(&self) {
        self.palette.write().await.move_down();
    }

    /// Moves the selection up.
    pub async fn move_up(&self) {
        self.palette.write().await.move_up();
    }

    /// Resolves Enter to the selected action, if any.
    pub async fn activate(&self) -> Option<CommandAction> {
        self.palette.read().await.activate()
    }

    /// Resets query, selection, and results, invalidating pending searches.
    pub async fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.palette.write().await.reset();
    }

    /// Current query text.
    pub async fn query(&self) -> String {
        self.palette.read().await.query().to_string()
    }

    /// Commands matching the current query.
    pub async fn filtered_commands(&self) -> Vec<Command> {
        self.palette
            .read()
            .await
            .filtered_commands()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Latest search results, if any.
    pub async fn results(&self) -> Option<SearchResults> {
        self.palette.read().await.results().cloned()
    }
}
