//! Command palette model.
//!
//! Holds the static command list, the query, the clamped selection index,
//! and the latest server search results. Debouncing and dispatching the
//! actual search request belong to the application layer.

use serde::{Deserialize, Serialize};

use crate::search::SearchResults;

/// Action bound to a built-in command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    CreateNote,
    CreateTask,
    StartFocus,
}

/// An immediately-available palette command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: &'static str,
    /// Display label (product copy, Korean in the shipped locale)
    pub label: String,
    pub action: CommandAction,
}

/// The built-in commands shown when the query is empty or matching.
fn default_commands() -> Vec<Command> {
    vec![
        Command {
            id: "create-note",
            label: "새 노트 작성".to_string(),
            action: CommandAction::CreateNote,
        },
        Command {
            id: "create-task",
            label: "새 작업 추가".to_string(),
            action: CommandAction::CreateTask,
        },
        Command {
            id: "start-focus",
            label: "집중 세션 시작".to_string(),
            action: CommandAction::StartFocus,
        },
    ]
}

/// Keyboard-driven command palette state.
#[derive(Debug, Clone)]
pub struct CommandPalette {
    commands: Vec<Command>,
    query: String,
    selected: usize,
    results: Option<SearchResults>,
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandPalette {
    /// Creates a palette with the built-in command set.
    pub fn new() -> Self {
        Self::with_commands(default_commands())
    }

    /// Creates a palette with a custom command set.
    pub fn with_commands(commands: Vec<Command>) -> Self {
        Self {
            commands,
            query: String::new(),
            selected: 0,
            results: None,
        }
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Updates the query and re-clamps the selection.
    ///
    /// Clearing the query also drops any stale search results.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        if self.query.trim().is_empty() {
            self.results = None;
        }
        self.clamp_selection();
    }

    /// Commands whose label contains the query, case-insensitively.
    pub fn filtered_commands(&self) -> Vec<&Command> {
        let needle = self.query.to_lowercase();
        self.commands
            .iter()
            .filter(|cmd| cmd.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Moves the selection down, clamped to the last filtered command.
    pub fn move_down(&mut self) {
        let count = self.filtered_commands().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    /// Moves the selection up, clamped to zero.
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Current selection index.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The currently selected command, if the filtered list is non-empty.
    pub fn selected(&self) -> Option<&Command> {
        self.filtered_commands().get(self.selected).copied()
    }

    /// Resolves Enter: the selected action, or nothing when the list is empty.
    pub fn activate(&self) -> Option<CommandAction> {
        self.selected().map(|cmd| cmd.action)
    }

    /// Stores the latest server search results for display.
    pub fn set_results(&mut self, results: SearchResults) {
        self.results = Some(results);
    }

    /// Latest search results, if a non-empty query has resolved.
    pub fn results(&self) -> Option<&SearchResults> {
        self.results.as_ref()
    }

    /// Resets query, selection, and results (palette closed).
    pub fn reset(&mut self) {
        self.query.clear();
        self.selected = 0;
        self.results = None;
    }

    fn clamp_selection(&mut self) {
        let count = self.filtered_commands().len();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_substring_case_insensitively() {
        let mut palette = CommandPalette::new();
        palette.set_query("작업");

        let labels: Vec<_> = palette
            .filtered_commands()
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["새 작업 추가"]);
    }

    #[test]
    fn test_empty_query_shows_all_commands() {
        let palette = CommandPalette::new();
        assert_eq!(palette.filtered_commands().len(), 3);
    }

    #[test]
    fn test_selection_clamps_at_both_ends() {
        let mut palette = CommandPalette::new();
        palette.move_up();
        assert_eq!(palette.selected_index(), 0);

        for _ in 0..10 {
            palette.move_down();
        }
        assert_eq!(palette.selected_index(), 2);
    }

    #[test]
    fn test_selection_reclamped_when_filter_shrinks() {
        let mut palette = CommandPalette::new();
        palette.move_down();
        palette.move_down();
        palette.set_query("작업");
        assert_eq!(palette.selected_index(), 0);
        assert_eq!(palette.activate(), Some(CommandAction::CreateTask));
    }

    #[test]
    fn test_activate_on_empty_filter_is_none() {
        let mut palette = CommandPalette::new();
        palette.set_query("no such command");
        assert!(palette.filtered_commands().is_empty());
        assert_eq!(palette.activate(), None);
    }

    #[test]
    fn test_clearing_query_drops_results() {
        let mut palette = CommandPalette::new();
        palette.set_query("note");
        palette.set_results(crate::search::SearchResults::empty("note"));
        assert!(palette.results().is_some());

        palette.set_query("");
        assert!(palette.results().is_none());
    }
}
