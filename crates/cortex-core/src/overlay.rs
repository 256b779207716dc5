//! Modal overlay coordination.
//!
//! The command palette and the AI chat panel are mutually exclusive by
//! construction: the overlay state is a single enum, so two overlays can
//! never be visible at once. Opening one replaces the other; Escape closes
//! whichever is open and is a no-op otherwise.

use serde::{Deserialize, Serialize};

/// Which modal overlay, if any, sits above the main view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    /// No overlay visible
    #[default]
    None,
    /// Keyboard-driven command palette
    CommandPalette,
    /// AI chat panel
    AiChat,
}

impl Overlay {
    /// True while any overlay is visible.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Global key inputs the coordinator reacts to while the main view is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// The "open command palette" chord (Cmd/Ctrl+K)
    PaletteChord,
    /// Escape
    Escape,
    /// Arrow down
    Down,
    /// Arrow up
    Up,
    /// Enter
    Enter,
}

/// Tracks the visible overlay and applies the global key bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayCoordinator {
    current: Overlay,
}

impl OverlayCoordinator {
    /// Creates a coordinator with no overlay open.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently visible overlay.
    pub fn current(&self) -> Overlay {
        self.current
    }

    /// Opens the command palette, replacing any other overlay.
    pub fn open_palette(&mut self) {
        self.current = Overlay::CommandPalette;
    }

    /// Opens the AI chat panel, replacing any other overlay.
    pub fn open_chat(&mut self) {
        self.current = Overlay::AiChat;
    }

    /// Closes whatever is open. Idempotent.
    pub fn close(&mut self) {
        self.current = Overlay::None;
    }
}
