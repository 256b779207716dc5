//! Domain models and pure state machines for the Cortex client.
//!
//! This crate holds everything the orchestration layer reasons about without
//! performing I/O: the session lifecycle, resource snapshots, the focus-timer
//! state machine, the bounded notification queue, overlay coordination, and
//! the command palette. Network and persistence live in `cortex-gateway`;
//! scheduling and wiring live in `cortex-app`.

pub mod chat;
pub mod credential;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod focus;
pub mod insight;
pub mod note;
pub mod notification;
pub mod overlay;
pub mod palette;
pub mod search;
pub mod session;
pub mod task;
pub mod user;

// Re-export common error type
pub use error::{CortexError, Result};
