//! HTTP gateway for the Cortex API.
//!
//! Owns the transport concerns the rest of the client should not see:
//! endpoint paths, the bearer token header, wire envelopes, and the mapping
//! from HTTP failures into the shared error taxonomy.

pub mod api;
pub mod client;
pub mod config;
pub mod dto;
pub mod token_store;

pub use api::ProductivityApi;
pub use client::{AuthToken, HttpGateway};
pub use config::GatewayConfig;
pub use dto::{ChatReply, FocusSessionRecord, NoteTemplate, TaskPatch, TemplateCatalog};
pub use token_store::{FileTokenStore, MemoryTokenStore};
