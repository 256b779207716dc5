//! Credential store capability trait.
//!
//! Defines the interface for the single persisted bearer-token slot.
//!
//! # Security Note
//!
//! Implementations should ensure that:
//! - The backing file has appropriate permissions (e.g., 600 on Unix)
//! - Tokens are never logged or exposed in error messages

use crate::error::Result;

/// Persistent slot for the bearer token.
///
/// Read at startup (session restore) and written on login/register;
/// cleared on logout or credential rejection.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    /// Loads the stored token, if one exists.
    async fn get(&self) -> Result<Option<String>>;

    /// Stores a token, replacing any previous value.
    async fn set(&self, token: &str) -> Result<()>;

    /// Removes the stored token. A no-op if none is stored.
    async fn remove(&self) -> Result<()>;
}
