//! Cancellation scope for in-flight requests.
//!
//! Every authenticated fetch runs under the current scope token. Logout
//! rotates the token and cancels the old one, so responses racing the
//! teardown are dropped instead of mutating a signed-out workspace.

use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Rotating cancellation scope shared across use cases.
#[derive(Clone)]
pub struct RequestScope {
    current: Arc<RwLock<CancellationToken>>,
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestScope {
    /// Creates a scope with a fresh token.
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(CancellationToken::new())),
        }
    }

    /// The token guarding requests started now.
    pub async fn token(&self) -> CancellationToken {
        self.current.read().await.clone()
    }

    /// Cancels everything in flight and installs a fresh token.
    ///
    /// Requests started after this call are unaffected.
    pub async fn cancel_all(&self) {
        let mut guard = self.current.write().await;
        let old = std::mem::replace(&mut *guard, CancellationToken::new());
        old.cancel();
    }
}
