//! Session lifecycle use case.
//!
//! Orchestrates login, registration, startup restore, and logout across the
//! API gateway, the token store, and the shared workspace state. Teardown is
//! deliberately infallible: logout always leaves the client signed out, even
//! when removing the persisted token fails.

use cortex_core::chat::ChatMessage;
use cortex_core::credential::TokenStore;
use cortex_core::error::{CortexError, Result};
use cortex_core::session::Session;
use cortex_core::user::UserProfile;
use cortex_gateway::{AuthToken, ProductivityApi};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::notifier::Notifier;
use crate::scope::RequestScope;
use crate::workspace::Workspace;

/// Minimum accepted password length, mirrored from the server's rule.
const MIN_PASSWORD_LEN: usize = 6;

/// Use case for authentication and session teardown.
pub struct SessionUseCase {
    api: Arc<dyn ProductivityApi>,
    token_store: Arc<dyn TokenStore>,
    /// Bearer token handle shared with the gateway
    auth: AuthToken,
    session: Arc<RwLock<Session>>,
    workspace: Arc<RwLock<Workspace>>,
    chat_history: Arc<RwLock<Vec<ChatMessage>>>,
    notifier: Notifier,
    scope: RequestScope,
}

impl SessionUseCase {
    pub fn new(
        api: Arc<dyn ProductivityApi>,
        token_store: Arc<dyn TokenStore>,
        auth: AuthToken,
        session: Arc<RwLock<Session>>,
        workspace: Arc<RwLock<Workspace>>,
        chat_history: Arc<RwLock<Vec<ChatMessage>>>,
        notifier: Notifier,
        scope: RequestScope,
    ) -> Self {
        Self {
            api,
            token_store,
            auth,
            session,
            workspace,
            chat_history,
            notifier,
            scope,
        }
    }

    /// Signs in with email and password.
    ///
    /// On success the token is persisted and installed on the gateway, and
    /// the session becomes authenticated. On failure the session returns to
    /// the unauthenticated state and one error notification is shown.
    ///
    /// # Errors
    ///
    /// `CortexError::Validation` when either field is blank, otherwise the
    /// gateway error.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(CortexError::validation("email and password are required"));
        }

        self.session.write().await.begin_auth();
        match self.api.login(email, password).await {
            Ok((token, user)) => {
                self.establish(token, user).await;
                self.notifier.success("로그인되었습니다!").await;
                Ok(())
            }
            Err(err) => {
                self.session.write().await.reset();
                self.notify_auth_failure(&err, "로그인에 실패했습니다.").await;
                Err(err)
            }
        }
    }

    /// Registers a new account and signs straight in with the issued token.
    ///
    /// Local validation fails fast, before any network traffic: the password
    /// must be at least six characters and match its confirmation. Those
    /// failures surface as `CortexError::Validation` without a notification;
    /// the registration form renders them inline.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<()> {
        if email.trim().is_empty() || username.trim().is_empty() {
            return Err(CortexError::validation("email and username are required"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(CortexError::validation(
                "password must be at least 6 characters",
            ));
        }
        if password != password_confirm {
            return Err(CortexError::validation("passwords do not match"));
        }

        self.session.write().await.begin_auth();
        match self.api.register(email, username, password).await {
            Ok((token, user)) => {
                self.establish(token, user).await;
                self.notifier.success("로그인되었습니다!").await;
                Ok(())
            }
            Err(err) => {
                self.session.write().await.reset();
                self.notify_auth_failure(&err, "회원가입에 실패했습니다.").await;
                Err(err)
            }
        }
    }

    /// Restores a persisted session at startup.
    ///
    /// Reads the stored token, validates it against `/auth/me`, and returns
    /// whether the client ended up authenticated. Any validation failure,
    /// including a transport failure, discards the stored token and leaves
    /// the client unauthenticated; the next launch starts clean.
    pub async fn restore(&self) -> Result<bool> {
        let Some(token) = self.token_store.get().await? else {
            return Ok(false);
        };

        self.session.write().await.begin_auth();
        self.auth.set(token.clone()).await;
        match self.api.me().await {
            Ok(user) => {
                self.session.write().await.establish(token, user);
                Ok(true)
            }
            Err(err) => {
                if let Err(remove_err) = self.token_store.remove().await {
                    tracing::warn!(target: "session", error = %remove_err, "failed to discard stored token");
                }
                self.auth.clear().await;
                self.session.write().await.reset();
                tracing::debug!(target: "session", error = %err, "session restore failed");
                Ok(false)
            }
        }
    }

    /// Signs out and tears down every piece of per-user state.
    ///
    /// Cancels in-flight requests, clears the token (gateway and disk), the
    /// workspace caches, and the chat history, then announces the sign-out.
    /// Never fails: a token-store error is logged and teardown continues.
    pub async fn logout(&self) {
        self.session.write().await.begin_logout();
        self.scope.cancel_all().await;

        self.auth.clear().await;
        if let Err(err) = self.token_store.remove().await {
            tracing::warn!(target: "session", error = %err, "failed to remove persisted token");
        }

        self.workspace.write().await.clear();
        self.chat_history.write().await.clear();
        self.session.write().await.reset();

        self.notifier.info("로그아웃되었습니다.").await;
    }

    /// True while a validated credential is held.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Snapshot of the signed-in user's profile, if any.
    pub async fn user(&self) -> Option<UserProfile> {
        self.session.read().await.user().cloned()
    }

    async fn establish(&self, token: String, user: UserProfile) {
        if let Err(err) = self.token_store.set(&token).await {
            // The session still works for this run; only restore is affected
            tracing::warn!(target: "session", error = %err, "failed to persist token");
        }
        self.auth.set(token.clone()).await;
        self.session.write().await.establish(token, user);
    }

    /// Shows the server's message for API rejections, a generic line otherwise.
    async fn notify_auth_failure(&self, err: &CortexError, fallback: &str) {
        let message = if err.is_api() {
            err.user_message()
        } else {
            fallback.to_string()
        };
        self.notifier.error(message).await;
    }
}
