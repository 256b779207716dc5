//! Application root.
//!
//! Wires the use cases over one set of shared state and owns the flows that
//! span them: startup bootstrap, global key handling, and logout teardown.

use cortex_core::chat::ChatMessage;
use cortex_core::credential::TokenStore;
use cortex_core::error::Result;
use cortex_core::overlay::{KeyInput, Overlay, OverlayCoordinator};
use cortex_core::palette::{CommandAction, CommandPalette};
use cortex_core::session::Session;
use cortex_gateway::{AuthToken, FileTokenStore, GatewayConfig, HttpGateway, ProductivityApi};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::chat_usecase::ChatUseCase;
use crate::dashboard_usecase::DashboardUseCase;
use crate::focus_usecase::FocusUseCase;
use crate::notifier::Notifier;
use crate::palette_usecase::PaletteUseCase;
use crate::scope::RequestScope;
use crate::session_usecase::SessionUseCase;
use crate::workspace::Workspace;

/// The assembled client: shared state plus one use case per concern.
pub struct CortexApp {
    sessions: SessionUseCase,
    dashboard: DashboardUseCase,
    focus: FocusUseCase,
    chat: ChatUseCase,
    palette: PaletteUseCase,
    overlay: Arc<RwLock<OverlayCoordinator>>,
    session: Arc<RwLock<Session>>,
    loading: Arc<RwLock<bool>>,
    notifier: Notifier,
}

impl CortexApp {
    /// Assembles the client over the given gateway and token store.
    pub fn new(api: Arc<dyn ProductivityApi>, token_store: Arc<dyn TokenStore>, auth: AuthToken) -> Self {
        let session = Arc::new(RwLock::new(Session::new()));
        let workspace = Arc::new(RwLock::new(Workspace::default()));
        let chat_history: Arc<RwLock<Vec<ChatMessage>>> = Arc::new(RwLock::new(Vec::new()));
        let palette_state = Arc::new(RwLock::new(CommandPalette::new()));
        let notifier = Notifier::new();
        let scope = RequestScope::new();

        Self {
            sessions: SessionUseCase::new(
                Arc::clone(&api),
                token_store,
                auth,
                Arc::clone(&session),
                Arc::clone(&workspace),
                Arc::clone(&chat_history),
                notifier.clone(),
                scope.clone(),
            ),
            dashboard: DashboardUseCase::new(
                Arc::clone(&api),
                Arc::clone(&session),
                Arc::clone(&workspace),
                notifier.clone(),
                scope.clone(),
            ),
            focus: FocusUseCase::new(Arc::clone(&api), notifier.clone()),
            chat: ChatUseCase::new(Arc::clone(&api), chat_history),
            palette: PaletteUseCase::new(api, palette_state),
            overlay: Arc::new(RwLock::new(OverlayCoordinator::new())),
            session,
            loading: Arc::new(RwLock::new(false)),
            notifier,
        }
    }

    /// Builds a client against the configured API origin with file-backed
    /// token storage.
    pub fn connect(config: &GatewayConfig) -> Result<Self> {
        let auth = AuthToken::new();
        let gateway = Arc::new(HttpGateway::new(config, auth.clone()));
        let token_store = Arc::new(FileTokenStore::new()?);
        Ok(Self::new(gateway, token_store, auth))
    }

    /// Startup sequence: restore a persisted session and, when that
    /// succeeds, load the workspace.
    ///
    /// The loading flag is cleared on every path out, including restore and
    /// refresh failures.
    pub async fn bootstrap(&self) {
        *self.loading.write().await = true;

        match self.sessions.restore().await {
            Ok(true) => {
                if let Err(err) = self.dashboard.refresh().await {
                    tracing::warn!(target: "app", error = %err, "initial workspace load failed");
                }
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(target: "app", error = %err, "session restore failed");
            }
        }

        *self.loading.write().await = false;
    }

    /// Signs in and loads the workspace.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        self.sessions.login(email, password).await?;
        if let Err(err) = self.dashboard.refresh().await {
            tracing::warn!(target: "app", error = %err, "post-login workspace load failed");
        }
        Ok(())
    }

    /// Registers and loads the workspace with the issued credential.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<()> {
        self.sessions
            .register(email, username, password, password_confirm)
            .await?;
        if let Err(err) = self.dashboard.refresh().await {
            tracing::warn!(target: "app", error = %err, "post-register workspace load failed");
        }
        Ok(())
    }

    /// Signs out: discards the focus session, closes overlays, and tears
    /// down per-user state. Never fails.
    pub async fn logout(&self) {
        self.focus.shutdown().await;
        self.palette.reset().await;
        self.overlay.write().await.close();
        self.sessions.logout().await;
    }

    /// Applies a global key input.
    ///
    /// Ignored while unauthenticated. Returns the command the user activated
    /// with Enter, for the rendering layer to route.
    pub async fn handle_key(&self, key: KeyInput) -> Option<CommandAction> {
        if !self.session.read().await.is_authenticated() {
            return None;
        }

        let current = self.overlay.read().await.current();
        match key {
            KeyInput::PaletteChord => {
                // Open-only: the chord while the palette is already up
                // leaves its query and selection alone. Escape closes.
                if current != Overlay::CommandPalette {
                    self.palette.reset().await;
                    self.overlay.write().await.open_palette();
                }
                None
            }
            KeyInput::Escape => {
                if current == Overlay::CommandPalette {
                    self.palette.reset().await;
                }
                self.overlay.write().await.close();
                None
            }
            KeyInput::Down => {
                if current == Overlay::CommandPalette {
                    self.palette.move_down().await;
                }
                None
            }
            KeyInput::Up => {
                if current == Overlay::CommandPalette {
                    self.palette.move_up().await;
                }
                None
            }
            KeyInput::Enter => {
                if current != Overlay::CommandPalette {
                    return None;
                }
                let action = self.palette.activate().await;
                if action.is_some() {
                    self.palette.reset().await;
                    self.overlay.write().await.close();
                }
                action
            }
        }
    }

    /// Opens the AI chat panel, replacing any other overlay.
    pub async fn open_chat(&self) {
        if self.overlay.read().await.current() == Overlay::CommandPalette {
            self.palette.reset().await;
        }
        self.overlay.write().await.open_chat();
    }

    /// The currently visible overlay.
    pub async fn overlay(&self) -> Overlay {
        self.overlay.read().await.current()
    }

    /// True while the startup sequence runs.
    pub async fn is_loading(&self) -> bool {
        *self.loading.read().await
    }

    /// Session lifecycle operations.
    pub fn sessions(&self) -> &SessionUseCase {
        &self.sessions
    }

    /// Dashboard and resource operations.
    pub fn dashboard(&self) -> &DashboardUseCase {
        &self.dashboard
    }

    /// Focus timer operations.
    pub fn focus(&self) -> &FocusUseCase {
        &self.focus
    }

    /// AI chat operations.
    pub fn chat(&self) -> &ChatUseCase {
        &self.chat
    }

    /// Command palette operations.
    pub fn palette(&self) -> &PaletteUseCase {
        &self.palette
    }

    /// Notification surface.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
