//! Orchestration layer for the Cortex client.
//!
//! Sits between the pure domain state in `cortex-core` and the HTTP
//! transport in `cortex-gateway`: use cases own the scheduling (timers,
//! debounce, TTL expiry, cancellation) and the cross-cutting flows
//! (bootstrap, logout teardown, global keys).

pub mod app;
pub mod chat_usecase;
pub mod dashboard_usecase;
pub mod focus_usecase;
pub mod notifier;
pub mod palette_usecase;
pub mod scope;
pub mod session_usecase;
pub mod workspace;

pub use app::CortexApp;
pub use chat_usecase::ChatUseCase;
pub use dashboard_usecase::DashboardUseCase;
pub use focus_usecase::FocusUseCase;
pub use notifier::{NOTIFICATION_TTL, Notifier};
pub use palette_usecase::{PaletteUseCase, SEARCH_DEBOUNCE};
pub use scope::RequestScope;
pub use session_usecase::SessionUseCase;
pub use workspace::Workspace;
