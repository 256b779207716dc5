//! Session lifecycle: login, registration, restore, and logout teardown.

mod common;

use common::{MockApi, app, app_with_stored_token};
use cortex_app::CortexApp;
use cortex_core::credential::TokenStore;
use cortex_core::notification::NotificationKind;
use cortex_core::task::TaskStatus;
use cortex_gateway::{AuthToken, MemoryTokenStore};
use std::sync::Arc;

#[tokio::test]
async fn test_login_loads_the_workspace_once() {
    let api = MockApi::new();
    let app = app(api.clone());

    app.login("demo@cortex.app", "secret123").await.unwrap();

    assert!(app.sessions().is_authenticated().await);
    assert_eq!(api.count("login"), 1);
    assert_eq!(api.count("dashboard_summary"), 1);
    assert_eq!(api.count("ai_insights"), 1);

    // The summary populated the caches
    let notes = app.dashboard().notes().await;
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].title, "weekly plan");
    assert!(app.dashboard().dashboard().await.is_some());
}

#[tokio::test]
async fn test_failed_login_shows_one_error_and_fetches_nothing() {
    let api = MockApi::new();
    api.fail("login");
    let app = app(api.clone());

    let err = app.login("demo@cortex.app", "wrong-pass").await.unwrap_err();
    assert!(err.is_api());

    assert!(!app.sessions().is_authenticated().await);
    assert_eq!(api.count("dashboard_summary"), 0);

    let entries = app.notifier().entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, NotificationKind::Error);
    assert_eq!(entries[0].message, "invalid credentials");
}

#[tokio::test]
async fn test_blank_credentials_rejected_locally() {
    let api = MockApi::new();
    let app = app(api.clone());

    let err = app.login("", "secret123").await.unwrap_err();
    assert!(err.is_validation());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_short_password_rejected_before_any_network() {
    let api = MockApi::new();
    let app = app(api.clone());

    let err = app
        .register("new@cortex.app", "newbie", "short", "short")
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_password_mismatch_rejected_before_any_network() {
    let api = MockApi::new();
    let app = app(api.clone());

    let err = app
        .register("new@cortex.app", "newbie", "secret123", "secret124")
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_register_signs_in_with_the_issued_token() {
    let api = MockApi::new();
    let app = app(api.clone());

    app.register("new@cortex.app", "newbie", "secret123", "secret123")
        .await
        .unwrap();

    assert!(app.sessions().is_authenticated().await);
    assert_eq!(app.sessions().user().await.unwrap().username, "newbie");
    // Registration logs straight in, no separate login round-trip
    assert_eq!(api.count("login"), 0);
    assert_eq!(api.count("me"), 0);
}

#[tokio::test]
async fn test_logout_clears_every_piece_of_user_state() {
    let api = MockApi::new();
    let app = app(api.clone());

    app.login("demo@cortex.app", "secret123").await.unwrap();
    app.chat().send("how was my week?").await.unwrap();
    app.dashboard()
        .update_task_status(20, TaskStatus::Completed)
        .await
        .unwrap();
    assert!(!app.dashboard().notes().await.is_empty());

    app.logout().await;

    assert!(!app.sessions().is_authenticated().await);
    assert!(app.sessions().user().await.is_none());
    assert!(app.dashboard().notes().await.is_empty());
    assert!(app.dashboard().tasks().await.is_empty());
    assert!(app.dashboard().events().await.is_empty());
    assert!(app.dashboard().dashboard().await.is_none());
    assert!(app.chat().history().await.is_empty());

    let messages: Vec<_> = app
        .notifier()
        .entries()
        .await
        .iter()
        .map(|e| e.message.clone())
        .collect();
    assert!(messages.contains(&"로그아웃되었습니다.".to_string()));
}

#[tokio::test]
async fn test_bootstrap_restores_a_persisted_session() {
    let api = MockApi::new();
    let app = app_with_stored_token(api.clone(), "tok-persisted");

    app.bootstrap().await;

    assert!(app.sessions().is_authenticated().await);
    assert_eq!(api.count("me"), 1);
    assert_eq!(api.count("dashboard_summary"), 1);
    assert!(!app.is_loading().await);
}

#[tokio::test]
async fn test_bootstrap_discards_a_rejected_token() {
    let api = MockApi::new();
    api.fail("me");
    let app = app_with_stored_token(api.clone(), "tok-stale");

    app.bootstrap().await;

    assert!(!app.sessions().is_authenticated().await);
    assert_eq!(api.count("dashboard_summary"), 0);
    assert!(!app.is_loading().await);
}

#[tokio::test]
async fn test_bootstrap_discards_the_token_when_validation_cannot_reach_the_server() {
    let api = MockApi::new();
    api.fail_transport("me");
    let store = Arc::new(MemoryTokenStore::with_token("tok-unreachable"));
    let app = CortexApp::new(api.clone(), store.clone(), AuthToken::new());

    app.bootstrap().await;

    // The stored token is gone, not just unused: the next launch starts clean
    assert!(!app.sessions().is_authenticated().await);
    assert!(store.get().await.unwrap().is_none());
    assert_eq!(api.count("dashboard_summary"), 0);
    assert!(!app.is_loading().await);
}

#[tokio::test]
async fn test_bootstrap_without_stored_token_stays_signed_out() {
    let api = MockApi::new();
    let app = app(api.clone());

    app.bootstrap().await;

    assert!(!app.sessions().is_authenticated().await);
    assert!(api.calls().is_empty());
    assert!(!app.is_loading().await);
}
