//! Integration tests for the login, lockout, and logout lifecycle.

mod helpers;

use erp_auth::{AuthError, CredentialField};
use erp_core::events::{EventPayload, SessionEvent};
use erp_core::traits::Clock;
use erp_entity::{UserRole, ViewId};

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_each_seeded_account_lands_on_its_default_view() {
    let cases = [
        ("admin", UserRole::Admin, ViewId::AdminDashboard),
        ("manager", UserRole::Manager, ViewId::Analytics),
        ("agent", UserRole::Agent, ViewId::Properties),
        ("accountant", UserRole::Accountant, ViewId::Financial),
    ];

    for (username, role, landing) in cases {
        let mut app = TestApp::new();
        let user = app.shell.login(username, PASSWORD).await.unwrap();

        assert_eq!(user.role, role);
        assert_eq!(user.email, format!("{username}@amgroup.com"));
        assert_eq!(app.shell.current_view(), landing);
        assert!(app.shell.is_monitoring());
    }
}

#[tokio::test]
async fn test_username_is_case_insensitive_but_password_is_not() {
    let mut app = TestApp::new();
    assert!(matches!(
        app.shell.login("Admin", "PASSWORD123").await,
        Err(AuthError::InvalidCredentials)
    ));

    let user = app.shell.login("  ADMIN ", PASSWORD).await.unwrap();
    assert_eq!(user.username, "admin");
}

#[tokio::test]
async fn test_blank_fields_do_not_count_as_failures() {
    let mut app = TestApp::new();

    assert!(matches!(
        app.shell.login("", PASSWORD).await,
        Err(AuthError::MissingField(CredentialField::Username))
    ));
    assert!(matches!(
        app.shell.login("agent", "   ").await,
        Err(AuthError::MissingField(CredentialField::Password))
    ));
    assert_eq!(app.shell.sessions().failed_attempts().await, 0);
    assert!(app.drain_events().is_empty());
}

#[tokio::test]
async fn test_third_failure_locks_out_even_correct_credentials() {
    let mut app = TestApp::new();

    for _ in 0..2 {
        assert!(matches!(
            app.shell.login("manager", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
    let err = app.shell.login("ghost", "nope").await.unwrap_err();
    let AuthError::TooManyAttempts { locked_until } = err else {
        panic!("expected lockout, got {err:?}");
    };
    assert_eq!(
        locked_until - app.clock.now(),
        app.config.auth.lockout_duration()
    );

    assert!(matches!(
        app.shell.login("manager", PASSWORD).await,
        Err(AuthError::TooManyAttempts { .. })
    ));
    assert_eq!(app.shell.current_role().await, None);

    let events = app.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        EventPayload::Session(SessionEvent::LockedOut { attempts: 3, .. })
    )));
}

#[tokio::test]
async fn test_lockout_lifts_after_window() {
    let mut app = TestApp::new();
    for _ in 0..3 {
        let _ = app.shell.login("agent", "nope").await;
    }
    assert!(app.shell.sessions().locked_until().await.is_some());

    let window = app.config.auth.lockout_duration().num_seconds();
    app.advance(window - 1);
    assert!(app.shell.login("agent", PASSWORD).await.is_err());

    app.advance(1);
    assert!(app.shell.sessions().locked_until().await.is_none());
    app.shell.login("agent", PASSWORD).await.unwrap();
    assert_eq!(app.shell.sessions().failed_attempts().await, 0);
}

#[tokio::test]
async fn test_operator_reset_unblocks_immediately() {
    let mut app = TestApp::new();
    for _ in 0..3 {
        let _ = app.shell.login("accountant", "nope").await;
    }

    app.shell.sessions().reset_lockout().await;
    assert_eq!(app.shell.sessions().failed_attempts().await, 0);
    app.shell.login("accountant", PASSWORD).await.unwrap();
    assert_eq!(app.shell.current_view(), ViewId::Financial);
}

#[tokio::test]
async fn test_success_resets_failure_count() {
    let mut app = TestApp::new();
    for _ in 0..2 {
        let _ = app.shell.login("admin", "nope").await;
    }
    assert_eq!(app.shell.sessions().failed_attempts().await, 2);

    app.login_as("admin").await;
    assert_eq!(app.shell.sessions().failed_attempts().await, 0);

    app.shell.logout().await;
    for _ in 0..2 {
        assert!(matches!(
            app.shell.login("admin", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}

#[tokio::test]
async fn test_second_login_requires_logout() {
    let mut app = TestApp::new();
    app.login_as("agent").await;

    assert!(matches!(
        app.shell.login("admin", PASSWORD).await,
        Err(AuthError::SessionActive)
    ));
    assert_eq!(app.shell.current_role().await, Some(UserRole::Agent));

    app.shell.logout().await;
    app.login_as("admin").await;
    assert_eq!(app.shell.current_role().await, Some(UserRole::Admin));
}

#[tokio::test]
async fn test_logout_is_idempotent_and_audited() {
    let mut app = TestApp::new();
    app.login_as("manager").await;

    let user = app.shell.logout().await.unwrap();
    assert_eq!(user.username, "manager");
    assert!(app.shell.logout().await.is_none());
    assert_eq!(app.shell.current_view(), ViewId::Dashboard);

    let events = app.drain_events();
    assert!(matches!(
        events.first(),
        Some(EventPayload::Session(SessionEvent::LoggedIn { .. }))
    ));
    let logouts = events
        .iter()
        .filter(|event| matches!(event, EventPayload::Session(SessionEvent::LoggedOut { .. })))
        .count();
    assert_eq!(logouts, 1);
}

#[tokio::test]
async fn test_password_reset_requires_an_address() {
    let mut app = TestApp::new();
    let sessions = app.shell.sessions().clone();

    assert!(matches!(
        sessions.request_password_reset("  ").await,
        Err(AuthError::MissingField(CredentialField::Email))
    ));
    sessions
        .request_password_reset("agent@amgroup.com")
        .await
        .unwrap();

    let events = app.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        EventPayload::Session(SessionEvent::PasswordResetRequested { email })
            if email == "agent@amgroup.com"
    ));
}
