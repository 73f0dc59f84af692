//! Integration tests for inactivity expiry driven by the idle monitor.

mod helpers;

use std::time::Duration as StdDuration;

use erp_auth::SessionNotice;
use erp_core::config::SessionConfig;
use erp_core::events::{EventPayload, SessionEvent};
use erp_entity::{UserRole, ViewId};

use helpers::TestApp;

const TIMEOUT_SECS: i64 = 300;

#[tokio::test(start_paused = true)]
async fn test_idle_session_is_expired_and_reset() {
    let mut app = TestApp::new();
    app.login_as("manager").await;
    app.shell.navigate(ViewId::Financial).await;

    app.advance(TIMEOUT_SECS + 1);
    let notice = app.notices.recv().await.unwrap();
    let SessionNotice::IdleExpired { user, idle_for, .. } = &notice;
    assert_eq!(user.username, "manager");
    assert!(idle_for.num_seconds() > TIMEOUT_SECS);
    assert!(notice.message().contains("5 minutes of inactivity"));

    let expired = app.shell.expire(&notice).await.unwrap();
    assert_eq!(expired.username, "manager");
    assert_eq!(app.shell.current_role().await, None);
    assert_eq!(app.shell.current_view(), ViewId::Dashboard);
    assert!(!app.shell.is_monitoring());

    let events = app.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        EventPayload::Session(SessionEvent::IdleExpired { idle_seconds, .. })
            if *idle_seconds > TIMEOUT_SECS as u64
    )));
}

#[tokio::test(start_paused = true)]
async fn test_exact_threshold_does_not_expire() {
    let mut app = TestApp::new();
    app.login_as("agent").await;

    app.advance(TIMEOUT_SECS);
    let waited = tokio::time::timeout(StdDuration::from_secs(120), app.notices.recv()).await;
    assert!(waited.is_err());
    assert_eq!(app.shell.current_view(), ViewId::Properties);
    assert!(app.shell.is_monitoring());
}

#[tokio::test(start_paused = true)]
async fn test_activity_postpones_expiry() {
    let mut app = TestApp::new();
    app.login_as("accountant").await;

    app.advance(TIMEOUT_SECS - 10);
    app.shell.record_activity().await;
    app.advance(TIMEOUT_SECS - 10);

    let waited = tokio::time::timeout(StdDuration::from_secs(60), app.notices.recv()).await;
    assert!(waited.is_err());
    assert_eq!(app.shell.current_role().await, Some(UserRole::Accountant));

    app.advance(11);
    assert!(app.notices.recv().await.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_logout_stops_monitoring() {
    let mut app = TestApp::new();
    app.login_as("admin").await;
    assert!(app.shell.is_monitoring());

    app.shell.logout().await;
    assert!(!app.shell.is_monitoring());

    app.advance(TIMEOUT_SECS * 2);
    let waited = tokio::time::timeout(StdDuration::from_secs(120), app.notices.recv()).await;
    assert!(waited.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_configured_timeout_is_honoured() {
    let mut app = TestApp::with_session(SessionConfig {
        idle_timeout_seconds: 30,
        idle_check_interval_seconds: 1,
        ..SessionConfig::default()
    });
    app.login_as("agent").await;

    app.advance(31);
    let notice = app.notices.recv().await.unwrap();
    assert!(notice.message().contains("30 seconds"));
    assert!(app.shell.expire(&notice).await.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_notice_after_relogin_is_stale() {
    let mut app = TestApp::new();
    app.login_as("agent").await;
    app.advance(TIMEOUT_SECS + 1);
    let notice = app.notices.recv().await.unwrap();

    app.shell.logout().await;
    app.login_as("agent").await;
    assert!(app.shell.expire(&notice).await.is_none());
    assert_eq!(app.shell.current_view(), ViewId::Properties);
}

#[tokio::test(start_paused = true)]
async fn test_monitoring_resumes_after_notice_overtaken_by_activity() {
    let mut app = TestApp::new();
    app.login_as("agent").await;

    app.advance(TIMEOUT_SECS + 1);
    let notice = app.notices.recv().await.unwrap();
    app.shell.record_activity().await;

    assert!(app.shell.expire(&notice).await.is_none());
    assert_eq!(app.shell.current_role().await, Some(UserRole::Agent));
    assert!(app.shell.is_monitoring());

    app.advance(3600);
    let later = app.notices.recv().await.unwrap();
    let expired = app.shell.expire(&later).await.unwrap();
    assert_eq!(expired.username, "agent");
    assert!(!app.shell.is_monitoring());
}
