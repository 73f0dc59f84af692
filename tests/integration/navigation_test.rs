//! Integration tests for role-gated navigation through the shell.

mod helpers;

use erp_auth::NavigationOutcome;
use erp_core::events::{AccessEvent, EventPayload};
use erp_entity::{AccessLevel, UserRole, ViewId};

use helpers::TestApp;

fn username(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "admin",
        UserRole::Manager => "manager",
        UserRole::Agent => "agent",
        UserRole::Accountant => "accountant",
    }
}

fn expected_level(role: UserRole, view: ViewId) -> Option<AccessLevel> {
    use AccessLevel::{ReadOnly, ReadWrite};

    match (role, view) {
        (UserRole::Admin, ViewId::AdminDashboard | ViewId::SystemConfig | ViewId::Gdpr) => {
            Some(ReadWrite)
        }
        (UserRole::Manager, ViewId::Properties | ViewId::Financial) => Some(ReadWrite),
        (UserRole::Manager, ViewId::Analytics) => Some(ReadOnly),
        (UserRole::Agent, ViewId::Properties) => Some(ReadOnly),
        (UserRole::Accountant, ViewId::Financial) => Some(ReadWrite),
        _ => None,
    }
}

#[tokio::test]
async fn test_navigation_matrix_for_every_role() {
    for role in UserRole::ALL {
        let mut app = TestApp::new();
        app.login_as(username(role)).await;
        let landing = app.shell.current_view();

        for view in ViewId::ROUTABLE {
            let before = app.shell.current_view();
            let outcome = app.shell.navigate(view).await;

            match expected_level(role, view) {
                Some(level) => {
                    assert_eq!(outcome, NavigationOutcome::Allowed(view), "{role} -> {view}");
                    assert_eq!(app.shell.current_view(), view);
                    assert_eq!(app.shell.current_access().await, Some(level));
                    assert!(app.shell.denial_notice().await.is_none());
                }
                None => {
                    assert_eq!(outcome, NavigationOutcome::Denied(view), "{role} -> {view}");
                    assert_eq!(app.shell.current_view(), before);
                    let notice = app.shell.denial_notice().await.unwrap();
                    assert_eq!(notice.attempted, view);
                    assert_eq!(notice.role, Some(role));
                    app.shell.acknowledge_denial();
                }
            }
        }

        assert!(app.shell.gate().can_access(role, landing));
    }
}

#[tokio::test]
async fn test_admin_is_confined_to_administration() {
    let mut app = TestApp::new();
    app.login_as("admin").await;

    for view in [ViewId::Properties, ViewId::Financial, ViewId::Analytics] {
        assert!(!app.shell.navigate(view).await.is_allowed());
        let notice = app.shell.denial_notice().await.unwrap();
        assert!(notice.headline.contains("System Administration only"));
        app.shell.acknowledge_denial();
    }
    assert_eq!(app.shell.current_view(), ViewId::AdminDashboard);
}

#[tokio::test]
async fn test_menu_lists_only_reachable_views() {
    let mut app = TestApp::new();
    assert!(app.shell.menu().await.is_empty());

    app.login_as("agent").await;
    let menu = app.shell.menu().await;
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].view, ViewId::Properties);
    assert_eq!(menu[0].label, "View Properties");

    app.shell.logout().await;
    app.login_as("manager").await;
    let views: Vec<ViewId> = app.shell.menu().await.iter().map(|entry| entry.view).collect();
    assert_eq!(
        views,
        vec![ViewId::Properties, ViewId::Financial, ViewId::Analytics]
    );
}

#[tokio::test]
async fn test_denial_keeps_view_until_acknowledged() {
    let mut app = TestApp::new();
    app.login_as("agent").await;

    app.shell.navigate(ViewId::Gdpr).await;
    assert_eq!(app.shell.navigation().denied_attempt(), Some(ViewId::Gdpr));
    assert_eq!(app.shell.current_view(), ViewId::Properties);

    let notice = app.shell.denial_notice().await.unwrap();
    assert_eq!(
        notice.summary,
        "Your Role: Agent. You have access to: Property Management."
    );

    app.shell.acknowledge_denial();
    assert_eq!(app.shell.navigation().denied_attempt(), None);
    assert_eq!(app.shell.current_view(), ViewId::Properties);
}

#[tokio::test]
async fn test_landing_placeholder_is_never_routable() {
    let mut app = TestApp::new();
    assert_eq!(app.shell.current_view(), ViewId::Dashboard);
    assert!(!app.shell.navigate(ViewId::Dashboard).await.is_allowed());

    app.login_as("admin").await;
    assert!(!app.shell.navigate(ViewId::Dashboard).await.is_allowed());
    assert_eq!(app.shell.current_view(), ViewId::AdminDashboard);
}

#[tokio::test]
async fn test_logged_out_requests_are_denied() {
    let mut app = TestApp::new();

    for view in ViewId::ROUTABLE {
        assert_eq!(app.shell.navigate(view).await, NavigationOutcome::Denied(view));
        let notice = app.shell.denial_notice().await.unwrap();
        assert_eq!(notice.role, None);
        app.shell.acknowledge_denial();
    }
    assert_eq!(app.shell.current_view(), ViewId::Dashboard);
    assert_eq!(app.shell.current_access().await, None);
}

#[tokio::test]
async fn test_navigation_publishes_access_events() {
    let mut app = TestApp::new();
    app.login_as("accountant").await;
    app.drain_events();

    app.shell.navigate(ViewId::Financial).await;
    app.shell.navigate(ViewId::Analytics).await;

    let events = app.drain_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        EventPayload::Access(AccessEvent::Granted { role: Some(role), view })
            if role == "Accountant" && view == "financial"
    ));
    assert!(matches!(
        &events[1],
        EventPayload::Access(AccessEvent::Denied { view, .. }) if view == "analytics"
    ));
}
