//! Navigation shell: the login → navigate → logout lifecycle.
//!
//! Owns the navigation state and the idle monitor for one client. The
//! monitor exists exactly while a user is logged in; logging out (or
//! expiring) stops it before the state is reset.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use erp_core::config::SessionConfig;
use erp_core::events::{AccessEvent, DomainEvent};
use erp_entity::{AccessLevel, User, UserRole, ViewId};

use crate::error::AuthError;
use crate::rbac::{AccessGate, DenialNotice, MenuEntry, NavigationOutcome, NavigationState};
use crate::session::{IdleMonitor, LogoutReason, SessionManager, SessionNotice};

/// Presentation-facing facade over sessions and the access gate.
#[derive(Debug)]
pub struct NavigationShell {
    /// Identity lifecycle.
    sessions: Arc<SessionManager>,
    /// Authorization decisions.
    gate: AccessGate,
    /// Active view and pending denial.
    navigation: NavigationState,
    /// Idle poller, present while logged in.
    monitor: Option<IdleMonitor>,
    /// Where the monitor delivers notices.
    notices: mpsc::Sender<SessionNotice>,
    /// Idle poll period.
    check_interval: Duration,
}

impl NavigationShell {
    /// Creates a logged-out shell and the receiver for its session notices.
    pub fn new(
        sessions: Arc<SessionManager>,
        gate: AccessGate,
        config: &SessionConfig,
    ) -> (Self, mpsc::Receiver<SessionNotice>) {
        let (notices, receiver) = mpsc::channel(config.notice_buffer.max(1));
        let shell = Self {
            sessions,
            gate,
            navigation: NavigationState::logged_out(),
            monitor: None,
            notices,
            check_interval: config.idle_check_interval(),
        };
        (shell, receiver)
    }

    /// Authenticates, lands on the role's default view, and starts idle monitoring.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self.sessions.authenticate(username, password).await?;

        self.navigation = NavigationState::landing(self.gate.default_view_for(user.role));
        self.restart_monitor().await;

        info!(
            user_id = %user.id,
            view = %self.navigation.current_view(),
            "Landed on default view"
        );
        Ok(user)
    }

    /// Requests `view` on behalf of the logged-in user and applies the outcome.
    pub async fn navigate(&mut self, view: ViewId) -> NavigationOutcome {
        let user = self.sessions.current_user().await;
        let role = user.as_ref().map(|user| user.role);
        let outcome = self.gate.navigate(role, view);
        self.navigation.apply(outcome);

        let role_name = role.map(|role| role.to_string());
        let event = match outcome {
            NavigationOutcome::Allowed(view) => AccessEvent::Granted {
                role: role_name,
                view: view.to_string(),
            },
            NavigationOutcome::Denied(view) => {
                warn!(role = ?role, view = %view, "Access denied");
                AccessEvent::Denied {
                    role: role_name,
                    view: view.to_string(),
                }
            }
        };
        self.sessions.events().publish(DomainEvent::access(
            self.sessions.now(),
            user.map(|user| user.id.to_string()),
            event,
        ));

        outcome
    }

    /// Dismisses the denial dialog.
    pub fn acknowledge_denial(&mut self) {
        self.gate.acknowledge_denial(&mut self.navigation);
    }

    /// Forwards a user interaction to the session manager.
    pub async fn record_activity(&self) {
        self.sessions.record_activity().await;
    }

    /// Logs out, stops idle monitoring, and returns to the landing placeholder.
    pub async fn logout(&mut self) -> Option<User> {
        self.end(LogoutReason::UserRequested).await
    }

    /// Handles an idle notice from the monitor.
    ///
    /// Notices that no longer apply (someone logged out, or activity was
    /// recorded since) are ignored and return `None`. The monitor stops
    /// after sending a notice, so it is restarted while a user is still
    /// logged in.
    pub async fn expire(&mut self, notice: &SessionNotice) -> Option<User> {
        let SessionNotice::IdleExpired { user, .. } = notice;

        let current = self.sessions.current_user().await?;
        if current.id == user.id && self.sessions.check_idle_expiry(self.sessions.now()).await {
            return self.end(LogoutReason::IdleTimeout).await;
        }

        debug!(user_id = %current.id, "Stale idle notice, restarting idle monitor");
        self.restart_monitor().await;
        None
    }

    async fn end(&mut self, reason: LogoutReason) -> Option<User> {
        if let Some(monitor) = self.monitor.take() {
            monitor.stop().await;
        }
        self.navigation = NavigationState::logged_out();
        self.sessions.end_session(reason).await
    }

    async fn restart_monitor(&mut self) {
        if let Some(previous) = self.monitor.take() {
            previous.stop().await;
        }
        self.monitor = Some(IdleMonitor::start(
            Arc::clone(&self.sessions),
            self.check_interval,
            self.notices.clone(),
        ));
    }

    /// Active view and pending denial.
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// The active view.
    pub fn current_view(&self) -> ViewId {
        self.navigation.current_view()
    }

    /// The logged-in user's role, if any.
    pub async fn current_role(&self) -> Option<UserRole> {
        self.sessions.current_role().await
    }

    /// Navigation entries for the logged-in user.
    pub async fn menu(&self) -> Vec<MenuEntry> {
        self.gate.menu_for(self.current_role().await)
    }

    /// How the logged-in user may use the active view.
    pub async fn current_access(&self) -> Option<AccessLevel> {
        self.gate
            .access_level(self.current_role().await, self.current_view())
    }

    /// Dialog content for the pending denial, if any.
    pub async fn denial_notice(&self) -> Option<DenialNotice> {
        let attempted = self.navigation.denied_attempt()?;
        Some(self.gate.denial_notice(self.current_role().await, attempted))
    }

    /// Whether the idle monitor is running.
    pub fn is_monitoring(&self) -> bool {
        self.monitor.as_ref().is_some_and(IdleMonitor::is_running)
    }

    /// The session manager.
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// The access gate.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }
}
