//! Session lifecycle manager: login, lockout, activity, idle expiry, logout.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use erp_core::config::{AuthConfig, SessionConfig};
use erp_core::error::{AppError, ErrorKind};
use erp_core::events::{DomainEvent, EventBus, SessionEvent};
use erp_core::result::AppResult;
use erp_core::traits::Clock;
use erp_entity::{User, UserRole};

use crate::credential::CredentialStore;
use crate::error::{AuthError, CredentialField};
use crate::password::PasswordHasher;

use super::notice::SessionNotice;
use super::state::SessionState;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user chose to log out.
    UserRequested,
    /// The inactivity threshold was exceeded.
    IdleTimeout,
}

/// Owns the authenticated identity for one client.
///
/// Reusable across sessions: logging out returns to the initial
/// logged-out state.
pub struct SessionManager {
    /// Identity lookup.
    credentials: Arc<dyn CredentialStore>,
    /// Secret verification.
    password_hasher: PasswordHasher,
    /// Time source for activity and lockout stamps.
    clock: Arc<dyn Clock>,
    /// Audit event sink.
    events: EventBus,
    /// Lockout policy.
    auth_config: AuthConfig,
    /// Inactivity policy.
    session_config: SessionConfig,
    /// Mutable session state.
    state: Mutex<SessionState>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("auth_config", &self.auth_config)
            .field("session_config", &self.session_config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a logged-out session manager.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        password_hasher: PasswordHasher,
        clock: Arc<dyn Clock>,
        events: EventBus,
        auth_config: AuthConfig,
        session_config: SessionConfig,
    ) -> Self {
        let state = Mutex::new(SessionState::new(clock.now()));
        Self {
            credentials,
            password_hasher,
            clock,
            events,
            auth_config,
            session_config,
            state,
        }
    }

    /// Authenticates `username`/`password` and establishes the session.
    ///
    /// 1. Both fields must be non-blank
    /// 2. A running lockout rejects the attempt outright
    /// 3. The username is looked up case-insensitively and the secret must match exactly
    /// 4. A mismatch counts a failure; reaching the limit starts a lockout
    /// 5. A match resets the failure count and stamps activity
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::MissingField(CredentialField::Username));
        }
        if password.trim().is_empty() {
            return Err(AuthError::MissingField(CredentialField::Password));
        }

        let now = self.clock.now();
        {
            let mut state = self.state.lock().await;
            if let Some(locked_until) = state.expire_lockout(now) {
                warn!(username = %username, locked_until = %locked_until, "Login attempt during lockout");
                return Err(AuthError::TooManyAttempts { locked_until });
            }
            if state.is_authenticated() {
                return Err(AuthError::SessionActive);
            }
        }

        let record = self.credentials.lookup(username).await?;
        let verified = match &record {
            Some(record) => self.verify_secret(password, &record.secret_hash).await?,
            None => false,
        };

        // Another attempt may have locked out or logged in while the secret was verified.
        let mut state = self.state.lock().await;
        if let Some(locked_until) = state.lockout_at(now) {
            return Err(AuthError::TooManyAttempts { locked_until });
        }
        if state.is_authenticated() {
            return Err(AuthError::SessionActive);
        }

        let user = match record {
            Some(record) if verified => record.user,
            _ => {
                let attempts = state.record_failure();
                warn!(username = %username, attempts = attempts, "Login failed");
                self.publish(
                    now,
                    None,
                    SessionEvent::LoginFailed {
                        username: username.to_string(),
                        attempts,
                    },
                );

                if attempts >= self.auth_config.max_failed_attempts {
                    let locked_until = now
                        .checked_add_signed(self.auth_config.lockout_duration())
                        .unwrap_or(DateTime::<Utc>::MAX_UTC);
                    state.lock_until(locked_until);
                    warn!(
                        attempts = attempts,
                        locked_until = %locked_until,
                        "Login locked due to failed attempts"
                    );
                    self.publish(now, None, SessionEvent::LockedOut { attempts, locked_until });
                    return Err(AuthError::TooManyAttempts { locked_until });
                }

                return Err(AuthError::InvalidCredentials);
            }
        };

        state.establish(user.clone(), now);
        info!(user_id = %user.id, role = %user.role, "Login successful");
        self.publish(
            now,
            Some(&user),
            SessionEvent::LoggedIn {
                user_id: user.id.to_string(),
                role: user.role.to_string(),
            },
        );

        Ok(user)
    }

    /// Stamps user activity. No-op while logged out.
    pub async fn record_activity(&self) {
        let now = self.clock.now();
        if self.state.lock().await.touch(now) {
            debug!("Activity recorded");
        }
    }

    /// Whether a logged-in session has been idle longer than the threshold at `now`.
    pub async fn check_idle_expiry(&self, now: DateTime<Utc>) -> bool {
        self.state
            .lock()
            .await
            .is_idle_expired(now, self.session_config.idle_timeout())
    }

    /// The expiry notice to present if the session is idle-expired at `now`.
    pub async fn idle_notice(&self, now: DateTime<Utc>) -> Option<SessionNotice> {
        let timeout = self.session_config.idle_timeout();
        let state = self.state.lock().await;
        if !state.is_idle_expired(now, timeout) {
            return None;
        }

        state.user().map(|user| SessionNotice::IdleExpired {
            user: user.clone(),
            idle_for: state.idle_for(now),
            timeout,
        })
    }

    /// Logs the current user out.
    ///
    /// Clears the identity and the failure count. Returns the user that
    /// was logged in, if any.
    pub async fn logout(&self) -> Option<User> {
        self.end_session(LogoutReason::UserRequested).await
    }

    /// Logs the current user out, recording why.
    pub async fn end_session(&self, reason: LogoutReason) -> Option<User> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;
        let idle_for = state.idle_for(now);
        let user = state.clear()?;

        let event = match reason {
            LogoutReason::UserRequested => {
                info!(user_id = %user.id, "Logout completed");
                SessionEvent::LoggedOut {
                    user_id: user.id.to_string(),
                }
            }
            LogoutReason::IdleTimeout => {
                info!(
                    user_id = %user.id,
                    idle_seconds = idle_for.num_seconds(),
                    "Session expired due to inactivity"
                );
                SessionEvent::IdleExpired {
                    user_id: user.id.to_string(),
                    idle_seconds: idle_for.num_seconds().max(0) as u64,
                }
            }
        };
        self.publish(now, Some(&user), event);

        Some(user)
    }

    /// Operator acknowledgement of a lockout: clears the failure count and
    /// unblocks attempts immediately.
    pub async fn reset_lockout(&self) {
        self.state.lock().await.reset_failures();
        info!("Lockout reset");
        self.publish(self.clock.now(), None, SessionEvent::LockoutReset);
    }

    /// Accepts a password-reset request for `email`.
    ///
    /// Only the presence of an address is checked; no message is sent.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::MissingField(CredentialField::Email));
        }

        info!(email = %email, "Password reset requested");
        self.publish(
            self.clock.now(),
            None,
            SessionEvent::PasswordResetRequested {
                email: email.to_string(),
            },
        );
        Ok(())
    }

    /// The logged-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.state.lock().await.user().cloned()
    }

    /// The logged-in user's role, if any.
    pub async fn current_role(&self) -> Option<UserRole> {
        self.state.lock().await.user().map(|user| user.role)
    }

    /// Consecutive failed attempts.
    pub async fn failed_attempts(&self) -> u32 {
        self.state.lock().await.failed_attempts()
    }

    /// End of the running lockout, if any.
    pub async fn locked_until(&self) -> Option<DateTime<Utc>> {
        let now = self.clock.now();
        self.state.lock().await.lockout_at(now)
    }

    /// Last detected interaction.
    pub async fn last_activity(&self) -> DateTime<Utc> {
        self.state.lock().await.last_activity()
    }

    /// The current instant according to this manager's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The audit event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Inactivity policy.
    pub fn session_config(&self) -> &SessionConfig {
        &self.session_config
    }

    /// Runs the Argon2 verification on the blocking pool.
    async fn verify_secret(&self, password: &str, secret_hash: &str) -> AppResult<bool> {
        let hasher = self.password_hasher.clone();
        let password = password.to_string();
        let secret_hash = secret_hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &secret_hash))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Password verification task failed", e)
            })?
    }

    fn publish(&self, now: DateTime<Utc>, actor: Option<&User>, event: SessionEvent) {
        let actor_id = actor.map(|user| user.id.to_string());
        self.events.publish(DomainEvent::session(now, actor_id, event));
    }
}
