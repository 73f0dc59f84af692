//! Session state and its transitions.
//!
//! `SessionState` holds no locks and performs no I/O; [`SessionManager`]
//! owns one behind a mutex and feeds it the current instant.
//!
//! [`SessionManager`]: super::SessionManager

use chrono::{DateTime, Duration, Utc};

use erp_entity::User;

/// The authenticated identity plus failure bookkeeping.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The logged-in user, absent when logged out.
    user: Option<User>,
    /// Last detected interaction.
    last_activity: DateTime<Utc>,
    /// Consecutive failed authentication attempts.
    failed_attempts: u32,
    /// End of the current lockout window, if any.
    locked_until: Option<DateTime<Utc>>,
}

impl SessionState {
    /// A logged-out session with no failures, created at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            user: None,
            last_activity: now,
            failed_attempts: 0,
            locked_until: None,
        }
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Last detected interaction.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Consecutive failed attempts.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// End of the lockout window if it is still running at `now`.
    pub fn lockout_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.locked_until.filter(|until| now < *until)
    }

    /// Drops a lockout whose window has elapsed, clearing the failure count.
    ///
    /// Returns the running lockout's end if one is still in force.
    pub fn expire_lockout(&mut self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.locked_until {
            Some(until) if now < until => Some(until),
            Some(_) => {
                self.failed_attempts = 0;
                self.locked_until = None;
                None
            }
            None => None,
        }
    }

    /// Counts one more failure and returns the new total.
    pub fn record_failure(&mut self) -> u32 {
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        self.failed_attempts
    }

    /// Blocks attempts until `until`.
    pub fn lock_until(&mut self, until: DateTime<Utc>) {
        self.locked_until = Some(until);
    }

    /// Clears the failure count and any lockout.
    pub fn reset_failures(&mut self) {
        self.failed_attempts = 0;
        self.locked_until = None;
    }

    /// Logs `user` in at `now`.
    pub fn establish(&mut self, user: User, now: DateTime<Utc>) {
        self.reset_failures();
        self.user = Some(user);
        self.last_activity = now;
    }

    /// Stamps activity; ignored while logged out.
    pub fn touch(&mut self, now: DateTime<Utc>) -> bool {
        if self.user.is_none() {
            return false;
        }
        self.last_activity = now;
        true
    }

    /// Time since the last interaction.
    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_activity
    }

    /// Whether a logged-in session has been idle strictly longer than `timeout`.
    pub fn is_idle_expired(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        self.user.is_some() && self.idle_for(now) > timeout
    }

    /// Returns to the logged-out state, handing back the previous user.
    pub fn clear(&mut self) -> Option<User> {
        self.failed_attempts = 0;
        self.user.take()
    }
}
