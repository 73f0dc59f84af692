//! Session-related domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events related to the authenticated-identity lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A user authenticated and a session was established.
    LoggedIn {
        /// The user ID.
        user_id: String,
        /// The user's role.
        role: String,
    },
    /// An authentication attempt was rejected.
    LoginFailed {
        /// The username as typed.
        username: String,
        /// Consecutive failures so far.
        attempts: u32,
    },
    /// Too many failures; further attempts are blocked.
    LockedOut {
        /// Consecutive failures that triggered the lockout.
        attempts: u32,
        /// When attempts are accepted again.
        locked_until: DateTime<Utc>,
    },
    /// An operator acknowledged the lockout and reset the counter.
    LockoutReset,
    /// A user logged out explicitly.
    LoggedOut {
        /// The user ID.
        user_id: String,
    },
    /// A session expired after a period of inactivity.
    IdleExpired {
        /// The user ID.
        user_id: String,
        /// How long the session had been idle in seconds.
        idle_seconds: u64,
    },
    /// A password reset link was requested.
    PasswordResetRequested {
        /// The address the link would be sent to.
        email: String,
    },
}
