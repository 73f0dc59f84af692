//! Notices pushed from background session tasks to the presentation layer.

use chrono::Duration;

use erp_entity::User;

/// Something the presentation layer must show and act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// The session went idle past the timeout; the caller must log out.
    IdleExpired {
        /// Who was logged in.
        user: User,
        /// Time since the last interaction when expiry was detected.
        idle_for: Duration,
        /// Configured inactivity threshold.
        timeout: Duration,
    },
}

impl SessionNotice {
    /// Text for the expiry dialog.
    pub fn message(&self) -> String {
        match self {
            Self::IdleExpired { timeout, .. } => format!(
                "Your session has expired due to {} of inactivity. \
                 For your security, you will be redirected to the login page. \
                 Any unsaved changes will be lost.",
                describe(*timeout)
            ),
        }
    }
}

fn describe(span: Duration) -> String {
    let seconds = span.num_seconds();
    match (seconds / 60, seconds % 60) {
        (1, 0) => "1 minute".to_string(),
        (minutes, 0) if minutes > 0 => format!("{minutes} minutes"),
        _ if seconds == 1 => "1 second".to_string(),
        _ => format!("{seconds} seconds"),
    }
}
