//! Session inactivity configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Session inactivity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Inactivity, in seconds, after which a session expires.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// How often the idle monitor polls for expiry, in seconds.
    #[serde(default = "default_check_interval")]
    pub idle_check_interval_seconds: u64,
    /// Capacity of the session-notice channel.
    #[serde(default = "default_notice_buffer")]
    pub notice_buffer: usize,
}

impl SessionConfig {
    /// Idle threshold as a `chrono` duration, saturating at the largest
    /// representable span.
    pub fn idle_timeout(&self) -> chrono::Duration {
        self.checked_idle_timeout()
            .unwrap_or(chrono::Duration::MAX)
    }

    fn checked_idle_timeout(&self) -> Option<chrono::Duration> {
        i64::try_from(self.idle_timeout_seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)
    }

    /// Poll period for the idle monitor.
    pub fn idle_check_interval(&self) -> Duration {
        Duration::from_secs(self.idle_check_interval_seconds.max(1))
    }

    /// Rejects values the idle monitor cannot work with.
    pub(crate) fn validate(&self) -> AppResult<()> {
        if self.checked_idle_timeout().is_none() {
            return Err(AppError::configuration(format!(
                "session.idle_timeout_seconds is out of range: {}",
                self.idle_timeout_seconds
            )));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: default_idle_timeout(),
            idle_check_interval_seconds: default_check_interval(),
            notice_buffer: default_notice_buffer(),
        }
    }
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_check_interval() -> u64 {
    10
}

fn default_notice_buffer() -> usize {
    16
}
