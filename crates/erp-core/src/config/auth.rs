//! Authentication configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Authentication, lockout, and credential-hashing configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Consecutive failed attempts that trigger a lockout.
    #[serde(default = "default_max_failed")]
    pub max_failed_attempts: u32,
    /// How long a lockout lasts, in minutes.
    #[serde(default = "default_lockout")]
    pub lockout_duration_minutes: u64,
    /// Shared secret assigned to the seeded reference accounts.
    #[serde(default = "default_seed_password", skip_serializing)]
    pub seed_password: String,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
}

impl AuthConfig {
    /// Lockout window as a `chrono` duration, saturating at the largest
    /// representable span.
    pub fn lockout_duration(&self) -> chrono::Duration {
        self.checked_lockout_duration()
            .unwrap_or(chrono::Duration::MAX)
    }

    fn checked_lockout_duration(&self) -> Option<chrono::Duration> {
        i64::try_from(self.lockout_duration_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
    }

    /// Rejects values the session manager cannot work with.
    pub(crate) fn validate(&self) -> AppResult<()> {
        if self.max_failed_attempts == 0 {
            return Err(AppError::configuration(
                "auth.max_failed_attempts must be at least 1",
            ));
        }
        if self.checked_lockout_duration().is_none() {
            return Err(AppError::configuration(format!(
                "auth.lockout_duration_minutes is out of range: {}",
                self.lockout_duration_minutes
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("max_failed_attempts", &self.max_failed_attempts)
            .field("lockout_duration_minutes", &self.lockout_duration_minutes)
            .field("seed_password", &"[redacted]")
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_iterations", &self.hash_iterations)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: default_max_failed(),
            lockout_duration_minutes: default_lockout(),
            seed_password: default_seed_password(),
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
        }
    }
}

fn default_max_failed() -> u32 {
    3
}

fn default_lockout() -> u64 {
    15
}

fn default_seed_password() -> String {
    "password123".to_string()
}

fn default_hash_memory() -> u32 {
    19_456
}

fn default_hash_iterations() -> u32 {
    2
}
