//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section falls back to built-in defaults.

pub mod auth;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::auth::AuthConfig;
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::result::AppResult;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (default.toml + environment overlay + `ERP__` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Authentication and lockout settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session inactivity settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the TOML files in `dir`.
    ///
    /// Merges `{dir}/default.toml` with the `{dir}/{env}.toml` overlay and
    /// environment variables prefixed with `ERP__`. Missing files are
    /// skipped.
    pub fn load_from(dir: &str, env: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ERP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> AppResult<()> {
        self.auth.validate()?;
        self.session.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let config = AppConfig::load_from("does/not/exist", "test").unwrap();
        assert_eq!(config.auth.max_failed_attempts, 3);
        assert_eq!(config.auth.lockout_duration_minutes, 15);
        assert_eq!(config.session.idle_timeout_seconds, 300);
        assert_eq!(config.session.idle_check_interval_seconds, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "auth": { "max_failed_attempts": 5 } }"#)
            .unwrap();
        assert_eq!(config.auth.max_failed_attempts, 5);
        assert_eq!(config.auth.seed_password, "password123");
        assert_eq!(config.session.idle_timeout_seconds, 300);
    }

    #[test]
    fn test_out_of_range_durations_are_rejected() {
        let mut config = AppConfig::default();
        config.auth.lockout_duration_minutes = 1_000_000_000_000_000;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
        assert_eq!(config.auth.lockout_duration(), chrono::Duration::MAX);

        let mut config = AppConfig::default();
        config.session.idle_timeout_seconds = u64::MAX;
        assert!(config.validate().is_err());
        assert_eq!(config.session.idle_timeout(), chrono::Duration::MAX);
    }

    #[test]
    fn test_zero_attempt_limit_is_rejected() {
        let mut config = AppConfig::default();
        config.auth.max_failed_attempts = 0;
        assert!(config.validate().is_err());
        assert!(AppConfig::default().validate().is_ok());
    }
}
