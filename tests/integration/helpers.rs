//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration};
use tokio::sync::{broadcast, mpsc};

use erp_auth::{
    AccessGate, NavigationShell, PasswordHasher, SessionManager, SessionNotice,
    StaticCredentialStore,
};
use erp_core::config::{AppConfig, AuthConfig, SessionConfig};
use erp_core::events::{DomainEvent, EventBus, EventPayload};
use erp_core::traits::ManualClock;

/// Shared secret of every seeded account.
pub const PASSWORD: &str = "password123";

/// Test application context
pub struct TestApp {
    /// Frozen clock driving session time
    pub clock: Arc<ManualClock>,
    /// The shell under test
    pub shell: NavigationShell,
    /// Idle notices delivered by the monitor
    pub notices: mpsc::Receiver<SessionNotice>,
    /// Audit events published during the test
    pub events: broadcast::Receiver<DomainEvent>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with default session settings
    pub fn new() -> Self {
        Self::with_session(SessionConfig::default())
    }

    /// Create a new test application with the given session settings
    pub fn with_session(session: SessionConfig) -> Self {
        let config = AppConfig {
            auth: AuthConfig {
                hash_memory_kib: 256,
                hash_iterations: 1,
                ..AuthConfig::default()
            },
            session,
            ..AppConfig::default()
        };

        let hasher = PasswordHasher::new(&config.auth).expect("Failed to build hasher");
        let store = StaticCredentialStore::seeded(&hasher, &config.auth.seed_password)
            .expect("Failed to seed credentials");
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp_millis(1_760_000_000_000).expect("valid timestamp"),
        ));
        let bus = EventBus::new(64);
        let events = bus.subscribe();

        let sessions = Arc::new(SessionManager::new(
            Arc::new(store),
            hasher,
            clock.clone(),
            bus,
            config.auth.clone(),
            config.session.clone(),
        ));
        let (shell, notices) = NavigationShell::new(sessions, AccessGate::new(), &config.session);

        Self {
            clock,
            shell,
            notices,
            events,
            config,
        }
    }

    /// Log in as one of the seeded accounts
    pub async fn login_as(&mut self, username: &str) {
        self.shell
            .login(username, PASSWORD)
            .await
            .unwrap_or_else(|e| panic!("Login as {username} failed: {e}"));
    }

    /// Move session time forward
    pub fn advance(&self, seconds: i64) {
        self.clock.advance(Duration::seconds(seconds));
    }

    /// Drain every audit event published so far
    pub fn drain_events(&mut self) -> Vec<EventPayload> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event.payload);
        }
        drained
    }
}
