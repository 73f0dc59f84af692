//! Credential store trait and the seeded in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use erp_core::result::AppResult;
use erp_entity::{CredentialRecord, User, UserRole};

use crate::password::PasswordHasher;

/// Pluggable identity lookup.
///
/// The session manager only ever asks for the record behind a username;
/// an external identity provider can replace the in-memory store without
/// touching session logic.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find the record for `username`, ignoring ASCII case.
    async fn lookup(&self, username: &str) -> AppResult<Option<CredentialRecord>>;
}

/// Fixed table of accounts keyed by lowercase username.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    records: HashMap<String, CredentialRecord>,
}

impl StaticCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the four reference accounts, one per role, sharing `secret`.
    pub fn seeded(hasher: &PasswordHasher, secret: &str) -> AppResult<Self> {
        let accounts = [
            ("1", "admin", UserRole::Admin),
            ("2", "manager", UserRole::Manager),
            ("3", "agent", UserRole::Agent),
            ("4", "accountant", UserRole::Accountant),
        ];

        let mut store = Self::new();
        for (id, username, role) in accounts {
            let user = User::new(id, username, role, format!("{username}@amgroup.com"));
            store.insert(user, hasher.hash_password(secret)?);
        }

        tracing::debug!(accounts = store.len(), "Seeded credential store");
        Ok(store)
    }

    /// Adds or replaces the record for `user.username`.
    pub fn insert(&mut self, user: User, secret_hash: String) {
        let key = user.username.to_lowercase();
        self.records.insert(key, CredentialRecord::new(user, secret_hash));
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn lookup(&self, username: &str) -> AppResult<Option<CredentialRecord>> {
        Ok(self.records.get(&username.to_lowercase()).cloned())
    }
}
