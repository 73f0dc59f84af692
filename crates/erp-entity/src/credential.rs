//! Stored credential record.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// What a credential store returns for a known username.
///
/// The secret is an Argon2id PHC string, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// The identity established on a successful match.
    pub user: User,
    /// Argon2id hash of the account secret.
    #[serde(skip_serializing)]
    pub secret_hash: String,
}

impl CredentialRecord {
    /// Pair a user with its secret hash.
    pub fn new(user: User, secret_hash: impl Into<String>) -> Self {
        Self {
            user,
            secret_hash: secret_hash.into(),
        }
    }
}
