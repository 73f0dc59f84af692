//! Authenticated user model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// Opaque user identifier issued by the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An authenticated identity.
///
/// The role is fixed when the user authenticates and never changes for
/// the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// RBAC role.
    pub role: UserRole,
    /// Contact address.
    pub email: String,
}

impl User {
    /// Build a user.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        role: UserRole,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(id),
            username: username.into(),
            role,
            email: email.into(),
        }
    }
}
