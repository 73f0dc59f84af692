//! # erp-auth
//!
//! Authentication and authorization core for the AM Group ERP shell.
//!
//! ## Modules
//!
//! - `password`: Argon2id secret hashing and verification
//! - `credential`: pluggable credential lookup and the seeded reference store
//! - `session`: login, logout, lockout, and inactivity expiry
//! - `rbac`: role-to-view policy, access gate, and navigation state
//! - `shell`: the navigation shell tying sessions, the gate, and the idle monitor together

pub mod credential;
pub mod error;
pub mod password;
pub mod rbac;
pub mod session;
pub mod shell;

pub use credential::{CredentialStore, StaticCredentialStore};
pub use error::{AuthError, CredentialField};
pub use password::PasswordHasher;
pub use rbac::{AccessGate, AccessPolicy, NavigationOutcome, NavigationState};
pub use session::{IdleMonitor, LogoutReason, SessionManager, SessionNotice};
pub use shell::NavigationShell;
