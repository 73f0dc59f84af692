//! Credential lookup.

pub mod store;

pub use store::{CredentialStore, StaticCredentialStore};
