//! # erp-entity
//!
//! Domain values shared by the access core: users and their roles,
//! routable views, access levels, and stored credential records. All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod access;
pub mod credential;
pub mod user;
pub mod view;

pub use access::AccessLevel;
pub use credential::CredentialRecord;
pub use user::{User, UserId, UserRole};
pub use view::ViewId;
