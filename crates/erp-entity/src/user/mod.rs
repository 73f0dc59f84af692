//! User domain entities.

pub mod model;
pub mod role;

pub use model::{User, UserId};
pub use role::UserRole;
