//! Session lifecycle: authentication, lockout, inactivity expiry, logout.

pub mod manager;
pub mod monitor;
pub mod notice;
pub mod state;

pub use manager::{LogoutReason, SessionManager};
pub use monitor::IdleMonitor;
pub use notice::SessionNotice;
pub use state::SessionState;
