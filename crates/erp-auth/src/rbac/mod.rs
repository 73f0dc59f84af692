//! Role-based view access: the policy table, the gate that consults it,
//! and the navigation state the gate mediates.

pub mod enforcer;
pub mod menu;
pub mod navigation;
pub mod policies;

pub use enforcer::AccessGate;
pub use menu::{DenialNotice, MenuEntry};
pub use navigation::{NavigationOutcome, NavigationPhase, NavigationState};
pub use policies::AccessPolicy;
