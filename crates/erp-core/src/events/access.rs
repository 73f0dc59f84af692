//! Navigation authorization events.

use serde::{Deserialize, Serialize};

/// Outcome of a mediated navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccessEvent {
    /// The role may open the view and the active view changed.
    Granted {
        /// Role of the requester, or `None` when logged out.
        role: Option<String>,
        /// The view that became active.
        view: String,
    },
    /// The role may not open the view; the active view is unchanged.
    Denied {
        /// Role of the requester, or `None` when logged out.
        role: Option<String>,
        /// The view that was requested.
        view: String,
    },
}
