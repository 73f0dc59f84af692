//! Navigation state machine.
//!
//! `Idle(view)` → `Denied(view, attempted)` on a disallowed request;
//! back to `Idle` on acknowledgement (view unchanged) or on the next
//! allowed request (view updated). The active view only ever changes
//! through an allowed request.

use serde::{Deserialize, Serialize};

use erp_entity::ViewId;

/// Result of a mediated navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationOutcome {
    /// The view may be opened.
    Allowed(ViewId),
    /// The view is off-limits for the requester.
    Denied(ViewId),
}

impl NavigationOutcome {
    /// Whether the request was allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

/// Observable phase of the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    /// Showing `view`.
    Idle(ViewId),
    /// Showing `view` with a pending denial for `attempted`.
    Denied {
        /// The active view.
        view: ViewId,
        /// The refused request.
        attempted: ViewId,
    },
}

/// The active view plus any unacknowledged denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    current_view: ViewId,
    denied_attempt: Option<ViewId>,
}

impl NavigationState {
    /// Idle on `view`.
    pub fn landing(view: ViewId) -> Self {
        Self {
            current_view: view,
            denied_attempt: None,
        }
    }

    /// Idle on the logged-out placeholder.
    pub fn logged_out() -> Self {
        Self::landing(ViewId::Dashboard)
    }

    /// The active view.
    pub fn current_view(&self) -> ViewId {
        self.current_view
    }

    /// The refused request awaiting acknowledgement.
    pub fn denied_attempt(&self) -> Option<ViewId> {
        self.denied_attempt
    }

    /// The state as a phase.
    pub fn phase(&self) -> NavigationPhase {
        match self.denied_attempt {
            Some(attempted) => NavigationPhase::Denied {
                view: self.current_view,
                attempted,
            },
            None => NavigationPhase::Idle(self.current_view),
        }
    }

    /// Applies a gate decision.
    pub fn apply(&mut self, outcome: NavigationOutcome) {
        match outcome {
            NavigationOutcome::Allowed(view) => {
                self.current_view = view;
                self.denied_attempt = None;
            }
            NavigationOutcome::Denied(view) => {
                self.denied_attempt = Some(view);
            }
        }
    }

    /// Clears a pending denial. Idempotent.
    pub fn clear_denial(&mut self) {
        self.denied_attempt = None;
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::logged_out()
    }
}
