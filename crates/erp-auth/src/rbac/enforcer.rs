//! Access gate: decides view reachability and mediates navigation.

use erp_entity::{AccessLevel, UserRole, ViewId};

use super::menu::{DenialNotice, MenuEntry};
use super::navigation::{NavigationOutcome, NavigationState};
use super::policies::AccessPolicy;

/// Single source of truth for which role may open which view.
///
/// Role arguments accept either a `UserRole` or an `Option<UserRole>`;
/// `None` stands for a logged-out requester, whose access set is empty.
#[derive(Debug, Clone)]
pub struct AccessGate {
    /// The policy configuration.
    policy: AccessPolicy,
}

impl AccessGate {
    /// Creates a gate over the default policy.
    pub fn new() -> Self {
        Self {
            policy: AccessPolicy::new(),
        }
    }

    /// Whether `role` may open `view`.
    pub fn can_access(&self, role: impl Into<Option<UserRole>>, view: ViewId) -> bool {
        self.access_level(role, view).is_some()
    }

    /// How `role` may use `view`, or `None` when it may not open it.
    pub fn access_level(&self, role: impl Into<Option<UserRole>>, view: ViewId) -> Option<AccessLevel> {
        role.into().and_then(|role| self.policy.level(&role, &view))
    }

    /// Decides a navigation request. The caller applies the outcome.
    pub fn navigate(&self, role: impl Into<Option<UserRole>>, requested: ViewId) -> NavigationOutcome {
        if self.can_access(role, requested) {
            NavigationOutcome::Allowed(requested)
        } else {
            NavigationOutcome::Denied(requested)
        }
    }

    /// The view a role lands on right after logging in.
    pub fn default_view_for(&self, role: UserRole) -> ViewId {
        match role {
            UserRole::Admin => ViewId::AdminDashboard,
            UserRole::Agent => ViewId::Properties,
            UserRole::Manager => ViewId::Analytics,
            UserRole::Accountant => ViewId::Financial,
        }
    }

    /// Clears a pending denial. Purely a UI-state reset.
    pub fn acknowledge_denial(&self, state: &mut NavigationState) {
        state.clear_denial();
    }

    /// The routable views `role` may open, in menu order.
    pub fn reachable_views(&self, role: impl Into<Option<UserRole>>) -> Vec<ViewId> {
        let role = role.into();
        ViewId::ROUTABLE
            .into_iter()
            .filter(|view| self.can_access(role, *view))
            .collect()
    }

    /// Navigation entries to render for `role`.
    pub fn menu_for(&self, role: impl Into<Option<UserRole>>) -> Vec<MenuEntry> {
        let Some(role) = role.into() else {
            return Vec::new();
        };
        self.reachable_views(role)
            .into_iter()
            .map(|view| MenuEntry::for_role(role, view))
            .collect()
    }

    /// Content for the access-denied dialog.
    pub fn denial_notice(&self, role: impl Into<Option<UserRole>>, attempted: ViewId) -> DenialNotice {
        let role = role.into();
        DenialNotice::new(role, attempted, &self.reachable_views(role))
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new()
    }
}
