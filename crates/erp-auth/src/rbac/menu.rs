//! Presentation data derived from the policy: menu entries and denial text.

use serde::Serialize;

use erp_entity::{UserRole, ViewId};

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    /// Target view.
    pub view: ViewId,
    /// Button label.
    pub label: &'static str,
}

impl MenuEntry {
    /// Entry for `view` as labelled for `role`.
    pub fn for_role(role: UserRole, view: ViewId) -> Self {
        let label = match view {
            ViewId::Dashboard | ViewId::AdminDashboard => "Dashboard",
            ViewId::Properties if role == UserRole::Agent => "View Properties",
            ViewId::Properties => "Properties",
            ViewId::Financial => "Financial",
            ViewId::Analytics => "Analytics",
            ViewId::SystemConfig => "System Config",
            ViewId::Gdpr => "GDPR Compliance",
        };
        Self { view, label }
    }
}

/// Content of the access-denied dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenialNotice {
    /// Requester's role, `None` when logged out.
    pub role: Option<UserRole>,
    /// The refused view.
    pub attempted: ViewId,
    /// Main sentence.
    pub headline: String,
    /// What the role can reach instead.
    pub summary: String,
}

impl DenialNotice {
    pub(crate) fn new(role: Option<UserRole>, attempted: ViewId, reachable: &[ViewId]) -> Self {
        let headline = match role {
            Some(UserRole::Admin) => "This module is restricted to your role. As an Administrator, \
                 you have access limited to System Administration only."
                .to_string(),
            Some(_) => "This module is restricted to your role. \
                 You do not have permission to access this module."
                .to_string(),
            None => "Please sign in to access this module.".to_string(),
        };

        let summary = match (role, reachable) {
            (None, _) => "No modules are available while signed out.".to_string(),
            (Some(role), []) => format!("Your Role: {role}. No modules are assigned to this role."),
            (Some(role), views) => {
                let titles: Vec<&str> = views.iter().map(ViewId::title).collect();
                format!("Your Role: {role}. You have access to: {}.", titles.join(", "))
            }
        };

        Self {
            role,
            attempted,
            headline,
            summary,
        }
    }
}
