//! Role-to-view mapping definitions.

use std::collections::HashMap;

use erp_entity::{AccessLevel, UserRole, ViewId};

/// Which views each role may open, and how.
///
/// Built once and never mutated. A view missing from a role's entry is
/// unreachable for that role.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// Role → (view → access level).
    grants: HashMap<UserRole, HashMap<ViewId, AccessLevel>>,
}

impl AccessPolicy {
    /// Creates the default policy.
    ///
    /// Administrators are confined to system administration and do not
    /// see the operational modules.
    pub fn new() -> Self {
        use AccessLevel::{ReadOnly, ReadWrite};

        Self::from_grants([
            (UserRole::Admin, ViewId::AdminDashboard, ReadWrite),
            (UserRole::Admin, ViewId::SystemConfig, ReadWrite),
            (UserRole::Admin, ViewId::Gdpr, ReadWrite),
            (UserRole::Manager, ViewId::Properties, ReadWrite),
            (UserRole::Manager, ViewId::Financial, ReadWrite),
            (UserRole::Manager, ViewId::Analytics, ReadOnly),
            (UserRole::Agent, ViewId::Properties, ReadOnly),
            (UserRole::Accountant, ViewId::Financial, ReadWrite),
        ])
    }

    /// Builds a policy from `(role, view, level)` triples.
    fn from_grants(grants: impl IntoIterator<Item = (UserRole, ViewId, AccessLevel)>) -> Self {
        let mut map: HashMap<UserRole, HashMap<ViewId, AccessLevel>> = HashMap::new();
        for (role, view, level) in grants {
            map.entry(role).or_default().insert(view, level);
        }
        Self { grants: map }
    }

    /// The access level `role` holds on `view`, if any.
    pub fn level(&self, role: &UserRole, view: &ViewId) -> Option<AccessLevel> {
        self.grants
            .get(role)
            .and_then(|views| views.get(view))
            .copied()
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new()
    }
}
