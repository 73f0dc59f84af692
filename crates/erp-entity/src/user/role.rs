//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
///
/// Roles are not ordered: each one grants its own, possibly disjoint,
/// set of views. Administrators in particular do not inherit the
/// operational modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UserRole {
    /// System administration: users, configuration, compliance.
    Admin,
    /// Operations lead: properties, finance, analytics.
    Manager,
    /// Sales agent: property listings.
    Agent,
    /// Finance staff: transactions.
    Accountant,
}

impl UserRole {
    /// Every role, in display order.
    pub const ALL: [UserRole; 4] = [Self::Admin, Self::Manager, Self::Agent, Self::Accountant];

    /// Return the role's display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Agent => "Agent",
            Self::Accountant => "Accountant",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = erp_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "agent" => Ok(Self::Agent),
            "accountant" => Ok(Self::Accountant),
            _ => Err(erp_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, manager, agent, accountant"
            ))),
        }
    }
}
