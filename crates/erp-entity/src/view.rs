//! Top-level screens reachable through the navigation shell.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named top-level view.
///
/// [`ViewId::Dashboard`] is the landing placeholder shown while nobody is
/// logged in. It is never granted to a role; the six routable views are
/// listed in [`ViewId::ROUTABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    /// Logged-out landing placeholder.
    Dashboard,
    /// User administration and system logs.
    AdminDashboard,
    /// Property listings.
    Properties,
    /// Financial transactions.
    Financial,
    /// Analytics charts.
    Analytics,
    /// System configuration display.
    SystemConfig,
    /// GDPR compliance checklist.
    Gdpr,
}

impl ViewId {
    /// The routable views, in menu order.
    pub const ROUTABLE: [ViewId; 6] = [
        Self::AdminDashboard,
        Self::Properties,
        Self::Financial,
        Self::Analytics,
        Self::SystemConfig,
        Self::Gdpr,
    ];

    /// Kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::AdminDashboard => "admin-dashboard",
            Self::Properties => "properties",
            Self::Financial => "financial",
            Self::Analytics => "analytics",
            Self::SystemConfig => "system-config",
            Self::Gdpr => "gdpr",
        }
    }

    /// Human-readable module name.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::AdminDashboard => "System Administration",
            Self::Properties => "Property Management",
            Self::Financial => "Financial Management",
            Self::Analytics => "Analytics",
            Self::SystemConfig => "System Configuration",
            Self::Gdpr => "GDPR Compliance",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = erp_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Self::Dashboard),
            "admin-dashboard" => Ok(Self::AdminDashboard),
            "properties" => Ok(Self::Properties),
            "financial" => Ok(Self::Financial),
            "analytics" => Ok(Self::Analytics),
            "system-config" => Ok(Self::SystemConfig),
            "gdpr" => Ok(Self::Gdpr),
            other => Err(erp_core::AppError::not_found(format!("Unknown view: '{other}'"))),
        }
    }
}
