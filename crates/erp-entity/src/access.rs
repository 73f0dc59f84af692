//! Access levels granted on a view.

use serde::{Deserialize, Serialize};

/// What a role may do inside a view it can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// View contents only; editing controls are hidden.
    ReadOnly,
    /// Full create/update/delete within the view.
    ReadWrite,
}

impl AccessLevel {
    /// Whether editing controls should be offered.
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::ReadWrite)
    }
}
