//! Entity lifecycle state
//!
//! Reference-data entities (stores, employees, inventory) are never removed
//! in normal flows; they move between explicit lifecycle states. Hard
//! deletion is a separate, deliberate operation and not a state.

use serde::{Deserialize, Serialize};

/// Lifecycle state for reference-data entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum LifecycleState {
    Active,
    Inactive,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Active => "active",
            LifecycleState::Inactive => "inactive",
        }
    }

    /// Active and inactive are freely interchangeable; there is no
    /// transition out of either into deletion (deletion removes the row).
    pub fn can_transition_to(&self, next: LifecycleState) -> bool {
        *self != next
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
