//! Bundle lifecycle state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// A bundle is assembled once, validated once, then read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleState {
    #[default]
    Assembled,
    Validated,
}

impl StateMachine for BundleState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (BundleState::Assembled, BundleState::Validated))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            BundleState::Assembled => vec![BundleState::Validated],
            BundleState::Validated => vec![],
        }
    }
}
