//! Purchased plan tier definitions.
//!
//! The tier a customer bought gates which report modules they receive.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Purchased report tier.
///
/// Determines module availability, meal plan length and lab list depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free report - core sections only, no meal plan.
    Free,

    /// Entry paid tier.
    /// - 7 day meal plan
    /// - Supplement guide
    Essential,

    /// Full report.
    /// - 14 day meal plan
    /// - Condition-specific protocols
    Premium,

    /// Premium plus a coaching plan.
    /// - 28 day meal plan
    /// - Condition-specific protocols
    /// - Coaching plan section
    Coaching,
}

impl Tier {
    /// Every tier, lowest rank first.
    pub const ALL: [Tier; 4] = [Tier::Free, Tier::Essential, Tier::Premium, Tier::Coaching];

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, Tier::Free)
    }

    /// Returns true for the tiers that unlock condition-specific protocols.
    pub fn is_premium(&self) -> bool {
        matches!(self, Tier::Premium | Tier::Coaching)
    }

    /// Returns the wire name for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Essential => "essential",
            Tier::Premium => "premium",
            Tier::Coaching => "coaching",
        }
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Essential => "Essential",
            Tier::Premium => "Premium",
            Tier::Coaching => "Coaching",
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = more content.
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Free => 0,
            Tier::Essential => 1,
            Tier::Premium => 2,
            Tier::Coaching => 3,
        }
    }
}

impl FromStr for Tier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::new(ErrorCode::UnknownTier, format!("Unknown tier '{}'", s))
                    .with_detail("tier", s)
            })
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
