//! Tier-based content entitlements.
//!
//! Defines how much of each report section a tier receives.

use super::Tier;
use serde::{Deserialize, Serialize};

/// Content limits for a purchased tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierEntitlements {
    /// The tier these limits apply to.
    pub tier: Tier,
    /// Number of meal plan days. Zero = no meal plan.
    pub meal_plan_days: u8,
    /// Maximum lab tests rendered. None = unlimited.
    pub max_lab_tests: Option<usize>,
    /// Whether the supplement guide is included.
    pub supplement_guide: bool,
}

impl TierEntitlements {
    /// Get the entitlements for a specific tier.
    ///
    /// # Tier Configuration
    ///
    /// | Tier | Meal days | Lab tests | Supplements |
    /// |------|-----------|-----------|-------------|
    /// | Free | 0 | 5 | No |
    /// | Essential | 7 | 10 | Yes |
    /// | Premium | 14 | Unlimited | Yes |
    /// | Coaching | 28 | Unlimited | Yes |
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Free => Self {
                tier,
                meal_plan_days: 0,
                max_lab_tests: Some(5),
                supplement_guide: false,
            },
            Tier::Essential => Self {
                tier,
                meal_plan_days: 7,
                max_lab_tests: Some(10),
                supplement_guide: true,
            },
            Tier::Premium => Self {
                tier,
                meal_plan_days: 14,
                max_lab_tests: None, // Unlimited
                supplement_guide: true,
            },
            Tier::Coaching => Self {
                tier,
                meal_plan_days: 28,
                max_lab_tests: None,
                supplement_guide: true,
            },
        }
    }

    /// Whether this tier receives a meal plan at all.
    pub fn includes_meal_plan(&self) -> bool {
        self.meal_plan_days > 0
    }

    /// Clamp a lab list length to this tier's limit.
    pub fn lab_test_limit(&self, available: usize) -> usize {
        self.max_lab_tests
            .map(|max| available.min(max))
            .unwrap_or(available)
    }
}
