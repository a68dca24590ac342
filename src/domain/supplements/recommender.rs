//! Supplement Recommender.
//!
//! User-declared priorities come first, followed by rule-derived suggestions.
//! The list may contain near-duplicates ("Magnesium" vs "magnesium "); the
//! bundle validator collapses them.

use tracing::debug;

use crate::domain::modules::ModuleId;
use crate::domain::profile::UserProfile;
use crate::domain::risk::{flag_for, RiskCategory, RiskFlag};

pub type SupplementTrigger = fn(&UserProfile, &[RiskFlag], &[ModuleId]) -> bool;

/// One (trigger, suggestion) row.
#[derive(Clone, Copy)]
pub struct SupplementRule {
    pub supplement: &'static str,
    pub trigger: SupplementTrigger,
}

impl std::fmt::Debug for SupplementRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupplementRule")
            .field("supplement", &self.supplement)
            .finish_non_exhaustive()
    }
}

pub static SUPPLEMENT_RULES: &[SupplementRule] = &[
    SupplementRule {
        supplement: "Vitamin D3",
        trigger: |_, _, _| true,
    },
    SupplementRule {
        supplement: "Magnesium Glycinate",
        trigger: |_, flags, _| flag_for(flags, RiskCategory::Sleep).is_some(),
    },
    SupplementRule {
        supplement: "Ashwagandha",
        trigger: |_, flags, _| flag_for(flags, RiskCategory::Stress).is_some(),
    },
    SupplementRule {
        supplement: "Omega-3 Fish Oil",
        trigger: |_, flags, modules| {
            flag_for(flags, RiskCategory::Cardiovascular).is_some()
                || modules.contains(&ModuleId::Cardiovascular)
        },
    },
    SupplementRule {
        supplement: "Myo-Inositol",
        trigger: |profile, _, _| profile.has_condition("pcos"),
    },
    SupplementRule {
        supplement: "Probiotic",
        trigger: |_, flags, modules| {
            flag_for(flags, RiskCategory::Digestive).is_some()
                || modules.contains(&ModuleId::GutHealth)
        },
    },
];

pub struct SupplementRecommender;

impl SupplementRecommender {
    pub fn recommend(
        profile: &UserProfile,
        flags: &[RiskFlag],
        modules: &[ModuleId],
    ) -> Vec<String> {
        let mut supplements: Vec<String> = profile
            .supplement_priority
            .iter()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect();

        supplements.extend(
            SUPPLEMENT_RULES
                .iter()
                .filter(|rule| (rule.trigger)(profile, flags, modules))
                .map(|rule| rule.supplement.to_string()),
        );

        debug!(
            profile_id = %profile.id,
            supplement_count = supplements.len(),
            "Recommended supplements"
        );
        supplements
    }
}
