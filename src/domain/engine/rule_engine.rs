//! Rule Engine - classifier, flags, module gating, labs and hints in one pass.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::labs::{LabTest, LabTestPrioritizer};
use crate::domain::modules::{ModuleId, ModuleSelector};
use crate::domain::narrative::{NarrativeHint, NarrativeHintBuilder};
use crate::domain::profile::{Tier, UserProfile};
use crate::domain::risk::{RiskFlag, RiskFlagBuilder};
use crate::domain::scoring::SeverityProfile;

/// Everything the rules derive from a profile and tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEngineOutput {
    pub risk_flags: Vec<RiskFlag>,
    pub active_modules: Vec<ModuleId>,
    pub lab_test_priority: Vec<LabTest>,
    pub narrative_hints: Vec<NarrativeHint>,
    pub severity_profile: SeverityProfile,
}

/// Stateless; every call builds its own accumulators.
pub struct RuleEngine;

impl RuleEngine {
    pub fn evaluate(profile: &UserProfile, tier: Tier) -> RuleEngineOutput {
        let severity_profile = SeverityProfile::from_profile(profile);
        let risk_flags = RiskFlagBuilder::build(profile);
        let active_modules = ModuleSelector::select(profile, tier);
        let lab_test_priority = LabTestPrioritizer::prioritize(profile, &risk_flags);
        let narrative_hints = NarrativeHintBuilder::build(profile, &active_modules);

        info!(
            profile_id = %profile.id,
            tier = %tier,
            flags = risk_flags.len(),
            modules = active_modules.len(),
            lab_tests = lab_test_priority.len(),
            "Rule engine evaluated profile"
        );

        RuleEngineOutput {
            risk_flags,
            active_modules,
            lab_test_priority,
            narrative_hints,
            severity_profile,
        }
    }
}
