//! Module Selector - filters the catalog for one profile and tier.

use tracing::debug;

use super::catalog::{ModuleDefinition, ModuleId, MODULE_CATALOG};
use crate::domain::profile::{Tier, UserProfile};

/// Stateless catalog filter.
pub struct ModuleSelector;

impl ModuleSelector {
    /// Returns the active modules in catalog order.
    ///
    /// Never fails; a sparse or contradictory profile just yields fewer modules.
    pub fn select(profile: &UserProfile, tier: Tier) -> Vec<ModuleId> {
        Self::select_from(MODULE_CATALOG, profile, tier)
    }

    /// Filters an arbitrary catalog. Order is preserved, never re-sorted.
    pub fn select_from(
        catalog: &[ModuleDefinition],
        profile: &UserProfile,
        tier: Tier,
    ) -> Vec<ModuleId> {
        let active: Vec<ModuleId> = catalog
            .iter()
            .filter(|def| (def.predicate)(profile, tier))
            .map(|def| def.id)
            .collect();

        debug!(
            profile_id = %profile.id,
            tier = %tier,
            module_count = active.len(),
            "Selected report modules"
        );
        active
    }
}
