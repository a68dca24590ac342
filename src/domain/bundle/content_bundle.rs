//! Content Bundle - everything the renderer needs for one report.

use serde::{Deserialize, Serialize};

use super::BundleState;
use crate::domain::engine::RuleEngineOutput;
use crate::domain::labs::LabTest;
use crate::domain::meal_plan::MealPlanDay;
use crate::domain::modules::ModuleId;
use crate::domain::narrative::NarrativeHint;
use crate::domain::profile::{Tier, UserProfile};
use crate::domain::risk::RiskFlag;

/// Generated prose for one report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSection {
    pub module: ModuleId,
    pub title: String,
    pub body: String,
}

impl NarrativeSection {
    pub fn new(module: ModuleId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            module,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Aggregate handed from content assembly to the validator and then to rendering.
///
/// Built in `Assembled` state; the validator mutates it in place and moves it
/// to `Validated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub profile: UserProfile,
    pub tier: Tier,
    pub add_ons: Vec<String>,
    pub risk_flags: Vec<RiskFlag>,
    pub active_modules: Vec<ModuleId>,
    pub lab_test_priority: Vec<LabTest>,
    pub narrative_hints: Vec<NarrativeHint>,
    pub narratives: Vec<NarrativeSection>,
    pub meal_plan: Vec<MealPlanDay>,
    pub supplements: Vec<String>,
    pub adjustments: Vec<String>,
    pub state: BundleState,
}

impl ContentBundle {
    /// Starts a bundle from the rule engine output; content lists start empty.
    pub fn assemble(profile: UserProfile, tier: Tier, output: RuleEngineOutput) -> Self {
        Self {
            profile,
            tier,
            add_ons: Vec::new(),
            risk_flags: output.risk_flags,
            active_modules: output.active_modules,
            lab_test_priority: output.lab_test_priority,
            narrative_hints: output.narrative_hints,
            narratives: Vec::new(),
            meal_plan: Vec::new(),
            supplements: Vec::new(),
            adjustments: Vec::new(),
            state: BundleState::Assembled,
        }
    }

    pub fn with_add_ons(mut self, add_ons: Vec<String>) -> Self {
        self.add_ons = add_ons;
        self
    }

    pub fn with_narratives(mut self, narratives: Vec<NarrativeSection>) -> Self {
        self.narratives = narratives;
        self
    }

    pub fn with_meal_plan(mut self, meal_plan: Vec<MealPlanDay>) -> Self {
        self.meal_plan = meal_plan;
        self
    }

    pub fn with_supplements(mut self, supplements: Vec<String>) -> Self {
        self.supplements = supplements;
        self
    }

    pub fn has_module(&self, module: ModuleId) -> bool {
        self.active_modules.contains(&module)
    }

    pub fn is_validated(&self) -> bool {
        self.state == BundleState::Validated
    }

    /// Appends a note unless an identical one is already recorded.
    ///
    /// Returns true if the note was new.
    pub fn record_adjustment(&mut self, note: impl Into<String>) -> bool {
        let note = note.into();
        if self.adjustments.contains(&note) {
            return false;
        }
        self.adjustments.push(note);
        true
    }
}
