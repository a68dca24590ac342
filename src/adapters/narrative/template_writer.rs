//! Template-based narrative writer adapter.
//!
//! Deterministic prose from fixed sentence templates. Used by the binary and
//! in tests in place of a language-model writer.

use crate::domain::bundle::NarrativeSection;
use crate::domain::modules::ModuleId;
use crate::domain::narrative::{NarrativeHint, Tone};
use crate::domain::profile::UserProfile;
use crate::ports::{NarrativeError, NarrativeWriter};

#[derive(Debug, Clone, Default)]
pub struct TemplateNarrativeWriter;

impl TemplateNarrativeWriter {
    pub fn new() -> Self {
        Self
    }

    fn opening(&self, tone: Tone) -> &'static str {
        match tone {
            Tone::Urgent => "This area needs attention now.",
            Tone::Clinical => "Here is what your results show.",
            Tone::Motivational => "You are in a good position to build on this.",
        }
    }

    /// Module-specific sentence built from profile data.
    fn detail(&self, module: ModuleId, profile: &UserProfile) -> String {
        match module {
            ModuleId::HealthSnapshot => {
                let mut text = format!(
                    "Your sleep score is {}, stress {}, activity {} and energy {}.",
                    profile.sleep_score.value(),
                    profile.stress_score.value(),
                    profile.activity_score.value(),
                    profile.energy_score.value()
                );
                if !profile.medical_conditions.is_empty() {
                    text.push_str(&format!(
                        " You reported: {}.",
                        profile.medical_conditions.join(", ")
                    ));
                }
                text
            }
            ModuleId::SleepProtocol => format!(
                "With a sleep score of {}, a consistent wind-down routine is the first lever.",
                profile.sleep_score.value()
            ),
            ModuleId::StressManagement => format!(
                "Your stress score of {} shapes how you recover from training and work.",
                profile.stress_score.value()
            ),
            ModuleId::FatLossProgram | ModuleId::MealPlan => format!(
                "Your daily energy target is about {} kcal, with roughly {:.0} g of protein.",
                profile.tdee, profile.macros.protein_g
            ),
            ModuleId::MuscleBuilding | ModuleId::MovementProgram => {
                "Three structured sessions a week is a realistic starting cadence.".to_string()
            }
            ModuleId::BeginnerProgram => {
                "Start with short daily walks and add one new habit at a time.".to_string()
            }
            ModuleId::InsulinManagement
            | ModuleId::ThyroidProtocol
            | ModuleId::Cardiovascular
            | ModuleId::GutHealth
            | ModuleId::SkinHealth => {
                "Work through these steps alongside your healthcare provider.".to_string()
            }
            ModuleId::EnergyOptimization => format!(
                "An energy score of {} usually improves when meals and sleep are regular.",
                profile.energy_score.value()
            ),
            ModuleId::SupplementGuide => {
                "Introduce one supplement at a time and check interactions first.".to_string()
            }
            ModuleId::LabTesting => {
                "The tests below are ordered by how much they can tell you.".to_string()
            }
            ModuleId::CoachingPlan => {
                "Your coach will review progress with you every week.".to_string()
            }
        }
    }
}

impl NarrativeWriter for TemplateNarrativeWriter {
    fn write(
        &self,
        hint: &NarrativeHint,
        profile: &UserProfile,
    ) -> Result<NarrativeSection, NarrativeError> {
        let mut body = format!(
            "{} {}",
            self.opening(hint.tone),
            self.detail(hint.section, profile)
        );
        if !hint.focus_areas.is_empty() {
            body.push_str(&format!(" Focus on {}.", hint.focus_areas.join(", ")));
        }
        Ok(NarrativeSection::new(hint.section, hint.section.display_name(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::narrative::NarrativeHintBuilder;
    use crate::domain::profile::Gender;

    fn profile() -> UserProfile {
        UserProfile::new(40, Gender::Female, 165.0, 70.0)
            .with_scores(25, 75, 20, 40)
            .with_conditions(&["Hypothyroidism"])
    }

    #[test]
    fn every_module_renders_clean_text() {
        let p = profile();
        let writer = TemplateNarrativeWriter::new();
        for hint in NarrativeHintBuilder::build(&p, &ModuleId::ALL) {
            let section = writer.write(&hint, &p).unwrap();
            assert_eq!(section.module, hint.section);
            assert!(!section.body.contains('{'));
            assert!(!section.body.contains('['));
            for id in ModuleId::ALL {
                if id.as_str().contains('_') {
                    assert!(!section.body.contains(id.as_str()), "{}", section.body);
                }
            }
        }
    }

    #[test]
    fn title_is_display_name() {
        let p = profile();
        let hint = &NarrativeHintBuilder::build(&p, &[ModuleId::SleepProtocol])[0];
        let section = TemplateNarrativeWriter::new().write(hint, &p).unwrap();
        assert_eq!(section.title, "Sleep Protocol");
        assert!(section.body.starts_with("This area needs attention now."));
    }

    #[test]
    fn snapshot_lists_conditions() {
        let p = profile();
        let hint = &NarrativeHintBuilder::build(&p, &[ModuleId::HealthSnapshot])[0];
        let section = TemplateNarrativeWriter::new().write(hint, &p).unwrap();
        assert!(section.body.contains("You reported: Hypothyroidism."));
    }
}
