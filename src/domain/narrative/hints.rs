//! Narrative Hint Builder - tone and topic guidance per active module.
//!
//! Hints are consumed by the external narrative-text generator. They carry
//! no text themselves, only what to stress and what to stay away from.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::modules::ModuleId;
use crate::domain::profile::UserProfile;
use crate::domain::scoring::{energy_severity, sleep_severity, stress_severity, Severity};

/// Voice the generator should write a section in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Clinical,
    Motivational,
    Urgent,
}

/// Generation guidance for one report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeHint {
    pub section: ModuleId,
    pub tone: Tone,
    pub focus_areas: Vec<String>,
    pub avoid_topics: Vec<String>,
}

type TopicLists = (&'static [&'static str], &'static [&'static str]);

fn topics(focus: &'static [&'static str], avoid: &'static [&'static str]) -> TopicLists {
    (focus, avoid)
}

/// Fixed (focus, avoid) lists per module.
fn module_topics(module: ModuleId) -> TopicLists {
    match module {
        ModuleId::HealthSnapshot => topics(
            &["overall score summary", "top three priorities"],
            &["diagnosis language"],
        ),
        ModuleId::SleepProtocol => topics(
            &["sleep timing", "evening wind-down", "light exposure"],
            &["sleep medication dosing"],
        ),
        ModuleId::StressManagement => topics(
            &["breathing practice", "workload boundaries"],
            &["psychiatric diagnosis"],
        ),
        ModuleId::FatLossProgram => topics(
            &["sustainable calorie deficit", "protein intake"],
            &["crash dieting", "body shaming"],
        ),
        ModuleId::MuscleBuilding => topics(
            &["progressive overload", "protein timing"],
            &["anabolic substances"],
        ),
        ModuleId::BeginnerProgram => topics(
            &["walking habit", "mobility basics"],
            &["high-intensity intervals"],
        ),
        ModuleId::MovementProgram => topics(&["weekly training split", "recovery days"], &[]),
        ModuleId::InsulinManagement => topics(
            &["carbohydrate pairing", "post-meal walks"],
            &["medication changes"],
        ),
        ModuleId::ThyroidProtocol => topics(
            &["medication timing", "selenium and iodine sources"],
            &["stopping medication"],
        ),
        ModuleId::Cardiovascular => topics(
            &["blood pressure tracking", "fiber intake"],
            &["strenuous exertion without clearance"],
        ),
        ModuleId::GutHealth => topics(
            &["fiber diversity", "fermented foods"],
            &["elimination diets without supervision"],
        ),
        ModuleId::SkinHealth => topics(
            &["hydration", "omega-3 intake"],
            &["prescription skincare"],
        ),
        ModuleId::EnergyOptimization => topics(
            &["meal regularity", "daylight exposure"],
            &["stimulant reliance"],
        ),
        ModuleId::MealPlan => topics(&["portion guidance", "prep tips"], &[]),
        ModuleId::SupplementGuide => topics(
            &["timing with meals", "quality markers"],
            &["megadoses"],
        ),
        ModuleId::LabTesting => topics(
            &["why each test matters", "how to request tests"],
            &["interpreting results without a provider"],
        ),
        ModuleId::CoachingPlan => topics(&["weekly check-ins", "habit tracking"], &[]),
    }
}

/// Avoid-topics derived from conditions and intolerances; applied to every hint.
pub fn global_avoid_topics(profile: &UserProfile) -> Vec<String> {
    let mut topics = Vec::new();
    if profile.has_condition("diabet") {
        topics.push("high-sugar foods".to_string());
    }
    if profile.has_any_condition(&["hypertension", "high blood pressure"]) {
        topics.push("high-sodium foods".to_string());
    }
    if profile.has_intolerance("lactose") || profile.has_intolerance("dairy") {
        topics.push("dairy".to_string());
    }
    if profile.has_intolerance("gluten") || profile.has_condition("celiac") {
        topics.push("gluten-containing foods".to_string());
    }
    topics
}

fn tone_for(module: ModuleId, profile: &UserProfile) -> Tone {
    match module {
        ModuleId::SleepProtocol => match sleep_severity(profile.sleep_score) {
            Severity::Severe => Tone::Urgent,
            Severity::Moderate => Tone::Clinical,
            _ => Tone::Motivational,
        },
        ModuleId::StressManagement => match stress_severity(profile.stress_score) {
            Severity::Severe => Tone::Urgent,
            Severity::Moderate if profile.stress_score.value() >= 50 => Tone::Clinical,
            _ => Tone::Motivational,
        },
        ModuleId::EnergyOptimization => match energy_severity(profile.energy_score) {
            Severity::Severe => Tone::Urgent,
            _ => Tone::Clinical,
        },
        ModuleId::InsulinManagement
        | ModuleId::ThyroidProtocol
        | ModuleId::Cardiovascular
        | ModuleId::GutHealth
        | ModuleId::SkinHealth
        | ModuleId::LabTesting
        | ModuleId::HealthSnapshot => Tone::Clinical,
        _ => Tone::Motivational,
    }
}

/// Builds one hint per active module.
pub struct NarrativeHintBuilder;

impl NarrativeHintBuilder {
    pub fn build(profile: &UserProfile, modules: &[ModuleId]) -> Vec<NarrativeHint> {
        let global_avoid = global_avoid_topics(profile);

        let hints: Vec<NarrativeHint> = modules
            .iter()
            .map(|&module| {
                let (focus, avoid) = module_topics(module);
                let mut avoid_topics: Vec<String> = avoid.iter().map(|s| s.to_string()).collect();
                for topic in &global_avoid {
                    if !avoid_topics.contains(topic) {
                        avoid_topics.push(topic.clone());
                    }
                }
                NarrativeHint {
                    section: module,
                    tone: tone_for(module, profile),
                    focus_areas: focus.iter().map(|s| s.to_string()).collect(),
                    avoid_topics,
                }
            })
            .collect();

        debug!(hint_count = hints.len(), "Built narrative hints");
        hints
    }
}
