//! Integration tests for the report pipeline.
//!
//! These tests drive the public API end to end:
//! 1. Score classification bands
//! 2. Module gating by activity, gender, tier and conditions
//! 3. Lab prioritization ordering and dedup
//! 4. Meal plan calorie tracking and day labels
//! 5. Bundle validation (gender correction, idempotence)

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use regex::Regex;

use wellness_report::adapters::TemplateNarrativeWriter;
use wellness_report::application::{
    AssembleReportCommand, AssembleReportHandler, AssembleReportSettings, AssembledReport,
};
use wellness_report::domain::engine::RuleEngine;
use wellness_report::domain::foundation::Score;
use wellness_report::domain::labs::LabTestPrioritizer;
use wellness_report::domain::meal_plan::{MealPlanDay, MealPlanGenerator};
use wellness_report::domain::modules::{ModuleId, ModuleSelector};
use wellness_report::domain::profile::{Gender, Tier, UserProfile};
use wellness_report::domain::risk::RiskFlagBuilder;
use wellness_report::domain::scoring::{classify_score, ScoreBand};
use wellness_report::domain::validation::BundleValidator;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn handler() -> AssembleReportHandler {
    AssembleReportHandler::new(
        Arc::new(TemplateNarrativeWriter::new()),
        AssembleReportSettings::default(),
    )
}

fn assemble(profile: UserProfile, tier: Tier) -> AssembledReport {
    handler()
        .handle(AssembleReportCommand {
            profile,
            tier,
            add_ons: Vec::new(),
        })
        .expect("report assembles")
}

fn male_with_pcos_and_diabetes() -> UserProfile {
    UserProfile::new(40, Gender::Male, 178.0, 80.0)
        .with_scores(55, 50, 45, 55)
        .with_conditions(&["PCOS", "Diabetes"])
}

fn base_profile(activity: u8) -> UserProfile {
    UserProfile::new(36, Gender::Female, 168.0, 63.0)
        .with_scores(65, 45, activity, 60)
        .with_goals(&["Build muscle", "Lose fat"])
}

fn assert_within_tdee(day: &MealPlanDay, tdee: u32) {
    let deviation = (f64::from(day.total_calories) - f64::from(tdee)).abs() / f64::from(tdee);
    assert!(
        deviation <= 0.15,
        "{} kcal vs {} on {}",
        day.total_calories,
        tdee,
        day.label
    );
}

const CONDITION_POOL: [&str; 6] = [
    "Diabetes",
    "PCOS",
    "Hypothyroidism",
    "Hypertension",
    "Prediabetes",
    "High cholesterol",
];

fn arb_profile() -> impl Strategy<Value = UserProfile> {
    (
        18u8..=85,
        prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Other)],
        150.0f64..200.0,
        45.0f64..140.0,
        (0u8..=100, 0u8..=100, 0u8..=100, 0u8..=100),
        proptest::sample::subsequence(CONDITION_POOL.to_vec(), 0..=CONDITION_POOL.len()),
    )
        .prop_map(|(age, gender, height, weight, (sleep, stress, activity, energy), conditions)| {
            UserProfile::new(age, gender, height, weight)
                .with_scores(sleep, stress, activity, energy)
                .with_conditions(&conditions)
        })
}

fn arb_tier() -> impl Strategy<Value = Tier> {
    prop_oneof![
        Just(Tier::Free),
        Just(Tier::Essential),
        Just(Tier::Premium),
        Just(Tier::Coaching)
    ]
}

// =============================================================================
// Score Classification
// =============================================================================

proptest! {
    #[test]
    fn classify_score_bands_hold(s in 0u8..=100) {
        let band = classify_score(Score::new(s));
        prop_assert_eq!(band == ScoreBand::High, s >= 70);
        prop_assert_eq!(band == ScoreBand::Moderate, (40..70).contains(&s));
        prop_assert_eq!(band == ScoreBand::Low, s < 40);
    }
}

// =============================================================================
// Module Gating
// =============================================================================

#[test]
fn low_activity_gets_beginner_program_only() {
    let modules = ModuleSelector::select(&base_profile(25), Tier::Coaching);
    assert!(modules.contains(&ModuleId::BeginnerProgram));
    assert!(!modules.contains(&ModuleId::MovementProgram));
    assert!(!modules.contains(&ModuleId::MuscleBuilding));
}

#[test]
fn active_profile_never_gets_beginner_program() {
    let modules = ModuleSelector::select(&base_profile(30), Tier::Coaching);
    assert!(!modules.contains(&ModuleId::BeginnerProgram));
    assert!(modules.contains(&ModuleId::MovementProgram));
    assert!(modules.contains(&ModuleId::MuscleBuilding));
}

proptest! {
    #[test]
    fn activity_gating_holds_for_any_profile(profile in arb_profile(), tier in arb_tier()) {
        let modules = ModuleSelector::select(&profile, tier);
        if profile.activity_score.value() < 30 {
            prop_assert!(!modules.contains(&ModuleId::MuscleBuilding));
            prop_assert!(!modules.contains(&ModuleId::MovementProgram));
            prop_assert!(modules.contains(&ModuleId::BeginnerProgram));
        } else {
            prop_assert!(!modules.contains(&ModuleId::BeginnerProgram));
        }
    }

    #[test]
    fn modules_follow_catalog_order(profile in arb_profile(), tier in arb_tier()) {
        let modules = ModuleSelector::select(&profile, tier);
        let positions: Vec<usize> = modules
            .iter()
            .map(|m| ModuleId::ALL.iter().position(|c| c == m).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn module_ids_serialize_as_stable_snake_case() {
    let pattern = Regex::new(r"^[a-z]+(_[a-z]+)*$").unwrap();
    for id in ModuleId::ALL {
        let json = serde_json::to_value(id).unwrap();
        let wire = json.as_str().unwrap();
        assert!(pattern.is_match(wire), "{}", wire);
        assert_eq!(wire, id.as_str());
        assert_eq!(ModuleId::from_id(wire), Some(id));
    }
}

// =============================================================================
// Lab Prioritization
// =============================================================================

proptest! {
    #[test]
    fn lab_list_is_unique_and_sorted(profile in arb_profile()) {
        let flags = RiskFlagBuilder::build(&profile);
        let tests = LabTestPrioritizer::prioritize(&profile, &flags);

        prop_assert!(tests.windows(2).all(|w| w[0].priority >= w[1].priority));
        let names: HashSet<&str> = tests.iter().map(|t| t.name.as_str()).collect();
        prop_assert_eq!(names.len(), tests.len());
        prop_assert!(tests.iter().all(|t| t.priority > 0 && !t.reason.is_empty()));
    }

    #[test]
    fn validated_bundle_labs_are_unique_and_sorted(profile in arb_profile(), tier in arb_tier()) {
        let report = assemble(profile, tier);
        let tests = &report.bundle.lab_test_priority;
        prop_assert!(tests.windows(2).all(|w| w[0].priority >= w[1].priority));
        let names: HashSet<&str> = tests.iter().map(|t| t.name.as_str()).collect();
        prop_assert_eq!(names.len(), tests.len());
    }
}

#[test]
fn diabetes_ranks_hba1c_above_cbc() {
    let profile =
        UserProfile::new(55, Gender::Female, 162.0, 70.0).with_conditions(&["Type 2 Diabetes"]);
    let output = RuleEngine::evaluate(&profile, Tier::Premium);
    let weight = |name: &str| {
        output
            .lab_test_priority
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.priority)
            .unwrap()
    };
    assert!(weight("HbA1c") > weight("CBC"));
}

// =============================================================================
// Meal Plan
// =============================================================================

#[test]
fn meal_days_track_tdee_within_fifteen_percent() {
    for tdee in [1400u32, 2000, 3000] {
        let profile = UserProfile::new(38, Gender::Female, 170.0, 68.0).with_tdee(tdee);
        let report = assemble(profile, Tier::Coaching);
        assert_eq!(report.bundle.meal_plan.len(), 28);
        for day in &report.bundle.meal_plan {
            assert_within_tdee(day, tdee);
        }
    }
}

#[test]
fn many_intolerances_keep_every_day_on_target() {
    let intolerances = ["Lactose", "Gluten", "Tree nuts", "Eggs", "Shellfish"];
    for _ in 0..20 {
        let profile = UserProfile::new(31, Gender::Female, 165.0, 60.0)
            .with_scores(60, 45, 55, 60)
            .with_intolerances(&intolerances)
            .with_tdee(2000);
        let report = assemble(profile, Tier::Coaching);

        assert_eq!(report.bundle.meal_plan.len(), 28);
        for day in &report.bundle.meal_plan {
            assert_eq!(day.items.len(), 4, "{}", day.label);
            assert_within_tdee(day, 2000);
        }
    }
}

#[test]
fn day_labels_are_ordinal_not_weekdays() {
    let label = Regex::new(r"^Day \d+$").unwrap();
    let weekday =
        Regex::new(r"(?i)monday|tuesday|wednesday|thursday|friday|saturday|sunday").unwrap();
    let plan = MealPlanGenerator::generate(&base_profile(50), 28);
    for (i, day) in plan.iter().enumerate() {
        assert!(label.is_match(&day.label));
        assert!(!weekday.is_match(&day.label));
        assert_eq!(day.label, format!("Day {}", i + 1));
    }
}

// =============================================================================
// Bundle Validation
// =============================================================================

#[test]
fn male_pcos_on_free_tier() {
    let report = assemble(male_with_pcos_and_diabetes(), Tier::Free);
    let bundle = &report.bundle;

    assert_eq!(bundle.profile.medical_conditions, vec!["Diabetes"]);
    assert_eq!(bundle.adjustments.len(), 1);
    assert!(!bundle.has_module(ModuleId::InsulinManagement));
    assert!(bundle.lab_test_priority.len() <= 5);
    for test in &bundle.lab_test_priority {
        assert!(!test.name.contains("Testosterone"), "{}", test.name);
        assert_ne!(test.name, "LH/FSH Ratio");
        assert!(!test.reason.contains("hormonal"), "{}", test.reason);
    }
}

#[test]
fn male_pcos_on_premium_tier_keeps_insulin_module() {
    let report = assemble(male_with_pcos_and_diabetes(), Tier::Premium);
    let bundle = &report.bundle;

    assert_eq!(bundle.profile.medical_conditions, vec!["Diabetes"]);
    assert_eq!(bundle.adjustments.len(), 1);
    assert!(bundle.has_module(ModuleId::InsulinManagement));
    assert!(bundle.supplements.iter().all(|s| s != "Myo-Inositol"));
    assert!(bundle
        .lab_test_priority
        .iter()
        .all(|t| t.name != "SHBG" && t.name != "LH/FSH Ratio"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn male_bundles_never_mention_female_conditions(profile in arb_profile(), tier in arb_tier()) {
        let mut profile = profile;
        profile.gender = Gender::Male;
        let report = assemble(profile, tier);

        prop_assert!(report
            .bundle
            .profile
            .medical_conditions
            .iter()
            .all(|c| !c.to_lowercase().contains("pcos")));
        for section in &report.bundle.narratives {
            let text = format!("{} {}", section.title, section.body).to_lowercase();
            for word in ["pcos", "ovarian", "menstrual"] {
                prop_assert!(!text.contains(word), "{}", text);
            }
        }
    }

    #[test]
    fn revalidation_adds_nothing(profile in arb_profile(), tier in arb_tier()) {
        let mut report = assemble(profile, tier);
        let before = report.bundle.clone();

        let outcome = BundleValidator::default().validate(&mut report.bundle);
        prop_assert!(outcome.adjustments.is_empty());
        prop_assert!(outcome.fatal_errors.is_empty());
        prop_assert_eq!(report.bundle, before);
    }
}

#[test]
fn intolerances_are_removed_from_meal_plan() {
    let profile = UserProfile::new(29, Gender::Female, 160.0, 55.0)
        .with_scores(70, 35, 60, 65)
        .with_intolerances(&["Lactose", "Shellfish"]);
    let report = assemble(profile, Tier::Premium);
    let dairy = Regex::new(r"(?i)\b(yogurt|cheese|halloumi|milk)\b").unwrap();
    let shellfish = Regex::new(r"(?i)\b(shrimp|salmon|tuna)\b").unwrap();

    for day in &report.bundle.meal_plan {
        for item in &day.items {
            assert!(!dairy.is_match(&item.name), "{}", item.name);
            assert!(!shellfish.is_match(&item.name), "{}", item.name);
        }
    }
}

#[test]
fn bundle_serializes_for_rendering() {
    let report = assemble(base_profile(50), Tier::Essential);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["bundle"]["state"], "validated");
    assert_eq!(json["bundle"]["tier"], "essential");
    assert_eq!(json["bundle"]["meal_plan"][0]["label"], "Day 1");
    assert_eq!(json["bundle"]["active_modules"][0], "health_snapshot");
}
