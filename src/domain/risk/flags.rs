//! Risk Flag Builder - categorized severity flags from a scored profile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::profile::UserProfile;
use crate::domain::scoring::{
    energy_severity, sleep_severity, stress_severity, weight_risk, Severity, WeightRisk,
};

/// Area of concern a flag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Sleep,
    Stress,
    Weight,
    Hormonal,
    Thyroid,
    Diabetes,
    Cardiovascular,
    Digestive,
    Energy,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Stress => "stress",
            Self::Weight => "weight",
            Self::Hormonal => "hormonal",
            Self::Thyroid => "thyroid",
            Self::Diabetes => "diabetes",
            Self::Cardiovascular => "cardiovascular",
            Self::Digestive => "digestive",
            Self::Energy => "energy",
        }
    }
}

/// Severity attached to a raised flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSeverity {
    Moderate,
    High,
    Critical,
}

impl FlagSeverity {
    /// Lab weight contributed by a flag of this severity.
    pub fn lab_weight(&self) -> u32 {
        match self {
            Self::Critical => 100,
            Self::High => 80,
            Self::Moderate => 50,
        }
    }
}

/// Lab weight when a rule fires without a matching flag.
pub const NORMAL_LAB_WEIGHT: u32 = 20;

/// A raised concern. Recomputed on every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub category: RiskCategory,
    pub severity: FlagSeverity,
    pub description: String,
    pub action_required: String,
}

impl RiskFlag {
    fn new(
        category: RiskCategory,
        severity: FlagSeverity,
        description: impl Into<String>,
        action_required: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            description: description.into(),
            action_required: action_required.into(),
        }
    }
}

type FlagRule = fn(&UserProfile) -> Option<RiskFlag>;

/// Evaluated in order; each rule yields at most one flag.
const FLAG_RULES: &[FlagRule] = &[
    sleep_flag,
    stress_flag,
    weight_flag,
    hormonal_flag,
    thyroid_flag,
    diabetes_flag,
    cardiovascular_flag,
    digestive_flag,
    energy_flag,
];

pub const THYROID_KEYWORDS: &[&str] = &["thyroid", "hashimoto", "graves"];
pub const DIABETES_KEYWORDS: &[&str] = &["diabet", "insulin resistance", "prediabet"];
pub const CARDIO_KEYWORDS: &[&str] = &[
    "hypertension",
    "high blood pressure",
    "heart",
    "cholesterol",
    "cardiovascular",
];

/// Builds risk flags from a profile.
pub struct RiskFlagBuilder;

impl RiskFlagBuilder {
    /// Returns every raised flag in fixed category order. Never fails.
    pub fn build(profile: &UserProfile) -> Vec<RiskFlag> {
        let flags: Vec<RiskFlag> = FLAG_RULES.iter().filter_map(|rule| rule(profile)).collect();
        debug!(
            profile_id = %profile.id,
            flag_count = flags.len(),
            "Built risk flags"
        );
        flags
    }
}

fn sleep_flag(profile: &UserProfile) -> Option<RiskFlag> {
    let score = profile.sleep_score.value();
    let severity = match sleep_severity(profile.sleep_score) {
        Severity::Severe => FlagSeverity::Critical,
        Severity::Moderate => FlagSeverity::High,
        Severity::Mild => FlagSeverity::Moderate,
        Severity::Normal => return None,
    };
    Some(RiskFlag::new(
        RiskCategory::Sleep,
        severity,
        format!("Sleep quality score of {} indicates disrupted recovery.", score),
        "Follow the sleep protocol and keep a consistent wake time for 14 days.",
    ))
}

fn stress_flag(profile: &UserProfile) -> Option<RiskFlag> {
    let score = profile.stress_score.value();
    let severity = match stress_severity(profile.stress_score) {
        Severity::Severe => FlagSeverity::High,
        Severity::Moderate | Severity::Mild => FlagSeverity::Moderate,
        Severity::Normal => return None,
    };
    Some(RiskFlag::new(
        RiskCategory::Stress,
        severity,
        format!("Stress score of {} suggests elevated cortisol load.", score),
        "Add a daily 10-minute down-regulation practice.",
    ))
}

fn weight_flag(profile: &UserProfile) -> Option<RiskFlag> {
    let (severity, description) = match weight_risk(profile.bmi) {
        WeightRisk::Obese => (
            FlagSeverity::High,
            format!("BMI of {:.1} is in the obese range.", profile.bmi),
        ),
        WeightRisk::Overweight => (
            FlagSeverity::Moderate,
            format!("BMI of {:.1} is above the healthy range.", profile.bmi),
        ),
        WeightRisk::Underweight => (
            FlagSeverity::Moderate,
            format!("BMI of {:.1} is below the healthy range.", profile.bmi),
        ),
        WeightRisk::Normal => return None,
    };
    Some(RiskFlag::new(
        RiskCategory::Weight,
        severity,
        description,
        "Discuss a body composition target with your healthcare provider.",
    ))
}

fn hormonal_flag(profile: &UserProfile) -> Option<RiskFlag> {
    if !profile.has_condition("pcos") {
        return None;
    }
    Some(RiskFlag::new(
        RiskCategory::Hormonal,
        FlagSeverity::High,
        "Reported PCOS affects insulin sensitivity and hormone balance.",
        "Request a hormone and insulin panel from your provider.",
    ))
}

fn thyroid_flag(profile: &UserProfile) -> Option<RiskFlag> {
    if !profile.has_any_condition(THYROID_KEYWORDS) {
        return None;
    }
    Some(RiskFlag::new(
        RiskCategory::Thyroid,
        FlagSeverity::High,
        "Reported thyroid condition influences metabolism and energy.",
        "Keep thyroid labs current and take medication consistently.",
    ))
}

fn diabetes_flag(profile: &UserProfile) -> Option<RiskFlag> {
    if !profile.has_any_condition(DIABETES_KEYWORDS) {
        return None;
    }
    let severity = if profile.has_condition("diabet") && !profile.has_condition("prediabet") {
        FlagSeverity::Critical
    } else {
        FlagSeverity::High
    };
    Some(RiskFlag::new(
        RiskCategory::Diabetes,
        severity,
        "Reported blood sugar condition requires carbohydrate management.",
        "Monitor blood glucose and review HbA1c with your provider.",
    ))
}

fn cardiovascular_flag(profile: &UserProfile) -> Option<RiskFlag> {
    if !profile.has_any_condition(CARDIO_KEYWORDS) {
        return None;
    }
    Some(RiskFlag::new(
        RiskCategory::Cardiovascular,
        FlagSeverity::High,
        "Reported cardiovascular risk factor.",
        "Track blood pressure weekly and limit sodium.",
    ))
}

fn digestive_flag(profile: &UserProfile) -> Option<RiskFlag> {
    let count = profile.digestive_issues.len();
    if count == 0 {
        return None;
    }
    let severity = if count >= 3 {
        FlagSeverity::High
    } else {
        FlagSeverity::Moderate
    };
    Some(RiskFlag::new(
        RiskCategory::Digestive,
        severity,
        format!("{} digestive symptom(s) reported.", count),
        "Keep a food and symptom journal for two weeks.",
    ))
}

fn energy_flag(profile: &UserProfile) -> Option<RiskFlag> {
    let score = profile.energy_score.value();
    let severity = match energy_severity(profile.energy_score) {
        Severity::Severe => FlagSeverity::High,
        Severity::Moderate => FlagSeverity::Moderate,
        Severity::Mild | Severity::Normal => return None,
    };
    Some(RiskFlag::new(
        RiskCategory::Energy,
        severity,
        format!("Energy score of {} points to persistent fatigue.", score),
        "Screen for iron, B12 and thyroid causes of fatigue.",
    ))
}

/// Finds the flag for a category, if raised.
pub fn flag_for(flags: &[RiskFlag], category: RiskCategory) -> Option<&RiskFlag> {
    flags.iter().find(|f| f.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::Gender;

    fn healthy() -> UserProfile {
        UserProfile::new(30, Gender::Female, 168.0, 60.0).with_scores(80, 20, 60, 80)
    }

    #[test]
    fn healthy_profile_raises_no_flags() {
        assert!(RiskFlagBuilder::build(&healthy()).is_empty());
    }

    #[test]
    fn sleep_severity_maps_to_flag_severity() {
        let flags = RiskFlagBuilder::build(&healthy().with_scores(25, 20, 60, 80));
        let sleep = flag_for(&flags, RiskCategory::Sleep).unwrap();
        assert_eq!(sleep.severity, FlagSeverity::Critical);

        let flags = RiskFlagBuilder::build(&healthy().with_scores(55, 20, 60, 80));
        assert_eq!(
            flag_for(&flags, RiskCategory::Sleep).unwrap().severity,
            FlagSeverity::Moderate
        );
    }

    #[test]
    fn stress_flag_only_above_30() {
        let flags = RiskFlagBuilder::build(&healthy().with_scores(80, 30, 60, 80));
        assert!(flag_for(&flags, RiskCategory::Stress).is_none());

        let flags = RiskFlagBuilder::build(&healthy().with_scores(80, 75, 60, 80));
        assert_eq!(
            flag_for(&flags, RiskCategory::Stress).unwrap().severity,
            FlagSeverity::High
        );
    }

    #[test]
    fn conditions_match_case_insensitively() {
        let profile = healthy().with_conditions(&["pcos", "HASHIMOTO'S", "Hypertension"]);
        let flags = RiskFlagBuilder::build(&profile);
        assert!(flag_for(&flags, RiskCategory::Hormonal).is_some());
        assert!(flag_for(&flags, RiskCategory::Thyroid).is_some());
        assert!(flag_for(&flags, RiskCategory::Cardiovascular).is_some());
    }

    #[test]
    fn diabetes_is_critical_prediabetes_is_high() {
        let flags = RiskFlagBuilder::build(&healthy().with_conditions(&["Type 2 Diabetes"]));
        assert_eq!(
            flag_for(&flags, RiskCategory::Diabetes).unwrap().severity,
            FlagSeverity::Critical
        );

        let flags = RiskFlagBuilder::build(&healthy().with_conditions(&["Prediabetes"]));
        assert_eq!(
            flag_for(&flags, RiskCategory::Diabetes).unwrap().severity,
            FlagSeverity::High
        );
    }

    #[test]
    fn obese_bmi_raises_high_weight_flag() {
        let profile = UserProfile::new(45, Gender::Male, 175.0, 100.0).with_scores(80, 20, 60, 80);
        let flags = RiskFlagBuilder::build(&profile);
        assert_eq!(
            flag_for(&flags, RiskCategory::Weight).unwrap().severity,
            FlagSeverity::High
        );
    }

    #[test]
    fn flags_follow_category_order() {
        let profile = healthy()
            .with_scores(20, 80, 60, 20)
            .with_conditions(&["Diabetes"])
            .with_digestive_issues(&["bloating"]);
        let categories: Vec<_> = RiskFlagBuilder::build(&profile)
            .into_iter()
            .map(|f| f.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                RiskCategory::Sleep,
                RiskCategory::Stress,
                RiskCategory::Diabetes,
                RiskCategory::Digestive,
                RiskCategory::Energy,
            ]
        );
    }
}
