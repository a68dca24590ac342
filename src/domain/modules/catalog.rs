//! Fixed module catalog.
//!
//! Each row pairs a stable module id with its gating predicate. Catalog
//! order is the rendering order of the report.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::profile::{Tier, UserProfile};
use crate::domain::risk::{CARDIO_KEYWORDS, DIABETES_KEYWORDS, THYROID_KEYWORDS};

/// Renderable report section. Serialized ids are the contract with the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    HealthSnapshot,
    SleepProtocol,
    StressManagement,
    FatLossProgram,
    MuscleBuilding,
    BeginnerProgram,
    MovementProgram,
    InsulinManagement,
    ThyroidProtocol,
    Cardiovascular,
    GutHealth,
    SkinHealth,
    EnergyOptimization,
    MealPlan,
    SupplementGuide,
    LabTesting,
    CoachingPlan,
}

impl ModuleId {
    /// Every module in catalog order.
    pub const ALL: [ModuleId; 17] = [
        ModuleId::HealthSnapshot,
        ModuleId::SleepProtocol,
        ModuleId::StressManagement,
        ModuleId::FatLossProgram,
        ModuleId::MuscleBuilding,
        ModuleId::BeginnerProgram,
        ModuleId::MovementProgram,
        ModuleId::InsulinManagement,
        ModuleId::ThyroidProtocol,
        ModuleId::Cardiovascular,
        ModuleId::GutHealth,
        ModuleId::SkinHealth,
        ModuleId::EnergyOptimization,
        ModuleId::MealPlan,
        ModuleId::SupplementGuide,
        ModuleId::LabTesting,
        ModuleId::CoachingPlan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HealthSnapshot => "health_snapshot",
            Self::SleepProtocol => "sleep_protocol",
            Self::StressManagement => "stress_management",
            Self::FatLossProgram => "fat_loss_program",
            Self::MuscleBuilding => "muscle_building",
            Self::BeginnerProgram => "beginner_program",
            Self::MovementProgram => "movement_program",
            Self::InsulinManagement => "insulin_management",
            Self::ThyroidProtocol => "thyroid_protocol",
            Self::Cardiovascular => "cardiovascular",
            Self::GutHealth => "gut_health",
            Self::SkinHealth => "skin_health",
            Self::EnergyOptimization => "energy_optimization",
            Self::MealPlan => "meal_plan",
            Self::SupplementGuide => "supplement_guide",
            Self::LabTesting => "lab_testing",
            Self::CoachingPlan => "coaching_plan",
        }
    }

    /// Reader-facing section title.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::HealthSnapshot => "Your Health Snapshot",
            Self::SleepProtocol => "Sleep Protocol",
            Self::StressManagement => "Stress Management",
            Self::FatLossProgram => "Fat Loss Program",
            Self::MuscleBuilding => "Muscle Building",
            Self::BeginnerProgram => "Beginner Movement Program",
            Self::MovementProgram => "Movement Program",
            Self::InsulinManagement => "Insulin Management",
            Self::ThyroidProtocol => "Thyroid Support Protocol",
            Self::Cardiovascular => "Heart Health",
            Self::GutHealth => "Gut Health",
            Self::SkinHealth => "Skin Health",
            Self::EnergyOptimization => "Energy Optimization",
            Self::MealPlan => "Your Meal Plan",
            Self::SupplementGuide => "Supplement Guide",
            Self::LabTesting => "Recommended Lab Tests",
            Self::CoachingPlan => "Coaching Plan",
        }
    }

    /// Exact-match lookup of a wire id. No fuzzy matching.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == id)
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gating predicate over a profile and tier.
pub type ModulePredicate = fn(&UserProfile, Tier) -> bool;

/// Static catalog row.
#[derive(Clone, Copy)]
pub struct ModuleDefinition {
    pub id: ModuleId,
    pub predicate: ModulePredicate,
}

impl std::fmt::Debug for ModuleDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleDefinition").field("id", &self.id).finish()
    }
}

/// Activity score below which the beginner program replaces the movement program.
pub const BEGINNER_ACTIVITY_THRESHOLD: u8 = 30;

static FAT_LOSS_GOAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)weight loss|lose|fat").expect("valid regex"));
static MUSCLE_GOAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)muscle|gain|build").expect("valid regex"));

const PCOS_KEYWORDS: &[&str] = &["pcos"];

pub static MODULE_CATALOG: &[ModuleDefinition] = &[
    ModuleDefinition {
        id: ModuleId::HealthSnapshot,
        predicate: |_, _| true,
    },
    ModuleDefinition {
        id: ModuleId::SleepProtocol,
        predicate: |p, _| p.sleep_score.value() < 70,
    },
    ModuleDefinition {
        id: ModuleId::StressManagement,
        predicate: |p, _| p.stress_score.value() > 40,
    },
    ModuleDefinition {
        id: ModuleId::FatLossProgram,
        predicate: |p, _| p.bmi > 25.0 || p.has_goal_matching(&FAT_LOSS_GOAL),
    },
    ModuleDefinition {
        id: ModuleId::MuscleBuilding,
        predicate: |p, _| is_active(p) && p.has_goal_matching(&MUSCLE_GOAL),
    },
    ModuleDefinition {
        id: ModuleId::BeginnerProgram,
        predicate: |p, _| !is_active(p),
    },
    ModuleDefinition {
        id: ModuleId::MovementProgram,
        predicate: |p, _| is_active(p),
    },
    ModuleDefinition {
        id: ModuleId::InsulinManagement,
        predicate: |p, t| {
            t.is_premium()
                && (p.has_any_condition(PCOS_KEYWORDS) || p.has_any_condition(DIABETES_KEYWORDS))
        },
    },
    ModuleDefinition {
        id: ModuleId::ThyroidProtocol,
        predicate: |p, t| t.is_premium() && p.has_any_condition(THYROID_KEYWORDS),
    },
    ModuleDefinition {
        id: ModuleId::Cardiovascular,
        predicate: |p, t| t.is_premium() && p.has_any_condition(CARDIO_KEYWORDS),
    },
    ModuleDefinition {
        id: ModuleId::GutHealth,
        predicate: |p, t| {
            t.is_premium() && (!p.digestive_issues.is_empty() || !p.food_intolerances.is_empty())
        },
    },
    ModuleDefinition {
        id: ModuleId::SkinHealth,
        predicate: |p, t| t.is_premium() && !p.skin_concerns.is_empty(),
    },
    ModuleDefinition {
        id: ModuleId::EnergyOptimization,
        predicate: |p, _| p.energy_score.value() < 50,
    },
    ModuleDefinition {
        id: ModuleId::MealPlan,
        predicate: |_, t| t.is_paid(),
    },
    ModuleDefinition {
        id: ModuleId::SupplementGuide,
        predicate: |_, t| t.is_paid(),
    },
    ModuleDefinition {
        id: ModuleId::LabTesting,
        predicate: |_, _| true,
    },
    ModuleDefinition {
        id: ModuleId::CoachingPlan,
        predicate: |_, t| t == Tier::Coaching,
    },
];

fn is_active(profile: &UserProfile) -> bool {
    profile.activity_score.value() >= BEGINNER_ACTIVITY_THRESHOLD
}
