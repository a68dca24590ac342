//! The scored user profile consumed by the rules engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metrics::{BodyMetrics, MacroTargets};
use crate::domain::foundation::{Score, ValidationError};

/// Gender as reported in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Dietary preference used to filter meal plan items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietaryPreference {
    #[default]
    Omnivore,
    Pescatarian,
    Vegetarian,
    Vegan,
}

/// Demographics, derived metrics, wellness scores and self-reported lists.
///
/// Built once per request by the quiz-analysis collaborator. Only the
/// bundle validator mutates it (gender-condition correction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable identity; also seeds meal plan variety.
    pub id: Uuid,
    pub age: u8,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub bmr: f64,
    /// Daily calorie target.
    pub tdee: u32,
    pub macros: MacroTargets,

    pub sleep_score: Score,
    pub stress_score: Score,
    pub activity_score: Score,
    pub energy_score: Score,

    #[serde(default)]
    pub dietary_preference: DietaryPreference,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub digestive_issues: Vec<String>,
    #[serde(default)]
    pub food_intolerances: Vec<String>,
    #[serde(default)]
    pub skin_concerns: Vec<String>,
    #[serde(default)]
    pub exercise_preference: Vec<String>,
    #[serde(default)]
    pub supplement_priority: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

impl UserProfile {
    /// Creates a profile with derived metrics and neutral scores (50).
    pub fn new(age: u8, gender: Gender, height_cm: f64, weight_kg: f64) -> Self {
        let neutral = Score::new(50);
        let metrics = BodyMetrics::derive(age, gender, height_cm, weight_kg, neutral);
        Self {
            id: Uuid::new_v4(),
            age,
            gender,
            height_cm,
            weight_kg,
            bmi: metrics.bmi,
            bmr: metrics.bmr,
            tdee: metrics.tdee,
            macros: metrics.macros,
            sleep_score: neutral,
            stress_score: neutral,
            activity_score: neutral,
            energy_score: neutral,
            dietary_preference: DietaryPreference::default(),
            medical_conditions: Vec::new(),
            digestive_issues: Vec::new(),
            food_intolerances: Vec::new(),
            skin_concerns: Vec::new(),
            exercise_preference: Vec::new(),
            supplement_priority: Vec::new(),
            goals: Vec::new(),
        }
    }

    /// Sets the four wellness scores and re-derives activity-driven metrics.
    pub fn with_scores(mut self, sleep: u8, stress: u8, activity: u8, energy: u8) -> Self {
        self.sleep_score = Score::new(sleep);
        self.stress_score = Score::new(stress);
        self.activity_score = Score::new(activity);
        self.energy_score = Score::new(energy);
        self.rederive();
        self
    }

    /// Overrides the calorie target (and macro targets with it).
    pub fn with_tdee(mut self, tdee: u32) -> Self {
        self.tdee = tdee;
        self.macros = MacroTargets::from_calories(tdee);
        self
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_diet(mut self, preference: DietaryPreference) -> Self {
        self.dietary_preference = preference;
        self
    }

    pub fn with_conditions(mut self, conditions: &[&str]) -> Self {
        self.medical_conditions = to_owned_list(conditions);
        self
    }

    pub fn with_digestive_issues(mut self, issues: &[&str]) -> Self {
        self.digestive_issues = to_owned_list(issues);
        self
    }

    pub fn with_intolerances(mut self, intolerances: &[&str]) -> Self {
        self.food_intolerances = to_owned_list(intolerances);
        self
    }

    pub fn with_skin_concerns(mut self, concerns: &[&str]) -> Self {
        self.skin_concerns = to_owned_list(concerns);
        self
    }

    pub fn with_supplement_priority(mut self, supplements: &[&str]) -> Self {
        self.supplement_priority = to_owned_list(supplements);
        self
    }

    pub fn with_goals(mut self, goals: &[&str]) -> Self {
        self.goals = to_owned_list(goals);
        self
    }

    /// Case-insensitive substring match against medical conditions.
    pub fn has_condition(&self, keyword: &str) -> bool {
        contains_keyword(&self.medical_conditions, keyword)
    }

    /// True if any of the keywords matches a medical condition.
    pub fn has_any_condition(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.has_condition(k))
    }

    /// Case-insensitive substring match against food intolerances.
    pub fn has_intolerance(&self, keyword: &str) -> bool {
        contains_keyword(&self.food_intolerances, keyword)
    }

    /// True if any goal matches the given regex.
    pub fn has_goal_matching(&self, pattern: &regex::Regex) -> bool {
        self.goals.iter().any(|g| pattern.is_match(g))
    }

    /// Checks the invariants the engine relies on.
    ///
    /// Scores are range-checked by construction; this covers the numeric
    /// demographics supplied by the caller.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.age == 0 || self.age > 120 {
            return Err(ValidationError::out_of_range("age", 1, 120, i32::from(self.age)));
        }
        if self.height_cm <= 0.0 {
            return Err(ValidationError::invalid_format("height_cm", "must be positive"));
        }
        if self.weight_kg <= 0.0 {
            return Err(ValidationError::invalid_format("weight_kg", "must be positive"));
        }
        if self.bmi <= 0.0 {
            return Err(ValidationError::invalid_format("bmi", "must be positive"));
        }
        if self.tdee == 0 {
            return Err(ValidationError::invalid_format("tdee", "must be positive"));
        }
        Ok(())
    }

    fn rederive(&mut self) {
        let metrics = BodyMetrics::derive(
            self.age,
            self.gender,
            self.height_cm,
            self.weight_kg,
            self.activity_score,
        );
        self.bmi = metrics.bmi;
        self.bmr = metrics.bmr;
        self.tdee = metrics.tdee;
        self.macros = metrics.macros;
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn contains_keyword(items: &[String], keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    items.iter().any(|item| item.to_lowercase().contains(&needle))
}
