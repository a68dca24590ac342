//! Derived body metrics (BMI, BMR, TDEE, macro targets).
//!
//! BMR uses the Mifflin-St Jeor equation; TDEE applies an activity factor
//! picked from the quiz activity score.

use serde::{Deserialize, Serialize};

use super::Gender;
use crate::domain::foundation::Score;

/// Daily macronutrient targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl MacroTargets {
    /// Splits a calorie target 30/40/30 across protein, carbs and fat.
    pub fn from_calories(calories: u32) -> Self {
        let kcal = f64::from(calories);
        Self {
            protein_g: round1(kcal * 0.30 / 4.0),
            carbs_g: round1(kcal * 0.40 / 4.0),
            fat_g: round1(kcal * 0.30 / 9.0),
        }
    }
}

/// Metrics derived from demographic input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: u32,
    pub macros: MacroTargets,
}

impl BodyMetrics {
    /// Derives BMI, BMR, TDEE and macro targets.
    ///
    /// Height must be positive; callers validate input before deriving.
    pub fn derive(
        age: u8,
        gender: Gender,
        height_cm: f64,
        weight_kg: f64,
        activity: Score,
    ) -> Self {
        let height_m = height_cm / 100.0;
        let bmi = round1(weight_kg / (height_m * height_m));

        let sex_offset = match gender {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
            Gender::Other => -78.0,
        };
        let bmr = (10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + sex_offset).round();

        let tdee = (bmr * activity_factor(activity)).round().max(0.0) as u32;

        Self {
            bmi,
            bmr,
            tdee,
            macros: MacroTargets::from_calories(tdee),
        }
    }
}

/// Activity multiplier for a quiz activity score.
pub fn activity_factor(activity: Score) -> f64 {
    match activity.value() {
        0..=29 => 1.2,
        30..=49 => 1.375,
        50..=69 => 1.55,
        70..=84 => 1.725,
        _ => 1.9,
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
