//! Meal plan value types.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::domain::profile::round1;

/// Time-of-day slot a meal item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl DayPart {
    pub const ALL: [DayPart; 4] = [
        DayPart::Breakfast,
        DayPart::Lunch,
        DayPart::Dinner,
        DayPart::Snack,
    ];

    /// Share of the daily calorie target served in this slot.
    pub fn calorie_share(&self) -> f64 {
        match self {
            DayPart::Breakfast => 0.25,
            DayPart::Lunch => 0.35,
            DayPart::Dinner => 0.30,
            DayPart::Snack => 0.10,
        }
    }

    pub(crate) fn index(&self) -> u8 {
        match self {
            DayPart::Breakfast => 0,
            DayPart::Lunch => 1,
            DayPart::Dinner => 2,
            DayPart::Snack => 3,
        }
    }
}

/// One food entry in a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub day_part: DayPart,
    pub name: String,
    /// Free-text portion; gram amounts (e.g. "250g") are rescaled with the item.
    pub portion: String,
    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

static GRAM_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s?g\b").expect("valid regex"));

/// Multiplies every gram amount inside a portion string.
pub fn scale_portion(portion: &str, ratio: f64) -> String {
    GRAM_AMOUNT
        .replace_all(portion, |caps: &Captures| {
            let grams: f64 = caps[1].parse().unwrap_or(0.0);
            format!("{}g", (grams * ratio).round() as u64)
        })
        .into_owned()
}

impl MealItem {
    /// Rescales calories, macros and gram portions by `ratio`.
    pub fn scale(&mut self, ratio: f64) {
        self.calories = (f64::from(self.calories) * ratio).round().max(0.0) as u32;
        self.protein_g = round1(self.protein_g * ratio);
        self.carbs_g = round1(self.carbs_g * ratio);
        self.fat_g = round1(self.fat_g * ratio);
        self.portion = scale_portion(&self.portion, ratio);
    }
}

/// One day of the meal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanDay {
    /// 1-based day number.
    pub day: u32,
    /// Always "Day {n}", never a weekday name.
    pub label: String,
    pub items: Vec<MealItem>,
    pub total_calories: u32,
    pub total_protein_g: f64,
    pub total_carbs_g: f64,
    pub total_fat_g: f64,
}

impl MealPlanDay {
    pub fn new(day: u32, items: Vec<MealItem>) -> Self {
        let mut plan_day = Self {
            day,
            label: day_label(day),
            items,
            total_calories: 0,
            total_protein_g: 0.0,
            total_carbs_g: 0.0,
            total_fat_g: 0.0,
        };
        plan_day.recompute_totals();
        plan_day
    }

    /// Resets the day aggregates to the sum of its items.
    pub fn recompute_totals(&mut self) {
        self.total_calories = self.items.iter().map(|i| i.calories).sum();
        self.total_protein_g = round1(self.items.iter().map(|i| i.protein_g).sum());
        self.total_carbs_g = round1(self.items.iter().map(|i| i.carbs_g).sum());
        self.total_fat_g = round1(self.items.iter().map(|i| i.fat_g).sum());
    }

    /// Item names in order, for day-to-day variety checks.
    pub fn item_names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }
}

/// Ordinal day label.
pub fn day_label(day: u32) -> String {
    format!("Day {}", day)
}
