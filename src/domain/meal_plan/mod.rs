//! Meal plan module - Deterministic day plans sized to the profile's TDEE.

mod foods;
mod generator;
mod types;

pub use foods::{allowed_for, candidates, safe_candidates, FoodTemplate, FOOD_CATALOG};
pub use generator::MealPlanGenerator;
pub use types::{day_label, scale_portion, DayPart, MealItem, MealPlanDay};
