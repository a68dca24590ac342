//! Food catalog and dietary keyword filters.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{DayPart, MealItem};
use crate::domain::profile::{round1, DietaryPreference};
use crate::domain::validation::FoodGroup;

/// Catalog entry at its reference portion.
#[derive(Debug, Clone, Copy)]
pub struct FoodTemplate {
    pub day_part: DayPart,
    pub name: &'static str,
    pub portion: &'static str,
    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl FoodTemplate {
    /// Builds a meal item scaled to `target_calories`.
    pub fn instantiate(&self, target_calories: f64) -> MealItem {
        let mut item = MealItem {
            day_part: self.day_part,
            name: self.name.to_string(),
            portion: self.portion.to_string(),
            calories: self.calories,
            protein_g: round1(self.protein_g),
            carbs_g: round1(self.carbs_g),
            fat_g: round1(self.fat_g),
        };
        if self.calories > 0 {
            item.scale(target_calories / f64::from(self.calories));
        }
        item
    }
}

const fn food(
    day_part: DayPart,
    name: &'static str,
    portion: &'static str,
    calories: u32,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
) -> FoodTemplate {
    FoodTemplate {
        day_part,
        name,
        portion,
        calories,
        protein_g,
        carbs_g,
        fat_g,
    }
}

use super::types::DayPart::{Breakfast, Dinner, Lunch, Snack};

pub static FOOD_CATALOG: &[FoodTemplate] = &[
    food(Breakfast, "Greek yogurt parfait with berries", "250g", 320, 20.0, 40.0, 8.0),
    food(Breakfast, "Veggie egg omelette", "200g", 300, 22.0, 6.0, 20.0),
    food(Breakfast, "Overnight oats with chia", "250g", 350, 12.0, 52.0, 10.0),
    food(Breakfast, "Tofu scramble with spinach", "220g", 280, 20.0, 10.0, 16.0),
    food(Breakfast, "Smoked salmon on rye toast", "150g", 330, 22.0, 28.0, 13.0),
    food(Breakfast, "Banana peanut butter smoothie bowl", "300g", 380, 14.0, 55.0, 12.0),
    food(
        Breakfast,
        "Turkey sausage and sweet potato hash",
        "250g",
        360,
        24.0,
        30.0,
        15.0,
    ),
    food(Lunch, "Grilled chicken quinoa bowl", "350g", 520, 42.0, 50.0, 15.0),
    food(Lunch, "Lentil and roasted vegetable salad", "350g", 450, 22.0, 60.0, 12.0),
    food(Lunch, "Tuna nicoise salad", "320g", 430, 35.0, 20.0, 22.0),
    food(Lunch, "Chickpea falafel wrap", "300g", 540, 18.0, 70.0, 20.0),
    food(
        Lunch,
        "Turkey and avocado whole-wheat sandwich",
        "280g",
        480,
        32.0,
        45.0,
        18.0,
    ),
    food(Lunch, "Black bean burrito bowl", "380g", 510, 20.0, 78.0, 12.0),
    food(Lunch, "Halloumi cheese and farro salad", "320g", 500, 22.0, 48.0, 24.0),
    food(Dinner, "Baked salmon with roasted vegetables", "380g", 520, 38.0, 25.0, 28.0),
    food(
        Dinner,
        "Beef and broccoli stir-fry with brown rice",
        "400g",
        580,
        40.0,
        55.0,
        20.0,
    ),
    food(
        Dinner,
        "Tofu and vegetable curry with basmati rice",
        "420g",
        540,
        22.0,
        70.0,
        18.0,
    ),
    food(Dinner, "Chicken fajitas with peppers", "380g", 520, 40.0, 40.0, 20.0),
    food(
        Dinner,
        "Lentil bolognese with whole-wheat pasta",
        "400g",
        560,
        28.0,
        80.0,
        12.0,
    ),
    food(Dinner, "Shrimp and vegetable noodle bowl", "380g", 480, 32.0, 55.0, 12.0),
    food(
        Dinner,
        "Stuffed peppers with black beans and rice",
        "400g",
        470,
        18.0,
        75.0,
        10.0,
    ),
    food(Snack, "Apple slices with almond butter", "150g", 200, 5.0, 22.0, 11.0),
    food(Snack, "Hummus with carrot sticks", "150g", 180, 6.0, 18.0, 9.0),
    food(Snack, "Cottage cheese with pineapple", "180g", 170, 18.0, 16.0, 3.0),
    food(Snack, "Hard-boiled eggs", "100g", 150, 12.0, 1.0, 10.0),
    food(Snack, "Roasted chickpeas", "60g", 190, 9.0, 27.0, 5.0),
    food(Snack, "Mixed nuts", "35g", 210, 6.0, 7.0, 18.0),
    food(Snack, "Edamame", "150g", 180, 17.0, 13.0, 8.0),
];

static MEAT_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(chicken|beef|turkey|pork|bacon|ham|lamb|steak|sausage)\b")
        .expect("valid regex")
});
static FISH_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(fish|salmon|tuna|cod|shrimp|prawns?|sardines?|mackerel|anchov(?:y|ies))\b")
        .expect("valid regex")
});
static EGG_TERMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(eggs?|omelette|frittata|nicoise)\b").expect("valid regex"));
static ANIMAL_PRODUCT_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(yogurt|cheese|halloumi|feta|whey|milk|kefir|honey)\b").expect("valid regex")
});

/// True if the food name is compatible with the dietary preference.
///
/// Keyword based, so a name that hides an ingredient will slip through.
pub fn allowed_for(preference: DietaryPreference, name: &str) -> bool {
    let meat = || MEAT_TERMS.is_match(name);
    let fish = || FISH_TERMS.is_match(name);
    let egg = || EGG_TERMS.is_match(name);
    let animal = || ANIMAL_PRODUCT_TERMS.is_match(name);

    match preference {
        DietaryPreference::Omnivore => true,
        DietaryPreference::Pescatarian => !meat(),
        DietaryPreference::Vegetarian => !meat() && !fish(),
        DietaryPreference::Vegan => !meat() && !fish() && !egg() && !animal(),
    }
}

/// Catalog entries for a slot that satisfy the preference, in catalog order.
pub fn candidates(part: DayPart, preference: DietaryPreference) -> Vec<&'static FoodTemplate> {
    FOOD_CATALOG
        .iter()
        .filter(|f| f.day_part == part && allowed_for(preference, f.name))
        .collect()
}

/// Like [`candidates`], minus anything in the restricted food groups.
pub fn safe_candidates(
    part: DayPart,
    preference: DietaryPreference,
    restricted: &[FoodGroup],
) -> Vec<&'static FoodTemplate> {
    candidates(part, preference)
        .into_iter()
        .filter(|f| !restricted.iter().any(|g| g.food_pattern().is_match(f.name)))
        .collect()
}
