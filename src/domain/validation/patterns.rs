//! Keyword patterns used by the gender and intolerance steps.
//!
//! These are best-effort presentation filters over free text. Substring and
//! phrasing variations will produce false positives and misses.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::profile::{Gender, UserProfile};

/// Neutral term substituted for scrubbed sex-specific references.
pub const NEUTRAL_TERM: &str = "hormonal";

static FEMALE_SPECIFIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(pcos|polycystic ovary syndrome|polycystic ovarian syndrome",
        r"|ovarian|ovary|ovaries|menstrual|menstruation|menopausal|menopause",
        r"|endometriosis|pregnancy|pregnant)\b",
    ))
    .expect("valid regex")
});

static MALE_SPECIFIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(prostate|prostatic|erectile|testicular)\b").expect("valid regex")
});

/// Pattern for references that do not apply to this gender, if any.
pub fn opposite_gender_pattern(gender: Gender) -> Option<&'static Regex> {
    match gender {
        Gender::Male => Some(&*FEMALE_SPECIFIC),
        Gender::Female => Some(&*MALE_SPECIFIC),
        Gender::Other => None,
    }
}

/// Food group a declared intolerance maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodGroup {
    Dairy,
    Gluten,
    Seafood,
    Nuts,
    Eggs,
}

impl FoodGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodGroup::Dairy => "dairy",
            FoodGroup::Gluten => "gluten",
            FoodGroup::Seafood => "seafood",
            FoodGroup::Nuts => "nuts",
            FoodGroup::Eggs => "eggs",
        }
    }

    fn triggers(&self) -> &'static [&'static str] {
        match self {
            FoodGroup::Dairy => &["lactose", "dairy", "milk"],
            FoodGroup::Gluten => &["gluten", "wheat", "celiac", "coeliac"],
            FoodGroup::Seafood => &["seafood", "shellfish", "fish"],
            FoodGroup::Nuts => &["nut", "peanut"],
            FoodGroup::Eggs => &["egg"],
        }
    }

    /// Pattern over meal item names.
    pub fn food_pattern(&self) -> &'static Regex {
        match self {
            FoodGroup::Dairy => &*DAIRY_FOODS,
            FoodGroup::Gluten => &*GLUTEN_FOODS,
            FoodGroup::Seafood => &*SEAFOOD_FOODS,
            FoodGroup::Nuts => &*NUT_FOODS,
            FoodGroup::Eggs => &*EGG_FOODS,
        }
    }
}

const FOOD_GROUPS: [FoodGroup; 5] = [
    FoodGroup::Dairy,
    FoodGroup::Gluten,
    FoodGroup::Seafood,
    FoodGroup::Nuts,
    FoodGroup::Eggs,
];

static DAIRY_FOODS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(dairy|milk|cheese|yogurt|yoghurt|cream|whey|halloumi|feta|kefir|ghee)\b")
        .expect("valid regex")
});
static GLUTEN_FOODS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(wheat|bread|toast|pasta|farro|barley|rye",
        r"|wraps?|couscous|seitan|noodles?)\b",
    ))
    .expect("valid regex")
});
static SEAFOOD_FOODS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(fish|salmon|tuna|cod|shrimp|prawns?|crab|lobster|shellfish",
        r"|sardines?|mackerel|anchov(?:y|ies))\b",
    ))
    .expect("valid regex")
});
static NUT_FOODS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(nuts?|almonds?|peanuts?|cashews?",
        r"|walnuts?|pecans?|pistachios?|hazelnuts?)\b",
    ))
    .expect("valid regex")
});
static EGG_FOODS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(eggs?|omelette|frittata|nicoise)\b").expect("valid regex"));

/// Food groups implied by the profile's intolerances (and celiac disease).
pub fn restricted_food_groups(profile: &UserProfile) -> Vec<FoodGroup> {
    FOOD_GROUPS
        .iter()
        .copied()
        .filter(|group| {
            group
                .triggers()
                .iter()
                .any(|kw| profile.has_intolerance(kw))
                || (*group == FoodGroup::Gluten
                    && profile.has_any_condition(&["celiac", "coeliac"]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gender: Gender) -> UserProfile {
        UserProfile::new(40, gender, 175.0, 75.0)
    }

    #[test]
    fn male_pattern_matches_female_terms() {
        let re = opposite_gender_pattern(Gender::Male).unwrap();
        assert!(re.is_match("PCOS"));
        assert!(re.is_match("irregular menstrual cycle"));
        assert!(!re.is_match("Diabetes"));
    }

    #[test]
    fn female_pattern_matches_male_terms() {
        let re = opposite_gender_pattern(Gender::Female).unwrap();
        assert!(re.is_match("enlarged prostate"));
        assert!(!re.is_match("PCOS"));
    }

    #[test]
    fn other_gender_has_no_pattern() {
        assert!(opposite_gender_pattern(Gender::Other).is_none());
    }

    #[test]
    fn intolerances_map_to_food_groups() {
        let p = profile(Gender::Female).with_intolerances(&["Lactose", "Tree nuts"]);
        assert_eq!(restricted_food_groups(&p), vec![FoodGroup::Dairy, FoodGroup::Nuts]);
    }

    #[test]
    fn celiac_condition_restricts_gluten() {
        let p = profile(Gender::Male).with_conditions(&["Celiac disease"]);
        assert_eq!(restricted_food_groups(&p), vec![FoodGroup::Gluten]);
    }

    #[test]
    fn food_patterns_match_item_names() {
        assert!(FoodGroup::Dairy.food_pattern().is_match("Greek yogurt parfait with berries"));
        assert!(FoodGroup::Gluten
            .food_pattern()
            .is_match("Turkey and avocado whole-wheat sandwich"));
        assert!(FoodGroup::Nuts.food_pattern().is_match("Banana peanut butter smoothie bowl"));
        assert!(!FoodGroup::Nuts.food_pattern().is_match("Coconut yogurt"));
        assert!(FoodGroup::Seafood.food_pattern().is_match("Shrimp and vegetable noodle bowl"));
    }
}
