//! Deterministic meal plan generator.
//!
//! Picks are seeded from the profile id so the same profile always gets the
//! same plan. Each slot is scaled so the day lands on the profile's TDEE.
//! Foods clashing with the dietary preference or a declared intolerance are
//! never candidates.

use sha2::{Digest, Sha256};
use tracing::debug;

use super::foods::{safe_candidates, FoodTemplate};
use super::types::{DayPart, MealPlanDay};
use crate::domain::profile::UserProfile;
use crate::domain::validation::restricted_food_groups;

pub struct MealPlanGenerator;

impl MealPlanGenerator {
    /// Builds `days` days labelled "Day 1".."Day n".
    pub fn generate(profile: &UserProfile, days: u8) -> Vec<MealPlanDay> {
        let restricted = restricted_food_groups(profile);
        let slots: Vec<(DayPart, Vec<&'static FoodTemplate>)> = DayPart::ALL
            .iter()
            .map(|&part| {
                let foods = safe_candidates(part, profile.dietary_preference, &restricted);
                (part, foods)
            })
            .filter(|(_, foods)| !foods.is_empty())
            .collect();

        let share_total: f64 = slots.iter().map(|(part, _)| part.calorie_share()).sum();
        let mut plan: Vec<MealPlanDay> = Vec::with_capacity(usize::from(days));
        let mut previous: Option<Vec<usize>> = None;

        for day in 1..=u32::from(days) {
            let mut picks: Vec<usize> = slots
                .iter()
                .map(|(part, foods)| seed(profile, day, *part) as usize % foods.len())
                .collect();

            if previous.as_ref() == Some(&picks) {
                if let Some(slot) = slots.iter().position(|(_, foods)| foods.len() > 1) {
                    picks[slot] = (picks[slot] + 1) % slots[slot].1.len();
                }
            }

            let items = slots
                .iter()
                .zip(&picks)
                .map(|((part, foods), &pick)| {
                    let target = f64::from(profile.tdee) * part.calorie_share() / share_total;
                    foods[pick].instantiate(target)
                })
                .collect();

            plan.push(MealPlanDay::new(day, items));
            previous = Some(picks);
        }

        debug!(
            profile_id = %profile.id,
            days = plan.len(),
            tdee = profile.tdee,
            "Generated meal plan"
        );
        plan
    }
}

fn seed(profile: &UserProfile, day: u32, part: DayPart) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(profile.id.as_bytes());
    hasher.update(day.to_le_bytes());
    hasher.update([part.index()]);
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
