//! Bundle Validator - deterministic repair pass over an assembled bundle.
//!
//! Each step re-checks its own trigger before touching anything, so a second
//! run over a validated bundle changes nothing and records no notes.

use std::collections::HashSet;

use regex::Regex;
use tracing::{debug, info, warn};

use super::outcome::{FatalIssue, ValidationOutcome};
use super::patterns::{opposite_gender_pattern, restricted_food_groups, FoodGroup, NEUTRAL_TERM};
use super::text::scrub_text;
use crate::domain::bundle::{BundleState, ContentBundle};
use crate::domain::foundation::StateMachine;
use crate::domain::labs::{prune_and_sort, LabTest, LabTestAccumulator, LabTestPrioritizer};
use crate::domain::meal_plan::safe_candidates;
use crate::domain::profile::{Gender, UserProfile};
use crate::domain::risk::RiskFlag;
use crate::domain::supplements::SupplementRecommender;

/// Tunables for the validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BundleValidatorConfig {
    /// Allowed relative drift of a day's calories from TDEE before rescaling.
    pub macro_tolerance: f64,
}

impl Default for BundleValidatorConfig {
    fn default() -> Self {
        Self { macro_tolerance: 0.02 }
    }
}

/// Runs the six repair steps in order.
#[derive(Debug, Clone, Default)]
pub struct BundleValidator {
    config: BundleValidatorConfig,
}

/// Notes recorded by the current run, deduplicated against the bundle.
struct RunLog<'a> {
    bundle_notes: &'a mut Vec<String>,
    new_notes: Vec<String>,
}

impl RunLog<'_> {
    fn note(&mut self, note: String) {
        if !self.bundle_notes.contains(&note) {
            self.bundle_notes.push(note.clone());
            self.new_notes.push(note);
        }
    }
}

impl BundleValidator {
    pub fn new(config: BundleValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BundleValidatorConfig {
        &self.config
    }

    /// Repairs the bundle in place and moves it to `Validated`.
    ///
    /// Re-running on a validated bundle performs the same checks and is a no-op.
    pub fn validate(&self, bundle: &mut ContentBundle) -> ValidationOutcome {
        let mut adjustments = std::mem::take(&mut bundle.adjustments);
        let mut log = RunLog {
            bundle_notes: &mut adjustments,
            new_notes: Vec::new(),
        };
        let mut fatal_errors = Vec::new();

        self.correct_gender_content(bundle, &mut log);
        self.filter_intolerances(bundle, &mut log);
        self.rebalance_macros(bundle, &mut log);
        self.clean_text(bundle, &mut log, &mut fatal_errors);
        self.prune_labs(bundle, &mut log);
        self.dedup_supplements(bundle, &mut log);

        let new_notes = log.new_notes;
        bundle.adjustments = adjustments;

        if bundle.state == BundleState::Assembled {
            if let Ok(next) = bundle.state.transition_to(BundleState::Validated) {
                bundle.state = next;
            }
        }

        for issue in &fatal_errors {
            warn!(profile_id = %bundle.profile.id, issue = %issue, "Fatal bundle issue");
        }
        info!(
            profile_id = %bundle.profile.id,
            adjustments = new_notes.len(),
            fatal_errors = fatal_errors.len(),
            "Bundle validated"
        );

        ValidationOutcome {
            fatal_errors,
            adjustments: new_notes,
        }
    }

    /// Step 1: strip conditions, flags and content that belong to the other sex.
    ///
    /// Labs and supplements that only the removed conditions produced are
    /// dropped, or swapped for what the corrected profile yields. Narrative
    /// text is reworded with the neutral term.
    fn correct_gender_content(&self, bundle: &mut ContentBundle, log: &mut RunLog<'_>) {
        let Some(pattern) = opposite_gender_pattern(bundle.profile.gender) else {
            return;
        };

        let original_profile = bundle.profile.clone();
        let original_flags = bundle.risk_flags.clone();

        let mut removed_conditions = Vec::new();
        bundle.profile.medical_conditions.retain(|c| {
            let keep = !pattern.is_match(c);
            if !keep {
                removed_conditions.push(c.clone());
            }
            keep
        });

        let flags_before = bundle.risk_flags.len();
        bundle
            .risk_flags
            .retain(|f| !pattern.is_match(&f.description) && !pattern.is_match(&f.action_required));
        let removed_flags = flags_before - bundle.risk_flags.len();

        let stale = if removed_conditions.is_empty() && removed_flags == 0 {
            None
        } else {
            Some((&original_profile, original_flags.as_slice()))
        };
        let lab_changes = reconcile_labs(bundle, pattern, stale);
        let dropped_supplements = stale
            .map(|(profile, flags)| drop_stale_supplements(bundle, profile, flags))
            .unwrap_or(0);

        let mut scrubbed_fields = 0usize;
        let mut scrub = |text: &mut String| {
            if pattern.is_match(text) {
                *text = pattern.replace_all(text, NEUTRAL_TERM).into_owned();
                scrubbed_fields += 1;
            }
        };
        for section in &mut bundle.narratives {
            scrub(&mut section.title);
            scrub(&mut section.body);
        }
        for hint in &mut bundle.narrative_hints {
            hint.focus_areas.iter_mut().for_each(&mut scrub);
            hint.avoid_topics.iter_mut().for_each(&mut scrub);
        }

        if removed_conditions.is_empty()
            && removed_flags == 0
            && lab_changes == 0
            && dropped_supplements == 0
            && scrubbed_fields == 0
        {
            return;
        }

        let other = match bundle.profile.gender {
            Gender::Male => "female",
            _ => "male",
        };
        debug!(
            removed_conditions = removed_conditions.len(),
            removed_flags,
            lab_changes,
            dropped_supplements,
            scrubbed_fields,
            "Corrected gender-specific content"
        );
        let note = if removed_conditions.is_empty() {
            format!(
                "Replaced {}-specific references with neutral wording for a {} profile",
                other, bundle.profile.gender
            )
        } else {
            format!(
                "Removed {}-specific conditions ({}) that do not apply to a {} profile",
                other,
                removed_conditions.join(", "),
                bundle.profile.gender
            )
        };
        log.note(note);
    }

    /// Step 2: swap meal items that conflict with declared intolerances.
    ///
    /// A conflicting item is replaced by a safe catalog food for the same
    /// slot at the same calories; it is dropped only when no such food exists.
    fn filter_intolerances(&self, bundle: &mut ContentBundle, log: &mut RunLog<'_>) {
        let groups = restricted_food_groups(&bundle.profile);
        if groups.is_empty() || bundle.meal_plan.is_empty() {
            return;
        }
        let preference = bundle.profile.dietary_preference;

        let mut replaced = 0usize;
        let mut removed = 0usize;
        let mut hit_groups: Vec<FoodGroup> = Vec::new();
        for day in &mut bundle.meal_plan {
            let mut touched = false;
            let mut i = 0;
            while i < day.items.len() {
                let Some(group) = groups
                    .iter()
                    .copied()
                    .find(|g| g.food_pattern().is_match(&day.items[i].name))
                else {
                    i += 1;
                    continue;
                };
                if !hit_groups.contains(&group) {
                    hit_groups.push(group);
                }
                touched = true;

                let options: Vec<_> = safe_candidates(day.items[i].day_part, preference, &groups)
                    .into_iter()
                    .filter(|f| day.items.iter().all(|item| item.name != f.name))
                    .collect();
                if options.is_empty() {
                    day.items.remove(i);
                    removed += 1;
                    continue;
                }
                let pick = options[(day.day as usize + i) % options.len()];
                let target = f64::from(day.items[i].calories);
                day.items[i] = pick.instantiate(target);
                replaced += 1;
                i += 1;
            }
            if touched {
                day.recompute_totals();
            }
        }

        if replaced + removed == 0 {
            return;
        }
        let names = hit_groups
            .iter()
            .map(FoodGroup::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        debug!(replaced, removed, groups = %names, "Filtered meal items by intolerance");
        let note = match (replaced, removed) {
            (n, 0) => format!(
                "Replaced {} meal item(s) conflicting with food intolerances ({})",
                n, names
            ),
            (0, n) => format!(
                "Removed {} meal item(s) conflicting with food intolerances ({})",
                n, names
            ),
            (r, d) => format!(
                "Replaced {} and removed {} meal item(s) conflicting with food intolerances ({})",
                r, d, names
            ),
        };
        log.note(note);
    }

    /// Step 3: rescale days whose stored total drifts from TDEE.
    fn rebalance_macros(&self, bundle: &mut ContentBundle, log: &mut RunLog<'_>) {
        let tdee = bundle.profile.tdee;
        if tdee == 0 {
            return;
        }
        let target = f64::from(tdee);

        let mut rebalanced = 0usize;
        for day in &mut bundle.meal_plan {
            if day.items.is_empty() || day.total_calories == 0 {
                continue;
            }
            let current = f64::from(day.total_calories);
            if (current - target).abs() / target <= self.config.macro_tolerance {
                continue;
            }
            let ratio = target / current;
            for item in &mut day.items {
                item.scale(ratio);
            }
            day.recompute_totals();
            day.total_calories = tdee;
            rebalanced += 1;
        }

        if rebalanced > 0 {
            debug!(rebalanced, tdee, "Rebalanced meal plan days");
            log.note(format!(
                "Rebalanced {} meal plan day(s) to the {} kcal daily target",
                rebalanced, tdee
            ));
        }
    }

    /// Step 4: strip template tokens, leaked ids, placeholders and mojibake.
    fn clean_text(
        &self,
        bundle: &mut ContentBundle,
        log: &mut RunLog<'_>,
        fatal_errors: &mut Vec<FatalIssue>,
    ) {
        let mut artifacts = false;
        let mut check = |location: String, text: &mut String, narrative: bool| {
            let report = scrub_text(text, narrative);
            artifacts |= report.artifacts_removed;
            for token in report.template_tokens {
                fatal_errors.push(FatalIssue::UnresolvedTemplateToken {
                    location: location.clone(),
                    token,
                });
            }
            for module_id in report.leaked_module_ids {
                fatal_errors.push(FatalIssue::LeakedModuleId {
                    location: location.clone(),
                    module_id,
                });
            }
        };

        for (i, section) in bundle.narratives.iter_mut().enumerate() {
            check(format!("narratives[{}].title", i), &mut section.title, true);
            check(format!("narratives[{}].body", i), &mut section.body, true);
        }
        for (i, test) in bundle.lab_test_priority.iter_mut().enumerate() {
            check(format!("lab_test_priority[{}].reason", i), &mut test.reason, false);
        }
        for (i, flag) in bundle.risk_flags.iter_mut().enumerate() {
            let description = format!("risk_flags[{}].description", i);
            check(description, &mut flag.description, false);
            let action = format!("risk_flags[{}].action_required", i);
            check(action, &mut flag.action_required, false);
        }

        if artifacts {
            log.note(
                "Cleaned placeholder markers and encoding artifacts from report text".to_string(),
            );
        }
    }

    /// Step 5: drop unrenderable or duplicate labs, sort by priority.
    fn prune_labs(&self, bundle: &mut ContentBundle, log: &mut RunLog<'_>) {
        let mut accumulator = LabTestAccumulator::new();
        for test in bundle.lab_test_priority.iter().cloned() {
            accumulator.add_test(test);
        }
        let cleaned = prune_and_sort(accumulator.finish());

        if cleaned == bundle.lab_test_priority {
            return;
        }
        let removed = bundle.lab_test_priority.len() - cleaned.len();
        bundle.lab_test_priority = cleaned;

        debug!(removed, "Pruned lab tests");
        let note = if removed > 0 {
            format!(
                "Removed {} invalid or duplicate lab test(s) and sorted by priority",
                removed
            )
        } else {
            "Sorted lab tests by priority".to_string()
        };
        log.note(note);
    }

    /// Step 6: case and whitespace-insensitive dedup, first seen wins.
    fn dedup_supplements(&self, bundle: &mut ContentBundle, log: &mut RunLog<'_>) {
        let mut seen = HashSet::new();
        let before = bundle.supplements.len();
        bundle.supplements.retain(|s| {
            let key = supplement_key(s);
            !key.is_empty() && seen.insert(key)
        });
        let removed = before - bundle.supplements.len();

        if removed > 0 {
            debug!(removed, "Deduplicated supplements");
            log.note(format!("Removed {} duplicate supplement(s)", removed));
        }
    }
}

/// Rebuilds lab entries tied to opposite-sex content.
///
/// An entry is stale when its reason matches `pattern`, or when it came from
/// the pre-correction inputs (`stale`) and the corrected inputs no longer
/// produce it. Stale entries are replaced by the corrected entry of the same
/// name when there is one. Returns how many entries were touched.
fn reconcile_labs(
    bundle: &mut ContentBundle,
    pattern: &Regex,
    stale: Option<(&UserProfile, &[RiskFlag])>,
) -> usize {
    let previous = stale
        .map(|(profile, flags)| LabTestPrioritizer::prioritize(profile, flags))
        .unwrap_or_default();
    let needs_current = stale.is_some()
        || bundle
            .lab_test_priority
            .iter()
            .any(|t| pattern.is_match(&t.reason));
    if !needs_current {
        return 0;
    }
    let current = LabTestPrioritizer::prioritize(&bundle.profile, &bundle.risk_flags);

    let mut changed = 0usize;
    let mut labs: Vec<LabTest> = Vec::with_capacity(bundle.lab_test_priority.len());
    for test in std::mem::take(&mut bundle.lab_test_priority) {
        let from_removed = previous.contains(&test) && !current.contains(&test);
        if !from_removed && !pattern.is_match(&test.reason) {
            labs.push(test);
            continue;
        }
        changed += 1;
        let replacement = current
            .iter()
            .find(|c| c.name == test.name && !pattern.is_match(&c.reason));
        if let Some(replacement) = replacement {
            labs.push(replacement.clone());
        }
    }
    if changed > 0 {
        labs.sort_by(|a, b| b.priority.cmp(&a.priority));
    }
    bundle.lab_test_priority = labs;
    changed
}

/// Drops rule-derived supplements that only the pre-correction inputs produced.
fn drop_stale_supplements(
    bundle: &mut ContentBundle,
    profile: &UserProfile,
    flags: &[RiskFlag],
) -> usize {
    let modules = &bundle.active_modules;
    let current: HashSet<String> =
        SupplementRecommender::recommend(&bundle.profile, &bundle.risk_flags, modules)
            .iter()
            .map(|s| supplement_key(s))
            .collect();
    let stale: HashSet<String> = SupplementRecommender::recommend(profile, flags, modules)
        .iter()
        .map(|s| supplement_key(s))
        .filter(|key| !current.contains(key))
        .collect();
    if stale.is_empty() {
        return 0;
    }

    let before = bundle.supplements.len();
    bundle
        .supplements
        .retain(|s| !stale.contains(&supplement_key(s)));
    before - bundle.supplements.len()
}

/// Case and whitespace-insensitive identity of a supplement name.
fn supplement_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
