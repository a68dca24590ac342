//! Lab Test Prioritizer - weighted, deduplicated lab recommendations.
//!
//! Rules are a data table. A rule that fires contributes, for each of its
//! tests, `base_weight + severity weight` where the severity weight comes
//! from the rule's risk flag (critical 100, high 80, moderate 50) or the
//! normal weight (20) when no flag backs it.

use tracing::debug;

use super::lab_test::{LabTest, LabTestAccumulator};
use crate::domain::profile::{Gender, UserProfile};
use crate::domain::risk::{
    flag_for, RiskCategory, RiskFlag, CARDIO_KEYWORDS, DIABETES_KEYWORDS, NORMAL_LAB_WEIGHT,
    THYROID_KEYWORDS,
};

/// Static description of one test a rule recommends.
#[derive(Debug, Clone, Copy)]
pub struct LabTestSpec {
    pub name: &'static str,
    pub base_weight: u32,
    pub reason: &'static str,
    pub estimated_cost: &'static str,
    pub frequency: &'static str,
}

/// Returns the severity weight when the rule fires.
pub type LabTrigger = fn(&UserProfile, &[RiskFlag]) -> Option<u32>;

/// One (trigger, payload) row of the lab rule table.
#[derive(Clone, Copy)]
pub struct LabRule {
    pub id: &'static str,
    pub trigger: LabTrigger,
    pub tests: &'static [LabTestSpec],
}

const fn lab(
    name: &'static str,
    base_weight: u32,
    reason: &'static str,
    estimated_cost: &'static str,
    frequency: &'static str,
) -> LabTestSpec {
    LabTestSpec {
        name,
        base_weight,
        reason,
        estimated_cost,
        frequency,
    }
}

fn flagged(flags: &[RiskFlag], category: RiskCategory) -> Option<u32> {
    flag_for(flags, category).map(|f| f.severity.lab_weight())
}

fn condition_backed(
    profile: &UserProfile,
    flags: &[RiskFlag],
    keywords: &[&str],
    category: RiskCategory,
) -> Option<u32> {
    if profile.has_any_condition(keywords) {
        Some(flagged(flags, category).unwrap_or(NORMAL_LAB_WEIGHT))
    } else {
        None
    }
}

pub static LAB_RULES: &[LabRule] = &[
    LabRule {
        id: "baseline",
        trigger: |_, _| Some(NORMAL_LAB_WEIGHT),
        tests: &[
            lab(
                "CBC",
                40,
                "Baseline screen for anemia and infection markers.",
                "$15-$40",
                "Annually",
            ),
            lab(
                "Comprehensive Metabolic Panel",
                40,
                "Baseline kidney, liver and electrolyte check.",
                "$20-$50",
                "Annually",
            ),
            lab(
                "Vitamin D (25-OH)",
                30,
                "Low vitamin D is common and affects mood and immunity.",
                "$40-$60",
                "Annually",
            ),
            lab(
                "Lipid Panel",
                30,
                "Baseline cholesterol and triglyceride check.",
                "$20-$45",
                "Annually",
            ),
        ],
    },
    LabRule {
        id: "sleep",
        trigger: |_, flags| flagged(flags, RiskCategory::Sleep),
        tests: &[
            lab(
                "Cortisol (AM)",
                40,
                "Disrupted sleep often tracks with a flattened cortisol curve.",
                "$30-$60",
                "Every 6 months",
            ),
            lab(
                "Ferritin",
                30,
                "Low iron stores are linked to restless sleep.",
                "$20-$40",
                "Annually",
            ),
        ],
    },
    LabRule {
        id: "stress",
        trigger: |_, flags| flagged(flags, RiskCategory::Stress),
        tests: &[
            lab(
                "Cortisol (AM)",
                50,
                "Chronic stress raises baseline cortisol.",
                "$30-$60",
                "Every 6 months",
            ),
            lab(
                "DHEA-S",
                30,
                "Adrenal reserve marker under prolonged stress.",
                "$40-$70",
                "Annually",
            ),
        ],
    },
    LabRule {
        id: "weight",
        trigger: |_, flags| flagged(flags, RiskCategory::Weight),
        tests: &[
            lab(
                "Fasting Insulin",
                60,
                "Body weight outside the healthy range affects insulin sensitivity.",
                "$30-$60",
                "Every 6 months",
            ),
            lab("HbA1c", 60, "Three-month blood sugar average.", "$25-$50", "Every 6 months"),
            lab(
                "Lipid Panel",
                50,
                "Weight changes shift blood lipids.",
                "$20-$45",
                "Every 6 months",
            ),
        ],
    },
    LabRule {
        id: "hormonal",
        trigger: |p, flags| condition_backed(p, flags, &["pcos"], RiskCategory::Hormonal),
        tests: &[
            lab(
                "Fasting Insulin",
                180,
                "PCOS is closely tied to insulin resistance.",
                "$30-$60",
                "Every 3 months",
            ),
            lab(
                "Total & Free Testosterone",
                150,
                "Androgen levels guide PCOS management.",
                "$50-$90",
                "Every 6 months",
            ),
            lab(
                "LH/FSH Ratio",
                120,
                "Pituitary hormone balance for PCOS.",
                "$40-$80",
                "Every 6 months",
            ),
            lab(
                "SHBG",
                100,
                "Binding globulin affects free hormone levels.",
                "$40-$70",
                "Every 6 months",
            ),
        ],
    },
    LabRule {
        id: "thyroid",
        trigger: |p, flags| condition_backed(p, flags, THYROID_KEYWORDS, RiskCategory::Thyroid),
        tests: &[
            lab("TSH", 170, "Primary marker for thyroid function.", "$20-$40", "Every 3 months"),
            lab("Free T4", 150, "Circulating thyroid hormone.", "$25-$45", "Every 3 months"),
            lab("Free T3", 130, "Active thyroid hormone.", "$25-$45", "Every 3 months"),
            lab(
                "Thyroid Antibodies (TPO)",
                110,
                "Screens for autoimmune thyroid disease.",
                "$40-$70",
                "Annually",
            ),
        ],
    },
    LabRule {
        id: "diabetes",
        trigger: |p, flags| condition_backed(p, flags, DIABETES_KEYWORDS, RiskCategory::Diabetes),
        tests: &[
            lab("HbA1c", 190, "Tracks long-term blood sugar control.", "$25-$50", "Every 3 months"),
            lab("Fasting Glucose", 170, "Daily blood sugar baseline.", "$10-$25", "Every 3 months"),
            lab(
                "Fasting Insulin",
                150,
                "Shows how hard the pancreas is working.",
                "$30-$60",
                "Every 3 months",
            ),
        ],
    },
    LabRule {
        id: "cardiovascular",
        trigger: |p, flags| {
            condition_backed(p, flags, CARDIO_KEYWORDS, RiskCategory::Cardiovascular)
        },
        tests: &[
            lab(
                "Lipid Panel",
                170,
                "Cholesterol targets for heart health.",
                "$20-$45",
                "Every 6 months",
            ),
            lab(
                "hs-CRP",
                140,
                "Inflammation marker tied to cardiovascular risk.",
                "$25-$50",
                "Every 6 months",
            ),
            lab("ApoB", 130, "Particle count predicts cardiovascular risk.", "$40-$80", "Annually"),
        ],
    },
    LabRule {
        id: "digestive",
        trigger: |_, flags| flagged(flags, RiskCategory::Digestive),
        tests: &[
            lab(
                "Celiac Panel (tTG-IgA)",
                100,
                "Rules out celiac disease behind digestive symptoms.",
                "$50-$100",
                "Once",
            ),
            lab(
                "Comprehensive Stool Analysis",
                90,
                "Maps gut flora and inflammation.",
                "$150-$350",
                "Once",
            ),
        ],
    },
    LabRule {
        id: "energy",
        trigger: |_, flags| flagged(flags, RiskCategory::Energy),
        tests: &[
            lab(
                "Ferritin",
                90,
                "Iron stores are a common cause of fatigue.",
                "$20-$40",
                "Every 6 months",
            ),
            lab(
                "Vitamin B12",
                80,
                "B12 deficiency causes persistent tiredness.",
                "$25-$50",
                "Annually",
            ),
            lab(
                "TSH",
                60,
                "Underactive thyroid is a frequent cause of low energy.",
                "$20-$40",
                "Annually",
            ),
        ],
    },
    LabRule {
        id: "age_over_50",
        trigger: |p, _| (p.age > 50).then_some(NORMAL_LAB_WEIGHT),
        tests: &[lab(
            "Bone Density (DEXA)",
            70,
            "Bone loss accelerates after 50.",
            "$100-$250",
            "Every 2 years",
        )],
    },
    LabRule {
        id: "female_over_35",
        trigger: |p, _| (p.gender == Gender::Female && p.age > 35).then_some(NORMAL_LAB_WEIGHT),
        tests: &[lab(
            "Iron Panel",
            60,
            "Iron depletion is common in women over 35.",
            "$30-$60",
            "Annually",
        )],
    },
    LabRule {
        id: "male_over_45",
        trigger: |p, _| (p.gender == Gender::Male && p.age > 45).then_some(NORMAL_LAB_WEIGHT),
        tests: &[lab("PSA", 60, "Routine prostate screening after 45.", "$25-$50", "Annually")],
    },
];

/// Computes lab test recommendations.
pub struct LabTestPrioritizer;

impl LabTestPrioritizer {
    /// Evaluates the built-in rule table.
    pub fn prioritize(profile: &UserProfile, flags: &[RiskFlag]) -> Vec<LabTest> {
        Self::prioritize_with(LAB_RULES, profile, flags)
    }

    /// Evaluates an arbitrary rule table with a fresh, call-local accumulator.
    pub fn prioritize_with(
        rules: &[LabRule],
        profile: &UserProfile,
        flags: &[RiskFlag],
    ) -> Vec<LabTest> {
        let mut acc = LabTestAccumulator::new();

        for rule in rules {
            let Some(severity_weight) = (rule.trigger)(profile, flags) else {
                continue;
            };
            for test in rule.tests {
                let priority = (test.base_weight + severity_weight) as i32;
                acc.add_test(LabTest::new(
                    test.name,
                    priority,
                    test.reason,
                    test.estimated_cost,
                    test.frequency,
                ));
            }
            debug!(rule = rule.id, severity_weight, "Lab rule fired");
        }

        acc.finish()
    }
}
