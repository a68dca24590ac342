//! Scoring module - Pure classification of raw wellness scores.

mod classifier;

pub use classifier::{
    classify_score, energy_severity, sleep_severity, stress_severity, weight_risk, ScoreBand,
    Severity, SeverityProfile, WeightRisk,
};
