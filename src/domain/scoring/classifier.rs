//! Score Classifier - threshold bands for wellness scores.
//!
//! Sleep and energy bands descend (low score = worse); stress bands ascend
//! (high score = worse). The asymmetry is part of the scoring model.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Score;
use crate::domain::profile::UserProfile;

/// Qualitative band for any 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Low,
    Moderate,
    High,
}

/// Severity of a sleep, stress or energy problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
}

/// Weight category derived from BMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightRisk {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// high if s >= 70, moderate if 40 <= s < 70, low otherwise.
pub fn classify_score(score: Score) -> ScoreBand {
    match score.value() {
        0..=39 => ScoreBand::Low,
        40..=69 => ScoreBand::Moderate,
        _ => ScoreBand::High,
    }
}

/// severe < 30, moderate < 50, mild < 70, else normal.
pub fn sleep_severity(score: Score) -> Severity {
    match score.value() {
        0..=29 => Severity::Severe,
        30..=49 => Severity::Moderate,
        50..=69 => Severity::Mild,
        _ => Severity::Normal,
    }
}

/// severe >= 71, moderate >= 31, else normal. There is no mild stress band.
pub fn stress_severity(score: Score) -> Severity {
    match score.value() {
        0..=30 => Severity::Normal,
        31..=70 => Severity::Moderate,
        _ => Severity::Severe,
    }
}

/// Energy shares the sleep bands.
pub fn energy_severity(score: Score) -> Severity {
    sleep_severity(score)
}

/// underweight < 18.5, obese > 30, overweight > 27, else normal.
pub fn weight_risk(bmi: f64) -> WeightRisk {
    if bmi < 18.5 {
        WeightRisk::Underweight
    } else if bmi > 30.0 {
        WeightRisk::Obese
    } else if bmi > 27.0 {
        WeightRisk::Overweight
    } else {
        WeightRisk::Normal
    }
}

/// Per-dimension severities for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityProfile {
    pub sleep: Severity,
    pub stress: Severity,
    pub energy: Severity,
    pub weight: WeightRisk,
    pub activity: ScoreBand,
}

impl SeverityProfile {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            sleep: sleep_severity(profile.sleep_score),
            stress: stress_severity(profile.stress_score),
            energy: energy_severity(profile.energy_score),
            weight: weight_risk(profile.bmi),
            activity: classify_score(profile.activity_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: u8) -> Score {
        Score::new(v)
    }

    #[test]
    fn classify_score_boundaries() {
        assert_eq!(classify_score(s(0)), ScoreBand::Low);
        assert_eq!(classify_score(s(39)), ScoreBand::Low);
        assert_eq!(classify_score(s(40)), ScoreBand::Moderate);
        assert_eq!(classify_score(s(69)), ScoreBand::Moderate);
        assert_eq!(classify_score(s(70)), ScoreBand::High);
        assert_eq!(classify_score(s(100)), ScoreBand::High);
    }

    #[test]
    fn sleep_severity_boundaries() {
        assert_eq!(sleep_severity(s(29)), Severity::Severe);
        assert_eq!(sleep_severity(s(30)), Severity::Moderate);
        assert_eq!(sleep_severity(s(49)), Severity::Moderate);
        assert_eq!(sleep_severity(s(50)), Severity::Mild);
        assert_eq!(sleep_severity(s(69)), Severity::Mild);
        assert_eq!(sleep_severity(s(70)), Severity::Normal);
    }

    #[test]
    fn stress_severity_ascends() {
        assert_eq!(stress_severity(s(30)), Severity::Normal);
        assert_eq!(stress_severity(s(31)), Severity::Moderate);
        assert_eq!(stress_severity(s(70)), Severity::Moderate);
        assert_eq!(stress_severity(s(71)), Severity::Severe);
    }

    #[test]
    fn weight_risk_boundaries() {
        assert_eq!(weight_risk(18.4), WeightRisk::Underweight);
        assert_eq!(weight_risk(18.5), WeightRisk::Normal);
        assert_eq!(weight_risk(27.0), WeightRisk::Normal);
        assert_eq!(weight_risk(27.1), WeightRisk::Overweight);
        assert_eq!(weight_risk(30.0), WeightRisk::Overweight);
        assert_eq!(weight_risk(30.1), WeightRisk::Obese);
    }

    #[test]
    fn severity_profile_collects_every_dimension() {
        let profile = UserProfile::new(30, crate::domain::profile::Gender::Male, 180.0, 75.0)
            .with_scores(25, 80, 45, 55);
        let sp = SeverityProfile::from_profile(&profile);
        assert_eq!(sp.sleep, Severity::Severe);
        assert_eq!(sp.stress, Severity::Severe);
        assert_eq!(sp.energy, Severity::Mild);
        assert_eq!(sp.weight, WeightRisk::Normal);
        assert_eq!(sp.activity, ScoreBand::Moderate);
    }
}
