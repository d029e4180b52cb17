use serde::{Deserialize, Serialize};

use crate::domain::skill::Skill;

pub const MIN_BAND: f64 = 0.0;
pub const MAX_BAND: f64 = 9.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScore {
    pub name: String,
    pub score: f64,
    pub feedback: String,
    pub improvement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub overall_band: f64,
    pub skill: Skill,
    pub criteria: Vec<CriterionScore>,
    pub general_feedback: String,
    pub improvement_plan: Vec<String>,
}

/// Clamps a criterion score into the 0-9 band range. NaN becomes 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_BAND;
    }
    score.clamp(MIN_BAND, MAX_BAND)
}

/// Clamps and rounds to the nearest half band: .25 goes up to .5, .75 up to the next whole band.
pub fn snap_band(band: f64) -> f64 {
    (clamp_score(band) * 2.0).round() / 2.0
}
