mod criteria;
mod level;

pub use criteria::Criterion;
pub use level::AccessibilityLevel;

use super::facts::AnalysisFacts;
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u32 = 100;

/// Points awarded for one criterion, kept so every score can be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: String,
    pub points: u32,
    pub max: u32,
}

/// Weighted accessibility score. Recomputed from scratch on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub level: AccessibilityLevel,
    pub details: Vec<CriterionScore>,
}

impl ScoreReport {
    pub fn level_label(&self) -> &'static str {
        self.level.label()
    }

    pub fn criterion(&self, criterion: Criterion) -> Option<&CriterionScore> {
        self.details
            .iter()
            .find(|detail| detail.criterion == criterion.label())
    }
}

/// Score a document's facts against the six weighted criteria.
pub fn calculate_score(facts: &AnalysisFacts, is_compliant: bool) -> ScoreReport {
    let details = criteria::score_criteria(facts, is_compliant);
    let total_score = details
        .iter()
        .map(|detail| detail.points)
        .sum::<u32>()
        .min(MAX_SCORE);
    let percentage = (total_score as f64 / MAX_SCORE as f64 * 100.0).round() as u32;

    ScoreReport {
        total_score,
        max_score: MAX_SCORE,
        percentage,
        level: AccessibilityLevel::from_percentage(percentage),
        details,
    }
}
