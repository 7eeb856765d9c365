//! Screening report builder.
//!
//! Aggregates the answers recorded across the ten questions into a scored
//! report with localized recommendations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Language;
use crate::domain::questionnaire::{
    assess_risk, calculate_total_score, recommendations, RecordedAnswer, RiskLevel,
};

/// Final screening report for a completed questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    /// Points accumulated across the answered questions.
    pub total_score: u8,
    /// Maximum achievable score.
    pub max_score: u8,
    /// Score above which referral is recommended.
    pub threshold: u8,
    /// Whether professional evaluation is recommended.
    pub recommend_referral: bool,
    /// Risk tier derived from the score.
    pub risk_level: RiskLevel,
    /// Localized guidance for the parent.
    pub recommendations: Vec<String>,
    /// How many of the ten questions received an answer.
    pub answered_count: usize,
}

/// Builds the screening report from recorded answers.
///
/// Questions that were closed without an answer simply contribute no points;
/// the report notes how many answers it is based on.
pub fn build_report(language: Language, answers: &[RecordedAnswer]) -> ScreeningReport {
    let total_score = calculate_total_score(answers);
    let assessment = assess_risk(total_score);
    ScreeningReport {
        total_score: assessment.total_score,
        max_score: assessment.max_score,
        threshold: assessment.threshold,
        recommend_referral: assessment.recommend_referral,
        risk_level: assessment.risk_level,
        recommendations: recommendations(language, assessment.risk_level)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        answered_count: answers.len(),
    }
}
