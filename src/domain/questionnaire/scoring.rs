//! Q-CHAT-10 scoring engine.
//!
//! Questions 1-9 score one point for options C, D, or E. Question 10 is
//! reverse-scored: one point for A, B, or C. A total above the referral
//! threshold recommends a specialist referral.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::question::AnswerValue;
use crate::domain::foundation::Language;

/// Scores strictly above this value recommend a referral.
pub const REFERRAL_THRESHOLD: u8 = 3;

/// Maximum attainable total score.
pub const MAX_SCORE: u8 = 10;

/// Returns true if this answer contributes a point to the total.
///
/// Unknown question numbers never score.
pub fn calculate_point(question_number: u8, option: AnswerValue) -> bool {
    use AnswerValue::*;
    match question_number {
        1..=9 => matches!(option, C | D | E),
        // Reverse-scored: atypical end of the scale is A/B/C.
        10 => matches!(option, A | B | C),
        _ => false,
    }
}

/// A confirmed answer to one question, as persisted by the session layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedAnswer {
    pub question_number: u8,
    pub selected_option: AnswerValue,
    pub option_label: String,
    pub scored_point: bool,
    pub answered_at: DateTime<Utc>,
}

impl RecordedAnswer {
    /// Builds an answer record, computing its point contribution.
    pub fn new(question_number: u8, option: AnswerValue, option_label: impl Into<String>) -> Self {
        Self {
            question_number,
            selected_option: option,
            option_label: option_label.into(),
            scored_point: calculate_point(question_number, option),
            answered_at: Utc::now(),
        }
    }
}

/// Sums the points over a set of recorded answers.
pub fn calculate_total_score(answers: &[RecordedAnswer]) -> u8 {
    answers
        .iter()
        .filter(|a| calculate_point(a.question_number, a.selected_option))
        .count() as u8
}

/// Screening risk tier derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Outcome of scoring a completed (or partially completed) questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub total_score: u8,
    pub max_score: u8,
    pub threshold: u8,
    pub recommend_referral: bool,
    pub risk_level: RiskLevel,
}

/// Assesses risk from a total score.
pub fn assess_risk(total_score: u8) -> RiskAssessment {
    let recommend_referral = total_score > REFERRAL_THRESHOLD;
    RiskAssessment {
        total_score,
        max_score: MAX_SCORE,
        threshold: REFERRAL_THRESHOLD,
        recommend_referral,
        risk_level: if recommend_referral {
            RiskLevel::High
        } else {
            RiskLevel::Low
        },
    }
}

/// Fixed guidance text shown with the report, per language and risk tier.
pub fn recommendations(language: Language, level: RiskLevel) -> &'static [&'static str] {
    match (language, level) {
        (Language::En, RiskLevel::High) => &[
            "Your child's score suggests a need for further evaluation.",
            "We recommend scheduling an appointment with a pediatrician or developmental specialist.",
            "Early intervention can make a significant difference in outcomes.",
            "Please bring this report to your healthcare provider.",
            "Consider asking for a referral to a multidisciplinary assessment team.",
        ],
        (Language::En, RiskLevel::Low) => &[
            "Your child's score is within the typical range.",
            "Continue to monitor your child's development.",
            "If you have ongoing concerns, discuss them with your pediatrician.",
            "Regular developmental checkups are important for all children.",
        ],
        (Language::Ar, RiskLevel::High) => &[
            "تشير درجة طفلك إلى الحاجة لمزيد من التقييم.",
            "نوصي بتحديد موعد مع طبيب أطفال أو أخصائي تطور.",
            "التدخل المبكر يمكن أن يحدث فرقاً كبيراً في النتائج.",
            "يرجى إحضار هذا التقرير إلى مقدم الرعاية الصحية الخاص بك.",
            "فكر في طلب إحالة إلى فريق تقييم متعدد التخصصات.",
        ],
        (Language::Ar, RiskLevel::Low) => &[
            "درجة طفلك ضمن النطاق الطبيعي.",
            "استمر في مراقبة تطور طفلك.",
            "إذا كانت لديك مخاوف مستمرة، ناقشها مع طبيب الأطفال.",
            "الفحوصات التطورية المنتظمة مهمة لجميع الأطفال.",
        ],
    }
}
