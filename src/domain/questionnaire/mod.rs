//! Questionnaire module - Q-CHAT-10 questions and scoring.

mod bank;
mod question;
pub mod scoring;

pub use bank::{QuestionBank, TOTAL_QUESTIONS};
pub use question::{
    personalize, AnswerValue, OptionText, Question, QuestionOption, CHILD_NAME_PLACEHOLDER,
};
pub use scoring::{
    assess_risk, calculate_point, calculate_total_score, recommendations, RecordedAnswer,
    RiskAssessment, RiskLevel, MAX_SCORE, REFERRAL_THRESHOLD,
};
