//! Value objects for the per-question dialogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::questionnaire::AnswerValue;

/// Classified intent of a parent utterance.
///
/// `Answering` covers any attempt to answer, however vague ("yes", "no",
/// "sometimes" and similar are always answers, never clarification requests).
/// Unrecognized categories from a provider deserialize as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Answering,
    Clarification,
    AskingQuestion,
    QuestionRelatedQuery,
    Greeting,
    OffTopic,
    Skip,
    Restart,
    Finish,
    Exit,
    IncompleteAnswer,
    WrongFormat,
    Refusal,
    #[serde(other)]
    Other,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Answering => "answering",
            Intent::Clarification => "clarification",
            Intent::AskingQuestion => "asking_question",
            Intent::QuestionRelatedQuery => "question_related_query",
            Intent::Greeting => "greeting",
            Intent::OffTopic => "off_topic",
            Intent::Skip => "skip",
            Intent::Restart => "restart",
            Intent::Finish => "finish",
            Intent::Exit => "exit",
            Intent::IncompleteAnswer => "incomplete_answer",
            Intent::WrongFormat => "wrong_format",
            Intent::Refusal => "refusal",
            Intent::Other => "other",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detected emotional tone of an utterance.
///
/// Unrecognized tones deserialize as `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Positive,
    Negative,
    Confused,
    Stressed,
    Hopeful,
    #[default]
    #[serde(other)]
    Neutral,
}

/// Result of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentClassification {
    pub intent: Intent,
    pub emotion: Emotion,
    pub confidence: f32,
    pub explanation: String,
}

impl IntentClassification {
    /// Conservative result used when the classifier is unavailable: treat
    /// the utterance as an answer attempt so extraction gets a chance.
    pub fn fallback() -> Self {
        Self {
            intent: Intent::Answering,
            emotion: Emotion::Neutral,
            confidence: 0.5,
            explanation: "classifier unavailable, defaulting to answer attempt".to_string(),
        }
    }
}

/// Outcome of answer extraction for the current question.
///
/// `Unanswered` doubles as the initial value and as the terminal marker for
/// a question given up after too many failed extraction attempts;
/// `ConversationState::is_answer_complete` distinguishes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtractedOption {
    A,
    B,
    C,
    D,
    E,
    #[default]
    #[serde(rename = "unanswered")]
    Unanswered,
    #[serde(rename = "unclear")]
    #[serde(other)]
    Unclear,
}

impl ExtractedOption {
    /// The concrete answer letter, if this extraction produced one.
    pub fn answer(&self) -> Option<AnswerValue> {
        match self {
            ExtractedOption::A => Some(AnswerValue::A),
            ExtractedOption::B => Some(AnswerValue::B),
            ExtractedOption::C => Some(AnswerValue::C),
            ExtractedOption::D => Some(AnswerValue::D),
            ExtractedOption::E => Some(AnswerValue::E),
            ExtractedOption::Unclear | ExtractedOption::Unanswered => None,
        }
    }
}

impl From<AnswerValue> for ExtractedOption {
    fn from(value: AnswerValue) -> Self {
        match value {
            AnswerValue::A => ExtractedOption::A,
            AnswerValue::B => ExtractedOption::B,
            AnswerValue::C => ExtractedOption::C,
            AnswerValue::D => ExtractedOption::D,
            AnswerValue::E => ExtractedOption::E,
        }
    }
}

/// Result of one extraction attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerExtraction {
    pub option: ExtractedOption,
    pub confidence: f32,
    pub reasoning: String,
}

impl AnswerExtraction {
    /// Result used when the extractor is unavailable; treated exactly like
    /// an unclear answer so the dialogue falls through to clarification.
    pub fn fallback() -> Self {
        Self {
            option: ExtractedOption::Unclear,
            confidence: 0.0,
            reasoning: "extractor unavailable".to_string(),
        }
    }
}

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One entry in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Intent::AskingQuestion).unwrap(),
            "\"asking_question\""
        );
        assert_eq!(
            serde_json::to_string(&Intent::OffTopic).unwrap(),
            "\"off_topic\""
        );
    }

    #[test]
    fn unknown_intent_deserializes_as_other() {
        let intent: Intent = serde_json::from_str("\"mumbling\"").unwrap();
        assert_eq!(intent, Intent::Other);
    }

    #[test]
    fn unknown_emotion_deserializes_as_neutral() {
        let emotion: Emotion = serde_json::from_str("\"ecstatic\"").unwrap();
        assert_eq!(emotion, Emotion::Neutral);
    }

    #[test]
    fn extracted_option_letters_map_to_answers() {
        assert_eq!(ExtractedOption::C.answer(), Some(AnswerValue::C));
        assert_eq!(ExtractedOption::Unclear.answer(), None);
        assert_eq!(ExtractedOption::Unanswered.answer(), None);
    }

    #[test]
    fn extracted_option_deserializes_letters_and_unclear() {
        let opt: ExtractedOption = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(opt, ExtractedOption::B);
        let opt: ExtractedOption = serde_json::from_str("\"unclear\"").unwrap();
        assert_eq!(opt, ExtractedOption::Unclear);
        // Anything unexpected from a provider degrades to unclear.
        let opt: ExtractedOption = serde_json::from_str("\"maybe-D\"").unwrap();
        assert_eq!(opt, ExtractedOption::Unclear);
    }

    #[test]
    fn catch_all_variants_keep_their_wire_names() {
        assert_eq!(
            serde_json::to_string(&Emotion::Neutral).unwrap(),
            "\"neutral\""
        );
        assert_eq!(
            serde_json::to_string(&ExtractedOption::Unclear).unwrap(),
            "\"unclear\""
        );
        assert_eq!(
            serde_json::to_string(&ExtractedOption::Unanswered).unwrap(),
            "\"unanswered\""
        );
    }

    #[test]
    fn classification_fallback_is_answer_attempt() {
        let fallback = IntentClassification::fallback();
        assert_eq!(fallback.intent, Intent::Answering);
        assert_eq!(fallback.emotion, Emotion::Neutral);
    }

    #[test]
    fn extraction_fallback_is_unclear() {
        let fallback = AnswerExtraction::fallback();
        assert_eq!(fallback.option, ExtractedOption::Unclear);
        assert_eq!(fallback.confidence, 0.0);
    }

    #[test]
    fn turn_constructors_set_role() {
        assert_eq!(Turn::user("hi").role, TurnRole::User);
        assert_eq!(Turn::assistant("hello").role, TurnRole::Assistant);
    }
}
