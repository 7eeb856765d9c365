//! Conversation state for one question of the questionnaire.
//!
//! The state is the single source of truth for a question's dialogue: the
//! dialogue machine is a pure driver over it, and the application layer
//! persists it between turns. Each question gets a fresh state; nothing
//! carries over from previous questions except what the caller seeds
//! (language, parent and child names).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::values::{
    Emotion, ExtractedOption, Intent, IntentClassification, Turn, TurnRole,
};
use crate::domain::foundation::{Language, SessionId};
use crate::domain::questionnaire::OptionText;

/// How many trailing history entries are scanned when suppressing
/// duplicate user turns (client retries).
pub const DUPLICATE_WINDOW: usize = 3;

/// Complete dialogue state for one (session, question) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub session_id: SessionId,
    pub question_number: u8,
    pub language: Language,

    /// Question text resolved into `language`, personalized with the child
    /// name where the source text carries a placeholder.
    pub question_text: String,
    /// Options resolved into `language`, in A..E order.
    pub options: Vec<OptionText>,

    /// Append-only transcript of the dialogue.
    pub conversation_history: Vec<Turn>,
    /// Single-slot mailbox for the utterance being processed. Empty while
    /// the conversation is suspended waiting for input.
    #[serde(default)]
    pub current_message: String,

    pub last_intent: Option<Intent>,
    pub last_emotion: Option<Emotion>,
    /// Running count of off-topic utterances, fed to the redirect generator.
    #[serde(default)]
    pub unrelated_count: u32,

    #[serde(default)]
    pub extracted_option: ExtractedOption,
    #[serde(default)]
    pub extraction_confidence: f32,
    pub extraction_reasoning: Option<String>,
    /// Set exactly once, when an answer is recorded or the question is
    /// given up; never reset for the lifetime of this state.
    #[serde(default)]
    pub is_answer_complete: bool,
    /// Failed extraction attempts so far.
    #[serde(default)]
    pub attempt_count: u32,

    pub parent_name: Option<String>,
    pub child_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationState {
    /// Creates a fresh state for one question.
    pub fn new(
        session_id: SessionId,
        question_number: u8,
        language: Language,
        question_text: impl Into<String>,
        options: Vec<OptionText>,
    ) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            question_number,
            language,
            question_text: question_text.into(),
            options,
            conversation_history: Vec::new(),
            current_message: String::new(),
            last_intent: None,
            last_emotion: None,
            unrelated_count: 0,
            extracted_option: ExtractedOption::Unanswered,
            extraction_confidence: 0.0,
            extraction_reasoning: None,
            is_answer_complete: false,
            attempt_count: 0,
            parent_name: None,
            child_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the parent name used in generated messages.
    pub fn with_parent_name(mut self, name: impl Into<String>) -> Self {
        self.parent_name = Some(name.into());
        self
    }

    /// Sets the child name used for personalization.
    pub fn with_child_name(mut self, name: impl Into<String>) -> Self {
        self.child_name = Some(name.into());
        self
    }

    /// Places an incoming utterance in the mailbox.
    pub fn set_current_message(&mut self, message: impl Into<String>) {
        self.current_message = message.into();
        self.touch();
    }

    /// Empties the mailbox. Every dialogue handler does this on exit.
    pub fn clear_current_message(&mut self) {
        self.current_message.clear();
        self.touch();
    }

    /// Appends a user turn unless the same content already appears as a
    /// user turn within the trailing duplicate window. Returns whether the
    /// turn was appended.
    pub fn push_user_turn(&mut self, content: &str) -> bool {
        let window_start = self.conversation_history.len().saturating_sub(DUPLICATE_WINDOW);
        let duplicate = self.conversation_history[window_start..]
            .iter()
            .any(|t| t.role == TurnRole::User && t.content == content);
        if duplicate {
            return false;
        }
        self.conversation_history.push(Turn::user(content));
        self.touch();
        true
    }

    /// Appends an assistant turn.
    pub fn push_assistant_turn(&mut self, content: impl Into<String>) {
        self.conversation_history.push(Turn::assistant(content));
        self.touch();
    }

    /// Content of the most recent assistant turn, if any.
    pub fn last_assistant_content(&self) -> Option<&str> {
        self.conversation_history
            .iter()
            .rev()
            .find(|t| t.role == TurnRole::Assistant)
            .map(|t| t.content.as_str())
    }

    /// The trailing `n` turns of the transcript.
    pub fn recent_turns(&self, n: usize) -> &[Turn] {
        let start = self.conversation_history.len().saturating_sub(n);
        &self.conversation_history[start..]
    }

    /// Records the classifier's verdict for the current utterance.
    pub fn record_classification(&mut self, classification: &IntentClassification) {
        self.last_intent = Some(classification.intent);
        self.last_emotion = Some(classification.emotion);
        if classification.intent == Intent::OffTopic {
            self.unrelated_count += 1;
        }
        self.touch();
    }

    /// Records a failed extraction attempt.
    pub fn record_unclear_extraction(&mut self, confidence: f32, reasoning: impl Into<String>) {
        debug_assert!(!self.is_answer_complete);
        self.extracted_option = ExtractedOption::Unclear;
        self.extraction_confidence = confidence;
        self.extraction_reasoning = Some(reasoning.into());
        self.attempt_count += 1;
        self.touch();
    }

    /// Records the extracted answer and completes the question.
    pub fn complete_with_answer(
        &mut self,
        option: crate::domain::questionnaire::AnswerValue,
        confidence: f32,
        reasoning: impl Into<String>,
    ) {
        debug_assert!(!self.is_answer_complete);
        self.extracted_option = option.into();
        self.extraction_confidence = confidence;
        self.extraction_reasoning = Some(reasoning.into());
        self.is_answer_complete = true;
        self.touch();
    }

    /// Gives up on the question after exhausting extraction attempts.
    pub fn complete_unanswered(&mut self) {
        debug_assert!(!self.is_answer_complete);
        self.extracted_option = ExtractedOption::Unanswered;
        self.is_answer_complete = true;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
