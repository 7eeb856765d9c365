//! Understanding Port - Interface to the external text-understanding provider.
//!
//! The dialogue machine needs three capabilities: classify the intent and
//! emotion of an utterance, extract a structured answer from it, and generate
//! a conversational message of a given variant. All three degrade gracefully:
//! the machine maps every error to a deterministic fallback, so implementors
//! should report failures honestly rather than invent output.

use async_trait::async_trait;

use crate::domain::assistant::{AnswerExtraction, IntentClassification, Turn};
use crate::domain::foundation::Language;
use crate::domain::questionnaire::OptionText;

/// Errors from the understanding provider
#[derive(Debug, Clone, thiserror::Error)]
pub enum NluError {
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    #[error("Provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl NluError {
    /// Creates a timeout error.
    pub fn timeout(timeout_secs: u64) -> Self {
        NluError::Timeout { timeout_secs }
    }

    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u64) -> Self {
        NluError::RateLimited { retry_after_secs }
    }

    /// Creates a provider unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        NluError::Unavailable {
            message: message.into(),
        }
    }

    /// Returns true if the operation may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NluError::Timeout { .. }
                | NluError::RateLimited { .. }
                | NluError::Network(_)
                | NluError::Unavailable { .. }
        )
    }
}

/// Request to classify one utterance in context.
#[derive(Debug, Clone)]
pub struct IntentRequest {
    pub utterance: String,
    pub question_number: u8,
    pub question_text: String,
    pub language: Language,
    pub history: Vec<Turn>,
}

impl IntentRequest {
    pub fn new(utterance: impl Into<String>, question_number: u8, language: Language) -> Self {
        Self {
            utterance: utterance.into(),
            question_number,
            question_text: String::new(),
            language,
            history: Vec::new(),
        }
    }

    pub fn with_question_text(mut self, text: impl Into<String>) -> Self {
        self.question_text = text.into();
        self
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }
}

/// Request to extract an answer option from one utterance.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub utterance: String,
    pub question_text: String,
    pub options: Vec<OptionText>,
    pub language: Language,
    pub history: Vec<Turn>,
}

impl ExtractionRequest {
    pub fn new(
        utterance: impl Into<String>,
        question_text: impl Into<String>,
        options: Vec<OptionText>,
        language: Language,
    ) -> Self {
        Self {
            utterance: utterance.into(),
            question_text: question_text.into(),
            options,
            language,
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }
}

/// Which conversational message to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageVariant {
    Welcome,
    Clarification,
    Greeting,
    Redirect,
}

/// Request to generate one conversational message.
///
/// A single request type covers all variants; fields irrelevant to a variant
/// stay at their defaults.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub variant: MessageVariant,
    pub language: Language,
    pub question_number: u8,
    pub question_text: String,
    /// The utterance being responded to (empty for welcome).
    pub utterance: String,
    pub parent_name: Option<String>,
    pub child_name: Option<String>,
    /// Example for option A, used by welcome/greeting/redirect/clarification.
    pub example_a: String,
    /// Example for option E, used by welcome.
    pub example_e: String,
    /// How many off-topic utterances this conversation has seen.
    pub unrelated_count: u32,
    pub history: Vec<Turn>,
}

impl GenerateRequest {
    pub fn new(variant: MessageVariant, language: Language, question_number: u8) -> Self {
        Self {
            variant,
            language,
            question_number,
            question_text: String::new(),
            utterance: String::new(),
            parent_name: None,
            child_name: None,
            example_a: String::new(),
            example_e: String::new(),
            unrelated_count: 0,
            history: Vec::new(),
        }
    }

    pub fn with_question_text(mut self, text: impl Into<String>) -> Self {
        self.question_text = text.into();
        self
    }

    pub fn with_utterance(mut self, utterance: impl Into<String>) -> Self {
        self.utterance = utterance.into();
        self
    }

    pub fn with_parent_name(mut self, name: Option<String>) -> Self {
        self.parent_name = name;
        self
    }

    pub fn with_child_name(mut self, name: Option<String>) -> Self {
        self.child_name = name;
        self
    }

    pub fn with_examples(mut self, example_a: impl Into<String>, example_e: impl Into<String>) -> Self {
        self.example_a = example_a.into();
        self.example_e = example_e.into();
        self
    }

    pub fn with_unrelated_count(mut self, count: u32) -> Self {
        self.unrelated_count = count;
        self
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }
}

/// Port for the external understanding provider.
#[async_trait]
pub trait Understanding: Send + Sync {
    /// Classifies the intent and emotion of an utterance.
    ///
    /// # Errors
    /// Returns `NluError` if the provider fails; callers fall back to
    /// treating the utterance as an answer attempt.
    async fn classify_intent(
        &self,
        request: IntentRequest,
    ) -> Result<IntentClassification, NluError>;

    /// Extracts an answer option from an utterance.
    ///
    /// # Errors
    /// Returns `NluError` if the provider fails; callers treat failures
    /// like an unclear answer.
    async fn extract_answer(&self, request: ExtractionRequest)
        -> Result<AnswerExtraction, NluError>;

    /// Generates a conversational message of the requested variant.
    ///
    /// # Errors
    /// Returns `NluError` if the provider fails; callers substitute the
    /// deterministic fallback for the variant.
    async fn generate_message(&self, request: GenerateRequest) -> Result<String, NluError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(NluError::timeout(30).is_retryable());
        assert!(NluError::rate_limited(10).is_retryable());
        assert!(NluError::Network("reset".into()).is_retryable());
        assert!(NluError::unavailable("503").is_retryable());
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!NluError::AuthenticationFailed.is_retryable());
        assert!(!NluError::Parse("bad json".into()).is_retryable());
        assert!(!NluError::InvalidRequest("empty".into()).is_retryable());
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            NluError::timeout(30).to_string(),
            "Request timed out after 30 seconds"
        );
        assert_eq!(
            NluError::rate_limited(5).to_string(),
            "Rate limited, retry after 5 seconds"
        );
    }

    #[test]
    fn generate_request_builder_sets_fields() {
        let request = GenerateRequest::new(MessageVariant::Redirect, Language::En, 4)
            .with_question_text("Does your child point?")
            .with_utterance("what's the weather like")
            .with_parent_name(Some("Sara".into()))
            .with_examples("points a lot", "never points")
            .with_unrelated_count(2);

        assert_eq!(request.variant, MessageVariant::Redirect);
        assert_eq!(request.question_number, 4);
        assert_eq!(request.unrelated_count, 2);
        assert_eq!(request.example_a, "points a lot");
        assert_eq!(request.parent_name.as_deref(), Some("Sara"));
    }

    #[test]
    fn intent_request_builder_sets_fields() {
        let request = IntentRequest::new("yes always", 1, Language::En)
            .with_question_text("Does your child look at you?")
            .with_history(vec![Turn::assistant("welcome")]);
        assert_eq!(request.utterance, "yes always");
        assert_eq!(request.history.len(), 1);
    }
}
