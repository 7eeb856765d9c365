//! OpenAI Understanding Adapter - chat-completions backed NLU.
//!
//! Implements the `Understanding` port against any OpenAI-compatible
//! chat-completions endpoint. Classification and extraction ask for JSON
//! payloads and parse them into domain types; message generation returns the
//! completion text directly.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiNluConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let nlu = OpenAiUnderstanding::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::domain::assistant::{
    AnswerExtraction, IntentClassification, Turn, TurnRole,
};
use crate::domain::foundation::Language;
use crate::ports::{
    ExtractionRequest, GenerateRequest, IntentRequest, MessageVariant, NluError, Understanding,
};

/// Configuration for the OpenAI-compatible NLU adapter.
#[derive(Debug, Clone)]
pub struct OpenAiNluConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAiNluConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-backed implementation of the `Understanding` port.
pub struct OpenAiUnderstanding {
    config: OpenAiNluConfig,
    client: Client,
}

impl OpenAiUnderstanding {
    /// Creates a new adapter with the given configuration.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be constructed (invalid TLS setup).
    pub fn new(config: OpenAiNluConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Sends one chat completion, retrying transient failures.
    async fn chat(&self, wire: WireRequest) -> Result<String, NluError> {
        let mut last_error = NluError::Network("No attempts made".to_string());
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                sleep(Duration::from_millis(200 * 2u64.pow(attempt - 1))).await;
            }
            match self.send_once(&wire).await {
                Ok(content) => return Ok(content),
                Err(error) if error.is_retryable() && attempt < self.config.max_retries => {
                    debug!(%error, attempt, "retrying NLU request");
                    last_error = error;
                }
                Err(error) => return Err(error),
            }
        }
        Err(last_error)
    }

    async fn send_once(&self, wire: &WireRequest) -> Result<String, NluError> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(wire)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NluError::timeout(self.config.timeout.as_secs())
                } else if e.is_connect() {
                    NluError::Network(format!("Connection failed: {}", e))
                } else {
                    NluError::Network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;

        let wire_response: WireResponse = response
            .json()
            .await
            .map_err(|e| NluError::Parse(format!("Failed to parse response: {}", e)))?;

        wire_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| NluError::Parse("No choices in response".to_string()))
    }

    /// Maps non-success statuses onto the port's error taxonomy.
    async fn handle_response_status(&self, response: Response) -> Result<Response, NluError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(NluError::AuthenticationFailed),
            429 => Err(NluError::rate_limited(parse_retry_after(&error_body))),
            400 => Err(NluError::InvalidRequest(error_body)),
            500..=599 => Err(NluError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(NluError::Network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    fn wire_request(&self, system: String, user: String, json_mode: bool) -> WireRequest {
        WireRequest {
            model: self.config.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system".to_string(),
                    content: system,
                },
                WireMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            temperature: if json_mode { 0.0 } else { 0.7 },
            response_format: json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }
}

#[async_trait]
impl Understanding for OpenAiUnderstanding {
    async fn classify_intent(
        &self,
        request: IntentRequest,
    ) -> Result<IntentClassification, NluError> {
        let system = classify_system_prompt(request.language);
        let user = format!(
            "Current question (number {}): {}\n\nConversation so far:\n{}\n\nParent utterance: {}",
            request.question_number,
            request.question_text,
            format_history(&request.history),
            request.utterance
        );
        let content = self.chat(self.wire_request(system, user, true)).await?;
        parse_classification(&content)
    }

    async fn extract_answer(
        &self,
        request: ExtractionRequest,
    ) -> Result<AnswerExtraction, NluError> {
        let options = request
            .options
            .iter()
            .map(|o| format!("{}: {} - Example: {}", o.value, o.label, o.example))
            .collect::<Vec<_>>()
            .join("\n");
        let system = extract_system_prompt(request.language);
        let user = format!(
            "Question: {}\n\nOptions:\n{}\n\nConversation so far:\n{}\n\nParent utterance: {}",
            request.question_text,
            options,
            format_history(&request.history),
            request.utterance
        );
        let content = self.chat(self.wire_request(system, user, true)).await?;
        parse_extraction(&content)
    }

    async fn generate_message(&self, request: GenerateRequest) -> Result<String, NluError> {
        let system = generate_system_prompt(&request);
        let user = format!(
            "Question (number {}): {}\n\nConversation so far:\n{}\n\nParent utterance: {}",
            request.question_number,
            request.question_text,
            format_history(&request.history),
            if request.utterance.is_empty() {
                "(none yet)"
            } else {
                &request.utterance
            }
        );
        let content = self.chat(self.wire_request(system, user, false)).await?;
        Ok(content.trim().to_string())
    }
}

/// Renders a transcript the way prompts expect it.
fn format_history(turns: &[Turn]) -> String {
    if turns.is_empty() {
        return "No previous messages.".to_string();
    }
    turns
        .iter()
        .map(|t| match t.role {
            TurnRole::User => format!("User: {}", t.content),
            TurnRole::Assistant => format!("Assistant: {}", t.content),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::En => "The conversation is in English.",
        Language::Ar => "The conversation is in Arabic; any generated text must be in Arabic.",
    }
}

fn classify_system_prompt(language: Language) -> String {
    format!(
        "You classify a parent's utterance during a Q-CHAT-10 screening conversation. {}\n\
         Respond with a JSON object: {{\"intent\": ..., \"emotion\": ..., \"confidence\": 0.0-1.0, \"explanation\": ...}}.\n\
         intent is one of: answering, clarification, asking_question, question_related_query, greeting, \
         off_topic, skip, restart, finish, exit, incomplete_answer, wrong_format, refusal, other.\n\
         emotion is one of: positive, negative, neutral, confused, stressed, hopeful.\n\
         Critical rule: \"yes\", \"no\", \"sometimes\", or any other positive or negative indicator about the \
         child's behavior is ALWAYS an attempt to answer (intent answering), never a clarification request.",
        language_instruction(language)
    )
}

fn extract_system_prompt(language: Language) -> String {
    format!(
        "You map a parent's utterance to one answer option of a Q-CHAT-10 question. {}\n\
         Respond with a JSON object: {{\"option\": ..., \"confidence\": 0.0-1.0, \"reasoning\": ...}}.\n\
         option is one of A, B, C, D, E, or \"unclear\".\n\
         If the utterance is itself a question, the option is always \"unclear\".\n\
         If the utterance is an answer but ambiguous between adjacent options, pick the more conservative \
         option and lower the confidence rather than returning unclear.",
        language_instruction(language)
    )
}

fn generate_system_prompt(request: &GenerateRequest) -> String {
    let parent = request.parent_name.as_deref().unwrap_or("");
    let child = request.child_name.as_deref().unwrap_or("the child");
    let role = match request.variant {
        MessageVariant::Welcome => format!(
            "Write a warm welcome opening this question's conversation for parent '{}' about child '{}'. \
             Present the question, illustrate the scale with the examples for option A ({}) and option E ({}), \
             and invite the parent to answer in their own words or ask anything about the question.",
            parent, child, request.example_a, request.example_e
        ),
        MessageVariant::Clarification => format!(
            "The parent's reply could not be mapped to an answer option, or they asked what the question means. \
             Briefly explain the question in plain terms, using the example '{}' if helpful, and gently ask again.",
            request.example_a
        ),
        MessageVariant::Greeting => format!(
            "The parent greeted you. Greet '{}' back briefly and warmly, then steer to the question, \
             optionally using the example '{}'.",
            parent, request.example_a
        ),
        MessageVariant::Redirect => format!(
            "The parent went off topic ({} off-topic message(s) so far). Acknowledge their concern in one \
             sentence without answering it, then bring them back to the question, optionally using the example '{}'.",
            request.unrelated_count, request.example_a
        ),
    };
    format!(
        "You are a friendly, professional assistant guiding a parent through the Q-CHAT-10 questionnaire. {}\n{}",
        language_instruction(request.language),
        role
    )
}

/// Strips a Markdown code fence if the model wrapped its JSON in one.
fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn parse_classification(payload: &str) -> Result<IntentClassification, NluError> {
    #[derive(Deserialize)]
    struct Wire {
        intent: crate::domain::assistant::Intent,
        #[serde(default)]
        emotion: crate::domain::assistant::Emotion,
        #[serde(default)]
        confidence: f32,
        #[serde(default)]
        explanation: String,
    }

    let wire: Wire = serde_json::from_str(strip_code_fence(payload))
        .map_err(|e| NluError::Parse(format!("Invalid classification payload: {}", e)))?;
    Ok(IntentClassification {
        intent: wire.intent,
        emotion: wire.emotion,
        confidence: wire.confidence.clamp(0.0, 1.0),
        explanation: wire.explanation,
    })
}

fn parse_extraction(payload: &str) -> Result<AnswerExtraction, NluError> {
    #[derive(Deserialize)]
    struct Wire {
        option: crate::domain::assistant::ExtractedOption,
        #[serde(default)]
        confidence: f32,
        #[serde(default)]
        reasoning: String,
    }

    let wire: Wire = serde_json::from_str(strip_code_fence(payload))
        .map_err(|e| NluError::Parse(format!("Invalid extraction payload: {}", e)))?;
    Ok(AnswerExtraction {
        option: wire.option,
        confidence: wire.confidence.clamp(0.0, 1.0),
        reasoning: wire.reasoning,
    })
}

fn parse_retry_after(error_body: &str) -> u64 {
    // The provider sometimes embeds "try again in Xs" in the error message.
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
        if let Some(s) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            if let Some(idx) = s.find("try again in ") {
                let rest = &s[idx + 13..];
                if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                    if let Ok(secs) = rest[..num_end].parse::<u64>() {
                        return secs;
                    }
                }
            }
        }
    }
    30
}

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assistant::{Emotion, ExtractedOption, Intent};

    #[test]
    fn config_builders_override_defaults() {
        let config = OpenAiNluConfig::new("sk-test")
            .with_model("gpt-4o")
            .with_base_url("http://localhost:8080/v1")
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(1);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn config_debug_does_not_leak_api_key() {
        let config = OpenAiNluConfig::new("sk-secret-value");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret-value"));
    }

    #[test]
    fn format_history_renders_roles() {
        let turns = vec![Turn::assistant("Welcome!"), Turn::user("hi")];
        assert_eq!(format_history(&turns), "Assistant: Welcome!\nUser: hi");
    }

    #[test]
    fn format_history_handles_empty_transcript() {
        assert_eq!(format_history(&[]), "No previous messages.");
    }

    #[test]
    fn parse_classification_reads_full_payload() {
        let payload = r#"{"intent": "greeting", "emotion": "positive", "confidence": 0.92, "explanation": "says hello"}"#;
        let parsed = parse_classification(payload).unwrap();
        assert_eq!(parsed.intent, Intent::Greeting);
        assert_eq!(parsed.emotion, Emotion::Positive);
        assert!((parsed.confidence - 0.92).abs() < f32::EPSILON);
    }

    #[test]
    fn parse_classification_tolerates_unknown_labels_and_fences() {
        let payload = "```json\n{\"intent\": \"rambling\", \"emotion\": \"giddy\", \"confidence\": 2.5}\n```";
        let parsed = parse_classification(payload).unwrap();
        assert_eq!(parsed.intent, Intent::Other);
        assert_eq!(parsed.emotion, Emotion::Neutral);
        assert_eq!(parsed.confidence, 1.0);
    }

    #[test]
    fn parse_classification_rejects_non_json() {
        assert!(matches!(
            parse_classification("the parent said hello"),
            Err(NluError::Parse(_))
        ));
    }

    #[test]
    fn parse_extraction_reads_letters_and_unclear() {
        let parsed =
            parse_extraction(r#"{"option": "C", "confidence": 0.7, "reasoning": "sometimes"}"#)
                .unwrap();
        assert_eq!(parsed.option, ExtractedOption::C);

        let parsed = parse_extraction(r#"{"option": "unclear", "confidence": 0.1}"#).unwrap();
        assert_eq!(parsed.option, ExtractedOption::Unclear);
        assert_eq!(parsed.reasoning, "");
    }

    #[test]
    fn parse_retry_after_reads_provider_hint() {
        let body = r#"{"error": {"message": "Rate limit reached, please try again in 7s."}}"#;
        assert_eq!(parse_retry_after(body), 7);
        assert_eq!(parse_retry_after("not json"), 30);
    }

    #[test]
    fn generate_prompt_mentions_variant_specifics() {
        let request = GenerateRequest::new(MessageVariant::Redirect, Language::En, 2)
            .with_examples("example a", "example e")
            .with_unrelated_count(3);
        let prompt = generate_system_prompt(&request);
        assert!(prompt.contains("off topic"));
        assert!(prompt.contains("3 off-topic"));
        assert!(prompt.contains("example a"));
    }

    #[test]
    fn arabic_requests_demand_arabic_output() {
        let request = GenerateRequest::new(MessageVariant::Welcome, Language::Ar, 1);
        let prompt = generate_system_prompt(&request);
        assert!(prompt.contains("must be in Arabic"));
    }
}
