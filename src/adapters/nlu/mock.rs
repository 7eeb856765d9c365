//! Mock Understanding provider for testing.
//!
//! Responses are queued per capability and consumed in order; when a queue
//! runs dry the mock returns a benign default. All requests are recorded for
//! assertion.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::assistant::{
    AnswerExtraction, Emotion, ExtractedOption, Intent, IntentClassification,
};
use crate::ports::{
    ExtractionRequest, GenerateRequest, IntentRequest, NluError, Understanding,
};

type Queue<T> = Arc<Mutex<VecDeque<Result<T, NluError>>>>;

/// Configurable mock implementation of the `Understanding` port.
#[derive(Clone, Default)]
pub struct MockUnderstanding {
    classifications: Queue<IntentClassification>,
    extractions: Queue<AnswerExtraction>,
    messages: Queue<String>,
    classify_requests: Arc<Mutex<Vec<IntentRequest>>>,
    extract_requests: Arc<Mutex<Vec<ExtractionRequest>>>,
    generate_requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockUnderstanding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful classification.
    pub fn with_classification(self, intent: Intent, emotion: Emotion, confidence: f32) -> Self {
        self.classifications
            .lock()
            .expect("mock lock poisoned")
            .push_back(Ok(IntentClassification {
                intent,
                emotion,
                confidence,
                explanation: format!("mock classification: {}", intent),
            }));
        self
    }

    /// Queues a classification failure.
    pub fn with_classification_error(self, error: NluError) -> Self {
        self.classifications
            .lock()
            .expect("mock lock poisoned")
            .push_back(Err(error));
        self
    }

    /// Queues a successful extraction.
    pub fn with_extraction(self, option: ExtractedOption, confidence: f32) -> Self {
        self.extractions
            .lock()
            .expect("mock lock poisoned")
            .push_back(Ok(AnswerExtraction {
                option,
                confidence,
                reasoning: "mock extraction".to_string(),
            }));
        self
    }

    /// Queues an extraction failure.
    pub fn with_extraction_error(self, error: NluError) -> Self {
        self.extractions
            .lock()
            .expect("mock lock poisoned")
            .push_back(Err(error));
        self
    }

    /// Queues a successful generated message.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        self.messages
            .lock()
            .expect("mock lock poisoned")
            .push_back(Ok(message.into()));
        self
    }

    /// Queues a generation failure.
    pub fn with_message_error(self, error: NluError) -> Self {
        self.messages
            .lock()
            .expect("mock lock poisoned")
            .push_back(Err(error));
        self
    }

    /// All classification requests received so far.
    pub fn classify_calls(&self) -> Vec<IntentRequest> {
        self.classify_requests
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }

    /// All extraction requests received so far.
    pub fn extract_calls(&self) -> Vec<ExtractionRequest> {
        self.extract_requests
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }

    /// All generation requests received so far.
    pub fn generate_calls(&self) -> Vec<GenerateRequest> {
        self.generate_requests
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }
}

#[async_trait]
impl Understanding for MockUnderstanding {
    async fn classify_intent(
        &self,
        request: IntentRequest,
    ) -> Result<IntentClassification, NluError> {
        self.classify_requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);
        self.classifications
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(IntentClassification {
                    intent: Intent::Answering,
                    emotion: Emotion::Neutral,
                    confidence: 0.9,
                    explanation: "default mock classification".to_string(),
                })
            })
    }

    async fn extract_answer(
        &self,
        request: ExtractionRequest,
    ) -> Result<AnswerExtraction, NluError> {
        self.extract_requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);
        self.extractions
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(AnswerExtraction {
                    option: ExtractedOption::Unclear,
                    confidence: 0.0,
                    reasoning: "default mock extraction".to_string(),
                })
            })
    }

    async fn generate_message(&self, request: GenerateRequest) -> Result<String, NluError> {
        self.generate_requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);
        self.messages
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok("Mock generated message".to_string()))
    }
}
