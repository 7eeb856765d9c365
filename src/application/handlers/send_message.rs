//! SendMessage command handler.
//!
//! Delivers a parent utterance into an open question conversation, drives the
//! dialogue machine and reports what the turn produced, including the recorded
//! answer once the question completes.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::assistant::{DialogueMachine, Turn, TurnLimits, TurnOutcome};
use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::RecordedAnswer;
use crate::ports::{ChatKey, ConversationStore, ConversationStoreError, Understanding};

/// Command to deliver a parent utterance into a question conversation.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// The screening session.
    pub session_id: SessionId,
    /// The item the utterance belongs to.
    pub question_number: u8,
    /// What the parent said.
    pub content: String,
}

impl SendMessageCommand {
    /// Creates a new send message command.
    pub fn new(session_id: SessionId, question_number: u8, content: impl Into<String>) -> Self {
        Self {
            session_id,
            question_number,
            content: content.into(),
        }
    }
}

/// Errors that can occur when sending a message.
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// Message content is empty or whitespace only.
    #[error("Validation error: message content cannot be empty")]
    EmptyContent,

    /// No conversation was started for this session and item.
    #[error("Question {question_number} has not been started for this session")]
    QuestionNotStarted { question_number: u8 },

    /// Conversation store failure.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<ConversationStoreError> for SendMessageError {
    fn from(err: ConversationStoreError) -> Self {
        SendMessageError::StorageError(err.to_string())
    }
}

/// Result of processing one parent utterance.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    /// Message to show the parent.
    pub bot_response: String,
    /// True once the question has been closed, answered or not.
    pub is_answer_complete: bool,
    /// The answer recorded for this item, when one was extracted.
    pub recorded_answer: Option<RecordedAnswer>,
    /// Confidence the extractor reported for the recorded answer.
    pub extraction_confidence: Option<f32>,
    /// The item to start next, present whenever this one just closed.
    pub next_question_number: Option<u8>,
    /// Transcript after this turn, for clients that render the full chat.
    pub history: Vec<Turn>,
}

/// Handler for SendMessage commands.
pub struct SendMessageHandler<S, U>
where
    S: ConversationStore,
    U: Understanding,
{
    store: Arc<S>,
    nlu: Arc<U>,
    limits: TurnLimits,
}

impl<S, U> SendMessageHandler<S, U>
where
    S: ConversationStore,
    U: Understanding,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(store: Arc<S>, nlu: Arc<U>, limits: TurnLimits) -> Self {
        Self { store, nlu, limits }
    }

    /// Handles a send message command.
    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        let content = cmd.content.trim();
        if content.is_empty() {
            return Err(SendMessageError::EmptyContent);
        }

        let key = ChatKey::new(cmd.session_id, cmd.question_number);
        let mut state = match self.store.load(key).await {
            Ok(state) => state,
            Err(ConversationStoreError::NotFound(_)) => {
                return Err(SendMessageError::QuestionNotStarted {
                    question_number: cmd.question_number,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let was_complete = state.is_answer_complete;
        if !was_complete {
            state.set_current_message(content);
        }

        let machine = DialogueMachine::with_limits(self.nlu.as_ref(), self.limits);
        let result = machine.drive(&mut state).await;
        self.store.save(key, &state).await?;

        let just_closed =
            !was_complete && !matches!(result.outcome, TurnOutcome::AwaitingInput);

        let recorded_answer = match result.outcome {
            TurnOutcome::Completed { option, .. } if just_closed => {
                let label = state
                    .options
                    .iter()
                    .find(|o| o.value == option)
                    .map(|o| o.label.clone())
                    .unwrap_or_default();
                Some(RecordedAnswer::new(state.question_number, option, label))
            }
            _ => None,
        };

        if just_closed {
            info!(
                %key,
                answered = recorded_answer.is_some(),
                "question conversation closed"
            );
        }

        Ok(SendMessageResult {
            bot_response: result.bot_response,
            is_answer_complete: state.is_answer_complete,
            extraction_confidence: match result.outcome {
                TurnOutcome::Completed { confidence, .. } if just_closed => Some(confidence),
                _ => None,
            },
            recorded_answer,
            // Advances to 11 after the last item; callers treat that as the
            // end of the questionnaire.
            next_question_number: just_closed.then_some(state.question_number + 1),
            history: state.conversation_history,
        })
    }
}
