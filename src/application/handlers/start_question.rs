//! StartQuestion command handler.
//!
//! Opens (or resumes) the conversation for a single questionnaire item and
//! produces the opening assistant message.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::assistant::{ConversationState, DialogueMachine, TurnLimits, TurnOutcome};
use crate::domain::foundation::{Language, SessionId};
use crate::domain::questionnaire::{personalize, QuestionBank};
use crate::ports::{ChatKey, ConversationStore, ConversationStoreError, Understanding};

/// Command to begin a questionnaire item for a session.
#[derive(Debug, Clone)]
pub struct StartQuestionCommand {
    /// The screening session this question belongs to.
    pub session_id: SessionId,
    /// Questionnaire item number (1 through 10).
    pub question_number: u8,
    /// Language the conversation is held in.
    pub language: Language,
    /// Parent's name, used in generated messages when known.
    pub parent_name: Option<String>,
    /// Child's name, substituted into question texts when known.
    pub child_name: Option<String>,
}

impl StartQuestionCommand {
    /// Creates a command with no personalization.
    pub fn new(session_id: SessionId, question_number: u8, language: Language) -> Self {
        Self {
            session_id,
            question_number,
            language,
            parent_name: None,
            child_name: None,
        }
    }

    /// Sets the parent name.
    pub fn with_parent_name(mut self, name: impl Into<String>) -> Self {
        self.parent_name = Some(name.into());
        self
    }

    /// Sets the child name.
    pub fn with_child_name(mut self, name: impl Into<String>) -> Self {
        self.child_name = Some(name.into());
        self
    }
}

/// Errors that can occur when starting a question.
#[derive(Debug, Error)]
pub enum StartQuestionError {
    /// The questionnaire has no item with this number.
    #[error("Question not found: {0}")]
    QuestionNotFound(u8),

    /// Conversation store failure.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<ConversationStoreError> for StartQuestionError {
    fn from(err: ConversationStoreError) -> Self {
        StartQuestionError::StorageError(err.to_string())
    }
}

/// Result of starting a question.
#[derive(Debug, Clone)]
pub struct StartQuestionResult {
    /// Message to show the parent.
    pub bot_response: String,
    /// The item that was started.
    pub question_number: u8,
    /// Personalized question text for display.
    pub question_text: String,
    /// True when a resumed conversation had already recorded an answer.
    pub is_answer_complete: bool,
}

/// Handler for StartQuestion commands.
pub struct StartQuestionHandler<S, U>
where
    S: ConversationStore,
    U: Understanding,
{
    store: Arc<S>,
    nlu: Arc<U>,
    limits: TurnLimits,
}

impl<S, U> StartQuestionHandler<S, U>
where
    S: ConversationStore,
    U: Understanding,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(store: Arc<S>, nlu: Arc<U>, limits: TurnLimits) -> Self {
        Self { store, nlu, limits }
    }

    /// Handles a start question command.
    ///
    /// If a conversation already exists for this session and item it is
    /// resumed rather than restarted; otherwise a fresh state is built from
    /// the question bank and the welcome message is produced.
    pub async fn handle(
        &self,
        cmd: StartQuestionCommand,
    ) -> Result<StartQuestionResult, StartQuestionError> {
        let question = QuestionBank::get(cmd.question_number)
            .ok_or(StartQuestionError::QuestionNotFound(cmd.question_number))?;

        let key = ChatKey::new(cmd.session_id, cmd.question_number);
        let mut state = if self.store.exists(key).await? {
            info!(%key, "resuming question conversation");
            self.store.load(key).await?
        } else {
            let text = personalize(
                question.text(cmd.language),
                cmd.child_name.as_deref(),
                cmd.language,
            );
            let options = question.options_in(cmd.language, cmd.child_name.as_deref());
            let mut state = ConversationState::new(
                cmd.session_id,
                cmd.question_number,
                cmd.language,
                text,
                options,
            );
            if let Some(name) = cmd.parent_name {
                state = state.with_parent_name(name);
            }
            if let Some(name) = cmd.child_name {
                state = state.with_child_name(name);
            }
            info!(%key, "starting question conversation");
            state
        };

        let machine = DialogueMachine::with_limits(self.nlu.as_ref(), self.limits);
        let result = machine.drive(&mut state).await;
        self.store.save(key, &state).await?;

        Ok(StartQuestionResult {
            bot_response: result.bot_response,
            question_number: state.question_number,
            question_text: state.question_text.clone(),
            is_answer_complete: !matches!(result.outcome, TurnOutcome::AwaitingInput),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::nlu::MockUnderstanding;
    use crate::adapters::storage::InMemoryConversationStore;

    fn handler(
        nlu: MockUnderstanding,
    ) -> StartQuestionHandler<InMemoryConversationStore, MockUnderstanding> {
        StartQuestionHandler::new(
            Arc::new(InMemoryConversationStore::new()),
            Arc::new(nlu),
            TurnLimits::default(),
        )
    }

    #[tokio::test]
    async fn starting_a_question_produces_a_welcome() {
        let nlu = MockUnderstanding::new().with_message("Welcome! Let's begin.");
        let handler = handler(nlu);

        let result = handler
            .handle(StartQuestionCommand::new(SessionId::new(), 1, Language::En))
            .await
            .unwrap();

        assert_eq!(result.bot_response, "Welcome! Let's begin.");
        assert_eq!(result.question_number, 1);
        assert!(!result.is_answer_complete);
    }

    #[tokio::test]
    async fn unknown_question_number_is_rejected() {
        let handler = handler(MockUnderstanding::new());
        let result = handler
            .handle(StartQuestionCommand::new(SessionId::new(), 11, Language::En))
            .await;
        assert!(matches!(
            result,
            Err(StartQuestionError::QuestionNotFound(11))
        ));
    }

    #[tokio::test]
    async fn option_examples_are_personalized_with_child_name() {
        let store = Arc::new(InMemoryConversationStore::new());
        let handler = StartQuestionHandler::new(
            Arc::clone(&store),
            Arc::new(MockUnderstanding::new()),
            TurnLimits::default(),
        );

        let session = SessionId::new();
        handler
            .handle(
                StartQuestionCommand::new(session, 1, Language::En).with_child_name("Sara"),
            )
            .await
            .unwrap();

        let state = store.load(ChatKey::new(session, 1)).await.unwrap();
        assert!(state.options.iter().all(|o| !o.example.contains("[child_name]")));
        assert!(state.options.iter().any(|o| o.example.contains("Sara")));
        assert_eq!(state.child_name.as_deref(), Some("Sara"));
    }

    #[tokio::test]
    async fn restarting_resumes_without_a_second_welcome() {
        let store = Arc::new(InMemoryConversationStore::new());
        let nlu = Arc::new(MockUnderstanding::new().with_message("Welcome!"));
        let handler =
            StartQuestionHandler::new(Arc::clone(&store), Arc::clone(&nlu), TurnLimits::default());

        let session = SessionId::new();
        handler
            .handle(StartQuestionCommand::new(session, 2, Language::En))
            .await
            .unwrap();
        handler
            .handle(StartQuestionCommand::new(session, 2, Language::En))
            .await
            .unwrap();

        // Only the first start generates a welcome.
        let welcome_calls = nlu
            .generate_calls()
            .iter()
            .filter(|r| r.variant == crate::ports::MessageVariant::Welcome)
            .count();
        assert_eq!(welcome_calls, 1);

        let state = store
            .load(ChatKey::new(session, 2))
            .await
            .unwrap();
        assert_eq!(state.conversation_history.len(), 1);
    }

    #[tokio::test]
    async fn arabic_question_uses_arabic_text() {
        let handler = handler(MockUnderstanding::new());
        let result = handler
            .handle(StartQuestionCommand::new(SessionId::new(), 1, Language::Ar))
            .await
            .unwrap();
        assert!(result.question_text.contains("طفلك"));
    }
}
