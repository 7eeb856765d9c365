//! Dialogue machine - drives one question's conversation.
//!
//! The machine is a pure driver over `ConversationState`: given a state
//! (with or without a pending utterance in the mailbox) it runs phases until
//! the conversation either suspends waiting for input or terminates. All
//! provider calls go through the `Understanding` port and every failure
//! degrades to a deterministic fallback message; the parent never sees a
//! technical error.

use tracing::{debug, warn};

use super::fallback;
use super::phase::DialoguePhase;
use super::state::ConversationState;
use super::values::{AnswerExtraction, IntentClassification};
use crate::domain::foundation::StateMachine;
use crate::domain::questionnaire::AnswerValue;
use crate::ports::{
    ExtractionRequest, GenerateRequest, IntentRequest, MessageVariant, Understanding,
};

/// Caps and window sizes governing one driven turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnLimits {
    /// Failed extraction attempts before the question is given up.
    pub max_attempts: u32,
    /// Phase executions allowed in a single drive before bailing out.
    pub max_turn_steps: u32,
    /// History turns handed to the classifier and extractor.
    pub history_window: usize,
    /// History turns handed to the message generator.
    pub context_window: usize,
}

impl Default for TurnLimits {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            max_turn_steps: 25,
            history_window: 10,
            context_window: 5,
        }
    }
}

/// How a driven turn ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Suspended; the caller should collect the next parent utterance.
    AwaitingInput,
    /// An answer was extracted and the question is complete.
    Completed {
        option: AnswerValue,
        confidence: f32,
    },
    /// The question was given up after exhausting extraction attempts.
    Unanswered,
}

/// Result of driving the machine once.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub outcome: TurnOutcome,
    /// The message to show the parent for this turn.
    pub bot_response: String,
}

/// Driver for the per-question dialogue.
pub struct DialogueMachine<'a, U: Understanding + ?Sized> {
    nlu: &'a U,
    limits: TurnLimits,
}

impl<'a, U: Understanding + ?Sized> DialogueMachine<'a, U> {
    pub fn new(nlu: &'a U) -> Self {
        Self {
            nlu,
            limits: TurnLimits::default(),
        }
    }

    pub fn with_limits(nlu: &'a U, limits: TurnLimits) -> Self {
        Self { nlu, limits }
    }

    /// Runs phases until the conversation suspends or terminates.
    ///
    /// On a fresh state this produces the welcome message and suspends; with
    /// an utterance in the mailbox it processes that utterance. Driving an
    /// already-completed state is a no-op that re-reports the outcome.
    pub async fn drive(&self, state: &mut ConversationState) -> TurnResult {
        if state.is_answer_complete {
            return TurnResult {
                outcome: self.completed_outcome(state),
                bot_response: state
                    .last_assistant_content()
                    .unwrap_or_default()
                    .to_string(),
            };
        }

        let mut phase = DialoguePhase::Welcome;
        let mut steps = 0u32;
        let mut last_response: Option<String> = None;

        loop {
            steps += 1;
            if steps > self.limits.max_turn_steps {
                warn!(
                    session_id = %state.session_id,
                    question = state.question_number,
                    steps,
                    "turn step cap reached, suspending"
                );
                return TurnResult {
                    outcome: TurnOutcome::AwaitingInput,
                    bot_response: self.current_response(state, last_response),
                };
            }

            debug!(
                session_id = %state.session_id,
                question = state.question_number,
                ?phase,
                "entering phase"
            );

            let next = match phase {
                DialoguePhase::Welcome => {
                    if state.conversation_history.is_empty() {
                        let message = self.welcome(state).await;
                        state.push_assistant_turn(message.clone());
                        state.clear_current_message();
                        last_response = Some(message);
                    }
                    DialoguePhase::AwaitInput
                }
                DialoguePhase::AwaitInput => {
                    if state.current_message.is_empty() {
                        return TurnResult {
                            outcome: TurnOutcome::AwaitingInput,
                            bot_response: self.current_response(state, last_response),
                        };
                    }
                    let message = state.current_message.clone();
                    state.push_user_turn(&message);
                    DialoguePhase::ClassifyIntent
                }
                DialoguePhase::ClassifyIntent => {
                    let classification = self.classify(state).await;
                    state.record_classification(&classification);
                    debug!(
                        intent = %classification.intent,
                        confidence = classification.confidence,
                        "utterance classified"
                    );
                    DialoguePhase::route(classification.intent)
                }
                DialoguePhase::ExtractAnswer => {
                    let extraction = self.extract(state).await;
                    match extraction.option.answer() {
                        Some(option) => {
                            state.complete_with_answer(
                                option,
                                extraction.confidence,
                                extraction.reasoning,
                            );
                            let ack = fallback::acknowledgment(
                                state.language,
                                state.parent_name.as_deref(),
                                option,
                            );
                            state.push_assistant_turn(ack.clone());
                            state.clear_current_message();
                            last_response = Some(ack);
                            DialoguePhase::Done
                        }
                        None => {
                            state.record_unclear_extraction(
                                extraction.confidence,
                                extraction.reasoning,
                            );
                            state.clear_current_message();
                            if state.attempt_count >= self.limits.max_attempts {
                                warn!(
                                    session_id = %state.session_id,
                                    question = state.question_number,
                                    attempts = state.attempt_count,
                                    "attempt cap reached, giving up on question"
                                );
                                state.complete_unanswered();
                                let message = fallback::unanswered(
                                    state.language,
                                    state.parent_name.as_deref(),
                                );
                                state.push_assistant_turn(message.clone());
                                last_response = Some(message);
                                DialoguePhase::Done
                            } else {
                                DialoguePhase::Clarify
                            }
                        }
                    }
                }
                DialoguePhase::Clarify | DialoguePhase::AnswerQuestion => {
                    let message = self.clarify(state).await;
                    // A regenerated clarification identical to the previous
                    // assistant turn is dropped from history to avoid loops,
                    // but still shown as the response.
                    if state.last_assistant_content() != Some(message.as_str()) {
                        state.push_assistant_turn(message.clone());
                    }
                    state.clear_current_message();
                    last_response = Some(message);
                    DialoguePhase::AwaitInput
                }
                DialoguePhase::Greet => {
                    let message = self.greet(state).await;
                    state.push_assistant_turn(message.clone());
                    state.clear_current_message();
                    last_response = Some(message);
                    DialoguePhase::AwaitInput
                }
                DialoguePhase::Redirect => {
                    let message = self.redirect(state).await;
                    state.push_assistant_turn(message.clone());
                    state.clear_current_message();
                    last_response = Some(message);
                    DialoguePhase::AwaitInput
                }
                DialoguePhase::Done => {
                    return TurnResult {
                        outcome: self.completed_outcome(state),
                        bot_response: self.current_response(state, last_response),
                    };
                }
            };

            debug_assert!(
                phase.can_transition_to(&next),
                "invalid phase transition {:?} -> {:?}",
                phase,
                next
            );
            phase = next;
        }
    }

    fn completed_outcome(&self, state: &ConversationState) -> TurnOutcome {
        match state.extracted_option.answer() {
            Some(option) => TurnOutcome::Completed {
                option,
                confidence: state.extraction_confidence,
            },
            None => TurnOutcome::Unanswered,
        }
    }

    fn current_response(&self, state: &ConversationState, last_response: Option<String>) -> String {
        last_response.unwrap_or_else(|| {
            state
                .last_assistant_content()
                .unwrap_or_default()
                .to_string()
        })
    }

    fn example_a(&self, state: &ConversationState) -> String {
        state
            .options
            .first()
            .map(|o| o.example.clone())
            .unwrap_or_default()
    }

    fn example_e(&self, state: &ConversationState) -> String {
        state
            .options
            .last()
            .map(|o| o.example.clone())
            .unwrap_or_default()
    }

    async fn welcome(&self, state: &ConversationState) -> String {
        let request = GenerateRequest::new(
            MessageVariant::Welcome,
            state.language,
            state.question_number,
        )
        .with_question_text(state.question_text.clone())
        .with_parent_name(state.parent_name.clone())
        .with_child_name(state.child_name.clone())
        .with_examples(self.example_a(state), self.example_e(state));

        self.generate_or(request, || {
            fallback::welcome(
                state.language,
                state.parent_name.as_deref(),
                state.question_number,
                &state.question_text,
                &self.example_a(state),
                &self.example_e(state),
            )
        })
        .await
    }

    async fn classify(&self, state: &ConversationState) -> IntentClassification {
        let request = IntentRequest::new(
            state.current_message.clone(),
            state.question_number,
            state.language,
        )
        .with_question_text(state.question_text.clone())
        .with_history(state.recent_turns(self.limits.history_window).to_vec());

        match self.nlu.classify_intent(request).await {
            Ok(classification) => classification,
            Err(error) => {
                warn!(%error, "intent classification failed, assuming answer attempt");
                IntentClassification::fallback()
            }
        }
    }

    async fn extract(&self, state: &ConversationState) -> AnswerExtraction {
        let request = ExtractionRequest::new(
            state.current_message.clone(),
            state.question_text.clone(),
            state.options.clone(),
            state.language,
        )
        .with_history(state.recent_turns(self.limits.history_window).to_vec());

        match self.nlu.extract_answer(request).await {
            Ok(extraction) => extraction,
            Err(error) => {
                warn!(%error, "answer extraction failed, treating as unclear");
                AnswerExtraction::fallback()
            }
        }
    }

    async fn clarify(&self, state: &ConversationState) -> String {
        let request = GenerateRequest::new(
            MessageVariant::Clarification,
            state.language,
            state.question_number,
        )
        .with_question_text(state.question_text.clone())
        .with_utterance(state.current_message.clone())
        .with_parent_name(state.parent_name.clone())
        .with_child_name(state.child_name.clone())
        .with_examples(self.example_a(state), String::new())
        .with_history(state.recent_turns(self.limits.context_window).to_vec());

        self.generate_or(request, || {
            fallback::clarification(state.language, &state.question_text)
        })
        .await
    }

    async fn greet(&self, state: &ConversationState) -> String {
        let request = GenerateRequest::new(
            MessageVariant::Greeting,
            state.language,
            state.question_number,
        )
        .with_question_text(state.question_text.clone())
        .with_utterance(state.current_message.clone())
        .with_parent_name(state.parent_name.clone())
        .with_child_name(state.child_name.clone())
        .with_examples(self.example_a(state), String::new());

        self.generate_or(request, || {
            fallback::greeting(
                state.language,
                state.parent_name.as_deref(),
                &state.question_text,
                &self.example_a(state),
            )
        })
        .await
    }

    async fn redirect(&self, state: &ConversationState) -> String {
        let request = GenerateRequest::new(
            MessageVariant::Redirect,
            state.language,
            state.question_number,
        )
        .with_question_text(state.question_text.clone())
        .with_utterance(state.current_message.clone())
        .with_parent_name(state.parent_name.clone())
        .with_child_name(state.child_name.clone())
        .with_examples(self.example_a(state), String::new())
        .with_unrelated_count(state.unrelated_count)
        .with_history(state.recent_turns(self.limits.context_window).to_vec());

        self.generate_or(request, || {
            fallback::redirect(
                state.language,
                state.parent_name.as_deref(),
                &state.question_text,
                &self.example_a(state),
            )
        })
        .await
    }

    /// Runs the generator, substituting the fallback on error or empty output.
    async fn generate_or(
        &self,
        request: GenerateRequest,
        fallback_fn: impl FnOnce() -> String,
    ) -> String {
        match self.nlu.generate_message(request).await {
            Ok(message) if !message.trim().is_empty() => message,
            Ok(_) => {
                warn!("generator returned empty message, using fallback");
                fallback_fn()
            }
            Err(error) => {
                warn!(%error, "message generation failed, using fallback");
                fallback_fn()
            }
        }
    }
}
