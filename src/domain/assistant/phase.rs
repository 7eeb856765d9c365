//! Dialogue phases and their transition rules.

use serde::{Deserialize, Serialize};

use super::values::Intent;
use crate::domain::foundation::StateMachine;

/// Processing phase of the per-question dialogue machine.
///
/// `AwaitInput` is the only phase at which the machine suspends back to the
/// caller; `Done` is the only terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialoguePhase {
    Welcome,
    AwaitInput,
    ClassifyIntent,
    ExtractAnswer,
    Clarify,
    AnswerQuestion,
    Greet,
    Redirect,
    Done,
}

impl DialoguePhase {
    /// Routes a classified intent to its handler phase.
    ///
    /// Anything without a dedicated handler (skip, restart, refusal, ...)
    /// routes to clarification, which restates the question.
    pub fn route(intent: Intent) -> Self {
        match intent {
            Intent::Answering => DialoguePhase::ExtractAnswer,
            Intent::Clarification => DialoguePhase::Clarify,
            Intent::AskingQuestion | Intent::QuestionRelatedQuery => DialoguePhase::AnswerQuestion,
            Intent::Greeting => DialoguePhase::Greet,
            Intent::OffTopic => DialoguePhase::Redirect,
            Intent::Skip
            | Intent::Restart
            | Intent::Finish
            | Intent::Exit
            | Intent::IncompleteAnswer
            | Intent::WrongFormat
            | Intent::Refusal
            | Intent::Other => DialoguePhase::Clarify,
        }
    }
}

impl StateMachine for DialoguePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialoguePhase::*;
        matches!(
            (self, target),
            (Welcome, AwaitInput)
                | (AwaitInput, ClassifyIntent)
                | (ClassifyIntent, ExtractAnswer)
                | (ClassifyIntent, Clarify)
                | (ClassifyIntent, AnswerQuestion)
                | (ClassifyIntent, Greet)
                | (ClassifyIntent, Redirect)
                | (ExtractAnswer, Done)
                | (ExtractAnswer, Clarify)
                | (Clarify, AwaitInput)
                | (AnswerQuestion, AwaitInput)
                | (Greet, AwaitInput)
                | (Redirect, AwaitInput)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialoguePhase::*;
        match self {
            Welcome => vec![AwaitInput],
            AwaitInput => vec![ClassifyIntent],
            ClassifyIntent => vec![ExtractAnswer, Clarify, AnswerQuestion, Greet, Redirect],
            ExtractAnswer => vec![Done, Clarify],
            Clarify | AnswerQuestion | Greet | Redirect => vec![AwaitInput],
            Done => vec![],
        }
    }
}
