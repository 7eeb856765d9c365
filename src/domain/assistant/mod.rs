//! Assistant module - the per-question dialogue state machine.

pub mod fallback;
mod machine;
mod phase;
mod state;
mod values;

pub use machine::{DialogueMachine, TurnLimits, TurnOutcome, TurnResult};
pub use phase::DialoguePhase;
pub use state::{ConversationState, DUPLICATE_WINDOW};
pub use values::{
    AnswerExtraction, Emotion, ExtractedOption, Intent, IntentClassification, Turn, TurnRole,
};
