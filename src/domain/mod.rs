//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `questionnaire` - The Q-CHAT-10 question bank and scoring engine
//! - `assistant` - Per-question dialogue state machine and conversation state

pub mod assistant;
pub mod foundation;
pub mod questionnaire;
