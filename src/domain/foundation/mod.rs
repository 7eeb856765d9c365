//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Q-CHAT assistant domain.

mod errors;
mod ids;
mod language;
mod state_machine;

pub use errors::ValidationError;
pub use ids::SessionId;
pub use language::Language;
pub use state_machine::StateMachine;
