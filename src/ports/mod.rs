//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Understanding` - intent classification, answer extraction, and
//!   message generation against an external NLU provider
//! - `ConversationStore` - persistence of per-question conversation state

mod conversation_store;
mod understanding;

pub use conversation_store::{ChatKey, ConversationStore, ConversationStoreError};
pub use understanding::{
    ExtractionRequest, GenerateRequest, IntentRequest, MessageVariant, NluError, Understanding,
};
