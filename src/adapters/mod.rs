//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `nlu` - Understanding providers (OpenAI-compatible HTTP, mock)
//! - `storage` - Conversation state persistence (JSON files, in-memory)

pub mod nlu;
pub mod storage;
