//! Storage Adapters
//!
//! Implementations of the ConversationStore port for persisting per-question
//! conversation state.
//!
//! ## Available Adapters
//!
//! - **JsonFileConversationStore** - Stores state as JSON files on disk
//! - **InMemoryConversationStore** - Stores state in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryConversationStore, JsonFileConversationStore};
//!
//! // Production: file-based storage
//! let store = JsonFileConversationStore::new("./data/conversations");
//!
//! // Testing: in-memory storage
//! let store = InMemoryConversationStore::new();
//! ```

mod in_memory;
mod json_file;

pub use in_memory::InMemoryConversationStore;
pub use json_file::JsonFileConversationStore;
