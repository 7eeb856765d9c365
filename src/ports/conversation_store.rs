//! Conversation Store Port - Interface for persisting conversation state.
//!
//! Each question of a session has its own conversation; the store keys
//! states by (session, question number).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::assistant::ConversationState;
use crate::domain::foundation::SessionId;

/// Key identifying one question's conversation within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatKey {
    pub session_id: SessionId,
    pub question_number: u8,
}

impl ChatKey {
    pub fn new(session_id: SessionId, question_number: u8) -> Self {
        Self {
            session_id,
            question_number,
        }
    }
}

impl fmt::Display for ChatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/q{}", self.session_id, self.question_number)
    }
}

/// Errors that can occur during conversation storage operations
#[derive(Debug, thiserror::Error)]
pub enum ConversationStoreError {
    #[error("Conversation not found: {0}")]
    NotFound(ChatKey),

    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and loading per-question conversation state
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Save conversation state for a key, overwriting any existing state.
    ///
    /// # Errors
    /// Returns `ConversationStoreError` if save fails
    async fn save(&self, key: ChatKey, state: &ConversationState)
        -> Result<(), ConversationStoreError>;

    /// Load conversation state for a key.
    ///
    /// # Errors
    /// Returns `ConversationStoreError::NotFound` if no state exists
    async fn load(&self, key: ChatKey) -> Result<ConversationState, ConversationStoreError>;

    /// Check if state exists for a key.
    async fn exists(&self, key: ChatKey) -> Result<bool, ConversationStoreError>;

    /// Delete state for a key, if present.
    async fn delete(&self, key: ChatKey) -> Result<(), ConversationStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_key_displays_session_and_question() {
        let key = ChatKey::new(
            "550e8400-e29b-41d4-a716-446655440000".parse().unwrap(),
            7,
        );
        assert_eq!(
            key.to_string(),
            "550e8400-e29b-41d4-a716-446655440000/q7"
        );
    }

    #[test]
    fn not_found_error_names_the_key() {
        let key = ChatKey::new(SessionId::new(), 3);
        let err = ConversationStoreError::NotFound(key);
        assert!(err.to_string().contains("Conversation not found"));
        assert!(err.to_string().contains("/q3"));
    }

    #[test]
    fn serialization_error_displays_reason() {
        let err = ConversationStoreError::SerializationFailed("bad json".to_string());
        assert!(err.to_string().contains("serialize"));
    }
}
