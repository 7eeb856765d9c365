//! In-memory conversation store for tests and single-process drivers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::assistant::ConversationState;
use crate::ports::{ChatKey, ConversationStore, ConversationStoreError};

/// Mutex-guarded map implementation of `ConversationStore`.
#[derive(Default)]
pub struct InMemoryConversationStore {
    states: Mutex<HashMap<ChatKey, ConversationState>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<ChatKey, ConversationState>>, ConversationStoreError>
    {
        self.states
            .lock()
            .map_err(|_| ConversationStoreError::IoError("state lock poisoned".to_string()))
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn save(
        &self,
        key: ChatKey,
        state: &ConversationState,
    ) -> Result<(), ConversationStoreError> {
        self.lock()?.insert(key, state.clone());
        Ok(())
    }

    async fn load(&self, key: ChatKey) -> Result<ConversationState, ConversationStoreError> {
        self.lock()?
            .get(&key)
            .cloned()
            .ok_or(ConversationStoreError::NotFound(key))
    }

    async fn exists(&self, key: ChatKey) -> Result<bool, ConversationStoreError> {
        Ok(self.lock()?.contains_key(&key))
    }

    async fn delete(&self, key: ChatKey) -> Result<(), ConversationStoreError> {
        self.lock()?.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Language, SessionId};

    fn sample_state(question_number: u8) -> ConversationState {
        ConversationState::new(
            SessionId::new(),
            question_number,
            Language::En,
            "Does your child wave?",
            vec![],
        )
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let store = InMemoryConversationStore::new();
        let state = sample_state(1);
        let key = ChatKey::new(state.session_id, 1);

        store.save(key, &state).await.unwrap();
        let loaded = store.load(key).await.unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn load_missing_returns_not_found() {
        let store = InMemoryConversationStore::new();
        let key = ChatKey::new(SessionId::new(), 2);
        let result = store.load(key).await;
        assert!(matches!(result, Err(ConversationStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn exists_and_delete() {
        let store = InMemoryConversationStore::new();
        let state = sample_state(3);
        let key = ChatKey::new(state.session_id, 3);

        assert!(!store.exists(key).await.unwrap());
        store.save(key, &state).await.unwrap();
        assert!(store.exists(key).await.unwrap());
        store.delete(key).await.unwrap();
        assert!(!store.exists(key).await.unwrap());
    }

    #[tokio::test]
    async fn questions_are_stored_independently() {
        let store = InMemoryConversationStore::new();
        let session = SessionId::new();
        let mut q1 = sample_state(1);
        q1.session_id = session;
        let mut q2 = sample_state(2);
        q2.session_id = session;

        store.save(ChatKey::new(session, 1), &q1).await.unwrap();
        store.save(ChatKey::new(session, 2), &q2).await.unwrap();

        assert_eq!(store.load(ChatKey::new(session, 1)).await.unwrap().question_number, 1);
        assert_eq!(store.load(ChatKey::new(session, 2)).await.unwrap().question_number, 2);
    }
}
