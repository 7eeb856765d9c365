//! JSON-file conversation store.
//!
//! Persists each question's conversation as
//! `<root>/<session_id>/q<question_number>.json`, mirroring how screening
//! sessions are archived on disk.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::assistant::ConversationState;
use crate::ports::{ChatKey, ConversationStore, ConversationStoreError};

/// File-per-conversation implementation of `ConversationStore`.
pub struct JsonFileConversationStore {
    root: PathBuf,
}

impl JsonFileConversationStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &ChatKey) -> PathBuf {
        self.root
            .join(key.session_id.to_string())
            .join(format!("q{}.json", key.question_number))
    }
}

fn io_error(e: io::Error) -> ConversationStoreError {
    ConversationStoreError::IoError(e.to_string())
}

#[async_trait]
impl ConversationStore for JsonFileConversationStore {
    async fn save(
        &self,
        key: ChatKey,
        state: &ConversationState,
    ) -> Result<(), ConversationStoreError> {
        let path = self.path_for(&key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| ConversationStoreError::SerializationFailed(e.to_string()))?;
        fs::write(&path, json).await.map_err(io_error)
    }

    async fn load(&self, key: ChatKey) -> Result<ConversationState, ConversationStoreError> {
        let path = self.path_for(&key);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConversationStoreError::NotFound(key));
            }
            Err(e) => return Err(io_error(e)),
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| ConversationStoreError::DeserializationFailed(e.to_string()))
    }

    async fn exists(&self, key: ChatKey) -> Result<bool, ConversationStoreError> {
        match fs::metadata(self.path_for(&key)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(e)),
        }
    }

    async fn delete(&self, key: ChatKey) -> Result<(), ConversationStoreError> {
        match fs::remove_file(self.path_for(&key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}

impl JsonFileConversationStore {
    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Language, SessionId};

    fn sample_state() -> ConversationState {
        let mut state = ConversationState::new(
            SessionId::new(),
            5,
            Language::Ar,
            "هل يتظاهر طفلك؟",
            vec![],
        );
        state.push_assistant_turn("مرحباً");
        state
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileConversationStore::new(dir.path());
        let state = sample_state();
        let key = ChatKey::new(state.session_id, 5);

        store.save(key, &state).await.unwrap();
        let loaded = store.load(key).await.unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn files_are_laid_out_per_session_and_question() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileConversationStore::new(dir.path());
        let state = sample_state();
        let key = ChatKey::new(state.session_id, 5);

        store.save(key, &state).await.unwrap();
        let expected = dir
            .path()
            .join(state.session_id.to_string())
            .join("q5.json");
        assert!(expected.exists());
    }

    #[tokio::test]
    async fn load_missing_returns_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileConversationStore::new(dir.path());
        let result = store.load(ChatKey::new(SessionId::new(), 1)).await;
        assert!(matches!(result, Err(ConversationStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileConversationStore::new(dir.path());
        let state = sample_state();
        let key = ChatKey::new(state.session_id, 5);

        store.save(key, &state).await.unwrap();
        store.delete(key).await.unwrap();
        store.delete(key).await.unwrap();
        assert!(!store.exists(key).await.unwrap());
    }

    #[tokio::test]
    async fn corrupt_file_reports_deserialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileConversationStore::new(dir.path());
        let key = ChatKey::new(SessionId::new(), 2);
        let path = dir.path().join(key.session_id.to_string());
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join("q2.json"), b"not json").unwrap();

        let result = store.load(key).await;
        assert!(matches!(
            result,
            Err(ConversationStoreError::DeserializationFailed(_))
        ));
    }
}
