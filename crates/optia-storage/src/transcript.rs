use std::sync::Arc;

use optia_core::keys;
use optia_core::models::message::Message;
use tracing::debug;

use crate::blob::BlobStore;
use crate::error::StorageError;

/// Persists conversation transcripts as JSON arrays, one blob per
/// `(user, conversation)` pair.
///
/// There is no locking: two requests saving the same conversation race and
/// the last write wins.
#[derive(Clone)]
pub struct TranscriptStore {
    store: Arc<dyn BlobStore>,
}

impl TranscriptStore {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    pub async fn exists(&self, user_id: &str, conversation_id: &str) -> Result<bool, StorageError> {
        self.store
            .exists(&keys::transcript(user_id, conversation_id))
            .await
    }

    /// Load a transcript. Fails with `StorageError::NotFound` if absent.
    pub async fn load(
        &self,
        user_id: &str,
        conversation_id: &str,
    ) -> Result<Vec<Message>, StorageError> {
        let key = keys::transcript(user_id, conversation_id);
        let body = self.store.get(&key).await?;
        let messages: Vec<Message> = serde_json::from_slice(&body)?;
        debug!(key = %key, messages = messages.len(), "loaded transcript");
        Ok(messages)
    }

    /// Load a transcript, or an empty one if none is stored yet. The flag
    /// reports whether a stored transcript was found.
    pub async fn load_or_default(
        &self,
        user_id: &str,
        conversation_id: &str,
    ) -> Result<(Vec<Message>, bool), StorageError> {
        if self.exists(user_id, conversation_id).await? {
            Ok((self.load(user_id, conversation_id).await?, true))
        } else {
            Ok((Vec::new(), false))
        }
    }

    /// Overwrite the stored transcript with `messages`.
    pub async fn save(
        &self,
        user_id: &str,
        conversation_id: &str,
        messages: &[Message],
    ) -> Result<(), StorageError> {
        let key = keys::transcript(user_id, conversation_id);
        let body = serde_json::to_vec(messages)?;
        self.store
            .put(&key, body, Some("application/json"))
            .await?;
        debug!(key = %key, messages = messages.len(), "saved transcript");
        Ok(())
    }
}
