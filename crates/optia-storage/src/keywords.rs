use std::sync::Arc;

use optia_core::keywords::KeywordIndex;
use tokio::sync::OnceCell;
use tracing::info;

use crate::blob::BlobStore;
use crate::error::StorageError;

/// Loads the keyword index from blob storage once per process.
///
/// A successful load is cached for the lifetime of the loader and never
/// invalidated. A failed load is not cached, so the next call retries.
pub struct KeywordIndexLoader {
    store: Arc<dyn BlobStore>,
    key: String,
    index: OnceCell<Arc<KeywordIndex>>,
}

impl KeywordIndexLoader {
    pub fn new(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            index: OnceCell::new(),
        }
    }

    /// The cached index, reading it from storage on first use. A missing
    /// resource yields an empty index.
    pub async fn load(&self) -> Result<Arc<KeywordIndex>, StorageError> {
        self.index.get_or_try_init(|| self.read()).await.cloned()
    }

    async fn read(&self) -> Result<Arc<KeywordIndex>, StorageError> {
        if !self.store.exists(&self.key).await? {
            info!(key = %self.key, "keyword resource not found, using empty index");
            return Ok(Arc::new(KeywordIndex::default()));
        }

        let body = self.store.get(&self.key).await?;
        let index = KeywordIndex::parse(&String::from_utf8_lossy(&body));
        info!(key = %self.key, keywords = index.len(), "loaded keyword index");
        Ok(Arc::new(index))
    }
}
