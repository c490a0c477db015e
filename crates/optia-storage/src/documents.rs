use std::collections::BTreeMap;
use std::sync::Arc;

use optia_core::keys;
use optia_core::keywords::KeywordMatch;
use optia_core::models::message::DocumentRef;
use tracing::warn;

use crate::blob::BlobStore;
use crate::error::StorageError;

/// Where a guide document can be downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    pub url: String,
    pub filename: String,
}

/// Finds guide documents by id prefix in the documents bucket.
#[derive(Clone)]
pub struct DocumentResolver {
    store: Arc<dyn BlobStore>,
}

impl DocumentResolver {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Locate the first document whose key starts with `guide_id`.
    ///
    /// Storage failures are logged and reported as "no document", so a broken
    /// listing never fails the enclosing request.
    pub async fn resolve(&self, guide_id: &str) -> Option<DocumentLocation> {
        match self.try_resolve(guide_id).await {
            Ok(location) => location,
            Err(e) => {
                warn!(guide = guide_id, error = %e, "document lookup failed");
                None
            }
        }
    }

    async fn try_resolve(&self, guide_id: &str) -> Result<Option<DocumentLocation>, StorageError> {
        let names = self.store.list(guide_id).await?;
        let Some(key) = names.first() else {
            return Ok(None);
        };

        let url = self.store.url(key).await?;
        Ok(Some(DocumentLocation {
            url,
            filename: keys::filename(key).to_string(),
        }))
    }

    /// Resolve a document for each matched keyword, in keyword order. Keywords
    /// whose guide has no document are dropped.
    pub async fn resolve_matches(&self, matches: &BTreeMap<String, KeywordMatch>) -> Vec<DocumentRef> {
        let mut documents = Vec::new();
        for (keyword, found) in matches {
            if let Some(location) = self.resolve(&found.guide).await {
                documents.push(DocumentRef {
                    keyword: keyword.clone(),
                    guide: found.guide.clone(),
                    description: found.description.clone(),
                    url: location.url,
                    filename: location.filename,
                });
            }
        }
        documents
    }
}
