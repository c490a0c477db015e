use std::sync::Arc;

use optia_completion::client::CompletionClient;
use optia_completion::params::GenerationParams;
use optia_storage::blob::BlobStore;
use optia_storage::documents::DocumentResolver;
use optia_storage::keywords::KeywordIndexLoader;
use optia_storage::transcript::TranscriptStore;

use crate::config::Retrieval;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub transcripts: TranscriptStore,
    pub documents: DocumentResolver,
    pub keywords: Arc<KeywordIndexLoader>,
    pub completion: Arc<dyn CompletionClient>,
    pub params: Arc<GenerationParams>,
    pub retrieval: Retrieval,
    pub expose_error_detail: bool,
}

impl AppState {
    /// Wire the handler's collaborators. Transcripts and the keyword resource
    /// live in `chat_bucket`; guide documents in `documents_bucket`.
    pub fn new(
        chat_bucket: Arc<dyn BlobStore>,
        documents_bucket: Arc<dyn BlobStore>,
        keywords_key: &str,
        completion: Arc<dyn CompletionClient>,
        params: GenerationParams,
        retrieval: Retrieval,
    ) -> Self {
        Self {
            transcripts: TranscriptStore::new(chat_bucket.clone()),
            documents: DocumentResolver::new(documents_bucket),
            keywords: Arc::new(KeywordIndexLoader::new(chat_bucket, keywords_key)),
            completion,
            params: Arc::new(params),
            retrieval,
            expose_error_detail: false,
        }
    }

    pub fn with_error_detail(mut self, expose: bool) -> Self {
        self.expose_error_detail = expose;
        self
    }
}
