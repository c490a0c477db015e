//! In-process blob store, used for local runs and tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::Mutex;

use crate::blob::{BlobStore, BoxFuture};
use crate::error::StorageError;

/// A `BlobStore` backed by a sorted map. Listing order is key order.
#[derive(Default)]
pub struct MemoryBlobStore {
    name: String,
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
    operations: AtomicUsize,
    fail_listing: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Seed a blob without counting it as an operation.
    pub async fn insert(&self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.blobs.lock().await.insert(key.into(), body.into());
    }

    /// Raw content of a blob, without counting it as an operation.
    pub async fn snapshot(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.blobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.lock().await.is_empty()
    }

    /// Number of `BlobStore` calls served so far.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Make every later `list` call fail.
    pub fn fail_listing(&self) {
        self.fail_listing.store(true, Ordering::SeqCst);
    }

    fn record(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

impl BlobStore for MemoryBlobStore {
    fn exists<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<bool, StorageError>> {
        Box::pin(async move {
            self.record();
            Ok(self.blobs.lock().await.contains_key(key))
        })
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>> {
        Box::pin(async move {
            self.record();
            self.blobs
                .lock()
                .await
                .get(key)
                .cloned()
                .ok_or_else(|| StorageError::NotFound {
                    key: key.to_string(),
                })
        })
    }

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        _content_type: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.record();
            self.blobs.lock().await.insert(key.to_string(), body);
            Ok(())
        })
    }

    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(async move {
            self.record();
            if self.fail_listing.load(Ordering::SeqCst) {
                return Err(StorageError::ListObjects(format!(
                    "listing disabled for {}",
                    self.name
                )));
            }
            Ok(self
                .blobs
                .lock()
                .await
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect())
        })
    }

    fn url<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(async move {
            self.record();
            Ok(format!("memory://{}/{key}", self.name))
        })
    }
}
