use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use aws_sdk_s3::Client;

use crate::error::StorageError;
use crate::objects;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A flat namespace of blobs, i.e. one bucket or container.
///
/// Methods return boxed futures for dyn compatibility.
pub trait BlobStore: Send + Sync {
    fn exists<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<bool, StorageError>>;

    /// Read a blob. Fails with `StorageError::NotFound` if absent.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>>;

    /// Write a blob, replacing any previous content.
    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Keys starting with `prefix`, in the backend's listing order.
    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>>;

    /// A URL a browser can fetch the blob from.
    fn url<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<String, StorageError>>;
}

/// One S3 bucket. Download URLs are presigned GET URLs.
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    url_ttl: Duration,
}

impl S3BlobStore {
    pub fn new(client: Client, bucket: impl Into<String>, url_ttl: Duration) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            url_ttl,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl BlobStore for S3BlobStore {
    fn exists<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<bool, StorageError>> {
        Box::pin(objects::object_exists(&self.client, &self.bucket, key))
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>> {
        Box::pin(objects::get_object(&self.client, &self.bucket, key))
    }

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(objects::put_object(
            &self.client,
            &self.bucket,
            key,
            body,
            content_type,
        ))
    }

    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(objects::list_objects(&self.client, &self.bucket, prefix))
    }

    fn url<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(objects::presign_get(
            &self.client,
            &self.bucket,
            key,
            self.url_ttl,
        ))
    }
}
