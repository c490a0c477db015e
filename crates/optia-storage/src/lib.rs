//! optia-storage
//!
//! Blob storage for transcripts, the keyword resource and guide documents.
//! S3 access is a thin wrapper around the AWS S3 SDK, exposed to the rest of
//! the system through the [`blob::BlobStore`] trait.

pub mod blob;
pub mod client;
pub mod documents;
pub mod error;
pub mod keywords;
pub mod memory;
pub mod objects;
pub mod transcript;
