//! Integration tests against a real S3 bucket.
//!
//! These require AWS credentials and an existing bucket named by
//! `OPTIA_TEST_BUCKET`.
//!
//! Run with: `cargo test -p optia-storage --test s3 -- --ignored`

use std::sync::Arc;
use std::time::Duration;

use optia_core::models::message::Message;
use optia_storage::blob::{BlobStore, S3BlobStore};
use optia_storage::transcript::TranscriptStore;

async fn bucket() -> S3BlobStore {
    let bucket = std::env::var("OPTIA_TEST_BUCKET").expect("OPTIA_TEST_BUCKET must be set");
    let client = optia_storage::client::build_client().await;
    S3BlobStore::new(client, bucket, Duration::from_secs(60))
}

#[tokio::test]
#[ignore]
async fn transcript_round_trip_through_s3() {
    let store = Arc::new(bucket().await);
    let transcripts = TranscriptStore::new(store.clone());
    let conversation = optia_core::keys::new_conversation_id();

    assert!(!transcripts.exists("integration", &conversation).await.unwrap());

    let messages = vec![Message::user("hola"), Message::assistant("¡Hola!")];
    transcripts
        .save("integration", &conversation, &messages)
        .await
        .unwrap();

    assert_eq!(
        transcripts.load("integration", &conversation).await.unwrap(),
        messages
    );

    let url = store
        .url(&optia_core::keys::transcript("integration", &conversation))
        .await
        .unwrap();
    assert!(url.starts_with("https://"));
}
