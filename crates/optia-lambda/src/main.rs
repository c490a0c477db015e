use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use optia_completion::azure::AzureOpenAiClient;
use optia_completion::bedrock::BedrockClient;
use optia_completion::client::CompletionClient;
use optia_lambda::config::{Config, ProviderConfig};
use optia_lambda::state::AppState;
use optia_storage::blob::{BlobStore, S3BlobStore};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;

    let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let s3 = optia_storage::client::from_config(&aws);

    let chat_bucket: Arc<dyn BlobStore> = Arc::new(S3BlobStore::new(
        s3.clone(),
        &config.chat_bucket,
        config.document_url_ttl,
    ));
    let documents_bucket: Arc<dyn BlobStore> = Arc::new(S3BlobStore::new(
        s3,
        &config.documents_bucket,
        config.document_url_ttl,
    ));

    let completion: Arc<dyn CompletionClient> = match &config.provider {
        ProviderConfig::AzureOpenAi(azure) => Arc::new(AzureOpenAiClient::new(azure.clone())?),
        ProviderConfig::Bedrock { model_id } => {
            Arc::new(BedrockClient::from_config(&aws, model_id.as_str()))
        }
    };

    tracing::info!(
        provider = completion.provider(),
        retrieval = ?config.retrieval,
        chat_bucket = %config.chat_bucket,
        documents_bucket = %config.documents_bucket,
        "starting chat relay"
    );

    let state = AppState::new(
        chat_bucket,
        documents_bucket,
        &config.keywords_key,
        completion,
        config.params.clone(),
        config.retrieval,
    )
    .with_error_detail(config.development);

    lambda_http::run(optia_lambda::router(state))
        .await
        .map_err(|e| eyre::eyre!(e))
}
