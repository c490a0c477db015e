use aws_sdk_s3::Client;

/// Build an S3 client from the default AWS config.
pub async fn build_client() -> Client {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    Client::new(&config)
}

/// Build an S3 client from an already loaded AWS config.
pub fn from_config(config: &aws_config::SdkConfig) -> Client {
    Client::new(config)
}
