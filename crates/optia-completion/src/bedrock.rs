//! Amazon Bedrock chat completions through the Converse API.

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message as ConverseMessage,
    SystemContentBlock,
};
use optia_core::models::message::{Message, Role};
use tracing::{debug, warn};

use crate::client::{BoxFuture, CompletionClient};
use crate::error::CompletionError;
use crate::params::GenerationParams;

/// Build a Bedrock runtime client with a specific region.
pub async fn build_client_with_region(region: &str) -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await;
    Client::new(&config)
}

pub struct BedrockClient {
    client: Client,
    model_id: String,
}

impl BedrockClient {
    /// Build a client from an already loaded AWS config.
    pub fn from_config(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self::new(Client::new(config), model_id)
    }

    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    async fn converse(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, CompletionError> {
        if params.grounding.is_some() {
            return Err(CompletionError::Unsupported(
                "provider-side grounding".to_string(),
            ));
        }

        // System prompts travel separately from the conversation turns.
        let mut system = Vec::new();
        let mut turns = Vec::with_capacity(messages.len());
        for msg in messages {
            let role = match msg.role {
                Role::System => {
                    system.push(SystemContentBlock::Text(msg.content.clone()));
                    continue;
                }
                Role::User => ConversationRole::User,
                Role::Assistant => ConversationRole::Assistant,
            };
            let turn = ConverseMessage::builder()
                .role(role)
                .content(ContentBlock::Text(msg.content.clone()))
                .build()
                .map_err(|e| CompletionError::Transport(e.to_string()))?;
            turns.push(turn);
        }

        let inference = InferenceConfiguration::builder()
            .temperature(params.temperature)
            .max_tokens(i32::try_from(params.max_tokens).unwrap_or(i32::MAX))
            .build();

        debug!(model = %self.model_id, turns = turns.len(), "sending converse request");

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .set_system((!system.is_empty()).then_some(system))
            .set_messages(Some(turns))
            .inference_config(inference)
            .send()
            .await
            .map_err(|e| {
                let status = e.raw_response().map(|r| r.status().as_u16());
                let message = e.into_service_error().to_string();
                match status {
                    Some(status) => {
                        warn!(status, message = %message, "converse request failed");
                        CompletionError::Upstream { status, message }
                    }
                    None => CompletionError::Transport(message),
                }
            })?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| CompletionError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }
}

impl CompletionClient for BedrockClient {
    fn provider(&self) -> &str {
        "bedrock"
    }

    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        params: &'a GenerationParams,
    ) -> BoxFuture<'a, Result<String, CompletionError>> {
        Box::pin(self.converse(messages, params))
    }
}
