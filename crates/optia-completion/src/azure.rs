//! Azure OpenAI chat completions.
//!
//! `POST {endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`
//! authenticated with the `api-key` header. Provider-side grounding is sent
//! as an `azure_search` entry in `data_sources`.

use std::time::Duration;

use optia_core::models::message::Message;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::{BoxFuture, CompletionClient};
use crate::error::CompletionError;
use crate::params::{GenerationParams, Grounding};

/// Fallback error text when the provider's error body has no message.
const UNKNOWN_ERROR: &str = "Error en la API";

#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub timeout: Duration,
}

pub struct AzureOpenAiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl AzureOpenAiClient {
    pub fn new(config: AzureOpenAiConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            url: completions_url(&config.endpoint, &config.deployment, &config.api_version),
            api_key: config.api_key,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, CompletionError> {
        let body = ChatRequest {
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            data_sources: params
                .grounding
                .as_ref()
                .map(|g| vec![DataSource::azure_search(g)]),
        };

        debug!(
            messages = messages.len(),
            grounded = params.grounding.is_some(),
            "sending chat completion request"
        );

        let resp = self
            .http
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&bytes)
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            warn!(status = status.as_u16(), message = %message, "chat completion failed");
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CompletionError::ResponseParse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| CompletionError::ResponseParse("no message in response".to_string()))
    }
}

impl CompletionClient for AzureOpenAiClient {
    fn provider(&self) -> &str {
        "azure_openai"
    }

    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        params: &'a GenerationParams,
    ) -> BoxFuture<'a, Result<String, CompletionError>> {
        Box::pin(self.send(messages, params))
    }
}

/// Build the deployment's chat completions URL. A trailing `/` on the
/// endpoint is ignored.
pub fn completions_url(endpoint: &str, deployment: &str, api_version: &str) -> String {
    let endpoint = endpoint.trim().trim_end_matches('/');
    format!("{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={api_version}")
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_sources: Option<Vec<DataSource<'a>>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct DataSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    parameters: SearchParameters<'a>,
}

#[derive(Serialize)]
struct SearchParameters<'a> {
    endpoint: &'a str,
    index_name: &'a str,
    authentication: SearchAuthentication<'a>,
    in_scope: bool,
    strictness: u8,
    top_n_documents: u8,
}

#[derive(Serialize)]
struct SearchAuthentication<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    key: &'a str,
}

impl<'a> DataSource<'a> {
    fn azure_search(grounding: &'a Grounding) -> Self {
        Self {
            kind: "azure_search",
            parameters: SearchParameters {
                endpoint: &grounding.endpoint,
                index_name: &grounding.index_name,
                authentication: SearchAuthentication {
                    kind: "api_key",
                    key: &grounding.api_key,
                },
                in_scope: grounding.in_scope,
                strictness: grounding.strictness,
                top_n_documents: grounding.top_n_documents,
            },
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}
