//! Runtime configuration, read from environment variables.

use std::str::FromStr;
use std::time::Duration;

use optia_completion::azure::AzureOpenAiConfig;
use optia_completion::params::{GenerationParams, Grounding};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("provider-side retrieval requires the azure_openai completion provider")]
    GroundingUnsupported,
}

/// Which completion provider answers questions.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    AzureOpenAi(AzureOpenAiConfig),
    Bedrock { model_id: String },
}

/// How replies are grounded in the guide documents. Exactly one strategy is
/// active per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retrieval {
    /// Match question keywords locally and append links to guide documents.
    Keywords,
    /// Let the completion provider search the index itself.
    Provider,
    Disabled,
}

impl FromStr for Retrieval {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keywords" => Ok(Retrieval::Keywords),
            "provider" => Ok(Retrieval::Provider),
            "none" => Ok(Retrieval::Disabled),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub chat_bucket: String,
    pub documents_bucket: String,
    pub keywords_key: String,
    pub document_url_ttl: Duration,
    pub provider: ProviderConfig,
    pub retrieval: Retrieval,
    /// Sampling settings; carries the search index when retrieval is
    /// delegated to the provider.
    pub params: GenerationParams,
    /// Include error details in error responses.
    pub development: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let provider = match var("OPTIA_COMPLETION_PROVIDER").as_deref() {
            None | Some("azure_openai") => ProviderConfig::AzureOpenAi(AzureOpenAiConfig {
                endpoint: required("AZURE_OPENAI_ENDPOINT")?,
                api_key: required("AZURE_OPENAI_KEY")?,
                deployment: required("AZURE_OPENAI_DEPLOYMENT")?,
                api_version: var("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|| "2024-02-01".to_string()),
                timeout: Duration::from_secs(parse_or(
                    "AZURE_OPENAI_TIMEOUT_SECS",
                    var("AZURE_OPENAI_TIMEOUT_SECS"),
                    120,
                )?),
            }),
            Some("bedrock") => ProviderConfig::Bedrock {
                model_id: required("OPTIA_BEDROCK_MODEL_ID")?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "OPTIA_COMPLETION_PROVIDER",
                    value: other.to_string(),
                });
            }
        };

        let retrieval = match var("OPTIA_RETRIEVAL") {
            None => Retrieval::Keywords,
            Some(value) => value.parse().map_err(|()| ConfigError::Invalid {
                name: "OPTIA_RETRIEVAL",
                value,
            })?,
        };

        let grounding = if retrieval == Retrieval::Provider {
            if !matches!(provider, ProviderConfig::AzureOpenAi(_)) {
                return Err(ConfigError::GroundingUnsupported);
            }
            Some(Grounding::new(
                required("AZURE_SEARCH_ENDPOINT")?,
                required("AZURE_SEARCH_INDEX")?,
                required("AZURE_SEARCH_KEY")?,
            ))
        } else {
            None
        };

        let defaults = GenerationParams::default();
        let params = GenerationParams {
            temperature: parse_or("OPTIA_TEMPERATURE", var("OPTIA_TEMPERATURE"), defaults.temperature)?,
            max_tokens: parse_or("OPTIA_MAX_TOKENS", var("OPTIA_MAX_TOKENS"), defaults.max_tokens)?,
            grounding,
        };

        Ok(Self {
            chat_bucket: var("OPTIA_CHAT_BUCKET").unwrap_or_else(|| "chatia".to_string()),
            documents_bucket: var("OPTIA_DOCUMENTS_BUCKET")
                .unwrap_or_else(|| "documents".to_string()),
            keywords_key: var("OPTIA_KEYWORDS_KEY")
                .unwrap_or_else(|| optia_core::keys::KEYWORDS.to_string()),
            document_url_ttl: Duration::from_secs(parse_or(
                "OPTIA_DOCUMENT_URL_TTL_SECS",
                var("OPTIA_DOCUMENT_URL_TTL_SECS"),
                3600,
            )?),
            provider,
            retrieval,
            params,
            development: var("OPTIA_ENV").as_deref() == Some("development"),
        })
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
