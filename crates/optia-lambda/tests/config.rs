use std::collections::HashMap;
use std::time::Duration;

use optia_lambda::config::{Config, ConfigError, ProviderConfig, Retrieval};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

const AZURE: &[(&str, &str)] = &[
    ("AZURE_OPENAI_ENDPOINT", "https://optia.openai.azure.com/"),
    ("AZURE_OPENAI_KEY", "secret"),
    ("AZURE_OPENAI_DEPLOYMENT", "gpt-4o"),
];

#[test]
fn azure_defaults() {
    let config = Config::from_lookup(lookup(AZURE)).unwrap();

    assert_eq!(config.chat_bucket, "chatia");
    assert_eq!(config.documents_bucket, "documents");
    assert_eq!(config.keywords_key, "names/key-words.txt");
    assert_eq!(config.document_url_ttl, Duration::from_secs(3600));
    assert_eq!(config.retrieval, Retrieval::Keywords);
    assert_eq!(config.params.max_tokens, 800);
    assert!(config.params.grounding.is_none());
    assert!(!config.development);

    let ProviderConfig::AzureOpenAi(azure) = config.provider else {
        panic!("expected azure provider");
    };
    assert_eq!(azure.deployment, "gpt-4o");
    assert_eq!(azure.api_version, "2024-02-01");
}

#[test]
fn missing_azure_settings_fail() {
    let err = Config::from_lookup(lookup(&[("AZURE_OPENAI_KEY", "secret")])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing("AZURE_OPENAI_ENDPOINT")));
}

#[test]
fn bedrock_provider() {
    let config = Config::from_lookup(lookup(&[
        ("OPTIA_COMPLETION_PROVIDER", "bedrock"),
        ("OPTIA_BEDROCK_MODEL_ID", "us.anthropic.claude-sonnet-4-20250514-v1:0"),
        ("OPTIA_RETRIEVAL", "none"),
        ("OPTIA_ENV", "development"),
    ]))
    .unwrap();

    assert!(matches!(config.provider, ProviderConfig::Bedrock { .. }));
    assert_eq!(config.retrieval, Retrieval::Disabled);
    assert!(config.development);
}

#[test]
fn provider_retrieval_carries_grounding() {
    let mut vars = AZURE.to_vec();
    vars.extend([
        ("OPTIA_RETRIEVAL", "provider"),
        ("AZURE_SEARCH_ENDPOINT", "https://optia-search.search.windows.net"),
        ("AZURE_SEARCH_INDEX", "guias"),
        ("AZURE_SEARCH_KEY", "search-key"),
    ]);

    let config = Config::from_lookup(lookup(&vars)).unwrap();

    assert_eq!(config.retrieval, Retrieval::Provider);
    let grounding = config.params.grounding.unwrap();
    assert_eq!(grounding.index_name, "guias");
}

#[test]
fn provider_retrieval_is_rejected_for_bedrock() {
    let err = Config::from_lookup(lookup(&[
        ("OPTIA_COMPLETION_PROVIDER", "bedrock"),
        ("OPTIA_BEDROCK_MODEL_ID", "model"),
        ("OPTIA_RETRIEVAL", "provider"),
    ]))
    .unwrap_err();

    assert!(matches!(err, ConfigError::GroundingUnsupported));
}

#[test]
fn invalid_values_are_reported() {
    let mut vars = AZURE.to_vec();
    vars.push(("OPTIA_MAX_TOKENS", "lots"));
    let err = Config::from_lookup(lookup(&vars)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { name: "OPTIA_MAX_TOKENS", .. }));

    let mut vars = AZURE.to_vec();
    vars.push(("OPTIA_RETRIEVAL", "vector"));
    let err = Config::from_lookup(lookup(&vars)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { name: "OPTIA_RETRIEVAL", .. }));
}

#[test]
fn overrides_are_applied() {
    let mut vars = AZURE.to_vec();
    vars.extend([
        ("OPTIA_CHAT_BUCKET", "optia-chats"),
        ("OPTIA_TEMPERATURE", "0.2"),
        ("OPTIA_MAX_TOKENS", "1200"),
        ("OPTIA_DOCUMENT_URL_TTL_SECS", "600"),
    ]);

    let config = Config::from_lookup(lookup(&vars)).unwrap();

    assert_eq!(config.chat_bucket, "optia-chats");
    assert!((config.params.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.params.max_tokens, 1200);
    assert_eq!(config.document_url_ttl, Duration::from_secs(600));
}
