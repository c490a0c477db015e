use serde::{Deserialize, Serialize};

/// Sampling settings sent with every completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Provider-side retrieval. When set, the provider searches the index
    /// itself and grounds its answer in the results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding: Option<Grounding>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 800,
            grounding: None,
        }
    }
}

/// Connection details of the search index used for provider-side grounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grounding {
    pub endpoint: String,
    pub index_name: String,
    pub api_key: String,
    /// Restrict answers to the retrieved documents.
    pub in_scope: bool,
    /// How aggressively irrelevant documents are filtered, 1 to 5.
    pub strictness: u8,
    pub top_n_documents: u8,
}

impl Grounding {
    pub fn new(
        endpoint: impl Into<String>,
        index_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            index_name: index_name.into(),
            api_key: api_key.into(),
            in_scope: true,
            strictness: 3,
            top_n_documents: 5,
        }
    }
}
