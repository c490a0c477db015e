use serde::{Deserialize, Serialize};

/// A single message in a persisted conversation transcript.
///
/// Messages are appended, never edited. The transcript's order is the order
/// in which messages were appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: jiff::Timestamp,
    /// Reference documents attached to an assistant reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<DocumentRef>>,
}

impl Message {
    /// A message stamped with the current time.
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: jiff::Timestamp::now(),
            documents: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::now(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::now(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::now(Role::Assistant, content)
    }

    /// Attach reference documents. An empty list leaves `documents` unset so
    /// the field is omitted from the persisted JSON.
    pub fn with_documents(mut self, documents: Vec<DocumentRef>) -> Self {
        self.documents = if documents.is_empty() {
            None
        } else {
            Some(documents)
        };
        self
    }
}

/// Role of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A guide document recommended alongside an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// The keyword in the question that selected this guide.
    pub keyword: String,
    /// Guide id, e.g. `G12`.
    pub guide: String,
    pub description: String,
    pub url: String,
    pub filename: String,
}
