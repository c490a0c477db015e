//! Storage key conventions and identifier validation.
//!
//! Pure string functions with no storage SDK dependency. These define where
//! transcripts and the keyword resource live in the chat bucket.

use crate::error::CoreError;

/// Key of the keyword/description resource in the chat bucket.
pub const KEYWORDS: &str = "names/key-words.txt";

pub const DEFAULT_USER_ID: &str = "default-user";

const MAX_ID_LEN: usize = 128;

/// Key of the transcript for one user's conversation.
pub fn transcript(user_id: &str, conversation_id: &str) -> String {
    format!("{user_id}/{conversation_id}.json")
}

/// Last `/`-separated segment of a key.
pub fn filename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Validate a client-supplied conversation id.
///
/// Accepts 1 to 128 characters of `[A-Za-z0-9_-]`. The literal strings
/// `undefined` and `null`, which browsers send for unset variables, are
/// rejected.
pub fn validate_conversation_id(id: &str) -> Result<&str, CoreError> {
    let well_formed = !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id != "undefined"
        && id != "null"
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if well_formed {
        Ok(id)
    } else {
        Err(CoreError::InvalidId {
            kind: "conversation id",
            value: id.to_string(),
        })
    }
}

/// Validate a client-supplied user id: 1 to 128 characters of
/// `[A-Za-z0-9@._-]`, and never `.` or `..`.
pub fn validate_user_id(id: &str) -> Result<&str, CoreError> {
    let well_formed = !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id != "."
        && id != ".."
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '-'));

    if well_formed {
        Ok(id)
    } else {
        Err(CoreError::InvalidId {
            kind: "user id",
            value: id.to_string(),
        })
    }
}

/// A fresh conversation id.
pub fn new_conversation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
