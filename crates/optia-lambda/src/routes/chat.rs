//! The chat endpoint.
//!
//! One route serves two actions. A body of `{"action": "load_chat"}` returns a
//! stored conversation; any other body is a question, answered by the
//! completion provider and appended to the conversation's transcript.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use optia_core::annotate::annotate;
use optia_core::keys;
use optia_core::models::message::{DocumentRef, Message};
use optia_core::prompt::{self, ResponseStyle};
use optia_storage::error::StorageError;

use crate::config::Retrieval;
use crate::error::ApiError;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

const LOAD_CHAT: &str = "load_chat";

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    #[serde(rename = "chatId")]
    pub chat_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadChatResponse {
    pub history: Vec<Message>,
    pub chat_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub response: String,
    pub chat_id: String,
    pub history: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<DocumentRef>>,
}

/// CORS preflight. The CORS headers themselves are added by the router.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Handle a `GET` or `POST` to the chat endpoint.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ChatQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let result = match query {
        Ok(Query(query)) => dispatch(&state, &headers, query, &body).await,
        Err(rejection) => Err(ApiError::Input(rejection.body_text())),
    };
    match result {
        Ok(response) => response,
        Err(e) => e.into_response_with_detail(state.expose_error_detail),
    }
}

async fn dispatch(
    state: &AppState,
    headers: &HeaderMap,
    query: ChatQuery,
    body: &[u8],
) -> Result<Response, ApiError> {
    // A missing or unparseable body is treated like an empty object.
    let request: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    // An empty `chatId` counts as absent.
    let chat_id = query.chat_id.filter(|id| !id.trim().is_empty());

    if request.get("action").and_then(Value::as_str) == Some(LOAD_CHAT) {
        let user_id = user_id(headers)?;
        let loaded = load_chat(state, &user_id, chat_id.as_deref()).await?;
        return Ok(Json(loaded).into_response());
    }

    let question = match request.get("question") {
        Some(Value::String(q)) if !q.trim().is_empty() => q.clone(),
        _ => return Err(ApiError::Input("El texto proporcionado no es válido".to_string())),
    };
    let style = ResponseStyle::from_name(request.get("style").and_then(Value::as_str));
    let user_id = user_id(headers)?;

    let answered = ask(state, &user_id, chat_id, question, style).await?;
    Ok(Json(answered).into_response())
}

/// The caller's user id from the `x-user-id` header, or the shared default.
fn user_id(headers: &HeaderMap) -> Result<String, ApiError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(keys::DEFAULT_USER_ID.to_string());
    };
    let value = value
        .to_str()
        .map_err(|_| ApiError::Input(format!("{USER_ID_HEADER} must be visible ASCII")))?
        .trim();
    if value.is_empty() {
        return Ok(keys::DEFAULT_USER_ID.to_string());
    }
    Ok(keys::validate_user_id(value)?.to_string())
}

async fn load_chat(
    state: &AppState,
    user_id: &str,
    chat_id: Option<&str>,
) -> Result<LoadChatResponse, ApiError> {
    let chat_id =
        chat_id.ok_or_else(|| ApiError::Input("ID de chat no proporcionado".to_string()))?;
    let chat_id = keys::validate_conversation_id(chat_id)?;

    let history = match state.transcripts.load(user_id, chat_id).await {
        Ok(history) => history,
        Err(StorageError::NotFound { .. }) => {
            return Err(ApiError::NotFound(format!("Chat {chat_id} no encontrado")));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user = user_id, chat_id, messages = history.len(), "loaded chat");

    Ok(LoadChatResponse {
        history,
        chat_id: chat_id.to_string(),
    })
}

async fn ask(
    state: &AppState,
    user_id: &str,
    chat_id: Option<String>,
    question: String,
    style: ResponseStyle,
) -> Result<AskResponse, ApiError> {
    let chat_id = match chat_id {
        Some(id) => keys::validate_conversation_id(&id)?.to_string(),
        None => keys::new_conversation_id(),
    };

    let (mut history, existed) = state.transcripts.load_or_default(user_id, &chat_id).await?;

    let question = Message::user(question);
    let messages = prompt::build_messages(style, !existed, &history, &question);

    // Nothing is persisted if the provider fails: the user's turn is only
    // saved together with a reply.
    let reply = state.completion.complete(&messages, &state.params).await?;

    let documents = match state.retrieval {
        Retrieval::Keywords => {
            let index = state.keywords.load().await?;
            let matches = index.match_text(&question.content);
            state.documents.resolve_matches(&matches).await
        }
        Retrieval::Provider | Retrieval::Disabled => Vec::new(),
    };

    let content = annotate(&reply, &documents);
    let answer = Message::assistant(content.clone()).with_documents(documents.clone());

    history.push(question);
    history.push(answer);
    state.transcripts.save(user_id, &chat_id, &history).await?;

    info!(
        user = user_id,
        chat_id = %chat_id,
        provider = state.completion.provider(),
        new_chat = !existed,
        documents = documents.len(),
        "answered question"
    );

    Ok(AskResponse {
        response: content,
        chat_id,
        history,
        documents: (!documents.is_empty()).then_some(documents),
    })
}
